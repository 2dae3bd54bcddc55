//! In-memory template store with per-department merge serialization.
//!
//! The outer map lock is held only long enough to find or insert a
//! department slot. Each slot has its own mutex, so a read-merge-write for one
//! department never interleaves with another save for the same department,
//! while different departments merge independently. Readers lock the slot and
//! clone, so they always see a whole pre- or post-merge template.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use statuslens_core::{Error, Result};
use tracing::info;

use crate::types::Template;

type Slot = Arc<Mutex<Template>>;

/// Owns one template per department key (case-sensitive).
pub struct TemplateStore {
    templates: RwLock<HashMap<String, Slot>>,
}

impl TemplateStore {
    pub fn new() -> Self {
        Self {
            templates: RwLock::new(HashMap::new()),
        }
    }

    /// Rebuild a store from previously snapshotted templates.
    pub fn from_snapshot(templates: Vec<Template>) -> Self {
        let map = templates
            .into_iter()
            .map(|t| (t.department.clone(), Arc::new(Mutex::new(t))))
            .collect();
        Self {
            templates: RwLock::new(map),
        }
    }

    /// Current template for `department`, if one was ever saved.
    pub fn get(&self, department: &str) -> Option<Template> {
        let slot = self.templates.read().get(department).cloned()?;
        let template = slot.lock().clone();
        Some(template)
    }

    /// Store a candidate, or merge it into the existing template.
    ///
    /// Returns the stored template after the operation.
    pub fn save(&self, department: &str, mut candidate: Template) -> Template {
        candidate.department = department.to_string();

        let existing = self.templates.read().get(department).cloned();
        let slot = match existing {
            Some(slot) => slot,
            None => {
                let mut map = self.templates.write();
                match map.get(department) {
                    Some(slot) => slot.clone(),
                    None => {
                        candidate.usage_count = 1;
                        let stored = candidate.clone();
                        map.insert(department.to_string(), Arc::new(Mutex::new(candidate)));
                        info!("Created template for department {}", department);
                        return stored;
                    }
                }
            }
        };

        let mut template = slot.lock();
        merge(&mut template, candidate);
        info!(
            "Merged template for department {} (usage_count={})",
            department, template.usage_count
        );
        template.clone()
    }

    /// Replace the caller-configured required sections. Not a merge.
    pub fn set_required_sections(&self, department: &str, sections: Vec<String>) -> Result<Template> {
        let slot = self
            .templates
            .read()
            .get(department)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("template for department {}", department)))?;
        let mut template = slot.lock();
        template.required_sections = sections;
        Ok(template.clone())
    }

    /// Every stored template, ordered by department.
    pub fn all(&self) -> Vec<Template> {
        let slots: Vec<Slot> = self.templates.read().values().cloned().collect();
        let mut templates: Vec<Template> = slots.iter().map(|s| s.lock().clone()).collect();
        templates.sort_by(|a, b| a.department.cmp(&b.department));
        templates
    }

    pub fn len(&self) -> usize {
        self.templates.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Fold a candidate into an existing template.
///
/// Header and section sets take the union. Bullet style, date format, and
/// sample lines are replaced by the candidate's. Required sections are kept.
pub fn merge(existing: &mut Template, candidate: Template) {
    existing.section_headers.extend(candidate.section_headers);
    existing.sections_found.extend(candidate.sections_found);
    existing.bullet_style = candidate.bullet_style;
    existing.date_format = candidate.date_format;
    existing.sample_lines = candidate.sample_lines;
    existing.usage_count += 1;
    existing.last_updated = Utc::now();
}
