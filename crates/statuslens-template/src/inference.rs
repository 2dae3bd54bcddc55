//! Template inference from a single report.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use tracing::debug;

use crate::patterns::{detect_bullet_style, detect_date_format, match_section_header};
use crate::types::{SectionKind, Template};

/// Raw lines captured as a diagnostic sample.
pub const SAMPLE_LINES: usize = 10;

/// Header lines and per-section content found in one report.
#[derive(Debug, Default)]
pub struct SectionScan {
    /// Literal (trimmed) header lines in document order.
    pub headers: Vec<String>,
    /// Non-blank lines under each header. Sections with no content are absent.
    pub sections: BTreeMap<SectionKind, Vec<String>>,
}

/// Partition text by recognized section headers.
///
/// Lines before the first header are dropped. Blank lines are skipped.
pub fn scan_sections(text: &str) -> SectionScan {
    let mut scan = SectionScan::default();
    let mut current: Option<SectionKind> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(kind) = match_section_header(line) {
            current = Some(kind);
            scan.headers.push(line.to_string());
            continue;
        }
        if let Some(kind) = current {
            scan.sections.entry(kind).or_default().push(line.to_string());
        }
    }

    scan
}

/// Build a candidate template from one report. Nothing is persisted.
pub fn analyze_report_structure(text: &str, department: &str) -> Template {
    let scan = scan_sections(text);
    let bullet_style = detect_bullet_style(text.lines());
    let date_format = detect_date_format(text);

    let section_headers: BTreeSet<String> = scan.headers.into_iter().collect();
    let sections_found: BTreeSet<SectionKind> = scan.sections.into_keys().collect();

    debug!(
        "Inferred structure for {}: {} headers, {} sections, bullets={}, dates={}",
        department,
        section_headers.len(),
        sections_found.len(),
        bullet_style,
        date_format
    );

    Template {
        department: department.to_string(),
        section_headers,
        sections_found,
        bullet_style,
        date_format,
        required_sections: Vec::new(),
        sample_lines: text.lines().take(SAMPLE_LINES).map(String::from).collect(),
        usage_count: 1,
        last_updated: Utc::now(),
    }
}
