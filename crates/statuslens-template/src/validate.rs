//! Report validation against a department template.

use serde::{Deserialize, Serialize};

use crate::patterns::{date_pattern, line_has_any_bullet, line_has_bullet};
use crate::types::{BulletStyle, Template};

/// Points lost per missing required section.
pub const MISSING_SECTION_PENALTY: f64 = 20.0;
/// Score when every known header appears in the report.
pub const HEADER_COVERAGE_WEIGHT: f64 = 30.0;
/// Share of bulleted lines that must use the template's style.
const BULLET_CONSISTENCY: f64 = 0.5;

/// Outcome of validating one report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationVerdict {
    /// True iff no required section is missing. Warnings do not count.
    pub valid: bool,
    pub missing_sections: Vec<String>,
    pub warnings: Vec<String>,
    /// Conformance in `[0, 100]`.
    pub match_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationVerdict {
    fn no_template() -> Self {
        Self {
            valid: true,
            missing_sections: Vec::new(),
            warnings: Vec::new(),
            match_score: 100.0,
            message: Some("No template defined for this department".to_string()),
        }
    }
}

/// Validate `text` against `template`. A missing template is not a failure.
pub fn validate_report(text: &str, template: Option<&Template>) -> ValidationVerdict {
    let template = match template {
        Some(t) => t,
        None => return ValidationVerdict::no_template(),
    };
    let text_lower = text.to_lowercase();

    let missing_sections = missing_sections(&text_lower, template);

    let mut warnings = Vec::new();
    if let Some(w) = date_warning(text, template) {
        warnings.push(w);
    }
    if let Some(w) = bullet_warning(text, template) {
        warnings.push(w);
    }

    let match_score = match_score(&text_lower, template, missing_sections.len());

    ValidationVerdict {
        valid: missing_sections.is_empty(),
        missing_sections,
        warnings,
        match_score,
        message: None,
    }
}

fn missing_sections(text_lower: &str, template: &Template) -> Vec<String> {
    template
        .required_sections
        .iter()
        .filter(|s| !text_lower.contains(&s.to_lowercase()))
        .cloned()
        .collect()
}

fn date_warning(text: &str, template: &Template) -> Option<String> {
    let format = template.date_format;
    let pattern = date_pattern(format)?;
    if pattern.is_match(text) {
        None
    } else {
        Some(format!("Date format doesn't match expected {} format", format))
    }
}

fn bullet_warning(text: &str, template: &Template) -> Option<String> {
    let style = template.bullet_style;
    if style == BulletStyle::None {
        return None;
    }

    let mut expected = 0usize;
    let mut bulleted = 0usize;
    for line in text.lines() {
        if line_has_any_bullet(line) {
            bulleted += 1;
            if line_has_bullet(line, style) {
                expected += 1;
            }
        }
    }

    if bulleted > 0 && (expected as f64 / bulleted as f64) < BULLET_CONSISTENCY {
        Some(format!("Inconsistent bullet style. Expected: {}", style))
    } else {
        None
    }
}

/// Penalty score capped by header coverage, clamped to `[0, 100]`.
///
/// Coverage only ever lowers the score: a template with known headers caps a
/// report at `HEADER_COVERAGE_WEIGHT` even when nothing is missing.
pub fn match_score(text_lower: &str, template: &Template, missing: usize) -> f64 {
    let mut score = 100.0 - MISSING_SECTION_PENALTY * missing as f64;

    let headers: Vec<String> = template
        .section_headers
        .iter()
        .map(|h| h.to_lowercase())
        .collect();
    if !headers.is_empty() {
        let found = headers.iter().filter(|h| text_lower.contains(h.as_str())).count();
        let coverage = found as f64 / headers.len() as f64 * HEADER_COVERAGE_WEIGHT;
        score = score.min(coverage);
    }

    score.clamp(0.0, 100.0)
}
