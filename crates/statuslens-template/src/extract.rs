//! Structured extraction guided by a stored template.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::patterns::{date_pattern, match_canonical_header, METADATA_DATE_RE, PERCENTAGE_RE};
use crate::types::{DateFormat, SectionKind, Template};

/// Dates and percentages pulled from anywhere in the report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dates_found: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<String>,
}

/// Result of structured extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StructuredReport {
    /// Text partitioned into the template's known sections.
    Templated {
        department: String,
        sections: BTreeMap<SectionKind, Vec<String>>,
        metadata: ReportMetadata,
    },
    /// No template exists for the department.
    Generic {
        department: String,
        lines: Vec<String>,
        word_count: usize,
        has_dates: bool,
    },
}

/// Partition `text` by the template's known section names and collect metadata.
///
/// Only canonical section names (`metrics`, `## Plans:` ...) open a section
/// here; header aliases are a concern of inference, not extraction. A header
/// that repeats keeps appending to the same section.
pub fn extract_structured_data(text: &str, template: Option<&Template>) -> StructuredReport {
    let template = match template {
        Some(t) => t,
        None => return generic(text),
    };

    let known: Vec<SectionKind> = template.sections_found.iter().copied().collect();
    let mut sections: BTreeMap<SectionKind, Vec<String>> = BTreeMap::new();
    let mut current: Option<SectionKind> = None;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(kind) = match_canonical_header(line, &known) {
            current = Some(kind);
            sections.entry(kind).or_default();
            continue;
        }
        if let Some(kind) = current {
            sections.entry(kind).or_default().push(line.to_string());
        }
    }

    StructuredReport::Templated {
        department: template.department.clone(),
        sections,
        metadata: collect_metadata(text),
    }
}

fn collect_metadata(text: &str) -> ReportMetadata {
    ReportMetadata {
        dates_found: METADATA_DATE_RE
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect(),
        metrics: PERCENTAGE_RE
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect(),
    }
}

fn generic(text: &str) -> StructuredReport {
    StructuredReport::Generic {
        department: "unknown".to_string(),
        lines: text.split('\n').map(String::from).collect(),
        word_count: text.split_whitespace().count(),
        has_dates: date_pattern(DateFormat::Iso)
            .map(|re| re.is_match(text))
            .unwrap_or(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::analyze_report_structure;

    #[test]
    fn test_generic_without_template() {
        match extract_structured_data("line one\nline two 2024-02-02", None) {
            StructuredReport::Generic {
                department,
                lines,
                word_count,
                has_dates,
            } => {
                assert_eq!(department, "unknown");
                assert_eq!(lines.len(), 2);
                assert_eq!(word_count, 5);
                assert!(has_dates);
            }
            other => panic!("expected generic, got {:?}", other),
        }
    }

    #[test]
    fn test_sections_and_metadata() {
        let learned = analyze_report_structure(
            "Accomplishments\n- a\nMetrics\n- b\nRisks\n- c",
            "Eng",
        );
        let text = "Intro line\n\
                    # Accomplishments:\n\
                    - closed 12 tickets on 2024-05-01\n\
                    metrics\n\
                    - coverage 81%\n\
                    - p95 down 7.5% since 5/1/2024\n\
                    Blockers\n\
                    - still under metrics";

        let StructuredReport::Templated {
            department,
            sections,
            metadata,
        } = extract_structured_data(text, Some(&learned))
        else {
            panic!("expected templated extraction");
        };

        assert_eq!(department, "Eng");
        assert_eq!(
            sections[&SectionKind::Accomplishments],
            vec!["- closed 12 tickets on 2024-05-01"]
        );
        // "Blockers" is an alias, so its lines stay under the metrics section.
        assert_eq!(
            sections[&SectionKind::Metrics],
            vec![
                "- coverage 81%",
                "- p95 down 7.5% since 5/1/2024",
                "Blockers",
                "- still under metrics"
            ]
        );
        assert!(!sections.contains_key(&SectionKind::Risks));
        assert_eq!(metadata.dates_found, vec!["2024-05-01", "5/1/2024"]);
        assert_eq!(metadata.metrics, vec!["81%", "7.5%"]);
    }

    #[test]
    fn test_templated_serializes_section_names() {
        let learned = analyze_report_structure("Plans\n- ship", "Ops");
        let out = extract_structured_data("plans:\n- ship it", Some(&learned));
        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["sections"]["plans"][0], "- ship it");
        assert!(json["metadata"].as_object().unwrap().is_empty());
    }
}
