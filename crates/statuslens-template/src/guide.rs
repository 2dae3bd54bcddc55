//! Markdown guide describing a department's learned template.

use std::fmt::Write;

use crate::types::Template;

const GUIDE_SAMPLE_LINES: usize = 5;

pub fn generate_template_guide(template: Option<&Template>) -> String {
    let template = match template {
        Some(t) => t,
        None => return "No template defined for this department yet.".to_string(),
    };

    let mut guide = format!("# {} Report Template Guide\n\n", template.department);

    if !template.section_headers.is_empty() {
        guide.push_str("## Required Sections:\n");
        for header in &template.section_headers {
            let _ = writeln!(guide, "- {}", header);
        }
        guide.push('\n');
    }

    if template.date_format.is_known() {
        let _ = write!(
            guide,
            "## Date Format: {}\n\n",
            template.date_format.as_str().to_uppercase()
        );
    }

    if let Some(symbol) = template.bullet_style.symbol() {
        let _ = write!(guide, "## Bullet Style: {}\n\n", symbol);
    }

    if !template.sample_lines.is_empty() {
        guide.push_str("## Example Format:\n```\n");
        let sample: Vec<&str> = template
            .sample_lines
            .iter()
            .take(GUIDE_SAMPLE_LINES)
            .map(String::as_str)
            .collect();
        guide.push_str(&sample.join("\n"));
        guide.push_str("\n```\n");
    }

    guide
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::analyze_report_structure;

    #[test]
    fn test_missing_template() {
        assert_eq!(
            generate_template_guide(None),
            "No template defined for this department yet."
        );
    }

    #[test]
    fn test_full_guide() {
        let text = "Status 2024-06-01\nPlans:\n* hire\n* train\nRisks:\n* budget\nextra 1\nextra 2";
        let t = analyze_report_structure(text, "Sales");
        let guide = generate_template_guide(Some(&t));

        assert!(guide.starts_with("# Sales Report Template Guide\n\n"));
        assert!(guide.contains("## Required Sections:\n- Plans:\n- Risks:\n"));
        assert!(guide.contains("## Date Format: ISO\n"));
        assert!(guide.contains("## Bullet Style: *\n"));
        assert!(guide.ends_with("```\nStatus 2024-06-01\nPlans:\n* hire\n* train\nRisks:\n```\n"));
    }

    #[test]
    fn test_plain_text_guide_omits_unknowns() {
        let t = analyze_report_structure("just words", "Ops");
        let guide = generate_template_guide(Some(&t));
        assert!(!guide.contains("Required Sections"));
        assert!(!guide.contains("Date Format"));
        assert!(!guide.contains("Bullet Style"));
        assert!(guide.contains("just words"));
    }
}
