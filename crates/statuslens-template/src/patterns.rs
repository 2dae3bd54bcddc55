//! Detection rule tables for section headers, bullets, dates, and metadata.
//!
//! Each table is ordered: the index of a rule is its priority, and detection
//! walks the table front to back. Keeping the rules as data keeps the
//! tie-break behavior in one visible place.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{BulletStyle, DateFormat, SectionKind};

/// A tagged pattern. Position in its table is its priority.
pub struct Rule<T> {
    pub tag: T,
    pub pattern: Regex,
}

fn rule<T>(tag: T, pattern: &str) -> Rule<T> {
    Rule {
        tag,
        pattern: Regex::new(pattern).unwrap(),
    }
}

/// Header lines, matched against a trimmed line. Optional markdown `#` prefix
/// and trailing colon.
pub static SECTION_RULES: Lazy<Vec<Rule<SectionKind>>> = Lazy::new(|| {
    vec![
        rule(
            SectionKind::Accomplishments,
            r"(?i)^(?:#+\s*)?(?:accomplishments|achievements|completed|done):?$",
        ),
        rule(
            SectionKind::Challenges,
            r"(?i)^(?:#+\s*)?(?:challenges|problems|issues|blockers):?$",
        ),
        rule(SectionKind::Plans, r"(?i)^(?:#+\s*)?(?:plans?|next|tomorrow|future):?$"),
        rule(SectionKind::Metrics, r"(?i)^(?:#+\s*)?(?:metrics|kpis|stats):?$"),
        rule(SectionKind::Risks, r"(?i)^(?:#+\s*)?(?:risks?|concerns):?$"),
        rule(SectionKind::Resources, r"(?i)^(?:#+\s*)?(?:resources?|needs):?$"),
    ]
});

/// Bullet markers at the start of a line.
pub static BULLET_RULES: Lazy<Vec<Rule<BulletStyle>>> = Lazy::new(|| {
    vec![
        rule(BulletStyle::Dash, r"^\s*[-–—]\s+"),
        rule(BulletStyle::Asterisk, r"^\s*\*\s+"),
        rule(BulletStyle::Number, r"^\s*\d+[.)]\s+"),
        rule(BulletStyle::Letter, r"^\s*[a-zA-Z][.)]\s+"),
        rule(BulletStyle::Checkbox, r"^\s*\[[ xX]\]\s+"),
        rule(BulletStyle::Arrow, r"^\s*[→⇒›]\s+"),
        rule(BulletStyle::Bullet, r"^\s*[•◦]\s+"),
    ]
});

/// Date notations, highest priority first.
pub static DATE_RULES: Lazy<Vec<Rule<DateFormat>>> = Lazy::new(|| {
    vec![
        rule(DateFormat::Iso, r"\b\d{4}-\d{2}-\d{2}\b"),
        rule(DateFormat::Us, r"\b\d{1,2}/\d{1,2}/\d{4}\b"),
        rule(DateFormat::Euro, r"\b\d{1,2}\.\d{1,2}\.\d{4}\b"),
        rule(
            DateFormat::Text,
            r"\b(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]* \d{1,2},? \d{4}\b",
        ),
    ]
});

/// ISO or US dates collected as structured metadata.
pub static METADATA_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d{4}-\d{2}-\d{2}\b|\b\d{1,2}/\d{1,2}/\d{4}\b").unwrap());

/// Percentages such as `45%` or `99.5%`.
pub static PERCENTAGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b\d+(?:\.\d+)?%").unwrap());

/// Headers spelled as a canonical section name, used once a template exists.
static CANONICAL_HEADERS: Lazy<Vec<Rule<SectionKind>>> = Lazy::new(|| {
    SectionKind::all()
        .iter()
        .map(|kind| rule(*kind, &format!(r"(?i)^(?:#+\s*)?{}:?$", kind.as_str())))
        .collect()
});

/// Section a trimmed line opens, if it is a recognized header.
pub fn match_section_header(line: &str) -> Option<SectionKind> {
    SECTION_RULES
        .iter()
        .find(|r| r.pattern.is_match(line))
        .map(|r| r.tag)
}

/// Section a trimmed line opens, restricted to canonical names in `known`.
pub fn match_canonical_header(line: &str, known: &[SectionKind]) -> Option<SectionKind> {
    CANONICAL_HEADERS
        .iter()
        .filter(|r| known.contains(&r.tag))
        .find(|r| r.pattern.is_match(line))
        .map(|r| r.tag)
}

/// Whether `line` starts with the marker for `style`. `None` never matches.
pub fn line_has_bullet(line: &str, style: BulletStyle) -> bool {
    BULLET_RULES
        .iter()
        .find(|r| r.tag == style)
        .map(|r| r.pattern.is_match(line))
        .unwrap_or(false)
}

/// Whether `line` starts with any recognized marker.
pub fn line_has_any_bullet(line: &str) -> bool {
    BULLET_RULES.iter().any(|r| r.pattern.is_match(line))
}

/// Most frequent bullet style across `lines`; earlier rules win ties.
pub fn detect_bullet_style<'a>(lines: impl IntoIterator<Item = &'a str>) -> BulletStyle {
    let mut counts = vec![0usize; BULLET_RULES.len()];
    for line in lines {
        for (i, r) in BULLET_RULES.iter().enumerate() {
            if r.pattern.is_match(line) {
                counts[i] += 1;
            }
        }
    }

    let mut best: Option<(usize, usize)> = None;
    for (i, &count) in counts.iter().enumerate() {
        if count > 0 && best.map_or(true, |(_, c)| count > c) {
            best = Some((i, count));
        }
    }
    best.map(|(i, _)| BULLET_RULES[i].tag)
        .unwrap_or(BulletStyle::None)
}

/// First date rule that matches anywhere in `text`.
pub fn detect_date_format(text: &str) -> DateFormat {
    DATE_RULES
        .iter()
        .find(|r| r.pattern.is_match(text))
        .map(|r| r.tag)
        .unwrap_or(DateFormat::Unknown)
}

/// Pattern for a known date format.
pub fn date_pattern(format: DateFormat) -> Option<&'static Regex> {
    DATE_RULES
        .iter()
        .find(|r| r.tag == format)
        .map(|r| &r.pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_headers() {
        assert_eq!(match_section_header("## Accomplishments:"), Some(SectionKind::Accomplishments));
        assert_eq!(match_section_header("BLOCKERS"), Some(SectionKind::Challenges));
        assert_eq!(match_section_header("Next:"), Some(SectionKind::Plans));
        assert_eq!(match_section_header("KPIs"), Some(SectionKind::Metrics));
        assert_eq!(match_section_header("risk"), Some(SectionKind::Risks));
        assert_eq!(match_section_header("Needs"), Some(SectionKind::Resources));
        assert_eq!(match_section_header("Accomplishments this week"), None);
    }

    #[test]
    fn test_canonical_headers_limited_to_known() {
        let known = [SectionKind::Metrics];
        assert_eq!(match_canonical_header("# Metrics", &known), Some(SectionKind::Metrics));
        assert_eq!(match_canonical_header("Plans:", &known), None);
        // Aliases are not canonical names.
        assert_eq!(match_canonical_header("KPIs", &known), None);
    }

    #[test]
    fn test_bullet_detection() {
        let lines = ["- one", "- two", "* three", "1. four"];
        assert_eq!(detect_bullet_style(lines), BulletStyle::Dash);
        assert_eq!(detect_bullet_style(["plain", "text"]), BulletStyle::None);
    }

    #[test]
    fn test_bullet_tie_prefers_declared_order() {
        assert_eq!(detect_bullet_style(["• a", "1) b"]), BulletStyle::Number);
        assert_eq!(detect_bullet_style(["* a", "- b"]), BulletStyle::Dash);
    }

    #[test]
    fn test_bullet_style_none_never_matches() {
        assert!(!line_has_bullet("- item", BulletStyle::None));
        assert!(line_has_bullet("  → item", BulletStyle::Arrow));
        assert!(line_has_any_bullet("[x] done"));
    }

    #[test]
    fn test_date_priority() {
        assert_eq!(detect_date_format("Due 01/05/2024, shipped 2024-01-05"), DateFormat::Iso);
        assert_eq!(detect_date_format("Due 01/05/2024"), DateFormat::Us);
        assert_eq!(detect_date_format("Due 05.01.2024"), DateFormat::Euro);
        assert_eq!(detect_date_format("Due January 5, 2024"), DateFormat::Text);
        assert_eq!(detect_date_format("no dates"), DateFormat::Unknown);
    }

    #[test]
    fn test_percentage_at_end_of_word() {
        let found: Vec<&str> = PERCENTAGE_RE
            .find_iter("coverage 85%, latency down 12.5% overall")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(found, vec!["85%", "12.5%"]);
    }
}
