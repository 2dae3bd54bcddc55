//! Template data model.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical report sections a header can map to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Accomplishments,
    Challenges,
    Plans,
    Metrics,
    Risks,
    Resources,
}

impl SectionKind {
    pub fn all() -> &'static [SectionKind] {
        &[
            Self::Accomplishments,
            Self::Challenges,
            Self::Plans,
            Self::Metrics,
            Self::Risks,
            Self::Resources,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accomplishments => "accomplishments",
            Self::Challenges => "challenges",
            Self::Plans => "plans",
            Self::Metrics => "metrics",
            Self::Risks => "risks",
            Self::Resources => "resources",
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// List marker style. Declaration order is the tie-break priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulletStyle {
    Dash,
    Asterisk,
    Number,
    Letter,
    Checkbox,
    Arrow,
    Bullet,
    None,
}

impl BulletStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dash => "dash",
            Self::Asterisk => "asterisk",
            Self::Number => "number",
            Self::Letter => "letter",
            Self::Checkbox => "checkbox",
            Self::Arrow => "arrow",
            Self::Bullet => "bullet",
            Self::None => "none",
        }
    }

    /// Marker to show in a template guide.
    pub fn symbol(&self) -> Option<&'static str> {
        match self {
            Self::Dash => Some("-"),
            Self::Asterisk => Some("*"),
            Self::Number => Some("1."),
            Self::Letter => Some("a."),
            Self::Checkbox => Some("[ ]"),
            Self::Arrow => Some("→"),
            Self::Bullet => Some("•"),
            Self::None => None,
        }
    }
}

impl std::fmt::Display for BulletStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Date notation. Declaration order is detection priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    Iso,
    Us,
    Euro,
    Text,
    Unknown,
}

impl DateFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Iso => "iso",
            Self::Us => "us",
            Self::Euro => "euro",
            Self::Text => "text",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl std::fmt::Display for DateFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Learned structural fingerprint of one department's reports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub department: String,
    /// Literal header lines seen across all merged reports.
    pub section_headers: BTreeSet<String>,
    /// Canonical sections that had content across all merged reports.
    pub sections_found: BTreeSet<SectionKind>,
    /// Dominant style of the most recent report.
    pub bullet_style: BulletStyle,
    /// Date notation of the most recent report.
    pub date_format: DateFormat,
    /// Caller-configured sections that must appear; never inferred.
    #[serde(default)]
    pub required_sections: Vec<String>,
    /// First lines of the most recent report, for display only.
    pub sample_lines: Vec<String>,
    pub usage_count: u64,
    pub last_updated: DateTime<Utc>,
}
