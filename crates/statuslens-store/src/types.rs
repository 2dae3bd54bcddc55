//! Row and statistics types for stored reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A report to insert. Analysis and conclusion are stored as opaque JSON.
#[derive(Debug, Clone, Default)]
pub struct NewReport {
    pub department: String,
    pub report_date: String,
    pub filename: String,
    pub file_type: String,
    pub content: String,
    pub summary: String,
    pub word_count: usize,
    pub sentiment: String,
    pub urgency: String,
    pub analysis: serde_json::Value,
    pub conclusion: Option<serde_json::Value>,
    /// Defaults to now.
    pub uploaded_at: Option<DateTime<Utc>>,
}

/// A stored report row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    pub department: String,
    pub report_date: String,
    pub filename: String,
    pub file_type: String,
    pub content: String,
    pub content_hash: String,
    pub summary: String,
    pub word_count: usize,
    pub sentiment: String,
    pub urgency: String,
    pub analysis: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conclusion: Option<serde_json::Value>,
    pub uploaded_at: String,
}

/// Listing entry: a report without its raw content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSummary {
    pub id: i64,
    pub department: String,
    pub report_date: String,
    pub filename: String,
    pub file_type: String,
    pub summary: String,
    pub word_count: usize,
    pub sentiment: String,
    pub urgency: String,
    pub uploaded_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentDistribution {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportStats {
    pub total_reports: usize,
    pub departments: usize,
    pub reports_today: usize,
    pub sentiment_distribution: SentimentDistribution,
}
