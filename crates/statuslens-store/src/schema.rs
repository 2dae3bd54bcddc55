//! Database schema SQL.

pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS reports (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    department TEXT NOT NULL,
    report_date TEXT NOT NULL,
    filename TEXT NOT NULL,
    file_type TEXT NOT NULL,
    content TEXT NOT NULL,
    content_hash TEXT NOT NULL,
    summary TEXT NOT NULL,
    word_count INTEGER NOT NULL,
    sentiment TEXT NOT NULL,
    urgency TEXT NOT NULL,
    analysis_json TEXT NOT NULL,
    conclusion_json TEXT,
    uploaded_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_reports_department ON reports(department);
CREATE INDEX IF NOT EXISTS idx_reports_uploaded_at ON reports(uploaded_at);
"#;
