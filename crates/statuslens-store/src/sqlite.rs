//! SQLite-backed report store.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use crate::schema::SCHEMA_SQL;
use crate::types::*;
use statuslens_core::{Error, Result};

/// Default page size for [`ReportStore::recent_reports`].
pub const DEFAULT_RECENT_LIMIT: usize = 20;

/// Persists uploaded reports with their analysis and conclusion.
pub struct ReportStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl ReportStore {
    /// Open or create the store. The file is `db_dir/reports.db`.
    pub fn open(db_dir: impl AsRef<Path>) -> Result<Self> {
        let db_dir = db_dir.as_ref();
        std::fs::create_dir_all(db_dir)?;
        let db_path = db_dir.join("reports.db");

        let conn = Connection::open(&db_path).map_err(db_err)?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(db_err)?;
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| Error::Database(format!("Schema init failed: {}", e)))?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path,
        };
        info!(
            "ReportStore initialized: {} reports, path={}",
            store.count_reports()?,
            store.db_path.display()
        );
        Ok(store)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Insert a report. Returns the new report ID.
    pub fn add_report(&self, report: NewReport) -> Result<i64> {
        let uploaded_at = report.uploaded_at.unwrap_or_else(Utc::now).to_rfc3339();
        let analysis_json = serde_json::to_string(&report.analysis)?;
        let conclusion_json = report
            .conclusion
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        let conn = self.conn.lock();
        let id = conn
            .prepare_cached(
                "INSERT INTO reports (department, report_date, filename, file_type, content,
                    content_hash, summary, word_count, sentiment, urgency, analysis_json,
                    conclusion_json, uploaded_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            )
            .map_err(db_err)?
            .insert(params![
                report.department,
                report.report_date,
                report.filename,
                report.file_type,
                report.content,
                content_hash(&report.content),
                report.summary,
                report.word_count as i64,
                report.sentiment,
                report.urgency,
                analysis_json,
                conclusion_json,
                uploaded_at,
            ])
            .map_err(db_err)?;
        debug!("Stored report {} for {}", id, report.department);
        Ok(id)
    }

    /// Get a report by ID.
    pub fn get_report(&self, id: i64) -> Result<Option<Report>> {
        let conn = self.conn.lock();
        let row = conn
            .prepare_cached("SELECT * FROM reports WHERE id = ?1")
            .map_err(db_err)?
            .query_row(params![id], |row| Ok(Self::row_to_report(row)))
            .optional()
            .map_err(db_err)?;
        Ok(row)
    }

    /// Most recent reports, newest first.
    pub fn recent_reports(&self, limit: usize) -> Result<Vec<ReportSummary>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached(
                "SELECT id, department, report_date, filename, file_type, summary, word_count,
                        sentiment, urgency, uploaded_at
                 FROM reports ORDER BY id DESC LIMIT ?1",
            )
            .map_err(db_err)?;
        let rows = stmt
            .query_map(params![limit as i64], |row| Ok(Self::row_to_summary(row)))
            .map_err(db_err)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(db_err)?;
        Ok(rows)
    }

    pub fn count_reports(&self) -> Result<usize> {
        let conn = self.conn.lock();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM reports", [], |row| row.get(0))
            .map_err(db_err)?;
        Ok(count as usize)
    }

    /// Aggregate counts, with "today" taken as the current UTC date.
    pub fn stats(&self) -> Result<ReportStats> {
        self.stats_at(Utc::now())
    }

    /// Aggregate counts, with "today" taken as the UTC date of `now`.
    pub fn stats_at(&self, now: DateTime<Utc>) -> Result<ReportStats> {
        let today = now.format("%Y-%m-%d").to_string();
        let conn = self.conn.lock();

        let (total, departments): (i64, i64) = conn
            .query_row(
                "SELECT COUNT(*), COUNT(DISTINCT department) FROM reports",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .map_err(db_err)?;
        let reports_today: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM reports WHERE substr(uploaded_at, 1, 10) = ?1",
                params![today],
                |row| row.get(0),
            )
            .map_err(db_err)?;

        let mut distribution = SentimentDistribution::default();
        let mut stmt = conn
            .prepare_cached("SELECT sentiment, COUNT(*) FROM reports GROUP BY sentiment")
            .map_err(db_err)?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?)))
            .map_err(db_err)?;
        for row in rows {
            let (label, count) = row.map_err(db_err)?;
            let count = count as usize;
            match label.as_str() {
                "positive" => distribution.positive += count,
                "negative" => distribution.negative += count,
                _ => distribution.neutral += count,
            }
        }

        Ok(ReportStats {
            total_reports: total as usize,
            departments: departments as usize,
            reports_today: reports_today as usize,
            sentiment_distribution: distribution,
        })
    }

    fn row_to_report(row: &rusqlite::Row<'_>) -> Report {
        Report {
            id: row.get("id").unwrap_or(0),
            department: row.get("department").unwrap_or_default(),
            report_date: row.get("report_date").unwrap_or_default(),
            filename: row.get("filename").unwrap_or_default(),
            file_type: row.get("file_type").unwrap_or_default(),
            content: row.get("content").unwrap_or_default(),
            content_hash: row.get("content_hash").unwrap_or_default(),
            summary: row.get("summary").unwrap_or_default(),
            word_count: row.get::<_, i64>("word_count").unwrap_or(0) as usize,
            sentiment: row.get("sentiment").unwrap_or_default(),
            urgency: row.get("urgency").unwrap_or_default(),
            analysis: row
                .get::<_, String>("analysis_json")
                .ok()
                .and_then(|s| serde_json::from_str(&s).ok())
                .unwrap_or(serde_json::Value::Null),
            conclusion: row
                .get::<_, Option<String>>("conclusion_json")
                .ok()
                .flatten()
                .and_then(|s| serde_json::from_str(&s).ok()),
            uploaded_at: row.get("uploaded_at").unwrap_or_default(),
        }
    }

    fn row_to_summary(row: &rusqlite::Row<'_>) -> ReportSummary {
        ReportSummary {
            id: row.get("id").unwrap_or(0),
            department: row.get("department").unwrap_or_default(),
            report_date: row.get("report_date").unwrap_or_default(),
            filename: row.get("filename").unwrap_or_default(),
            file_type: row.get("file_type").unwrap_or_default(),
            summary: row.get("summary").unwrap_or_default(),
            word_count: row.get::<_, i64>("word_count").unwrap_or(0) as usize,
            sentiment: row.get("sentiment").unwrap_or_default(),
            urgency: row.get("urgency").unwrap_or_default(),
            uploaded_at: row.get("uploaded_at").unwrap_or_default(),
        }
    }
}

fn db_err(e: rusqlite::Error) -> Error {
    Error::Database(e.to_string())
}

/// SHA-256 of the flattened report text, hex encoded.
pub fn content_hash(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;
    use tempfile::TempDir;

    fn test_store() -> (ReportStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = ReportStore::open(dir.path()).unwrap();
        (store, dir)
    }

    fn report(department: &str, sentiment: &str, uploaded_at: DateTime<Utc>) -> NewReport {
        NewReport {
            department: department.into(),
            report_date: "2024-05-01".into(),
            filename: "daily.txt".into(),
            file_type: "text".into(),
            content: format!("{} report", department),
            summary: "short".into(),
            word_count: 2,
            sentiment: sentiment.into(),
            urgency: "low".into(),
            analysis: json!({"sentiment": {"label": sentiment}}),
            conclusion: None,
            uploaded_at: Some(uploaded_at),
        }
    }

    #[test]
    fn test_add_and_get_report() {
        let (store, _dir) = test_store();
        let mut new = report("Eng", "positive", Utc::now());
        new.conclusion = Some(json!({"narrative": "ok", "generated_by": "fallback"}));
        let id = store.add_report(new).unwrap();

        let stored = store.get_report(id).unwrap().unwrap();
        assert_eq!(stored.department, "Eng");
        assert_eq!(stored.content_hash, content_hash("Eng report"));
        assert_eq!(stored.analysis["sentiment"]["label"], "positive");
        assert_eq!(stored.conclusion.unwrap()["generated_by"], "fallback");
        assert!(store.get_report(id + 1).unwrap().is_none());
    }

    #[test]
    fn test_recent_reports_newest_first() {
        let (store, _dir) = test_store();
        for i in 0..25 {
            store
                .add_report(report(&format!("D{}", i), "neutral", Utc::now()))
                .unwrap();
        }
        let recent = store.recent_reports(DEFAULT_RECENT_LIMIT).unwrap();
        assert_eq!(recent.len(), 20);
        assert_eq!(recent[0].department, "D24");
        assert_eq!(recent[19].department, "D5");
    }

    #[test]
    fn test_stats() {
        let (store, _dir) = test_store();
        let now = Utc.with_ymd_and_hms(2024, 5, 2, 9, 0, 0).unwrap();
        let yesterday = Utc.with_ymd_and_hms(2024, 5, 1, 23, 59, 0).unwrap();

        store.add_report(report("Eng", "positive", now)).unwrap();
        store.add_report(report("Eng", "negative", now)).unwrap();
        store.add_report(report("Ops", "neutral", yesterday)).unwrap();

        let stats = store.stats_at(now).unwrap();
        assert_eq!(stats.total_reports, 3);
        assert_eq!(stats.departments, 2);
        assert_eq!(stats.reports_today, 2);
        assert_eq!(
            stats.sentiment_distribution,
            SentimentDistribution {
                positive: 1,
                negative: 1,
                neutral: 1
            }
        );
    }

    #[test]
    fn test_empty_stats() {
        let (store, _dir) = test_store();
        assert_eq!(store.stats().unwrap(), ReportStats::default());
    }

    #[test]
    fn test_reopen_keeps_rows() {
        let dir = TempDir::new().unwrap();
        {
            let store = ReportStore::open(dir.path()).unwrap();
            store.add_report(report("Eng", "neutral", Utc::now())).unwrap();
        }
        let store = ReportStore::open(dir.path()).unwrap();
        assert_eq!(store.count_reports().unwrap(), 1);
        assert!(store.db_path().ends_with("reports.db"));
    }
}
