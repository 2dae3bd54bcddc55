//! Report upload and listing routes.

use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::info;

use statuslens_analyze::analyze_with;
use statuslens_core::Result;
use statuslens_ingest::{flatten, FileType};
use statuslens_store::sqlite::DEFAULT_RECENT_LIMIT;
use statuslens_store::NewReport;

use super::form::UploadForm;
use super::{error_response, ApiResponse};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/upload", post(upload_report))
        .route("/reports", get(list_reports))
}

/// POST /api/upload: flatten, analyze, conclude, and persist one report.
async fn upload_report(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> ApiResponse {
    match process_upload(&state, &mut multipart).await {
        Ok(body) => (StatusCode::OK, Json(body)),
        Err(e) => error_response(&e),
    }
}

async fn process_upload(state: &AppState, multipart: &mut Multipart) -> Result<serde_json::Value> {
    let form = UploadForm::read(multipart).await?;
    let department = form.text("department")?;
    let report_date = form.text("date")?;
    let (filename, bytes) = form.file()?;

    let file_type = FileType::from_filename(filename);
    let content = flatten(filename, bytes);
    let analysis = analyze_with(&content, &state.analyzer);
    let conclusion = state.conclusions.conclude(&content, &analysis).await;

    let report_id = state.store.add_report(NewReport {
        department: department.to_string(),
        report_date: report_date.to_string(),
        filename: filename.to_string(),
        file_type: file_type.to_string(),
        content: content.clone(),
        summary: analysis.summary.clone(),
        word_count: analysis.word_count,
        sentiment: analysis.sentiment.label.to_string(),
        urgency: analysis.urgency.to_string(),
        analysis: serde_json::to_value(&analysis)?,
        conclusion: Some(serde_json::to_value(&conclusion)?),
        uploaded_at: None,
    })?;

    info!(
        "Report {} from {} analyzed: sentiment={}, urgency={}",
        report_id, department, analysis.sentiment.label, analysis.urgency
    );

    Ok(serde_json::json!({
        "success": true,
        "message": format!("{} file analyzed", file_type.as_str().to_uppercase()),
        "report_id": report_id,
        "filename": filename,
        "department": department,
        "file_type": file_type,
        "word_count": analysis.word_count,
        "analysis": analysis,
        "conclusion": conclusion,
    }))
}

/// GET /api/reports: most recent reports, newest first.
async fn list_reports(State(state): State<Arc<AppState>>) -> ApiResponse {
    match state.store.recent_reports(DEFAULT_RECENT_LIMIT) {
        Ok(reports) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "count": reports.len(),
                "reports": reports,
            })),
        ),
        Err(e) => error_response(&e),
    }
}
