//! Health and statistics routes.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use super::{error_response, ApiResponse};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health_check))
        .route("/stats", get(get_stats))
}

/// GET /api/health
async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "enrichment": state.conclusions.enrichment_enabled(),
    }))
}

/// GET /api/stats: report counts, sentiment distribution, and template count.
async fn get_stats(State(state): State<Arc<AppState>>) -> ApiResponse {
    let stats = match state.store.stats() {
        Ok(s) => s,
        Err(e) => return error_response(&e),
    };

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "total_reports": stats.total_reports,
            "total_departments": stats.departments,
            "today_reports": stats.reports_today,
            "sentiment_distribution": stats.sentiment_distribution,
            "templates": state.templates.len(),
            "enrichment": state.conclusions.enrichment_enabled(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}
