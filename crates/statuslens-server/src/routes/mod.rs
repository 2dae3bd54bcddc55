//! HTTP route handlers under `/api`.

pub mod form;
pub mod health;
pub mod reports;
pub mod templates;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::{Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use statuslens_core::Error;

use crate::state::AppState;

/// Handler result: a status code and a JSON body.
pub type ApiResponse = (StatusCode, Json<serde_json::Value>);

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .merge(health::routes())
        .merge(reports::routes())
        .merge(templates::routes())
}

/// Map a core error to a `{"success": false, "error": ..}` response.
pub fn error_response(e: &Error) -> ApiResponse {
    let status = match e {
        Error::NotFound(_) => StatusCode::NOT_FOUND,
        Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!("Request failed: {}", e);
    }
    (
        status,
        Json(serde_json::json!({
            "success": false,
            "error": e.to_string(),
        })),
    )
}
