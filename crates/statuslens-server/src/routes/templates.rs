//! Department template routes: learn, inspect, validate, configure.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::Value;
use tracing::warn;

use statuslens_core::{Error, Result};
use statuslens_ingest::flatten;
use statuslens_template::{
    analyze_report_structure, extract_structured_data, generate_template_guide, validate_report,
};

use super::form::UploadForm;
use super::{error_response, ApiResponse};
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/analyze-template", post(analyze_template))
        .route("/templates", get(list_templates))
        .route("/templates/{department}", get(get_template))
        .route("/validate-report", post(validate))
        .route("/set-template-sections", post(set_template_sections))
}

async fn read_department_upload(multipart: &mut Multipart) -> Result<(String, String)> {
    let form = UploadForm::read(multipart).await?;
    let department = form.text("department")?.to_string();
    let (filename, bytes) = form.file()?;
    Ok((department, flatten(filename, bytes)))
}

fn persist(state: &AppState) {
    if let Err(e) = state.save_templates() {
        warn!("Failed to persist templates: {}", e);
    }
}

/// POST /api/analyze-template: learn from one report and merge into the
/// department's template.
async fn analyze_template(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> ApiResponse {
    let (department, content) = match read_department_upload(&mut multipart).await {
        Ok(upload) => upload,
        Err(e) => return error_response(&e),
    };

    let candidate = analyze_report_structure(&content, &department);
    let stored = state.templates.save(&department, candidate);
    persist(&state);

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "message": format!("Template analyzed for {}", department),
            "guide": generate_template_guide(Some(&stored)),
            "template": stored,
        })),
    )
}

/// GET /api/templates
async fn list_templates(State(state): State<Arc<AppState>>) -> Json<Value> {
    let templates = state.templates.all();
    Json(serde_json::json!({
        "success": true,
        "count": templates.len(),
        "templates": templates,
    }))
}

/// GET /api/templates/{department}
async fn get_template(State(state): State<Arc<AppState>>, Path(department): Path<String>) -> ApiResponse {
    match state.templates.get(&department) {
        Some(template) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "guide": generate_template_guide(Some(&template)),
                "template": template,
            })),
        ),
        None => error_response(&Error::NotFound(format!(
            "No template for department {}",
            department
        ))),
    }
}

/// POST /api/validate-report: verdict plus structured extraction. A missing
/// template is not an error.
async fn validate(State(state): State<Arc<AppState>>, mut multipart: Multipart) -> ApiResponse {
    let (department, content) = match read_department_upload(&mut multipart).await {
        Ok(upload) => upload,
        Err(e) => return error_response(&e),
    };

    let template = state.templates.get(&department);
    let validation = validate_report(&content, template.as_ref());
    let structured = extract_structured_data(&content, template.as_ref());

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "department": department,
            "validation": validation,
            "structured_data": structured,
        })),
    )
}

/// POST /api/set-template-sections: `{"department": .., "required_sections": [..]}`.
async fn set_template_sections(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> ApiResponse {
    let body = match payload {
        Ok(Json(body)) => body,
        Err(rejection) => return error_response(&Error::InvalidInput(rejection.body_text())),
    };
    let result = parse_sections_request(&body)
        .and_then(|(department, sections)| state.templates.set_required_sections(&department, sections));

    match result {
        Ok(template) => {
            persist(&state);
            (
                StatusCode::OK,
                Json(serde_json::json!({
                    "success": true,
                    "message": format!("Updated template for {}", template.department),
                    "template": template,
                })),
            )
        }
        Err(e) => error_response(&e),
    }
}

fn parse_sections_request(body: &Value) -> Result<(String, Vec<String>)> {
    let department = body["department"]
        .as_str()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| Error::InvalidInput("department must be a non-empty string".into()))?;

    let sections = body["required_sections"]
        .as_array()
        .ok_or_else(|| Error::InvalidInput("required_sections must be an array".into()))?
        .iter()
        .map(|s| {
            s.as_str()
                .map(str::to_string)
                .ok_or_else(|| Error::InvalidInput("required_sections must contain only strings".into()))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((department.to_string(), sections))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_sections_request() {
        let (dept, sections) =
            parse_sections_request(&json!({"department": " Eng ", "required_sections": ["metrics", "plans"]}))
                .unwrap();
        assert_eq!(dept, "Eng");
        assert_eq!(sections, vec!["metrics", "plans"]);
    }

    #[test]
    fn test_parse_sections_rejects_malformed() {
        for body in [
            json!({"department": "Eng", "required_sections": "metrics"}),
            json!({"department": "Eng", "required_sections": [1, 2]}),
            json!({"required_sections": []}),
        ] {
            assert!(matches!(parse_sections_request(&body), Err(Error::InvalidInput(_))));
        }
    }
}
