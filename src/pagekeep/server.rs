//! # Content API
//!
//! HTTP surface the editor bridge saves to:
//!
//! - `POST /api/pages/{id}/content`: validates and echoes a content save.
//! - `GET /api/pages/{id}/content`: placeholder, always `content: null`.
//! - `GET /health`: liveness probe.
//!
//! The endpoint does not persist anything yet. It fixes the request contract
//! so a real backend can be dropped in behind it: the body must be a JSON
//! object with an object-valued `content`, `html` and `markdown` are optional
//! strings. Validation failures answer 400 with `{ error, ... }`.

use crate::bridge::SaveContentResponse;
use crate::error::Result;
use axum::{
    body::Bytes,
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tracing::{debug, info};

pub fn router() -> Router {
    Router::new()
        .route(
            "/api/pages/{id}/content",
            get(get_content).post(save_content),
        )
        .route("/health", get(|| async { "OK" }))
}

/// Binds `addr` and serves [`router`] until ctrl-c.
pub async fn serve(addr: &str) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "content API listening");
    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("content API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
}

struct ApiError {
    status: StatusCode,
    body: Value,
}

impl ApiError {
    fn bad_request(body: Value) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

/// Type names as reported back to clients in `received`.
fn received_type(value: &Value) -> &'static str {
    match value {
        Value::Null | Value::Object(_) | Value::Array(_) => "object",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
    }
}

fn require_page_id(id: &str) -> std::result::Result<(), ApiError> {
    if id.trim().is_empty() {
        return Err(ApiError::bad_request(json!({ "error": "Page ID is required" })));
    }
    Ok(())
}

fn non_empty_str(body: &Value, key: &str) -> Option<String> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Checks the save body and returns the `content` object.
fn validate_save_body(body: &Value) -> std::result::Result<Value, ApiError> {
    if !(body.is_object() || body.is_array()) {
        return Err(ApiError::bad_request(json!({
            "error": "Request body is required",
            "received": received_type(body),
        })));
    }

    let content = match body.get("content") {
        None => {
            return Err(ApiError::bad_request(json!({
                "error": "Content is required",
                "received": "undefined",
            })))
        }
        Some(Value::Null) => {
            return Err(ApiError::bad_request(json!({
                "error": "Content is required",
                "received": "null",
            })))
        }
        Some(content) => content,
    };

    if !content.is_object() {
        let received = if content.is_array() {
            "array"
        } else {
            received_type(content)
        };
        return Err(ApiError::bad_request(json!({
            "error": "Content must be a valid JSON object",
            "received": received,
        })));
    }

    Ok(content.clone())
}

async fn save_content(
    Path(id): Path<String>,
    body: Bytes,
) -> std::result::Result<Json<SaveContentResponse>, ApiError> {
    require_page_id(&id)?;

    let body: Value = serde_json::from_slice(&body).map_err(|e| {
        ApiError::bad_request(json!({
            "error": "Invalid JSON in request body",
            "details": e.to_string(),
        }))
    })?;
    let content = validate_save_body(&body)?;

    debug!(page_id = %id, "accepted content save");
    Ok(Json(SaveContentResponse {
        success: true,
        page_id: id,
        content,
        html: non_empty_str(&body, "html"),
        markdown: non_empty_str(&body, "markdown"),
        saved_at: Utc::now(),
    }))
}

async fn get_content(Path(id): Path<String>) -> std::result::Result<Json<Value>, ApiError> {
    require_page_id(&id)?;
    Ok(Json(json!({
        "pageId": id,
        "content": null,
        "message": "Backend integration needed - implement GET endpoint in your backend",
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_must_be_an_object() {
        let err = validate_save_body(&json!("text")).unwrap_err();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.body["received"], "string");

        let err = validate_save_body(&json!(null)).unwrap_err();
        assert_eq!(err.body["error"], "Request body is required");
        assert_eq!(err.body["received"], "object");
    }

    #[test]
    fn array_body_has_no_content() {
        let err = validate_save_body(&json!([1, 2])).unwrap_err();
        assert_eq!(err.body["error"], "Content is required");
        assert_eq!(err.body["received"], "undefined");
    }

    #[test]
    fn content_must_be_an_object() {
        let err = validate_save_body(&json!({ "content": null })).unwrap_err();
        assert_eq!(err.body["received"], "null");

        let err = validate_save_body(&json!({ "content": 3 })).unwrap_err();
        assert_eq!(err.body["error"], "Content must be a valid JSON object");
        assert_eq!(err.body["received"], "number");
    }

    #[test]
    fn empty_renderings_become_null() {
        let body = json!({ "content": {}, "html": "", "markdown": "# Hi" });
        assert_eq!(non_empty_str(&body, "html"), None);
        assert_eq!(non_empty_str(&body, "markdown").as_deref(), Some("# Hi"));
    }

    #[test]
    fn blank_page_id_is_rejected() {
        assert!(require_page_id("  ").is_err());
        assert!(require_page_id("7").is_ok());
    }
}
