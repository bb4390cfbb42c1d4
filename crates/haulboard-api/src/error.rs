use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

/// Uniform application error: logged once at the endpoint boundary with the
/// operation description, rendered as HTTP 500 with
/// `{"error": "<description>"}`.
#[derive(Debug, thiserror::Error)]
#[error("{what}")]
pub struct ApiError {
    what: &'static str,
    cause: anyhow::Error,
}

impl ApiError {
    pub fn new(what: &'static str, cause: impl Into<anyhow::Error>) -> Self {
        Self { what, cause: cause.into() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("{}: {:#}", self.what, self.cause);
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": self.what }))).into_response()
    }
}
