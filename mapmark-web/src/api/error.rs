//! API error responses
//!
//! Every failure becomes a JSON `{"error": message}` body with a matching
//! HTTP status. Store failures are logged server-side and reported to the
//! client as a generic 500.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Marker API errors
#[derive(Debug)]
pub enum ApiError {
    /// Path id is not a well-formed integer -> 400
    InvalidId(String),
    /// Required field missing or empty in the request body -> 400
    MissingField(&'static str),
    /// Request is malformed for a reason other than fields/id -> 400
    BadRequest(String),
    /// No marker with the requested id -> 404
    NotFound,
    /// Store or other unexpected failure -> 500
    Internal(String),
}

impl From<mapmark_common::Error> for ApiError {
    fn from(err: mapmark_common::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidId(id) => {
                (StatusCode::BAD_REQUEST, format!("Invalid marker id: {}", id))
            }
            ApiError::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                format!("Missing required field: {}", field),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Marker not found".to_string()),
            ApiError::Internal(detail) => {
                // Full detail stays in the server log only
                error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
