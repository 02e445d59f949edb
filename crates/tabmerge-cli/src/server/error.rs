//! API error types and handling.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tabmerge::MergeError;

/// API error type.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from client.
    BadRequest(String),
    /// Internal server error.
    Internal(String),
    /// Error from the merge library.
    Merge(MergeError),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "internal", msg),
            ApiError::Merge(e) => match e {
                MergeError::EmptyArchive => (
                    StatusCode::BAD_REQUEST,
                    "empty_archive",
                    "ZIP file is empty!".to_string(),
                ),
                MergeError::Archive(_) => (StatusCode::BAD_REQUEST, "bad_archive", e.to_string()),
                MergeError::Projection { .. } | MergeError::Xlsx(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "internal", e.to_string())
                }
                _ => (StatusCode::UNPROCESSABLE_ENTITY, "merge_error", e.to_string()),
            },
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<MergeError> for ApiError {
    fn from(err: MergeError) -> Self {
        ApiError::Merge(err)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
            ApiError::Merge(e) => write!(f, "Merge error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {}
