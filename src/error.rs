use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Failures raised below the HTTP layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("Connection error: {0}")]
    Connection(#[from] diesel::result::ConnectionError),
    #[error("Connection lock poisoned")]
    LockPoisoned,
    #[error("Corrupt list column: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Migration error: {0}")]
    Migration(String),
}

/// Client-visible request outcomes that are not a 2xx.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Resource not found")]
    NotFound,
    #[error("Create, update and delete operations are disabled")]
    CrudDisabled,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::CrudDisabled => StatusCode::FORBIDDEN,
            ApiError::Storage(err) => {
                log::error!("Storage failure: {}", err);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let message = match &self {
            // Storage details stay in the log, not on the wire.
            ApiError::Storage(_) => "Internal storage failure".to_string(),
            other => other.to_string(),
        };
        let body = serde_json::to_string_pretty(&json!({ "error": message }))
            .unwrap_or_else(|_| format!("{{\"error\":\"{}\"}}", message));
        (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response()
    }
}
