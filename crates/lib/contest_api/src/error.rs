//! Application error types.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::completion::CompletionError;
use crate::models::{ErrorResponse, RelayErrorResponse};

/// Convenience alias for handler return types.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match &self {
            AppError::NotFound(m) => (StatusCode::NOT_FOUND, "not_found", m.as_str()),
        };
        let body = Json(ErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        });
        (status, body).into_response()
    }
}

/// Any failure on the relay route. Always a 500 with `{ "error": ... }`.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct RelayError(pub String);

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let body = Json(RelayErrorResponse { error: self.0 });
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

impl From<CompletionError> for RelayError {
    fn from(e: CompletionError) -> Self {
        RelayError(e.to_string())
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(e: serde_json::Error) -> Self {
        RelayError(e.to_string())
    }
}
