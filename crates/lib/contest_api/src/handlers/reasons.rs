//! Contest-reason catalog endpoints.

use axum::Json;
use axum::extract::Path;
use contest_core::models::ContestReason;
use contest_core::reasons;

use crate::error::{AppError, AppResult};

/// `GET /reasons`: the full catalog in display order.
pub async fn list_reasons_handler() -> Json<Vec<ContestReason>> {
    Json(reasons::catalog())
}

/// `GET /reasons/{id}`
pub async fn get_reason_handler(Path(id): Path<String>) -> AppResult<Json<ContestReason>> {
    reasons::find(&id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("no contest reason with id '{id}'")))
}
