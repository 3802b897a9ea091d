//! Error handling for the Crop Advisory service
//!
//! Every error reaches the caller as `{ "success": false, "error": <message> }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::ValidationError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Caller errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    // External service errors
    #[error("Completion service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Message shown to the caller; upstream detail stays in the logs
    pub fn public_message(&self) -> String {
        match self {
            AppError::Validation(e) => e.to_string(),
            AppError::ServiceUnavailable(_) => "Chat failed".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::Validation(_) => tracing::debug!("Rejected request: {}", self),
            AppError::ServiceUnavailable(_) => tracing::error!("Error: {:?}", self),
        }

        let body = ErrorResponse {
            success: false,
            error: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
