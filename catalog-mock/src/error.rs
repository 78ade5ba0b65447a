//! Mock server errors
//!
//! Every error renders as `{"message": ..., "data": null}` with the status
//! the real API uses for it.

use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    /// Missing or unknown token (401)
    Unauthorized,

    #[error("{0}")]
    /// Wrong credentials (401)
    InvalidCredentials(String),

    #[error("{0}")]
    /// Resource not found (404)
    NotFound(String),

    #[error("{0}")]
    /// Duplicate (409)
    Conflict(String),

    #[error("{0}")]
    /// Bad input (400)
    Validation(String),

    #[error("Internal server error: {0}")]
    /// Internal error (500)
    Internal(String),
}

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Unauthorized, token missing or invalid".to_string(),
            ),
            AppError::InvalidCredentials(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        (status, Json(json!({ "message": message, "data": null }))).into_response()
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Validation(format!("Multipart error: {}", e))
    }
}

pub type AppResult<T> = Result<T, AppError>;
