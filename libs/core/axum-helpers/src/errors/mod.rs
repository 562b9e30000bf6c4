pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Standard error response structure.
///
/// Every non-2xx response carries this body. `details` is only present for
/// validation failures.
///
/// # JSON Example
///
/// ```json
/// {
///   "error": "Validation failed",
///   "details": "name: length must be between 1 and 255"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message, safe to show to clients
    pub error: String,
    /// Validator output for rejected fields
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// This is the only place where failures become status codes. Internal
/// causes are logged here and never serialized into the body.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("{message}: {cause}")]
    Internal { message: String, cause: String },
}

impl AppError {
    /// Internal failure with a client-facing message and a logged-only cause.
    pub fn internal(message: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        AppError::Internal {
            message: message.into(),
            cause: cause.to_string(),
        }
    }

    /// HTTP status this error renders with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidBody(_) | AppError::Validation(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            AppError::InvalidBody(rejection) => {
                tracing::warn!(
                    error_code = ErrorCode::InvalidJson.code(),
                    error = %rejection.body_text(),
                    status = status.as_u16(),
                    "Failed to parse request body"
                );
                ErrorResponse::new(ErrorCode::InvalidJson.default_message())
            }
            AppError::Validation(errors) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    error = %errors,
                    status = status.as_u16(),
                    "Validation failed"
                );
                ErrorResponse::new(ErrorCode::ValidationError.default_message())
                    .with_details(errors.to_string())
            }
            AppError::BadRequest(msg) => {
                tracing::info!(status = status.as_u16(), "Bad request: {}", msg);
                ErrorResponse::new(msg)
            }
            AppError::NotFound(msg) => {
                tracing::info!(
                    error_code = ErrorCode::NotFound.code(),
                    status = status.as_u16(),
                    "Not found: {}",
                    msg
                );
                ErrorResponse::new(msg)
            }
            AppError::Internal { message, cause } => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    error = %cause,
                    status = status.as_u16(),
                    "{}",
                    message
                );
                ErrorResponse::new(message)
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Helper function to create error responses outside of `AppError`.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(message))).into_response()
}
