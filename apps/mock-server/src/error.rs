//! # Server Error Type
//!
//! Errors returned by route handlers, rendered as JSON.
//!
//! ## Response Body
//! ```json
//! { "code": "NOT_FOUND", "message": "Product not found: 42" }
//! ```
//!
//! | Error         | Status | Code               |
//! |---------------|--------|--------------------|
//! | NotFound      | 404    | `NOT_FOUND`        |
//! | Validation    | 400    | `VALIDATION_ERROR` |
//! | BadRequest    | 400    | `BAD_REQUEST`      |
//! | Storage       | 500    | `STORAGE_ERROR`    |
//! | Internal      | 500    | `INTERNAL`         |

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use zebraget_core::{CoreError, ValidationError};

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Mock server errors.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Product not found: {0}")]
    NotFound(i64),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Machine-readable error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    ValidationError,
    BadRequest,
    StorageError,
    Internal,
}

/// JSON body of an error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub message: String,
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Validation(_) | ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Storage(_) | ServerError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ServerError::NotFound(_) => ErrorCode::NotFound,
            ServerError::Validation(_) => ErrorCode::ValidationError,
            ServerError::BadRequest(_) => ErrorCode::BadRequest,
            ServerError::Storage(_) => ErrorCode::StorageError,
            ServerError::Internal(_) => ErrorCode::Internal,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let message = match &self {
            ServerError::Storage(e) | ServerError::Internal(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Request failed: {}", e);
                "Failed to update product database".to_string()
            }
            other => other.to_string(),
        };

        let body = ErrorBody {
            code: self.code(),
            message,
        };
        (self.status(), Json(body)).into_response()
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<CoreError> for ServerError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ServerError::NotFound(id),
            CoreError::Validation(e) => ServerError::Validation(e),
            CoreError::Barcode(e) => ServerError::BadRequest(e.to_string()),
        }
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(err: serde_json::Error) -> Self {
        ServerError::Storage(err.to_string())
    }
}
