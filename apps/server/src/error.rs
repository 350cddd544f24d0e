//! # API Error Types
//!
//! The HTTP-facing error envelope and its mappings from layer errors.
//!
//! ## Status Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Source                              Code                HTTP           │
//! │  ──────                              ────                ────           │
//! │  DbError::NotFound                   NOT_FOUND           404            │
//! │  DbError::IllegalTransition          TRANSITION_ERROR    409            │
//! │  CoreError::Validation / mismatch    VALIDATION_ERROR    400            │
//! │  Missing/bad bearer token            UNAUTHORIZED        401            │
//! │  Any other database failure         DATABASE_ERROR      500            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error body has the same shape: `{ "code": ..., "message": ... }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use opaline_core::error::CoreError;
use opaline_db::DbError;

/// Machine-readable error category sent to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    ValidationError,
    TransitionError,
    Unauthorized,
    DatabaseError,
    Internal,
}

/// Error envelope returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: ErrorCode,
    pub message: String,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn unauthorized() -> Self {
        ApiError::new(ErrorCode::Unauthorized, "Missing or invalid admin token")
    }

    fn status(&self) -> StatusCode {
        match self.code {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
            ErrorCode::TransitionError => StatusCode::CONFLICT,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::DatabaseError | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(code = ?self.code, message = %self.message, "Request failed");
        } else {
            tracing::debug!(code = ?self.code, message = %self.message, "Request rejected");
        }

        (status, Json(self)).into_response()
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { .. } => ApiError::new(ErrorCode::NotFound, err.to_string()),
            DbError::IllegalTransition { .. } => {
                ApiError::new(ErrorCode::TransitionError, err.to_string())
            }
            DbError::UniqueViolation { .. } | DbError::ForeignKeyViolation { .. } => {
                ApiError::new(ErrorCode::ValidationError, err.to_string())
            }
            _ => ApiError::new(ErrorCode::DatabaseError, err.to_string()),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::OrderNotFound(_) => ApiError::new(ErrorCode::NotFound, err.to_string()),
            CoreError::Transition(_) => ApiError::new(ErrorCode::TransitionError, err.to_string()),
            CoreError::EmptyOrder
            | CoreError::TotalMismatch { .. }
            | CoreError::Validation(_) => {
                ApiError::new(ErrorCode::ValidationError, err.to_string())
            }
        }
    }
}

impl From<opaline_core::ValidationError> for ApiError {
    fn from(err: opaline_core::ValidationError) -> Self {
        ApiError::new(ErrorCode::ValidationError, err.to_string())
    }
}

/// Result type for request handlers.
pub type ApiResult<T> = Result<T, ApiError>;
