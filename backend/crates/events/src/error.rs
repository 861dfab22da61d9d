//! Events Error Types
//!
//! Event-module error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Events-specific result type alias
pub type EventsResult<T> = Result<T, EventsError>;

/// Events-specific error variants
#[derive(Debug, Error)]
pub enum EventsError {
    /// Input validation failure (field-level detail in the message)
    #[error("{0}")]
    Validation(String),

    /// Module is disabled; the message is the admin-configured one
    #[error("{message}")]
    ModuleDisabled { message: String },

    /// Referenced entity absent
    #[error("Not found")]
    NotFound,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Photo store failure
    #[error("Photo storage error: {0}")]
    PhotoStorage(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl EventsError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            EventsError::Validation(_) => StatusCode::BAD_REQUEST,
            EventsError::ModuleDisabled { .. } => StatusCode::FORBIDDEN,
            EventsError::NotFound => StatusCode::NOT_FOUND,
            EventsError::Database(_) | EventsError::PhotoStorage(_) | EventsError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            EventsError::Validation(_) => ErrorKind::BadRequest,
            EventsError::ModuleDisabled { .. } => ErrorKind::Forbidden,
            EventsError::NotFound => ErrorKind::NotFound,
            EventsError::Database(_) | EventsError::PhotoStorage(_) | EventsError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError (storage detail never reaches the caller)
    pub fn to_app_error(&self) -> AppError {
        match self {
            EventsError::Database(_) | EventsError::PhotoStorage(_) | EventsError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            EventsError::Database(e) => {
                tracing::error!(error = %e, "Events database error");
            }
            EventsError::PhotoStorage(e) => {
                tracing::error!(error = %e, "Photo store error");
            }
            EventsError::Internal(msg) => {
                tracing::error!(message = %msg, "Events internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Events error");
            }
        }
    }
}

impl IntoResponse for EventsError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
