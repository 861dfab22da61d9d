//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid credentials (unknown identifier or wrong password)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Handle already registered
    #[error("This handle is already registered")]
    HandleTaken,

    /// Display name already registered
    #[error("This display name is already taken")]
    DisplayNameTaken,

    /// Input validation failure (field-level detail in the message)
    #[error("{0}")]
    Validation(String),

    /// No bearer credential on the request
    #[error("Authentication required")]
    CredentialMissing,

    /// Credential failed signature or structural checks
    #[error("Invalid credential")]
    CredentialMalformed,

    /// Credential signature is valid but the lifetime has passed
    #[error("Credential has expired")]
    CredentialExpired,

    /// Caller lacks the admin capability
    #[error("Administrator privileges required")]
    AdminRequired,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Two racing registrations both pass the EXISTS pre-check; the loser
/// surfaces the database unique violation and must still be a conflict.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidCredentials
            | AuthError::CredentialMissing
            | AuthError::CredentialMalformed
            | AuthError::CredentialExpired => StatusCode::UNAUTHORIZED,
            AuthError::HandleTaken | AuthError::DisplayNameTaken => StatusCode::CONFLICT,
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::AdminRequired => StatusCode::FORBIDDEN,
            AuthError::Database(e) if is_unique_violation(e) => StatusCode::CONFLICT,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials
            | AuthError::CredentialMissing
            | AuthError::CredentialMalformed
            | AuthError::CredentialExpired => ErrorKind::Unauthorized,
            AuthError::HandleTaken | AuthError::DisplayNameTaken => ErrorKind::Conflict,
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::AdminRequired => ErrorKind::Forbidden,
            AuthError::Database(e) if is_unique_violation(e) => ErrorKind::Conflict,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError (storage detail never reaches the caller)
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Database(e) if is_unique_violation(e) => {
                AppError::conflict("This handle or display name is already registered")
            }
            AuthError::Database(_) => AppError::internal("Internal server error"),
            AuthError::Internal(_) => AppError::internal("Internal server error"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) if is_unique_violation(e) => {
                tracing::warn!(error = %e, "Registration lost a uniqueness race");
            }
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::CredentialMalformed => {
                tracing::warn!("Malformed bearer credential rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    #[derive(Debug)]
    struct DuplicateKey;

    impl fmt::Display for DuplicateKey {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("duplicate key value violates unique constraint \"idx_users_handle\"")
        }
    }

    impl StdError for DuplicateKey {}

    impl sqlx::error::DatabaseError for DuplicateKey {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint \"idx_users_handle\""
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some("23505".into())
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::UniqueViolation
        }
    }

    #[test]
    fn test_unique_violation_is_a_conflict() {
        let err = AuthError::Database(sqlx::Error::Database(Box::new(DuplicateKey)));

        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.kind(), ErrorKind::Conflict);

        let app_err = err.to_app_error();
        assert_eq!(app_err.kind(), ErrorKind::Conflict);
        assert!(!app_err.message().contains("idx_users_handle"));
    }

    #[test]
    fn test_other_database_errors_stay_internal() {
        let err = AuthError::Database(sqlx::Error::RowNotFound);

        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_app_error().message(), "Internal server error");
    }
}
