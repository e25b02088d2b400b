/**
 * Backend Error Types
 *
 * Every handler returns `Result<_, BackendError>`. The variant decides the
 * HTTP status; `conversion.rs` turns it into the JSON error body.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::validation::FieldError;
use crate::shared::SharedError;

/// Backend-specific error type
#[derive(Debug, Error)]
pub enum BackendError {
    /// Error raised by a handler with an explicit status
    #[error("Handler error: {message}")]
    HandlerError {
        status: StatusCode,
        message: String,
    },

    /// Query or connection failure
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    /// Password hashing failure
    #[error("Password hashing error: {0}")]
    HashError(#[from] bcrypt::BcryptError),

    /// Token encoding failure
    #[error("Token error: {0}")]
    TokenError(#[from] jsonwebtoken::errors::Error),

    /// Validation or resync rejection from the shared domain layer
    #[error(transparent)]
    SharedError(#[from] SharedError),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden() -> Self {
        Self::handler(StatusCode::FORBIDDEN, "Not authorized")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::CONFLICT, message)
    }

    /// No database pool was configured at startup
    pub fn database_unavailable() -> Self {
        Self::handler(StatusCode::SERVICE_UNAVAILABLE, "Database not configured")
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::HashError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::TokenError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::SharedError(err) => match err {
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::ResyncBlocked { .. } => StatusCode::CONFLICT,
            },
            Self::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to the caller; internal details stay in the logs
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::DatabaseError(_) => "Database error".to_string(),
            Self::HashError(_) | Self::TokenError(_) => "Server error".to_string(),
            Self::SharedError(err) => match err {
                SharedError::ValidationError { .. } => "Validation failed".to_string(),
                other => other.to_string(),
            },
            Self::SerializationError(err) => err.to_string(),
        }
    }

    /// Field errors to include in the response body
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::SharedError(err) => err.field_errors(),
            _ => &[],
        }
    }

    /// Whether this wraps a unique-constraint violation
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::DatabaseError(err) => err
                .as_database_error()
                .is_some_and(|db| db.is_unique_violation()),
            _ => false,
        }
    }
}
