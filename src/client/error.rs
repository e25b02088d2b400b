//! Client error type
//!
//! Every failed call ends in one of these. The split matters to callers:
//! `Validation` is shown next to form fields, `Connectivity` means "try again
//! later", `Rejected` is any other refusal from the API.

use serde::Deserialize;
use thiserror::Error;

use crate::shared::config::ConfigError;
use crate::shared::validation::FieldError;

#[derive(Debug, Error)]
pub enum ClientError {
    /// Field errors, found locally or returned by the API with a 400
    #[error("Validation failed: {}", describe(.0))]
    Validation(Vec<FieldError>),

    /// Network failure or 5xx, after retries
    #[error("Server unreachable: {message}")]
    Connectivity {
        message: String,
        /// HTTP status when the server did answer
        status: Option<u16>,
    },

    /// Any other non-success answer (401, 403, 404, 409, ...)
    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Success status with a body that does not match the expected shape
    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Reading or writing the stored session failed
    #[error("Session error: {0}")]
    Session(String),

    /// An owner call was made without a stored token
    #[error("Not logged in")]
    NotAuthenticated,

    #[error(transparent)]
    Config(#[from] ConfigError),
}

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// JSON error body rendered by the API
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub errors: Vec<FieldError>,
}

impl ClientError {
    /// Classify a non-success answer
    pub(crate) fn from_status(status: u16, body: ErrorBody) -> Self {
        let message = if body.error.is_empty() {
            format!("HTTP {}", status)
        } else {
            body.error
        };

        match status {
            400 if !body.errors.is_empty() => Self::Validation(body.errors),
            500..=599 => Self::Connectivity {
                message,
                status: Some(status),
            },
            _ => Self::Rejected { status, message },
        }
    }

    /// Worth another attempt: the request may succeed unchanged
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Connectivity { .. })
    }

    /// Field errors carried by this error (empty for other variants)
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::Validation(errors) => errors,
            _ => &[],
        }
    }

    /// HTTP status of the answer, if there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Connectivity { status, .. } => *status,
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        Self::Connectivity {
            message: err.to_string(),
            status: err.status().map(|s| s.as_u16()),
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        Self::Session(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        Self::Session(format!("corrupt session file: {}", err))
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Session(err.to_string())
    }
}
