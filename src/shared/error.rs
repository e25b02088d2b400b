//! Shared Error Types
//!
//! This module defines error types that are shared between the client and backend.
//! These errors represent common failure cases that can occur in both contexts.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON/TOML serialization failures
//! - `ValidationError` - One or more fields failed validation
//! - `ResyncBlocked` - A capacity change would remove occupied spots
//!
//! # Usage
//!
//! ```rust
//! use parkeasy::shared::error::SharedError;
//!
//! let error = SharedError::validation("capacity", "Capacity must be greater than 0");
//! assert_eq!(error.field_errors().len(), 1);
//! ```
use thiserror::Error;

use crate::shared::validation::FieldError;

/// Shared error types that can occur in both client and backend
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SharedError {
    /// Serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation failed: {}", summarize(.errors))]
    ValidationError {
        /// Every field that failed, in check order
        errors: Vec<FieldError>,
    },

    /// Shrinking a lot would need more free spots than it has
    #[error("Cannot reduce capacity to {requested}: {occupied} spots are occupied and only {removable} of the {surplus} surplus spots are free")]
    ResyncBlocked {
        /// Capacity that was asked for
        requested: i32,
        /// Spots currently occupied in the lot
        occupied: usize,
        /// Number of spots that would have to go
        surplus: usize,
        /// Free spots available for removal
        removable: usize,
    },
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a validation error for a single field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            errors: vec![FieldError::new(field, message)],
        }
    }

    /// Wrap a list of field errors, or `Ok(())` when the list is empty
    pub fn check(errors: Vec<FieldError>) -> Result<(), Self> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self::ValidationError { errors })
        }
    }

    /// Field errors carried by this error (empty for other variants)
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            Self::ValidationError { errors } => errors,
            _ => &[],
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

impl From<toml::de::Error> for SharedError {
    fn from(err: toml::de::Error) -> Self {
        Self::serialization(format!("TOML error: {}", err))
    }
}

impl From<toml::ser::Error> for SharedError {
    fn from(err: toml::ser::Error) -> Self {
        Self::serialization(format!("TOML error: {}", err))
    }
}
