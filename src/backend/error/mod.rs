//! Backend Error Module
//!
//! Error types returned by HTTP handlers and their conversion to responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! ├── conversion.rs - IntoResponse implementation
//! └── rejection.rs  - Extractor rejections as BackendError
//! ```
//!
//! # Error Types
//!
//! - `HandlerError` - Explicit status raised by a handler (401, 403, 404, 409, 503)
//! - `DatabaseError` - sqlx failures, reported as 500 without details
//! - `HashError` / `TokenError` - bcrypt and JWT failures
//! - `SharedError` - Validation (400, with field list) and resync rejections (409)
//! - `SerializationError` - JSON serialization errors
//!
//! # Example
//!
//! ```rust,no_run
//! use parkeasy::backend::error::BackendError;
//! use axum::Json;
//!
//! async fn handler() -> Result<Json<()>, BackendError> {
//!     Err(BackendError::not_found("Lot not found"))
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

/// Malformed body, query and path handling
pub mod rejection;

// Re-export commonly used types
pub use types::BackendError;
