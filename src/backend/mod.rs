//! Backend Module
//!
//! Server-side code for the ParkEasy REST API: an Axum HTTP server over
//! PostgreSQL (sqlx) with JWT-authenticated owner routes and a public
//! availability listing.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Registration, login, JWT tokens, user storage
//! - **`lots`** - Lot CRUD, spot regeneration, availability listing
//! - **`spots`** - Spot listing and editing, batch insert, capacity resync
//! - **`health`** - Banner and database probe
//! - **`middleware`** - JWT verification layer
//! - **`error`** - Backend error type and JSON error responses
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - `parkeasy-server` binary
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Authentication
//! ├── lots/           - Parking lots
//! ├── spots/          - Parking spots
//! ├── health/         - Health check
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! `AppState` holds the optional `PgPool` and the JWT settings. Without a
//! pool the server still starts; database-backed handlers answer 503.
//!
//! # Error Handling
//!
//! Handlers return `Result<_, BackendError>`; the error renders as
//! `{"error": ..., "status": ...}` with the matching status code.

/// Server setup and configuration
#[cfg(feature = "ssr")]
pub mod server;

/// Route configuration
#[cfg(feature = "ssr")]
pub mod routes;

/// Backend error types
#[cfg(feature = "ssr")]
pub mod error;

/// Authentication and user management
#[cfg(feature = "ssr")]
pub mod auth;

/// Parking lots
#[cfg(feature = "ssr")]
pub mod lots;

/// Parking spots
#[cfg(feature = "ssr")]
pub mod spots;

/// Health check
#[cfg(feature = "ssr")]
pub mod health;

/// Middleware for request processing
#[cfg(feature = "ssr")]
pub mod middleware;

/// Re-export commonly used types
#[cfg(feature = "ssr")]
pub use error::BackendError;
#[cfg(feature = "ssr")]
pub use server::{create_app, AppState};
#[cfg(feature = "ssr")]
pub use routes::create_router;
