//! Route Configuration Module
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation and layers
//! └── api_routes.rs   - `/api/*` endpoints, public and owner-only
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use parkeasy::backend::routes::create_router;
//! use parkeasy::backend::server::{AppState, AuthConfig};
//!
//! let router = create_router(AppState::without_database(AuthConfig::default()));
//! ```

/// Main router creation
pub mod router;

/// API endpoint handlers
pub mod api_routes;

pub use router::create_router;
