//! Server Module
//!
//! Initialization and configuration of the Axum HTTP server.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState (optional pool, JWT settings)
//! ├── config.rs       - Environment configuration (database, JWT, port)
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: JWT settings and database pool
//! 2. **State Creation**: `AppState` wraps both
//! 3. **Router Creation**: routes, auth layer, CORS and tracing

/// Application state management
pub mod state;

/// Server configuration loading
pub mod config;

/// Server initialization
pub mod init;

// Re-export commonly used types
pub use config::AuthConfig;
pub use init::create_app;
pub use state::AppState;
