//! Middleware Module
//!
//! HTTP middleware applied to routes before they reach handlers.
//!
//! - **`auth`** - JWT verification for owner routes
//! - **`extract`** - `Json`/`Path`/`Query` wrappers rejecting with JSON errors
//!
//! # Example
//!
//! ```rust,ignore
//! let protected = Router::new()
//!     .route("/api/auth/me", get(get_me))
//!     .route_layer(axum::middleware::from_fn_with_state(state.clone(), auth_middleware));
//! ```

pub mod auth;
pub mod extract;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
pub use extract::{ApiJson, ApiPath, ApiQuery};
