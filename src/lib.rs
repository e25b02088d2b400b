//! ParkEasy - Main Library
//!
//! Parking availability for drivers and lot management for owners.
//!
//! # Module Structure
//!
//! - **`shared`** - Types and rules used on both sides of the wire
//!   - Lots, spots, availability accounting, proximity ranking
//!   - Natural label ordering, capacity resync planning
//!   - Field validation, configuration, error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum REST API over PostgreSQL
//!   - JWT authentication for lot owners
//!
//! - **`client`** - Async HTTP client and the `parkeasy` CLI
//!
//! # Feature Flags
//!
//! - **`ssr`** - Enables the backend (Axum, sqlx, bcrypt, jsonwebtoken)
//!
//! # Usage
//!
//! ## Server-Side
//!
//! ```rust,no_run
//! use parkeasy::backend::server::init::create_app;
//!
//! # async fn example() {
//! let app = create_app().await;
//! // Serve with axum::serve
//! # }
//! ```
//!
//! ## Ranking
//!
//! ```rust
//! use parkeasy::shared::ranking::{rank_lots, Position};
//!
//! let ranked = rank_lots(Vec::new(), Some(Position::new(4.65, -74.05)));
//! assert!(ranked.is_empty());
//! ```
//!
//! # Error Handling
//!
//! - `shared::error::SharedError` - validation, serialization, blocked resync
//! - `backend::error::BackendError` - rendered as a JSON error response
//! - `client::ClientError` - validation vs connectivity vs rejection

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;

/// HTTP client
pub mod client;
