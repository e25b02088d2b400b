//! Client Module
//!
//! Async HTTP client for the ParkEasy API, used by the `parkeasy` CLI.
//!
//! # Module Structure
//!
//! ```text
//! client/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - `parkeasy` binary (clap)
//! ├── api.rs          - `ApiClient`, one method per endpoint
//! ├── session.rs      - Token storage (memory or TOML file)
//! ├── retry.rs        - Bounded linear-backoff retries
//! └── error.rs        - `ClientError`
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use parkeasy::client::{ApiClient, MemorySessionStore};
//! use parkeasy::shared::config::AppConfig;
//! use parkeasy::shared::ranking::Position;
//!
//! # async fn example() -> Result<(), parkeasy::client::ClientError> {
//! let client = ApiClient::new(AppConfig::from_env()?, Arc::new(MemorySessionStore::new()));
//! let lots = client.nearby(Some(Position::new(4.65, -74.05))).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod error;
pub mod retry;
pub mod session;

pub use api::ApiClient;
pub use error::ClientError;
pub use retry::{with_retry, RetryError, RetryPolicy};
pub use session::{FileSessionStore, MemorySessionStore, Session, SessionStore};
