//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Router request helpers
//! - Database test fixtures
//! - Authentication test helpers
//! - Custom assertion macros

pub mod assertions;
#[cfg(feature = "ssr")]
pub mod app;
pub mod auth_helpers;
pub mod database;

// Re-export commonly used utilities
#[cfg(feature = "ssr")]
pub use app::*;
pub use auth_helpers::*;
pub use database::*;
pub use fixtures::*;
