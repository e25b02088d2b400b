//! Shared Module
//!
//! Wire types and pure domain logic used by both the backend and the client.
//! Nothing in here touches the network or the database.
//!
//! # Overview
//!
//! - [`lot`], [`spot`], [`auth`]: request and record types
//! - [`availability`]: free-count and percentage arithmetic
//! - [`ranking`]: proximity ordering for drivers
//! - [`natural`]: label ordering for spot lists
//! - [`resync`]: spot changes for a capacity change
//! - [`validation`]: field checks run on both sides

/// Authentication wire types
pub mod auth;

/// Occupancy accounting
pub mod availability;

/// Client configuration
pub mod config;

/// Shared error types
pub mod error;

/// Parking lot types
pub mod lot;

/// Natural label ordering
pub mod natural;

/// Proximity ranking
pub mod ranking;

/// Response envelopes
pub mod response;

/// Capacity resynchronization
pub mod resync;

/// Parking spot types
pub mod spot;

/// Field validation
pub mod validation;

pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::SharedError;
pub use lot::{Lot, LotAvailability, LotStatus};
pub use ranking::{Position, RankedLot};
pub use spot::Spot;
pub use validation::FieldError;
