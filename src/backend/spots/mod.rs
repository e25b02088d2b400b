//! Parking Spots
//!
//! - **`db`** - spot queries, batch insert and capacity resync
//! - **`handlers`** - `/api/lugares` endpoints

pub mod db;

pub mod handlers;

pub use handlers::{list_lot_spots, update_spot};
