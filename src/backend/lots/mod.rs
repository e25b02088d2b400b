//! Parking Lots
//!
//! - **`db`** - queries and transactions on `lots`
//! - **`handlers`** - `/api/parqueaderos` endpoints

pub mod db;

pub mod handlers;

pub use handlers::{
    create_lot, delete_lot, general_availability, list_my_lots, regenerate_spots, update_lot,
};
