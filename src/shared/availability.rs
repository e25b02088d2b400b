//! Occupancy accounting for a single lot.
//!
//! `free_count` is deliberately unclamped: a lot reporting more occupied spots
//! than its capacity yields a negative count so the inconsistency stays visible
//! to operators. Only the display percentage is bounded.

use serde::{Deserialize, Serialize};

/// Occupancy of one lot, recomputed from current spot state on every request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilitySnapshot {
    pub capacity: i64,
    pub occupied_count: i64,
    /// `capacity - occupied_count`; negative when the data is inconsistent
    pub free_count: i64,
    /// Rounded free share for the compact indicator (see [`display_percentage`])
    pub percentage: u8,
}

impl AvailabilitySnapshot {
    pub fn new(capacity: i64, occupied_count: i64) -> Self {
        let free = free_count(capacity, occupied_count);
        Self {
            capacity,
            occupied_count,
            free_count: free,
            percentage: display_percentage(free, capacity),
        }
    }

    /// Unrounded free percentage (see [`availability_percentage`])
    pub fn raw_percentage(&self) -> f64 {
        availability_percentage(self.capacity, self.occupied_count)
    }
}

/// `capacity - occupied`, never clamped
pub fn free_count(capacity: i64, occupied: i64) -> i64 {
    capacity - occupied
}

/// Free spots as a percentage of `total`; 0 when `total <= 0`.
pub fn availability_percentage(total: i64, occupied: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    let free = free_count(total, occupied);
    (free as f64 * 100.0) / total as f64
}

/// Percentage for the compact indicator: rounded to the nearest integer and
/// bounded to `0..=100`. Returns 0 when `total <= 0`.
pub fn display_percentage(free: i64, total: i64) -> u8 {
    if total <= 0 {
        return 0;
    }
    let pct = ((free as f64 * 100.0) / total as f64).round();
    pct.clamp(0.0, 100.0) as u8
}
