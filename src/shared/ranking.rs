//! Proximity ranking of lots for drivers.
//!
//! With a known position, lots are ordered by great-circle distance and exact
//! distance ties go to the lot with more free spots. Without a position, lots
//! are ordered by free spots alone. The sort is stable, so lots that compare
//! equal keep their input order.

use serde::{Deserialize, Serialize};

use crate::shared::lot::LotAvailability;

/// Mean Earth radius used by [`haversine_km`]
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic position in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both `lat` and `lon` are needed to form a position
    pub fn from_parts(lat: Option<f64>, lon: Option<f64>) -> Option<Self> {
        match (lat, lon) {
            (Some(lat), Some(lon)) => Some(Self::new(lat, lon)),
            _ => None,
        }
    }
}

/// A lot's availability record annotated with its distance from the driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedLot {
    #[serde(flatten)]
    pub availability: LotAvailability,
    /// Kilometres from the driver; absent when no position was given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
}

impl RankedLot {
    pub fn free_count(&self) -> i64 {
        self.availability.free_count()
    }
}

/// Great-circle distance between two points, in kilometres
pub fn haversine_km(from: Position, to: Position) -> f64 {
    let d_lat = (to.latitude - from.latitude).to_radians();
    let d_lon = (to.longitude - from.longitude).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + from.latitude.to_radians().cos()
            * to.latitude.to_radians().cos()
            * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Order lots for a driver at `position` (or anywhere, when `None`)
pub fn rank_lots(lots: Vec<LotAvailability>, position: Option<Position>) -> Vec<RankedLot> {
    let mut ranked: Vec<RankedLot> = lots
        .into_iter()
        .map(|availability| {
            let distance = position.map(|p| {
                haversine_km(p, Position::new(availability.latitude, availability.longitude))
            });
            RankedLot {
                availability,
                distance,
            }
        })
        .collect();

    match position {
        Some(_) => ranked.sort_by(|a, b| {
            let da = a.distance.unwrap_or(f64::INFINITY);
            let db = b.distance.unwrap_or(f64::INFINITY);
            da.total_cmp(&db)
                .then_with(|| b.free_count().cmp(&a.free_count()))
        }),
        None => ranked.sort_by(|a, b| b.free_count().cmp(&a.free_count())),
    }
    ranked
}
