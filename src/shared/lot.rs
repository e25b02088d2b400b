//! Parking Lot Data Structures
//!
//! A lot is a parking facility with a fixed capacity, owned by exactly one
//! account. This module holds the persisted shape (`Lot`), the bodies used to
//! create and edit it, and the public availability record (`LotAvailability`)
//! served to drivers.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::shared::availability::AvailabilitySnapshot;

/// Whether a lot is listed publicly
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LotStatus {
    /// Shown in the public availability listing
    #[default]
    Active,
    /// Hidden from drivers, still editable by the owner
    Inactive,
}

impl LotStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LotStatus::Active => "active",
            LotStatus::Inactive => "inactive",
        }
    }

}

/// Unrecognized lot status text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown lot status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for LotStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(LotStatus::Active),
            "inactive" => Ok(LotStatus::Inactive),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// A parking lot as stored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lot {
    pub id: Uuid,
    /// Owning account
    pub owner_id: Uuid,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Declared number of spots (always > 0)
    pub capacity: i32,
    pub status: LotStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /api/parqueaderos`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreateLotRequest {
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub capacity: i32,
}

impl CreateLotRequest {
    /// Copy with surrounding whitespace removed from text fields
    pub fn trimmed(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            ..self.clone()
        }
    }
}

/// Body of `PUT /api/parqueaderos/{id}`; only present fields change
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UpdateLotRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<LotStatus>,
}

impl UpdateLotRequest {
    /// True when the body carries no field to change
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.latitude.is_none()
            && self.longitude.is_none()
            && self.capacity.is_none()
            && self.status.is_none()
    }

    /// Apply the present fields on top of an existing lot
    pub fn apply_to(&self, lot: &Lot) -> Lot {
        Lot {
            name: self
                .name
                .as_deref()
                .map(|n| n.trim().to_string())
                .unwrap_or_else(|| lot.name.clone()),
            address: self
                .address
                .as_deref()
                .map(|a| a.trim().to_string())
                .unwrap_or_else(|| lot.address.clone()),
            latitude: self.latitude.unwrap_or(lot.latitude),
            longitude: self.longitude.unwrap_or(lot.longitude),
            capacity: self.capacity.unwrap_or(lot.capacity),
            status: self.status.unwrap_or(lot.status),
            ..lot.clone()
        }
    }
}

/// Body of `POST /api/parqueaderos/{id}/regenerate-lugares`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RegenerateSpotsRequest {
    /// Target capacity; the lot's stored capacity when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
}

/// Public listing record: a lot's public fields plus its occupancy counts.
///
/// The counts serialize flat next to the lot fields, including the rounded
/// `percentage` shown by the compact indicator.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LotAvailability {
    pub id: Uuid,
    pub name: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(flatten)]
    pub snapshot: AvailabilitySnapshot,
}

impl LotAvailability {
    /// Build the record from a lot and its occupied spot count
    pub fn from_lot(lot: &Lot, occupied_count: i64) -> Self {
        Self::new(
            lot.id,
            lot.name.clone(),
            lot.address.clone(),
            lot.latitude,
            lot.longitude,
            lot.capacity,
            occupied_count,
        )
    }

    pub fn new(
        id: Uuid,
        name: String,
        address: String,
        latitude: f64,
        longitude: f64,
        capacity: i32,
        occupied_count: i64,
    ) -> Self {
        Self {
            id,
            name,
            address,
            latitude,
            longitude,
            snapshot: AvailabilitySnapshot::new(i64::from(capacity), occupied_count),
        }
    }

    pub fn free_count(&self) -> i64 {
        self.snapshot.free_count
    }

    /// Rounded free percentage for the compact indicator
    pub fn percentage(&self) -> u8 {
        self.snapshot.percentage
    }
}
