//! Parking Spot Data Structures
//!
//! A spot is one individually trackable space inside a lot. Spots are generated
//! in a batch when a lot is created and edited one at a time afterwards.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::natural::natural_cmp;

/// Kind given to generated spots
pub const DEFAULT_KIND: &str = "normal";

/// Prefix of generated spot labels (`A1`, `A2`, ...)
pub const LABEL_PREFIX: &str = "A";

/// A parking spot as stored
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "ssr", derive(sqlx::FromRow))]
pub struct Spot {
    pub id: Uuid,
    /// Parent lot
    pub lot_id: Uuid,
    /// Free-form label such as "A1"
    pub label: String,
    pub kind: String,
    pub occupied: bool,
    /// Position hints for the lot layout
    pub x: i32,
    pub y: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A spot that has not been inserted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSpot {
    pub label: String,
    pub kind: String,
    pub x: i32,
    pub y: i32,
}

impl NewSpot {
    /// Generated spot number `n` (1-based): label `A{n}`, column 0, row `n - 1`
    pub fn numbered(n: u32) -> Self {
        Self {
            label: spot_label(n),
            kind: DEFAULT_KIND.to_string(),
            x: 0,
            y: i32::try_from(n.saturating_sub(1)).unwrap_or(i32::MAX),
        }
    }
}

/// Body of `PUT /api/lugares/{id}`; only present fields change
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UpdateSpotRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupied: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl UpdateSpotRequest {
    /// Flip only the occupied flag of `spot`
    pub fn toggle(spot: &Spot) -> Self {
        Self {
            occupied: Some(!spot.occupied),
            ..Default::default()
        }
    }

    /// Drop empty strings, which carry no change
    pub fn normalized(mut self) -> Self {
        self.kind = self.kind.filter(|k| !k.trim().is_empty());
        self.label = self.label.filter(|l| !l.trim().is_empty());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.occupied.is_none()
            && self.kind.is_none()
            && self.x.is_none()
            && self.y.is_none()
            && self.label.is_none()
    }
}

/// Label for generated spot number `n`
pub fn spot_label(n: u32) -> String {
    format!("{LABEL_PREFIX}{n}")
}

/// The batch created together with a new lot of `capacity` spots
pub fn initial_spots(capacity: i32) -> Vec<NewSpot> {
    let count = u32::try_from(capacity).unwrap_or(0);
    (1..=count).map(NewSpot::numbered).collect()
}

/// Sort spots by label in natural order ("A2" before "A10")
pub fn sort_spots(spots: &mut [Spot]) {
    spots.sort_by(|a, b| natural_cmp(&a.label, &b.label));
}
