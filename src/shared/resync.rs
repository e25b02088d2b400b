//! Capacity resynchronization
//!
//! Computes the spot changes that bring a lot's spot set in line with a new
//! capacity. Growing fills the lowest unused `A{n}` labels. Shrinking removes
//! free spots starting from the highest label; occupied spots are never
//! removed, and a shrink that would need to is rejected as a whole.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;
use crate::shared::natural::natural_cmp;
use crate::shared::spot::{NewSpot, Spot};

/// Spots to insert and delete for one resync
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpotResyncPlan {
    pub to_create: Vec<NewSpot>,
    pub to_remove: Vec<Uuid>,
}

impl SpotResyncPlan {
    /// True when the spot set already matches the capacity
    pub fn is_noop(&self) -> bool {
        self.to_create.is_empty() && self.to_remove.is_empty()
    }

    pub fn summary(&self, capacity: i32) -> ResyncSummary {
        ResyncSummary {
            capacity,
            created: self.to_create.len(),
            removed: self.to_remove.len(),
        }
    }
}

/// Counts reported back after a resync
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResyncSummary {
    pub capacity: i32,
    pub created: usize,
    pub removed: usize,
}

/// Plan the changes taking `existing` to exactly `capacity` spots
pub fn plan_resync(existing: &[Spot], capacity: i32) -> Result<SpotResyncPlan, SharedError> {
    let target = usize::try_from(capacity).unwrap_or(0);
    let current = existing.len();

    if target > current {
        let taken: HashSet<&str> = existing.iter().map(|s| s.label.as_str()).collect();
        let to_create = (1u32..)
            .map(NewSpot::numbered)
            .filter(|spot| !taken.contains(spot.label.as_str()))
            .take(target - current)
            .collect();
        return Ok(SpotResyncPlan {
            to_create,
            to_remove: Vec::new(),
        });
    }

    let surplus = current - target;
    if surplus == 0 {
        return Ok(SpotResyncPlan::default());
    }

    let mut free: Vec<&Spot> = existing.iter().filter(|s| !s.occupied).collect();
    if free.len() < surplus {
        return Err(SharedError::ResyncBlocked {
            requested: capacity,
            occupied: current - free.len(),
            surplus,
            removable: free.len(),
        });
    }

    free.sort_by(|a, b| natural_cmp(&b.label, &a.label));
    Ok(SpotResyncPlan {
        to_create: Vec::new(),
        to_remove: free.iter().take(surplus).map(|s| s.id).collect(),
    })
}
