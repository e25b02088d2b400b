//! Response envelopes returned by the REST API

use serde::{Deserialize, Serialize};

use crate::shared::lot::Lot;
use crate::shared::ranking::RankedLot;
use crate::shared::resync::ResyncSummary;
use crate::shared::spot::Spot;

/// A list with its length, as returned by the listing endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListResponse<T> {
    pub count: usize,
    pub data: Vec<T>,
    pub message: String,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>, message: impl Into<String>) -> Self {
        Self {
            count: data.len(),
            data,
            message: message.into(),
        }
    }
}

/// A single record with a status line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DataResponse<T> {
    pub message: String,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data,
        }
    }
}

/// Status line only
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Returned by lot creation: the lot and its generated spots
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LotCreatedResponse {
    pub message: String,
    pub lot: Lot,
    pub spots: Vec<Spot>,
}

/// Returned by lot update and spot regeneration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LotUpdatedResponse {
    pub message: String,
    pub data: Lot,
    /// Present when the spot set was resynchronized
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resync: Option<ResyncSummary>,
}

/// Public availability listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AvailabilityResponse {
    pub count: usize,
    pub lots: Vec<RankedLot>,
}

impl AvailabilityResponse {
    pub fn new(lots: Vec<RankedLot>) -> Self {
        Self {
            count: lots.len(),
            lots,
        }
    }
}

/// Health probe result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
    pub database: String,
}
