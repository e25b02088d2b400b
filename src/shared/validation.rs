//! Field Validation
//!
//! Presence and range checks for the request bodies that owners and drivers
//! send. The same rules run in the client (to report errors inline before a
//! request goes out) and in the backend (authoritative).
//!
//! Every check collects all failing fields instead of stopping at the first one.

use serde::{Deserialize, Serialize};

use crate::shared::auth::{LoginRequest, RegisterRequest};
use crate::shared::lot::{CreateLotRequest, RegenerateSpotsRequest, UpdateLotRequest};

/// Largest capacity a single lot may declare
pub const MAX_CAPACITY: i32 = 1000;

/// Minimum password length accepted at registration and login
pub const MIN_PASSWORD_LEN: usize = 6;

const MIN_NAME_LEN: usize = 3;
const MIN_ADDRESS_LEN: usize = 5;

/// A single failed field check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Name of the offending field as it appears on the wire
    pub field: String,
    /// Human-readable explanation
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Validate a lot creation request
pub fn validate_create_lot(request: &CreateLotRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();
    check_name(&mut errors, Some(&request.name));
    check_address(&mut errors, Some(&request.address));
    check_latitude(&mut errors, Some(request.latitude));
    check_longitude(&mut errors, Some(request.longitude));
    check_capacity(&mut errors, Some(request.capacity));
    errors
}

/// Validate a partial lot update; absent fields are not checked
pub fn validate_update_lot(request: &UpdateLotRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if request.name.is_some() {
        check_name(&mut errors, request.name.as_deref());
    }
    if request.address.is_some() {
        check_address(&mut errors, request.address.as_deref());
    }
    if request.latitude.is_some() {
        check_latitude(&mut errors, request.latitude);
    }
    if request.longitude.is_some() {
        check_longitude(&mut errors, request.longitude);
    }
    if request.capacity.is_some() {
        check_capacity(&mut errors, request.capacity);
    }
    errors
}

/// Validate a regenerate request; an absent capacity means "keep the stored one"
pub fn validate_regenerate(request: &RegenerateSpotsRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if request.capacity.is_some() {
        check_capacity(&mut errors, request.capacity);
    }
    errors
}

/// Validate an optional driver position given as separate query values
pub fn validate_position(latitude: Option<f64>, longitude: Option<f64>) -> Vec<FieldError> {
    let mut errors = Vec::new();
    match (latitude, longitude) {
        (None, None) => {}
        (lat, lon) => {
            check_latitude(&mut errors, lat);
            check_longitude(&mut errors, lon);
        }
    }
    errors
}

/// Validate login credentials
pub fn validate_login(request: &LoginRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();
    check_email(&mut errors, &request.email);
    check_password(&mut errors, &request.password);
    errors
}

/// Validate a registration request
pub fn validate_registration(request: &RegisterRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();
    if request.name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    }
    check_email(&mut errors, &request.email);
    check_password(&mut errors, &request.password);
    errors
}

/// Loose `local@domain.tld` shape check
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

fn check_name(errors: &mut Vec<FieldError>, name: Option<&str>) {
    match name.map(str::trim) {
        None | Some("") => errors.push(FieldError::new("name", "Name is required")),
        Some(n) if n.chars().count() < MIN_NAME_LEN => errors.push(FieldError::new(
            "name",
            format!("Name must be at least {MIN_NAME_LEN} characters"),
        )),
        Some(_) => {}
    }
}

fn check_address(errors: &mut Vec<FieldError>, address: Option<&str>) {
    match address.map(str::trim) {
        None | Some("") => errors.push(FieldError::new("address", "Address is required")),
        Some(a) if a.chars().count() < MIN_ADDRESS_LEN => errors.push(FieldError::new(
            "address",
            format!("Address must be at least {MIN_ADDRESS_LEN} characters"),
        )),
        Some(_) => {}
    }
}

fn check_latitude(errors: &mut Vec<FieldError>, latitude: Option<f64>) {
    match latitude {
        Some(lat) if lat.is_finite() && (-90.0..=90.0).contains(&lat) => {}
        Some(_) => errors.push(FieldError::new("latitude", "Latitude must be between -90 and 90")),
        None => errors.push(FieldError::new("latitude", "Latitude is required")),
    }
}

fn check_longitude(errors: &mut Vec<FieldError>, longitude: Option<f64>) {
    match longitude {
        Some(lon) if lon.is_finite() && (-180.0..=180.0).contains(&lon) => {}
        Some(_) => errors.push(FieldError::new(
            "longitude",
            "Longitude must be between -180 and 180",
        )),
        None => errors.push(FieldError::new("longitude", "Longitude is required")),
    }
}

fn check_capacity(errors: &mut Vec<FieldError>, capacity: Option<i32>) {
    match capacity {
        Some(c) if c <= 0 => {
            errors.push(FieldError::new("capacity", "Capacity must be greater than 0"))
        }
        Some(c) if c > MAX_CAPACITY => errors.push(FieldError::new(
            "capacity",
            format!("Capacity cannot exceed {MAX_CAPACITY}"),
        )),
        Some(_) => {}
        None => errors.push(FieldError::new("capacity", "Capacity is required")),
    }
}

fn check_email(errors: &mut Vec<FieldError>, email: &str) {
    if email.trim().is_empty() {
        errors.push(FieldError::new("email", "Email is required"));
    } else if !is_valid_email(email.trim()) {
        errors.push(FieldError::new("email", "Email format is invalid"));
    }
}

fn check_password(errors: &mut Vec<FieldError>, password: &str) {
    if password.trim().is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    } else if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
}
