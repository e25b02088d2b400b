//! Authentication wire types
//!
//! Request and response bodies for the `/api/auth/*` endpoints. Shared so the
//! client deserializes exactly what the handlers serialize.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Registration request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RegisterRequest {
    /// Display name of the lot owner
    pub name: String,
    /// Login email (unique)
    pub email: String,
    /// Plain-text password, hashed before storage
    pub password: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Returned by register and login: a bearer token plus the account it belongs to.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthResponse {
    /// Human-readable status line
    pub message: String,
    /// JWT to send as `Authorization: Bearer <token>`
    pub token: String,
    pub user: UserResponse,
}

/// User information that is safe to return to clients (no password hash)
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}
