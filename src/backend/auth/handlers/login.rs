/**
 * Login Handler
 *
 * POST /api/auth/login
 *
 * # Security
 *
 * - Unknown email and wrong password both answer 401 with the same message
 * - Passwords are never logged or returned in responses
 */

use axum::{extract::State, response::Json};
use bcrypt::verify;

use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::{get_user_by_email, normalize_email};
use crate::backend::error::BackendError;
use crate::backend::middleware::ApiJson;
use crate::backend::server::state::AppState;
use crate::shared::auth::{AuthResponse, LoginRequest};
use crate::shared::validation::validate_login;
use crate::shared::SharedError;

const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Login handler
///
/// # Errors
///
/// * `400 Bad Request` - email or password failed validation
/// * `401 Unauthorized` - user not found or password incorrect
/// * `503 Service Unavailable` - database not configured
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    SharedError::check(validate_login(&request))?;
    let pool = state.pool()?;

    let email = normalize_email(&request.email);
    tracing::info!("Login request for: {}", email);

    let user = get_user_by_email(pool, &email).await?.ok_or_else(|| {
        tracing::warn!("User not found: {}", email);
        BackendError::unauthorized(INVALID_CREDENTIALS)
    })?;

    if !verify(&request.password, &user.password_hash)? {
        tracing::warn!("Invalid password for user: {}", email);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = create_token(&state.auth, user.id, &user.email, &user.name)?;
    tracing::info!("User logged in: {}", user.email);

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        user: user.into(),
    }))
}
