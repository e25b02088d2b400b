/**
 * Registration Handler
 *
 * POST /api/auth/register
 *
 * 1. Validate name, email and password
 * 2. Reject an email that is already registered (409)
 * 3. Hash the password with bcrypt and store the user
 * 4. Return a token so the owner is signed in right away
 */

use axum::{extract::State, http::StatusCode, response::Json};
use bcrypt::{hash, DEFAULT_COST};

use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::{create_user, get_user_by_email, normalize_email};
use crate::backend::error::BackendError;
use crate::backend::middleware::ApiJson;
use crate::backend::server::state::AppState;
use crate::shared::auth::{AuthResponse, RegisterRequest};
use crate::shared::validation::validate_registration;
use crate::shared::SharedError;

/// Registration handler
///
/// # Errors
///
/// * `400 Bad Request` - a field failed validation (`errors` lists them)
/// * `409 Conflict` - the email is already registered
/// * `503 Service Unavailable` - database not configured
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    SharedError::check(validate_registration(&request))?;
    let pool = state.pool()?;

    let email = normalize_email(&request.email);
    let name = request.name.trim();
    tracing::info!("Registration request for {}", email);

    if get_user_by_email(pool, &email).await?.is_some() {
        tracing::warn!("Email already registered: {}", email);
        return Err(BackendError::conflict("Email already registered"));
    }

    let password_hash = hash(&request.password, DEFAULT_COST)?;

    let user = create_user(pool, name, &email, &password_hash)
        .await
        .map_err(BackendError::from)
        .map_err(|e| {
            if e.is_unique_violation() {
                BackendError::conflict("Email already registered")
            } else {
                e
            }
        })?;

    let token = create_token(&state.auth, user.id, &user.email, &user.name)?;
    tracing::info!("User registered: {}", user.email);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "User registered successfully".to_string(),
            token,
            user: user.into(),
        }),
    ))
}
