/**
 * Get Current User Handler
 *
 * GET /api/auth/me. Runs behind the auth middleware, so the token has
 * already been verified; this only loads the account.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::users::get_user_by_id;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::auth::UserResponse;

pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(current): AuthUser,
) -> Result<Json<UserResponse>, BackendError> {
    let pool = state.pool()?;

    let user = get_user_by_id(pool, current.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", current.user_id);
            BackendError::not_found("User not found")
        })?;

    Ok(Json(user.into()))
}
