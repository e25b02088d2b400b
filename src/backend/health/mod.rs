//! Health Check
//!
//! `GET /api/health` runs `SELECT 1` against the pool.

use axum::{extract::State, response::Json};

use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::response::HealthResponse;

/// Banner served at `/`
pub const BANNER: &str = "ParkEasy API running";

pub async fn root() -> &'static str {
    BANNER
}

/// 503 without a database, 500 when the probe query fails
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, BackendError> {
    let pool = state.pool()?;
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        database: "connected".to_string(),
    }))
}
