/**
 * Application State Management
 *
 * `AppState` is the single state container shared by every handler. It holds
 * the optional database pool and the JWT settings.
 *
 * # Example
 *
 * ```rust
 * use axum::extract::State;
 * use parkeasy::backend::server::state::AppState;
 *
 * async fn handler(State(app_state): State<AppState>) {
 *     let _configured = app_state.db_pool.is_some();
 * }
 * ```
 */

use sqlx::PgPool;

use crate::backend::error::BackendError;
use crate::backend::server::config::AuthConfig;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    ///
    /// This is `None` if the database is not configured (e.g. if
    /// `DATABASE_URL` is not set). Handlers answer 503 in that case.
    pub db_pool: Option<PgPool>,

    /// JWT signing settings
    pub auth: AuthConfig,
}

impl AppState {
    pub fn new(db_pool: Option<PgPool>, auth: AuthConfig) -> Self {
        Self { db_pool, auth }
    }

    /// State with no database, for running the router in isolation
    pub fn without_database(auth: AuthConfig) -> Self {
        Self::new(None, auth)
    }

    /// The pool, or a 503 error when none is configured
    pub fn pool(&self) -> Result<&PgPool, BackendError> {
        self.db_pool.as_ref().ok_or_else(|| {
            tracing::error!("Database not configured");
            BackendError::database_unavailable()
        })
    }
}
