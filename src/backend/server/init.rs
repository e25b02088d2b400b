/**
 * Server Initialization
 *
 * Builds the application state from the environment and hands it to the
 * router.
 *
 * # Initialization Process
 *
 * 1. Load JWT settings
 * 2. Load the optional database pool (runs migrations)
 * 3. Create and configure the router
 */

use axum::Router;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::{load_database, AuthConfig};
use crate::backend::server::state::AppState;

/// Create and configure the Axum application
///
/// # Error Handling
///
/// The function is designed to be resilient:
/// - Missing database: server continues, DB-backed routes answer 503
/// - Migration failures: logged but don't prevent startup
pub async fn create_app() -> Router<()> {
    tracing::info!("Initializing ParkEasy backend server");

    let auth = AuthConfig::from_env();
    let db_pool = load_database().await;
    if db_pool.is_some() {
        tracing::info!("Database connected");
    }

    create_router(AppState::new(db_pool, auth))
}
