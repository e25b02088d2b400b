/**
 * Router Configuration
 *
 * Combines the banner, the API routes and the cross-cutting layers into a
 * single Axum router.
 *
 * # Layers
 *
 * - `TraceLayer` - one tracing span per request
 * - `CorsLayer::permissive()` - the dashboard and mobile app run on other origins
 */

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::health::root;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Database pool and JWT settings
///
/// Unknown paths fall through to a JSON 404.
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new().route("/", get(root));

    let router = configure_api_routes(router, &app_state);

    router
        .fallback(|| async { BackendError::not_found("Route not found") })
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
