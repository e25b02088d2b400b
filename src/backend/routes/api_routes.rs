/**
 * API Route Handlers
 *
 * # Routes
 *
 * ## Public
 * - `GET /api/health` - Database probe
 * - `POST /api/auth/register` - Owner registration
 * - `POST /api/auth/login` - Owner login
 * - `GET /api/parqueaderos/disponibilidad-general` - Availability listing
 *
 * ## Owner (JWT required)
 * - `GET /api/auth/me`
 * - `POST /api/parqueaderos`
 * - `GET /api/parqueaderos/mis-parqueaderos`
 * - `PUT|DELETE /api/parqueaderos/{id}`
 * - `POST /api/parqueaderos/{id}/regenerate-lugares`
 * - `GET /api/lugares/{lot_id}` and `PUT /api/lugares/{spot_id}`
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};

use crate::backend::auth::{get_me, login, register};
use crate::backend::health::health;
use crate::backend::lots::{
    create_lot, delete_lot, general_availability, list_my_lots, regenerate_spots, update_lot,
};
use crate::backend::middleware::auth_middleware;
use crate::backend::server::state::AppState;
use crate::backend::spots::{list_lot_spots, update_spot};

/// Configure API routes
///
/// Owner routes share one `route_layer` running [`auth_middleware`], so an
/// unauthenticated request is rejected with 401 before its handler runs.
pub fn configure_api_routes(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/api/health", get(health))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route(
            "/api/parqueaderos/disponibilidad-general",
            get(general_availability),
        );

    let owner = Router::new()
        .route("/api/auth/me", get(get_me))
        .route("/api/parqueaderos", post(create_lot))
        .route("/api/parqueaderos/mis-parqueaderos", get(list_my_lots))
        .route("/api/parqueaderos/{id}", put(update_lot).delete(delete_lot))
        .route(
            "/api/parqueaderos/{id}/regenerate-lugares",
            post(regenerate_spots),
        )
        // Same path, different id: a lot for GET, a spot for PUT
        .route("/api/lugares/{id}", get(list_lot_spots).put(update_spot))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    router.merge(public).merge(owner)
}
