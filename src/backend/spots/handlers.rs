/**
 * Spot Handlers
 *
 * `/api/lugares/{id}`: GET lists a lot's spots (the id is the lot),
 * PUT edits one spot (the id is the spot). Both require the caller to own
 * the lot.
 */

use axum::{extract::State, response::Json};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::lots::handlers::load_owned_lot;
use crate::backend::middleware::{ApiJson, ApiPath, AuthUser};
use crate::backend::server::state::AppState;
use crate::backend::spots::db;
use crate::shared::response::{DataResponse, ListResponse};
use crate::shared::spot::{sort_spots, Spot, UpdateSpotRequest};

/// GET /api/lugares/{lot_id}
///
/// Spots in natural label order ("A2" before "A10").
pub async fn list_lot_spots(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(lot_id): ApiPath<Uuid>,
) -> Result<Json<ListResponse<Spot>>, BackendError> {
    let pool = state.pool()?;
    load_owned_lot(pool, lot_id, user.user_id).await?;

    let mut spots = db::list_spots(pool, lot_id).await?;
    sort_spots(&mut spots);

    let message = if spots.is_empty() {
        "This lot has no spots"
    } else {
        "Spots found"
    };
    Ok(Json(ListResponse::new(spots, message)))
}

/// PUT /api/lugares/{spot_id}
///
/// Partial update; 400 when the body carries no field.
pub async fn update_spot(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(spot_id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateSpotRequest>,
) -> Result<Json<DataResponse<Spot>>, BackendError> {
    let request = request.normalized();
    if request.is_empty() {
        return Err(BackendError::bad_request("No fields to update"));
    }
    let pool = state.pool()?;

    let spot = db::find_spot(pool, spot_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Spot not found"))?;
    load_owned_lot(pool, spot.lot_id, user.user_id).await?;

    // A concurrent shrink may have removed the spot since the lookup
    let updated = db::update_spot(pool, spot_id, &request)
        .await?
        .ok_or_else(|| BackendError::not_found("Spot not found"))?;
    tracing::info!(
        "Spot {} of lot {} updated (occupied: {})",
        updated.id,
        updated.lot_id,
        updated.occupied
    );

    Ok(Json(DataResponse::new(updated, "Spot updated")))
}
