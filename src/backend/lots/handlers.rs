/**
 * Lot Handlers
 *
 * Owner routes (behind the auth middleware) for creating, listing, editing
 * and deleting lots, plus the public availability listing.
 *
 * Request bodies are validated before the database is touched, so malformed
 * input is rejected with 400 even when no database is configured.
 */

use axum::{extract::State, http::StatusCode, response::Json};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::lots::db;
use crate::backend::middleware::{ApiJson, ApiPath, ApiQuery, AuthUser};
use crate::backend::server::state::AppState;
use crate::shared::lot::{CreateLotRequest, Lot, RegenerateSpotsRequest, UpdateLotRequest};
use crate::shared::ranking::{rank_lots, Position};
use crate::shared::response::{
    AvailabilityResponse, ListResponse, LotCreatedResponse, LotUpdatedResponse, MessageResponse,
};
use crate::shared::validation::{
    validate_create_lot, validate_position, validate_regenerate, validate_update_lot,
};
use crate::shared::SharedError;

const DUPLICATE_LOT: &str = "You already have a lot with that name and address";

/// Map a unique violation on (owner, name, address) to 409
fn duplicate_lot(err: BackendError) -> BackendError {
    if err.is_unique_violation() {
        BackendError::conflict(DUPLICATE_LOT)
    } else {
        err
    }
}

/// Load a lot and check that `owner_id` owns it (404 / 403 otherwise)
pub async fn load_owned_lot(pool: &PgPool, id: Uuid, owner_id: Uuid) -> Result<Lot, BackendError> {
    let lot = db::find_lot(pool, id)
        .await?
        .ok_or_else(|| BackendError::not_found("Lot not found"))?;
    if lot.owner_id != owner_id {
        tracing::warn!("User {} tried to access lot {} of another owner", owner_id, id);
        return Err(BackendError::forbidden());
    }
    Ok(lot)
}

/// POST /api/parqueaderos
///
/// Creates the lot and `capacity` spots labelled `A1..A{capacity}`.
pub async fn create_lot(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiJson(request): ApiJson<CreateLotRequest>,
) -> Result<(StatusCode, Json<LotCreatedResponse>), BackendError> {
    let request = request.trimmed();
    SharedError::check(validate_create_lot(&request))?;
    let pool = state.pool()?;

    if db::owner_has_lot(pool, user.user_id, &request.name, &request.address).await? {
        tracing::warn!("Duplicate lot {:?} for owner {}", request.name, user.user_id);
        return Err(BackendError::conflict(DUPLICATE_LOT));
    }

    // The check above races with concurrent creates; the unique constraint decides
    let (lot, spots) = db::create_lot_with_spots(pool, user.user_id, &request)
        .await
        .map_err(BackendError::from)
        .map_err(duplicate_lot)?;
    tracing::info!("Lot {} created with {} spots", lot.id, spots.len());

    Ok((
        StatusCode::CREATED,
        Json(LotCreatedResponse {
            message: "Lot and spots created".to_string(),
            lot,
            spots,
        }),
    ))
}

/// GET /api/parqueaderos/mis-parqueaderos
pub async fn list_my_lots(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ListResponse<Lot>>, BackendError> {
    let pool = state.pool()?;
    let lots = db::list_owner_lots(pool, user.user_id).await?;
    let message = if lots.is_empty() {
        "You have no lots registered"
    } else {
        "Lots found"
    };
    Ok(Json(ListResponse::new(lots, message)))
}

/// PUT /api/parqueaderos/{id}
///
/// Partial update. A capacity change resyncs the spot set in the same
/// transaction and answers 409 when occupied spots would have to go.
pub async fn update_lot(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateLotRequest>,
) -> Result<Json<LotUpdatedResponse>, BackendError> {
    if request.is_empty() {
        return Err(BackendError::bad_request("No fields to update"));
    }
    SharedError::check(validate_update_lot(&request))?;
    let pool = state.pool()?;

    let current = load_owned_lot(pool, id, user.user_id).await?;
    let merged = request.apply_to(&current);
    let capacity_changed = merged.capacity != current.capacity;

    let (lot, resync) = db::update_lot(pool, &merged, capacity_changed)
        .await
        .map_err(duplicate_lot)?;
    tracing::info!("Lot {} updated", lot.id);

    Ok(Json(LotUpdatedResponse {
        message: "Lot updated".to_string(),
        data: lot,
        resync,
    }))
}

/// DELETE /api/parqueaderos/{id}
pub async fn delete_lot(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<MessageResponse>, BackendError> {
    let pool = state.pool()?;
    load_owned_lot(pool, id, user.user_id).await?;

    if !db::delete_lot(pool, id).await? {
        return Err(BackendError::not_found("Lot not found"));
    }
    tracing::info!("Lot {} deleted", id);
    Ok(Json(MessageResponse::new("Lot deleted")))
}

/// POST /api/parqueaderos/{id}/regenerate-lugares
///
/// Resyncs the spot set to the requested capacity (or the stored one when the
/// body has none), storing the new capacity on the lot.
pub async fn regenerate_spots(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    ApiPath(id): ApiPath<Uuid>,
    body: Option<ApiJson<RegenerateSpotsRequest>>,
) -> Result<Json<LotUpdatedResponse>, BackendError> {
    let request = body.map(|ApiJson(r)| r).unwrap_or_default();
    SharedError::check(validate_regenerate(&request))?;
    let pool = state.pool()?;

    let current = load_owned_lot(pool, id, user.user_id).await?;
    let target = Lot {
        capacity: request.capacity.unwrap_or(current.capacity),
        ..current
    };

    let (lot, resync) = db::update_lot(pool, &target, true).await?;

    Ok(Json(LotUpdatedResponse {
        message: "Spots regenerated".to_string(),
        data: lot,
        resync,
    }))
}

/// Optional driver position for the public listing
#[derive(Debug, Default, Deserialize)]
pub struct AvailabilityQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

/// GET /api/parqueaderos/disponibilidad-general
///
/// Public. Active lots with occupied and free counts, ranked by distance when
/// `lat` and `lon` are given and by free spots otherwise.
pub async fn general_availability(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<AvailabilityQuery>,
) -> Result<Json<AvailabilityResponse>, BackendError> {
    SharedError::check(validate_position(query.lat, query.lon))?;
    let position = Position::from_parts(query.lat, query.lon);
    let pool = state.pool()?;

    let lots = db::list_availability(pool).await?;
    Ok(Json(AvailabilityResponse::new(rank_lots(lots, position))))
}
