//! Lot database operations

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::spots::db::{insert_spots, resync_spots};
use crate::shared::lot::{CreateLotRequest, Lot, LotAvailability, LotStatus};
use crate::shared::resync::ResyncSummary;
use crate::shared::spot::{initial_spots, Spot};

const LOT_COLUMNS: &str =
    "id, owner_id, name, address, latitude, longitude, capacity, status, created_at, updated_at";

/// Row shape of `lots`; status is stored as text
#[derive(Debug, sqlx::FromRow)]
struct LotRow {
    id: Uuid,
    owner_id: Uuid,
    name: String,
    address: String,
    latitude: f64,
    longitude: f64,
    capacity: i32,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<LotRow> for Lot {
    fn from(row: LotRow) -> Self {
        Self {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            address: row.address,
            latitude: row.latitude,
            longitude: row.longitude,
            capacity: row.capacity,
            status: row.status.parse().unwrap_or_default(),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct AvailabilityRow {
    id: Uuid,
    name: String,
    address: String,
    latitude: f64,
    longitude: f64,
    capacity: i32,
    occupied_count: i64,
}

pub async fn find_lot(pool: &PgPool, id: Uuid) -> Result<Option<Lot>, sqlx::Error> {
    let row = sqlx::query_as::<_, LotRow>(&format!("SELECT {LOT_COLUMNS} FROM lots WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Lot::from))
}

/// Lots of one owner, newest first
pub async fn list_owner_lots(pool: &PgPool, owner_id: Uuid) -> Result<Vec<Lot>, sqlx::Error> {
    let rows = sqlx::query_as::<_, LotRow>(&format!(
        "SELECT {LOT_COLUMNS} FROM lots WHERE owner_id = $1 ORDER BY created_at DESC"
    ))
    .bind(owner_id)
    .fetch_all(pool)
    .await?;
    Ok(rows.into_iter().map(Lot::from).collect())
}

/// Whether the owner already has a lot with this name and address
pub async fn owner_has_lot(
    pool: &PgPool,
    owner_id: Uuid,
    name: &str,
    address: &str,
) -> Result<bool, sqlx::Error> {
    let (exists,): (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM lots WHERE owner_id = $1 AND name = $2 AND address = $3
        )
        "#,
    )
    .bind(owner_id)
    .bind(name)
    .bind(address)
    .fetch_one(pool)
    .await?;
    Ok(exists)
}

/// Insert a lot and its generated spots; nothing is kept if either fails
pub async fn create_lot_with_spots(
    pool: &PgPool,
    owner_id: Uuid,
    request: &CreateLotRequest,
) -> Result<(Lot, Vec<Spot>), sqlx::Error> {
    let now = Utc::now();
    let mut tx = pool.begin().await?;

    let lot: Lot = sqlx::query_as::<_, LotRow>(&format!(
        r#"
        INSERT INTO lots (id, owner_id, name, address, latitude, longitude, capacity, status, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
        RETURNING {LOT_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(owner_id)
    .bind(&request.name)
    .bind(&request.address)
    .bind(request.latitude)
    .bind(request.longitude)
    .bind(request.capacity)
    .bind(LotStatus::Active.as_str())
    .bind(now)
    .fetch_one(&mut *tx)
    .await?
    .into();

    let spots = insert_spots(&mut tx, lot.id, &initial_spots(lot.capacity)).await?;

    tx.commit().await?;
    Ok((lot, spots))
}

/// Store `lot` (already merged with the update) and resync spots when
/// `resync` is set. Runs in one transaction; a blocked resync leaves the
/// lot unchanged.
pub async fn update_lot(
    pool: &PgPool,
    lot: &Lot,
    resync: bool,
) -> Result<(Lot, Option<ResyncSummary>), BackendError> {
    let mut tx = pool.begin().await?;

    let updated: Lot = sqlx::query_as::<_, LotRow>(&format!(
        r#"
        UPDATE lots
        SET name = $2, address = $3, latitude = $4, longitude = $5,
            capacity = $6, status = $7, updated_at = $8
        WHERE id = $1
        RETURNING {LOT_COLUMNS}
        "#
    ))
    .bind(lot.id)
    .bind(&lot.name)
    .bind(&lot.address)
    .bind(lot.latitude)
    .bind(lot.longitude)
    .bind(lot.capacity)
    .bind(lot.status.as_str())
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await?
    .into();

    let summary = if resync {
        Some(resync_spots(&mut tx, updated.id, updated.capacity).await?)
    } else {
        None
    };

    tx.commit().await?;
    Ok((updated, summary))
}

/// Delete a lot; its spots go with it
pub async fn delete_lot(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM lots WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Active lots with their occupied spot counts, in one grouped query
pub async fn list_availability(pool: &PgPool) -> Result<Vec<LotAvailability>, sqlx::Error> {
    let rows = sqlx::query_as::<_, AvailabilityRow>(
        r#"
        SELECT l.id, l.name, l.address, l.latitude, l.longitude, l.capacity,
               COUNT(s.id) FILTER (WHERE s.occupied) AS occupied_count
        FROM lots l
        LEFT JOIN spots s ON s.lot_id = l.id
        WHERE l.status = 'active'
        GROUP BY l.id
        ORDER BY l.created_at, l.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|r| {
            LotAvailability::new(
                r.id,
                r.name,
                r.address,
                r.latitude,
                r.longitude,
                r.capacity,
                r.occupied_count,
            )
        })
        .collect())
}
