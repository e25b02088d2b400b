//! Spot database operations

use chrono::Utc;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::shared::resync::{plan_resync, ResyncSummary};
use crate::shared::spot::{NewSpot, Spot, UpdateSpotRequest};

const SPOT_COLUMNS: &str = "id, lot_id, label, kind, occupied, x, y, created_at, updated_at";

/// All spots of a lot, in storage order
pub async fn list_spots(pool: &PgPool, lot_id: Uuid) -> Result<Vec<Spot>, sqlx::Error> {
    sqlx::query_as::<_, Spot>(&format!(
        "SELECT {SPOT_COLUMNS} FROM spots WHERE lot_id = $1"
    ))
    .bind(lot_id)
    .fetch_all(pool)
    .await
}

pub async fn find_spot(pool: &PgPool, id: Uuid) -> Result<Option<Spot>, sqlx::Error> {
    sqlx::query_as::<_, Spot>(&format!("SELECT {SPOT_COLUMNS} FROM spots WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Apply the present fields of `update`; absent fields keep their value.
/// `None` when the spot no longer exists.
pub async fn update_spot(
    pool: &PgPool,
    id: Uuid,
    update: &UpdateSpotRequest,
) -> Result<Option<Spot>, sqlx::Error> {
    sqlx::query_as::<_, Spot>(&format!(
        r#"
        UPDATE spots
        SET occupied = COALESCE($2, occupied),
            kind = COALESCE($3, kind),
            x = COALESCE($4, x),
            y = COALESCE($5, y),
            label = COALESCE($6, label),
            updated_at = $7
        WHERE id = $1
        RETURNING {SPOT_COLUMNS}
        "#
    ))
    .bind(id)
    .bind(update.occupied)
    .bind(update.kind.as_deref().map(str::trim))
    .bind(update.x)
    .bind(update.y)
    .bind(update.label.as_deref().map(str::trim))
    .bind(Utc::now())
    .fetch_optional(pool)
    .await
}

/// Insert a batch of unoccupied spots in one statement
pub async fn insert_spots(
    conn: &mut PgConnection,
    lot_id: Uuid,
    spots: &[NewSpot],
) -> Result<Vec<Spot>, sqlx::Error> {
    if spots.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = spots.iter().map(|_| Uuid::new_v4()).collect();
    let labels: Vec<&str> = spots.iter().map(|s| s.label.as_str()).collect();
    let kinds: Vec<&str> = spots.iter().map(|s| s.kind.as_str()).collect();
    let xs: Vec<i32> = spots.iter().map(|s| s.x).collect();
    let ys: Vec<i32> = spots.iter().map(|s| s.y).collect();

    sqlx::query_as::<_, Spot>(&format!(
        r#"
        INSERT INTO spots (id, lot_id, label, kind, occupied, x, y, created_at, updated_at)
        SELECT u.id, $1, u.label, u.kind, FALSE, u.x, u.y, $2, $2
        FROM UNNEST($3::uuid[], $4::text[], $5::text[], $6::integer[], $7::integer[])
            AS u(id, label, kind, x, y)
        RETURNING {SPOT_COLUMNS}
        "#
    ))
    .bind(lot_id)
    .bind(Utc::now())
    .bind(&ids)
    .bind(&labels)
    .bind(&kinds)
    .bind(&xs)
    .bind(&ys)
    .fetch_all(&mut *conn)
    .await
}

/// Bring the lot's spot set to `capacity` spots
///
/// Locks the lot's spots for the rest of the surrounding transaction, so a
/// concurrent toggle cannot occupy a spot that is about to be removed.
pub async fn resync_spots(
    conn: &mut PgConnection,
    lot_id: Uuid,
    capacity: i32,
) -> Result<ResyncSummary, BackendError> {
    let existing = sqlx::query_as::<_, Spot>(&format!(
        "SELECT {SPOT_COLUMNS} FROM spots WHERE lot_id = $1 FOR UPDATE"
    ))
    .bind(lot_id)
    .fetch_all(&mut *conn)
    .await?;

    let plan = plan_resync(&existing, capacity)?;

    if !plan.to_remove.is_empty() {
        sqlx::query("DELETE FROM spots WHERE id = ANY($1)")
            .bind(&plan.to_remove)
            .execute(&mut *conn)
            .await?;
    }
    insert_spots(conn, lot_id, &plan.to_create).await?;

    let summary = plan.summary(capacity);
    tracing::info!(
        "Resynced lot {} to {} spots (+{} -{})",
        lot_id,
        capacity,
        summary.created,
        summary.removed
    );
    Ok(summary)
}
