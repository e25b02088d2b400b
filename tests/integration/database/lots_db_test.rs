//! Lot and spot persistence, capacity resync and the availability query

use assert_matches::assert_matches;
use serial_test::serial;
use uuid::Uuid;

use crate::common::{create_test_owner, TestDatabase};
use parkeasy::backend::lots::db;
use parkeasy::backend::server::AuthConfig;
use parkeasy::backend::spots::db as spot_db;
use parkeasy::backend::BackendError;
use parkeasy::shared::lot::{CreateLotRequest, Lot, LotStatus};
use parkeasy::shared::spot::{sort_spots, UpdateSpotRequest};
use parkeasy::shared::SharedError;

fn lot_request(name: &str, capacity: i32) -> CreateLotRequest {
    CreateLotRequest {
        name: name.to_string(),
        address: "Main street 1".to_string(),
        latitude: 4.65,
        longitude: -74.05,
        capacity,
    }
}

async fn new_owner(db: &TestDatabase) -> Uuid {
    let owner = create_test_owner(db.pool(), &AuthConfig::default())
        .await
        .expect("Failed to create owner");
    owner.id.parse().expect("owner id is a uuid")
}

async fn labels(db: &TestDatabase, lot_id: Uuid) -> Vec<String> {
    let mut spots = spot_db::list_spots(db.pool(), lot_id).await.unwrap();
    sort_spots(&mut spots);
    spots.into_iter().map(|s| s.label).collect()
}

async fn occupy(db: &TestDatabase, lot_id: Uuid, label: &str) {
    let spots = spot_db::list_spots(db.pool(), lot_id).await.unwrap();
    let spot = spots.iter().find(|s| s.label == label).expect("label exists");
    let update = UpdateSpotRequest {
        occupied: Some(true),
        ..Default::default()
    };
    spot_db::update_spot(db.pool(), spot.id, &update)
        .await
        .unwrap()
        .expect("spot still exists");
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_create_lot_generates_numbered_spots() {
    let db = TestDatabase::new().await;
    let owner = new_owner(&db).await;

    let (lot, spots) = db::create_lot_with_spots(db.pool(), owner, &lot_request("Central", 3))
        .await
        .unwrap();

    assert_eq!(lot.status, LotStatus::Active);
    assert_eq!(spots.len(), 3);
    assert!(spots.iter().all(|s| !s.occupied && s.kind == "normal"));
    assert_eq!(labels(&db, lot.id).await, vec!["A1", "A2", "A3"]);
    assert!(db::owner_has_lot(db.pool(), owner, "Central", "Main street 1")
        .await
        .unwrap());
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_grow_fills_lowest_free_labels() {
    let db = TestDatabase::new().await;
    let owner = new_owner(&db).await;
    let (lot, _) = db::create_lot_with_spots(db.pool(), owner, &lot_request("Grow", 2))
        .await
        .unwrap();

    let target = Lot {
        capacity: 4,
        ..lot
    };
    let (updated, summary) = db::update_lot(db.pool(), &target, true).await.unwrap();

    assert_eq!(updated.capacity, 4);
    let summary = summary.expect("resync ran");
    assert_eq!(summary.created, 2);
    assert_eq!(summary.removed, 0);
    assert_eq!(labels(&db, updated.id).await, vec!["A1", "A2", "A3", "A4"]);
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_shrink_removes_highest_free_spots() {
    let db = TestDatabase::new().await;
    let owner = new_owner(&db).await;
    let (lot, _) = db::create_lot_with_spots(db.pool(), owner, &lot_request("Shrink", 5))
        .await
        .unwrap();
    occupy(&db, lot.id, "A5").await;

    let target = Lot {
        capacity: 3,
        ..lot
    };
    let (_, summary) = db::update_lot(db.pool(), &target, true).await.unwrap();

    assert_eq!(summary.map(|s| s.removed), Some(2));
    assert_eq!(labels(&db, target.id).await, vec!["A1", "A2", "A5"]);
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_blocked_shrink_changes_nothing() {
    let db = TestDatabase::new().await;
    let owner = new_owner(&db).await;
    let (lot, _) = db::create_lot_with_spots(db.pool(), owner, &lot_request("Full", 2))
        .await
        .unwrap();
    occupy(&db, lot.id, "A1").await;
    occupy(&db, lot.id, "A2").await;

    let target = Lot {
        capacity: 1,
        ..lot.clone()
    };
    let err = db::update_lot(db.pool(), &target, true).await.unwrap_err();
    assert_matches!(
        err,
        BackendError::SharedError(SharedError::ResyncBlocked { requested: 1, .. })
    );

    let stored = db::find_lot(db.pool(), lot.id).await.unwrap().unwrap();
    assert_eq!(stored.capacity, 2);
    assert_eq!(labels(&db, lot.id).await, vec!["A1", "A2"]);
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_availability_counts_active_lots_only() {
    let db = TestDatabase::new().await;
    let owner = new_owner(&db).await;
    let (open, _) = db::create_lot_with_spots(db.pool(), owner, &lot_request("Open", 4))
        .await
        .unwrap();
    let (closed, _) = db::create_lot_with_spots(db.pool(), owner, &lot_request("Closed", 2))
        .await
        .unwrap();
    occupy(&db, open.id, "A2").await;

    let hidden = Lot {
        status: LotStatus::Inactive,
        ..closed
    };
    db::update_lot(db.pool(), &hidden, false).await.unwrap();

    let listing = db::list_availability(db.pool()).await.unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].id, open.id);
    assert_eq!(listing[0].snapshot.occupied_count, 1);
    assert_eq!(listing[0].free_count(), 3);
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_delete_lot_cascades_to_spots() {
    let db = TestDatabase::new().await;
    let owner = new_owner(&db).await;
    let (lot, _) = db::create_lot_with_spots(db.pool(), owner, &lot_request("Gone", 3))
        .await
        .unwrap();

    assert!(db::delete_lot(db.pool(), lot.id).await.unwrap());
    assert!(spot_db::list_spots(db.pool(), lot.id).await.unwrap().is_empty());
    assert!(!db::delete_lot(db.pool(), lot.id).await.unwrap());
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_update_of_removed_spot_is_none() {
    let db = TestDatabase::new().await;
    let owner = new_owner(&db).await;
    let (_, spots) = db::create_lot_with_spots(db.pool(), owner, &lot_request("Brief", 1))
        .await
        .unwrap();
    sqlx::query("DELETE FROM spots WHERE id = $1")
        .bind(spots[0].id)
        .execute(db.pool())
        .await
        .unwrap();

    let update = UpdateSpotRequest {
        occupied: Some(true),
        ..Default::default()
    };
    let result = spot_db::update_spot(db.pool(), spots[0].id, &update).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_duplicate_lot_rejected_by_constraint() {
    let db = TestDatabase::new().await;
    let owner = new_owner(&db).await;
    db::create_lot_with_spots(db.pool(), owner, &lot_request("Twin", 2))
        .await
        .unwrap();

    let err = db::create_lot_with_spots(db.pool(), owner, &lot_request("Twin", 2))
        .await
        .unwrap_err();
    assert!(BackendError::from(err).is_unique_violation());

    let other_owner = new_owner(&db).await;
    assert!(db::create_lot_with_spots(db.pool(), other_owner, &lot_request("Twin", 2))
        .await
        .is_ok());
}
