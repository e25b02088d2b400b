//! An owner's full session through the HTTP router, backed by PostgreSQL

use axum::http::{Method, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use serial_test::serial;

use crate::common::{json_request, send, TestDatabase};
use parkeasy::backend::routes::create_router;
use parkeasy::backend::server::{AppState, AuthConfig};

fn router(db: &TestDatabase) -> Router {
    create_router(AppState::new(Some(db.pool().clone()), AuthConfig::default()))
}

async fn register(db: &TestDatabase, email: &str) -> String {
    let (status, body) = send(
        router(db),
        json_request(
            Method::POST,
            "/api/auth/register",
            Some(json!({"name": "Ana", "email": email, "password": "secret1"})),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
    body["token"].as_str().expect("token in body").to_string()
}

async fn create_lot(db: &TestDatabase, token: &str, capacity: i32) -> Value {
    let (status, body) = send(
        router(db),
        json_request(
            Method::POST,
            "/api/parqueaderos",
            Some(json!({
                "name": "Central",
                "address": "Main street 1",
                "latitude": 4.65,
                "longitude": -74.05,
                "capacity": capacity
            })),
            Some(token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
    body
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_register_login_and_duplicate_email() {
    let db = TestDatabase::new().await;
    register(&db, "Ana@Example.com").await;

    let (status, body) = send(
        router(&db),
        json_request(
            Method::POST,
            "/api/auth/login",
            Some(json!({"email": "ana@example.com", "password": "secret1"})),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "ana@example.com");

    let (status, _) = send(
        router(&db),
        json_request(
            Method::POST,
            "/api/auth/login",
            Some(json!({"email": "ana@example.com", "password": "wrong-password"})),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        router(&db),
        json_request(
            Method::POST,
            "/api/auth/register",
            Some(json!({"name": "Ana", "email": "ana@example.com", "password": "secret1"})),
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_toggle_spot_updates_public_availability() {
    let db = TestDatabase::new().await;
    let token = register(&db, "owner@example.com").await;
    let created = create_lot(&db, &token, 3).await;
    let lot_id = created["lot"]["id"].as_str().unwrap().to_string();

    let (status, spots) = send(
        router(&db),
        json_request(Method::GET, &format!("/api/lugares/{}", lot_id), None, Some(&token)),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(spots["count"], 3);
    let first = spots["data"][0]["id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        router(&db),
        json_request(
            Method::PUT,
            &format!("/api/lugares/{}", first),
            Some(json!({"occupied": true})),
            Some(&token),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["occupied"], true);

    let (status, listing) = send(
        router(&db),
        json_request(
            Method::GET,
            "/api/parqueaderos/disponibilidad-general?lat=4.6&lon=-74.0",
            None,
            None,
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["count"], 1);
    assert_eq!(listing["lots"][0]["occupied_count"], 1);
    assert_eq!(listing["lots"][0]["free_count"], 2);
    assert!(listing["lots"][0]["distance"].as_f64().is_some());
}

#[tokio::test]
#[ignore]
#[serial]
async fn test_other_owner_is_forbidden_and_shrink_conflicts() {
    let db = TestDatabase::new().await;
    let owner = register(&db, "first@example.com").await;
    let intruder = register(&db, "second@example.com").await;
    let created = create_lot(&db, &owner, 2).await;
    let lot_id = created["lot"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        router(&db),
        json_request(
            Method::DELETE,
            &format!("/api/parqueaderos/{}", lot_id),
            None,
            Some(&intruder),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    for index in 0..2 {
        let spot_id = created["spots"][index]["id"].as_str().unwrap().to_string();
        let (status, _) = send(
            router(&db),
            json_request(
                Method::PUT,
                &format!("/api/lugares/{}", spot_id),
                Some(json!({"occupied": true})),
                Some(&owner),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(
        router(&db),
        json_request(
            Method::PUT,
            &format!("/api/parqueaderos/{}", lot_id),
            Some(json!({"capacity": 1})),
            Some(&owner),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT, "{}", body);

    let (status, body) = send(
        router(&db),
        json_request(
            Method::POST,
            &format!("/api/parqueaderos/{}/regenerate-lugares", lot_id),
            Some(json!({"capacity": 3})),
            Some(&owner),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["resync"]["created"], 1);
    assert_eq!(body["data"]["capacity"], 3);
}
