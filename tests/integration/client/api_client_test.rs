//! `ApiClient` against wiremock
//!
//! Covers retry behaviour, error classification, local validation and the
//! client-side ordering of availability and spots.

use std::sync::Arc;
use std::time::Duration;

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{availability, spot, test_user};
use parkeasy::client::{ApiClient, ClientError, MemorySessionStore, Session, SessionStore};
use parkeasy::shared::auth::LoginRequest;
use parkeasy::shared::config::AppConfig;
use parkeasy::shared::lot::{CreateLotRequest, UpdateLotRequest};
use parkeasy::shared::ranking::{Position, RankedLot};
use parkeasy::shared::response::{AvailabilityResponse, DataResponse, ListResponse};
use parkeasy::shared::spot::UpdateSpotRequest;

const TOKEN: &str = "test-token";

fn config(url: &str) -> AppConfig {
    AppConfig::builder()
        .server_url(url)
        .retry_delay(Duration::from_millis(1))
        .build()
        .expect("valid test config")
}

fn anonymous(server: &MockServer) -> ApiClient {
    ApiClient::new(config(&server.uri()), Arc::new(MemorySessionStore::new()))
}

fn logged_in(server: &MockServer) -> ApiClient {
    let store = MemorySessionStore::with_session(Session {
        token: TOKEN.to_string(),
        user: test_user(),
    });
    ApiClient::new(config(&server.uri()), Arc::new(store))
}

async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|r| r.len())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_health_decodes_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "ok", "database": "connected"})),
        )
        .mount(&server)
        .await;

    let health = anonymous(&server).health().await.unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.database, "connected");
}

#[tokio::test]
async fn test_server_errors_are_retried_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": "ok", "database": "connected"})),
        )
        .mount(&server)
        .await;

    let health = anonymous(&server).health().await.unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn test_persistent_server_error_is_connectivity() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"error": "Database error", "status": 500})),
        )
        .mount(&server)
        .await;

    let err = anonymous(&server).health().await.unwrap_err();
    assert_matches!(err, ClientError::Connectivity { status: Some(500), .. });
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn test_unreachable_server_is_connectivity() {
    let config = AppConfig::builder()
        .server_url("http://127.0.0.1:1")
        .retry_attempts(2)
        .retry_delay(Duration::from_millis(1))
        .build()
        .unwrap();
    let client = ApiClient::new(config, Arc::new(MemorySessionStore::new()));

    let err = client.health().await.unwrap_err();
    assert_matches!(err, ClientError::Connectivity { status: None, .. });
}

#[tokio::test]
async fn test_field_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "Validation failed",
            "status": 400,
            "errors": [{"field": "email", "message": "Email format is invalid"}]
        })))
        .mount(&server)
        .await;

    let err = anonymous(&server)
        .login(&LoginRequest {
            email: "ana@example.com".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.field_errors().len(), 1);
    assert_eq!(err.field_errors()[0].field, "email");
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_not_found_is_rejected_once() {
    let server = MockServer::start().await;
    let lot_id = Uuid::new_v4();
    Mock::given(method("DELETE"))
        .and(path(format!("/api/parqueaderos/{}", lot_id)))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Lot not found", "status": 404})),
        )
        .mount(&server)
        .await;

    let err = logged_in(&server).delete_lot(lot_id).await.unwrap_err();
    match err {
        ClientError::Rejected { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Lot not found");
        }
        other => panic!("Expected Rejected, got {:?}", other),
    }
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_login_stores_session_used_by_owner_calls() {
    let server = MockServer::start().await;
    let user = test_user();
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Login successful",
            "token": TOKEN,
            "user": user,
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/parqueaderos/mis-parqueaderos"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 0,
            "data": [],
            "message": "You have no lots registered",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let client = ApiClient::new(config(&server.uri()), store.clone());

    let auth = client
        .login(&LoginRequest {
            email: user.email.clone(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(auth.user, user);
    assert_eq!(store.load().unwrap().map(|s| s.token), Some(TOKEN.to_string()));

    let lots = client.my_lots().await.unwrap();
    assert!(lots.is_empty());

    client.logout().unwrap();
    assert!(store.load().unwrap().is_none());
}

#[tokio::test]
async fn test_owner_call_without_session_sends_nothing() {
    let server = MockServer::start().await;

    let err = anonymous(&server).my_lots().await.unwrap_err();
    assert_matches!(err, ClientError::NotAuthenticated);
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn test_invalid_lot_is_caught_locally() {
    let server = MockServer::start().await;

    let err = logged_in(&server)
        .create_lot(&CreateLotRequest {
            name: "  ".to_string(),
            address: "Main street 1".to_string(),
            latitude: 4.6,
            longitude: -74.0,
            capacity: 0,
        })
        .await
        .unwrap_err();

    let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["name", "capacity"]);
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn test_create_lot_is_sent_once() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/parqueaderos"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = logged_in(&server)
        .create_lot(&CreateLotRequest {
            name: "Central".to_string(),
            address: "Main street 1".to_string(),
            latitude: 4.6,
            longitude: -74.0,
            capacity: 10,
        })
        .await
        .unwrap_err();

    assert!(err.is_transient());
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn test_empty_lot_update_is_caught_locally() {
    let server = MockServer::start().await;

    let err = logged_in(&server)
        .update_lot(Uuid::new_v4(), &UpdateLotRequest::default())
        .await
        .unwrap_err();

    assert_matches!(err, ClientError::Validation(_));
    assert_eq!(request_count(&server).await, 0);
}

#[tokio::test]
async fn test_nearby_ranks_locally_without_sending_position() {
    let server = MockServer::start().await;
    let far = availability("Far", 10.0, 10.0, 50, 0);
    let near = availability("Near", 0.01, 0.01, 5, 4);
    let listing = AvailabilityResponse::new(vec![
        RankedLot {
            availability: far,
            distance: None,
        },
        RankedLot {
            availability: near,
            distance: None,
        },
    ]);
    Mock::given(method("GET"))
        .and(path("/api/parqueaderos/disponibilidad-general"))
        .and(query_param_is_missing("lat"))
        .and(query_param_is_missing("lon"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&listing))
        .expect(2)
        .mount(&server)
        .await;

    let client = anonymous(&server);

    let ranked = client.nearby(Some(Position::new(0.0, 0.0))).await.unwrap();
    let names: Vec<&str> = ranked.iter().map(|l| l.availability.name.as_str()).collect();
    assert_eq!(names, vec!["Near", "Far"]);
    assert!(ranked.iter().all(|l| l.distance.is_some()));

    let by_free = client.nearby(None).await.unwrap();
    let names: Vec<&str> = by_free.iter().map(|l| l.availability.name.as_str()).collect();
    assert_eq!(names, vec!["Far", "Near"]);
    assert!(by_free.iter().all(|l| l.distance.is_none()));
}

#[tokio::test]
async fn test_list_spots_in_natural_order() {
    let server = MockServer::start().await;
    let lot_id = Uuid::new_v4();
    let spots = vec![
        spot(lot_id, "A10", false),
        spot(lot_id, "A2", true),
        spot(lot_id, "A1", false),
    ];
    Mock::given(method("GET"))
        .and(path(format!("/api/lugares/{}", lot_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(ListResponse::new(spots, "Spots found")))
        .mount(&server)
        .await;

    let listed = logged_in(&server).list_spots(lot_id).await.unwrap();
    let labels: Vec<&str> = listed.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["A1", "A2", "A10"]);
}

#[tokio::test]
async fn test_toggle_sends_only_the_flipped_flag() {
    let server = MockServer::start().await;
    let lot_id = Uuid::new_v4();
    let free = spot(lot_id, "A3", false);
    let taken = parkeasy::shared::spot::Spot {
        occupied: true,
        ..free.clone()
    };
    Mock::given(method("PUT"))
        .and(path(format!("/api/lugares/{}", free.id)))
        .and(body_json(json!({"occupied": true})))
        .respond_with(ResponseTemplate::new(200).set_body_json(DataResponse::new(taken.clone(), "Spot updated")))
        .expect(1)
        .mount(&server)
        .await;

    let updated = logged_in(&server).toggle_spot(&free).await.unwrap();
    assert_eq!(updated, taken);
}

#[tokio::test]
async fn test_blank_spot_update_is_caught_locally() {
    let server = MockServer::start().await;

    let err = logged_in(&server)
        .update_spot(
            Uuid::new_v4(),
            UpdateSpotRequest {
                kind: Some(" ".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert_matches!(err, ClientError::Validation(_));
    assert_eq!(request_count(&server).await, 0);
}
