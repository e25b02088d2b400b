//! HTTP client for the ParkEasy API
//!
//! One method per endpoint. Owner calls read the bearer token from the
//! session store; `login` and `register` write it. Request bodies are
//! validated locally with the same rules the server applies, so most form
//! mistakes never leave the machine.
//!
//! Reads and idempotent writes go through [`with_retry`]. Lot creation and
//! registration are sent once: repeating them after a lost response could
//! create a second record.

use std::sync::Arc;

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use uuid::Uuid;

use crate::client::error::{ClientError, ErrorBody};
use crate::client::retry::{with_retry, RetryError, RetryPolicy};
use crate::client::session::{Session, SessionStore};
use crate::shared::auth::{AuthResponse, LoginRequest, RegisterRequest, UserResponse};
use crate::shared::config::AppConfig;
use crate::shared::lot::{CreateLotRequest, Lot, RegenerateSpotsRequest, UpdateLotRequest};
use crate::shared::ranking::{rank_lots, Position, RankedLot};
use crate::shared::response::{
    AvailabilityResponse, DataResponse, HealthResponse, ListResponse, LotCreatedResponse,
    LotUpdatedResponse, MessageResponse,
};
use crate::shared::spot::{sort_spots, Spot, UpdateSpotRequest};
use crate::shared::validation::{self, FieldError};

/// Client for one API server
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    config: AppConfig,
    retry: RetryPolicy,
    session: Arc<dyn SessionStore>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("server_url", &self.config.server_url)
            .field("retry", &self.retry)
            .finish()
    }
}

fn check(errors: Vec<FieldError>) -> Result<(), ClientError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ClientError::Validation(errors))
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()));
    }

    let body: ErrorBody = response.json().await.unwrap_or_default();
    debug!("Request failed with {}: {}", status, body.error);
    Err(ClientError::from_status(status.as_u16(), body))
}

impl ApiClient {
    pub fn new(config: AppConfig, session: Arc<dyn SessionStore>) -> Self {
        Self {
            http: Client::new(),
            retry: RetryPolicy::from_config(&config),
            config,
            session,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// The stored session, if logged in
    pub fn session(&self) -> Result<Option<Session>, ClientError> {
        self.session.load()
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    fn token(&self) -> Result<String, ClientError> {
        self.session
            .load()?
            .map(|s| s.token)
            .ok_or(ClientError::NotAuthenticated)
    }

    /// Send the request built by `build`, retrying transient failures
    async fn send<T, F>(&self, build: F) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        F: Fn(&Client) -> RequestBuilder,
    {
        let build = &build;
        let http = &self.http;
        with_retry(&self.retry, ClientError::is_transient, move || async move {
            let response = build(http).send().await?;
            decode(response).await
        })
        .await
        .map_err(RetryError::into_inner)
    }

    /// Send `request` exactly once
    async fn send_once<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        decode(response).await
    }

    // ========== Public ==========

    /// GET /api/health
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let url = self.url("/api/health");
        self.send(|http| http.get(&url)).await
    }

    /// POST /api/auth/register. Stores the returned session.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ClientError> {
        check(validation::validate_registration(request))?;

        let request = self
            .http
            .post(self.url("/api/auth/register"))
            .json(request);
        let response: AuthResponse = self.send_once(request).await?;

        self.session.save(&Session::from(&response))?;
        info!("Registered {}", response.user.email);
        Ok(response)
    }

    /// POST /api/auth/login. Stores the returned session.
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ClientError> {
        check(validation::validate_login(request))?;

        let url = self.url("/api/auth/login");
        let response: AuthResponse = self.send(|http| http.post(&url).json(request)).await?;

        self.session.save(&Session::from(&response))?;
        info!("Logged in as {}", response.user.email);
        Ok(response)
    }

    /// Forget the stored session. The token itself stays valid until it expires.
    pub fn logout(&self) -> Result<(), ClientError> {
        self.session.clear()
    }

    /// GET /api/parqueaderos/disponibilidad-general, ranked by the server
    pub async fn availability(
        &self,
        position: Option<Position>,
    ) -> Result<AvailabilityResponse, ClientError> {
        let url = self.url("/api/parqueaderos/disponibilidad-general");
        let query: Vec<(&str, f64)> = position
            .map(|p| vec![("lat", p.latitude), ("lon", p.longitude)])
            .unwrap_or_default();
        self.send(|http| http.get(&url).query(&query)).await
    }

    /// Availability ranked locally against `position`
    ///
    /// The listing is fetched without coordinates, so the driver's position
    /// never leaves the device.
    pub async fn nearby(&self, position: Option<Position>) -> Result<Vec<RankedLot>, ClientError> {
        let listing = self.availability(None).await?;
        let lots = listing.lots.into_iter().map(|l| l.availability).collect();
        Ok(rank_lots(lots, position))
    }

    // ========== Owner ==========

    /// GET /api/auth/me
    pub async fn me(&self) -> Result<UserResponse, ClientError> {
        let token = self.token()?;
        let url = self.url("/api/auth/me");
        self.send(|http| http.get(&url).bearer_auth(&token)).await
    }

    /// POST /api/parqueaderos
    pub async fn create_lot(
        &self,
        request: &CreateLotRequest,
    ) -> Result<LotCreatedResponse, ClientError> {
        let request = request.trimmed();
        check(validation::validate_create_lot(&request))?;
        let token = self.token()?;

        let builder = self
            .http
            .post(self.url("/api/parqueaderos"))
            .bearer_auth(&token)
            .json(&request);
        let created: LotCreatedResponse = self.send_once(builder).await?;
        info!("Created lot {} with {} spots", created.lot.id, created.spots.len());
        Ok(created)
    }

    /// GET /api/parqueaderos/mis-parqueaderos
    pub async fn my_lots(&self) -> Result<Vec<Lot>, ClientError> {
        let token = self.token()?;
        let url = self.url("/api/parqueaderos/mis-parqueaderos");
        let list: ListResponse<Lot> = self.send(|http| http.get(&url).bearer_auth(&token)).await?;
        Ok(list.data)
    }

    /// PUT /api/parqueaderos/{id}
    pub async fn update_lot(
        &self,
        lot_id: Uuid,
        request: &UpdateLotRequest,
    ) -> Result<LotUpdatedResponse, ClientError> {
        if request.is_empty() {
            return Err(ClientError::Validation(vec![FieldError::new(
                "body",
                "No fields to update",
            )]));
        }
        check(validation::validate_update_lot(request))?;
        let token = self.token()?;

        let url = self.url(&format!("/api/parqueaderos/{}", lot_id));
        self.send(|http| http.put(&url).bearer_auth(&token).json(request))
            .await
    }

    /// DELETE /api/parqueaderos/{id}
    pub async fn delete_lot(&self, lot_id: Uuid) -> Result<MessageResponse, ClientError> {
        let token = self.token()?;
        let url = self.url(&format!("/api/parqueaderos/{}", lot_id));
        self.send(|http| http.delete(&url).bearer_auth(&token)).await
    }

    /// POST /api/parqueaderos/{id}/regenerate-lugares
    ///
    /// Resynchronizes the spot set to `capacity`, or to the stored capacity
    /// when `None`.
    pub async fn regenerate_spots(
        &self,
        lot_id: Uuid,
        capacity: Option<i32>,
    ) -> Result<LotUpdatedResponse, ClientError> {
        let body = RegenerateSpotsRequest { capacity };
        check(validation::validate_regenerate(&body))?;
        let token = self.token()?;

        let url = self.url(&format!("/api/parqueaderos/{}/regenerate-lugares", lot_id));
        self.send(|http| http.post(&url).bearer_auth(&token).json(&body))
            .await
    }

    /// GET /api/lugares/{lot_id}, in natural label order
    pub async fn list_spots(&self, lot_id: Uuid) -> Result<Vec<Spot>, ClientError> {
        let token = self.token()?;
        let url = self.url(&format!("/api/lugares/{}", lot_id));
        let list: ListResponse<Spot> = self.send(|http| http.get(&url).bearer_auth(&token)).await?;

        let mut spots = list.data;
        sort_spots(&mut spots);
        Ok(spots)
    }

    /// PUT /api/lugares/{spot_id}
    pub async fn update_spot(
        &self,
        spot_id: Uuid,
        request: UpdateSpotRequest,
    ) -> Result<Spot, ClientError> {
        let request = request.normalized();
        if request.is_empty() {
            return Err(ClientError::Validation(vec![FieldError::new(
                "body",
                "No fields to update",
            )]));
        }
        let token = self.token()?;

        let url = self.url(&format!("/api/lugares/{}", spot_id));
        let updated: DataResponse<Spot> = self
            .send(|http| http.put(&url).bearer_auth(&token).json(&request))
            .await?;
        Ok(updated.data)
    }

    /// Flip one spot between free and occupied
    pub async fn toggle_spot(&self, spot: &Spot) -> Result<Spot, ClientError> {
        self.update_spot(spot.id, UpdateSpotRequest::toggle(spot)).await
    }
}
