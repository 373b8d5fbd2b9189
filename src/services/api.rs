// SPDX-License-Identifier: MIT

//! Smart-Park REST API client.
//!
//! Handles:
//! - Auth endpoints (register, login, profile update)
//! - Car plate listing and mutation
//! - Reservation create/list/delete
//! - Response classification (backend `detail` errors, 401 detection)
//!
//! This layer is deliberately dumb about sessions: protected calls take a
//! [`Credential`] argument and a 401 comes back as [`AppError::AuthRejected`].
//! Deciding what an auth rejection *means* (clear the stored credential,
//! report expiry) belongs to the session facade.

use crate::error::AppError;
use crate::models::{Credential, NewReservation, Reservation};
use serde::{Deserialize, Serialize};

/// Low-level Smart-Park API client.
#[derive(Clone)]
pub struct ParkApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ParkApiClient {
    /// Create a new client against `base_url` (scheme + host + port).
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    // ─── Auth Endpoints ──────────────────────────────────────────

    /// `POST /register/`: create an account. No auth.
    pub async fn register(&self, request: &RegisterRequest) -> Result<RegisterResponse, AppError> {
        let url = format!("{}/register/", self.base_url);

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// `POST /login/`: exchange credentials for a bearer token. No auth.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, AppError> {
        let url = format!("{}/login/", self.base_url);

        let body = serde_json::json!({
            "email": email,
            "password": password,
        });

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// `PUT /profile/update/`: replace the account profile. Bearer auth.
    pub async fn update_profile(
        &self,
        auth: &Credential,
        request: &ProfileUpdateRequest,
    ) -> Result<ProfileUpdateResponse, AppError> {
        let url = format!("{}/profile/update/", self.base_url);

        let response = self
            .http
            .put(&url)
            .header(reqwest::header::AUTHORIZATION, auth.authorization_value())
            .json(request)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        self.check_response_json(response).await
    }

    // ─── Car Plates ──────────────────────────────────────────────

    /// `GET /car-plates/{email}`: current plate list. No auth.
    pub async fn get_plates(&self, email: &str) -> Result<Vec<String>, AppError> {
        let url = format!(
            "{}/car-plates/{}",
            self.base_url,
            urlencoding::encode(email)
        );

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        let body: PlatesResponse = self.check_response_json(response).await?;
        Ok(body.car_plate_ids)
    }

    /// `POST /car-plates/{email}`: add one plate. Bearer auth.
    pub async fn add_plate(
        &self,
        auth: &Credential,
        email: &str,
        plate: &str,
    ) -> Result<(), AppError> {
        let url = format!(
            "{}/car-plates/{}",
            self.base_url,
            urlencoding::encode(email)
        );

        let body = serde_json::json!({ "new_plate": plate });

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, auth.authorization_value())
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        self.check_response(response).await
    }

    /// `DELETE /car-plates/{email}/{plate}`: remove one plate. Bearer auth.
    pub async fn delete_plate(
        &self,
        auth: &Credential,
        email: &str,
        plate: &str,
    ) -> Result<(), AppError> {
        let url = format!(
            "{}/car-plates/{}/{}",
            self.base_url,
            urlencoding::encode(email),
            urlencoding::encode(plate)
        );

        let response = self
            .http
            .delete(&url)
            .header(reqwest::header::AUTHORIZATION, auth.authorization_value())
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        self.check_response(response).await
    }

    // ─── Reservations ────────────────────────────────────────────

    /// `POST /reservations/`: create a reservation. Bearer auth.
    pub async fn create_reservation(
        &self,
        auth: &Credential,
        reservation: &NewReservation,
    ) -> Result<CreateReservationResponse, AppError> {
        let url = format!("{}/reservations/", self.base_url);

        let response = self
            .http
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, auth.authorization_value())
            .json(reservation)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// `GET /reservations/?email=`: reservations for one user. Bearer auth.
    pub async fn list_reservations(
        &self,
        auth: &Credential,
        email: &str,
    ) -> Result<Vec<Reservation>, AppError> {
        let url = format!("{}/reservations/", self.base_url);

        let response = self
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, auth.authorization_value())
            .query(&[("email", email)])
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        self.check_response_json(response).await
    }

    /// `DELETE /reservations/{id}`: delete a reservation. Bearer auth.
    ///
    /// The backend answers 204 with no body; success must not attempt a
    /// body parse.
    pub async fn delete_reservation(
        &self,
        auth: &Credential,
        reservation_id: &str,
    ) -> Result<(), AppError> {
        let url = format!(
            "{}/reservations/{}",
            self.base_url,
            urlencoding::encode(reservation_id)
        );

        let response = self
            .http
            .delete(&url)
            .header(reqwest::header::AUTHORIZATION, auth.authorization_value())
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        self.check_response(response).await
    }

    // ─── Response Classification ─────────────────────────────────

    /// Check response status; success discards the body.
    async fn check_response(&self, response: reqwest::Response) -> Result<(), AppError> {
        if response.status().is_success() {
            return Ok(());
        }
        Err(Self::classify_error(response).await)
    }

    /// Check response status and parse the JSON body on success.
    async fn check_response_json<T: for<'de> Deserialize<'de>>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        if !response.status().is_success() {
            return Err(Self::classify_error(response).await);
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Network(format!("JSON parse error: {}", e)))
    }

    /// Map a non-2xx response to an error. 401 is the one status with
    /// session-level meaning and gets its own variant.
    async fn classify_error(response: reqwest::Response) -> AppError {
        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            tracing::debug!("Backend returned 401");
            return AppError::AuthRejected;
        }

        let detail = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.detail);

        AppError::backend(status.as_u16(), detail)
    }
}

// ─── Wire Types ──────────────────────────────────────────────────

/// Registration payload.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub car_plate_ids: Vec<String>,
    pub role: String,
    pub password: String,
}

/// Registration success body.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    pub message: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Login success body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    /// Account snapshot used to seed the local profile cache.
    #[serde(default)]
    pub user: Option<ApiUser>,
}

/// User record as the backend represents it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub car_plate_ids: Vec<String>,
}

/// Profile update payload.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpdateRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub car_plate_ids: Vec<String>,
}

/// Profile update success body; `car_plate_ids` is the backend-confirmed
/// list after the update.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileUpdateResponse {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub car_plate_ids: Vec<String>,
}

/// Reservation creation success body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateReservationResponse {
    pub message: String,
    pub reservation: Reservation,
}

/// `GET /car-plates/{email}` body.
#[derive(Debug, Deserialize)]
struct PlatesResponse {
    #[serde(default)]
    car_plate_ids: Vec<String>,
}

/// Failure body shared by every endpoint.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}
