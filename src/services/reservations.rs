// SPDX-License-Identifier: MIT

//! Reservation gateway: stateless pass-through to the backend.
//!
//! Reservations are never cached; every list view re-fetches so the UI
//! always shows backend truth.

use crate::error::AppError;
use crate::models::{NewReservation, Reservation};
use crate::services::api::{CreateReservationResponse, ParkApiClient};
use crate::services::SessionService;

/// Reservation create/list/delete operations, all protected.
#[derive(Clone)]
pub struct ReservationService {
    api: ParkApiClient,
    session: SessionService,
}

impl ReservationService {
    pub fn new(api: ParkApiClient, session: SessionService) -> Self {
        Self { api, session }
    }

    /// Create a reservation.
    pub async fn create(
        &self,
        reservation: &NewReservation,
    ) -> Result<CreateReservationResponse, AppError> {
        if reservation.car_plate.trim().is_empty() {
            return Err(AppError::Validation(
                "Please select a car plate ID.".to_string(),
            ));
        }
        if reservation.end() <= reservation.start() {
            return Err(AppError::Validation(
                "Please select a duration greater than 0.".to_string(),
            ));
        }

        let response = self
            .session
            .with_auth(|auth| async move { self.api.create_reservation(&auth, reservation).await })
            .await?;

        tracing::info!(
            reservation_id = %response.reservation.reservation_id,
            "Reservation created"
        );
        Ok(response)
    }

    /// Reservations belonging to `email`. Always fetched fresh.
    pub async fn list_for_email(&self, email: &str) -> Result<Vec<Reservation>, AppError> {
        self.session
            .with_auth(|auth| async move { self.api.list_reservations(&auth, email).await })
            .await
    }

    /// Delete a reservation by id. The backend confirms with an empty 204;
    /// that is success, not an error.
    pub async fn delete(&self, reservation_id: &str) -> Result<(), AppError> {
        self.session
            .with_auth(|auth| async move { self.api.delete_reservation(&auth, reservation_id).await })
            .await?;

        tracing::info!(reservation_id = %reservation_id, "Reservation deleted");
        Ok(())
    }
}
