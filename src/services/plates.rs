// SPDX-License-Identifier: MIT

//! Plate synchronizer: keeps a locally edited plate list aligned with the
//! backend's authoritative list, and serves reads when the backend is down.

use crate::cache::PlateCache;
use crate::error::AppError;
use crate::services::api::ParkApiClient;
use crate::services::SessionService;

/// Plate fetch/reconcile/delete operations.
#[derive(Clone)]
pub struct PlateService {
    api: ParkApiClient,
    session: SessionService,
    cache: PlateCache,
}

impl PlateService {
    pub fn new(api: ParkApiClient, session: SessionService, cache: PlateCache) -> Self {
        Self {
            api,
            session,
            cache,
        }
    }

    /// Current plate list for `email`.
    ///
    /// A successful fetch refreshes the cache and is authoritative. Any
    /// failure falls back to the last cached snapshot (the read path never
    /// surfaces an error, stale data is the accepted degraded mode).
    pub async fn fetch_plates(&self, email: &str) -> Vec<String> {
        match self.api.get_plates(email).await {
            Ok(plates) => {
                if let Err(e) = self.cache.store(email, &plates) {
                    tracing::warn!(error = %e, "Failed to cache plate list");
                }
                plates
            }
            Err(e) => {
                tracing::warn!(error = %e, "Plate fetch failed, using cached snapshot");
                self.cache.read(email)
            }
        }
    }

    /// Add a single plate, then return the refreshed backend list.
    pub async fn add_plate(&self, email: &str, plate: &str) -> Result<Vec<String>, AppError> {
        if plate.trim().is_empty() {
            return Err(AppError::Validation(
                "Car plate must not be empty".to_string(),
            ));
        }

        self.session
            .with_auth(|auth| async move { self.api.add_plate(&auth, email, plate).await })
            .await?;

        Ok(self.fetch_plates(email).await)
    }

    /// Align the backend with a locally edited desired list.
    ///
    /// Issues one add per desired plate the backend does not already have.
    /// Plate identity is exact string match; blank entries are skipped.
    /// Individual add failures are logged and do not abort the batch;
    /// partial success is acceptable, and the caller re-fetches afterward to
    /// learn the true resulting list. No deletes happen here; explicit
    /// deletion is [`PlateService::delete_plate`].
    pub async fn reconcile(&self, email: &str, desired: &[String]) -> Result<(), AppError> {
        if !self.session.is_authenticated() {
            return Err(AppError::NotAuthenticated);
        }

        let mut present = self.fetch_plates(email).await;

        for plate in desired {
            if plate.trim().is_empty() {
                continue;
            }
            if present.iter().any(|p| p == plate) {
                continue;
            }

            match self
                .session
                .with_auth(|auth| async move { self.api.add_plate(&auth, email, plate).await })
                .await
            {
                Ok(()) => {
                    // Absorbs duplicate entries later in `desired`.
                    present.push(plate.clone());
                }
                Err(e) => {
                    tracing::warn!(plate = %plate, error = %e, "Failed to add plate during reconcile");
                }
            }
        }

        Ok(())
    }

    /// Delete a plate; the backend's post-delete list replaces the cache
    /// and is returned.
    pub async fn delete_plate(&self, email: &str, plate: &str) -> Result<Vec<String>, AppError> {
        self.session
            .with_auth(|auth| async move { self.api.delete_plate(&auth, email, plate).await })
            .await?;

        Ok(self.fetch_plates(email).await)
    }
}
