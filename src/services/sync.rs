// SPDX-License-Identifier: MIT

//! Best-effort background reconciliation of locally modified profiles.
//!
//! Runs opportunistically at process start, not on a schedule. It only
//! consumes the `needsSync` flag; foreground edits that race with it are
//! fine because every cache write is a full-record overwrite and the user's
//! own eventual save wins.

use crate::cache::ProfileCache;
use crate::models::Profile;
use crate::services::api::{ParkApiClient, ProfileUpdateRequest};
use crate::services::SessionService;

/// Pending-change sync pass.
#[derive(Clone)]
pub struct PendingSyncService {
    api: ParkApiClient,
    session: SessionService,
    profiles: ProfileCache,
}

impl PendingSyncService {
    pub fn new(api: ParkApiClient, session: SessionService, profiles: ProfileCache) -> Self {
        Self {
            api,
            session,
            profiles,
        }
    }

    /// Push every cached profile flagged `needsSync` to the backend.
    ///
    /// Entries are skipped (left flagged) when no credential is stored;
    /// failed pushes keep their flag for a later pass. Errors are logged,
    /// never surfaced. Returns the number of entries synced.
    pub async fn sync_pending(&self) -> usize {
        let pending = self.profiles.pending();
        if pending.is_empty() {
            return 0;
        }

        tracing::debug!(count = pending.len(), "Pending profile entries to sync");

        let mut synced = 0;
        for profile in pending {
            if !self.session.is_authenticated() {
                tracing::debug!(
                    email = %profile.email,
                    "No live credential, leaving entry for a later pass"
                );
                continue;
            }

            if self.push(&profile).await {
                synced += 1;
            }
        }

        if synced > 0 {
            tracing::info!(synced, "Pending profile sync complete");
        }
        synced
    }

    /// Push one flagged profile. Returns whether the entry was confirmed.
    async fn push(&self, profile: &Profile) -> bool {
        let request = ProfileUpdateRequest {
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone: profile.phone_number.clone(),
            car_plate_ids: profile.car_plate_ids.clone(),
        };

        let result = self
            .session
            .with_auth(|auth| async move { self.api.update_profile(&auth, &request).await })
            .await;

        match result {
            Ok(response) => {
                let confirmed = Profile {
                    name: profile.name.clone(),
                    email: profile.email.clone(),
                    phone_number: profile.phone_number.clone(),
                    car_plate_ids: response.car_plate_ids,
                    needs_sync: false,
                };
                match self.profiles.save(&confirmed) {
                    Ok(()) => true,
                    Err(e) => {
                        tracing::warn!(
                            email = %profile.email,
                            error = %e,
                            "Synced profile but failed to clear its flag"
                        );
                        false
                    }
                }
            }
            Err(e) => {
                tracing::warn!(
                    email = %profile.email,
                    error = %e,
                    "Failed to sync pending profile"
                );
                false
            }
        }
    }
}
