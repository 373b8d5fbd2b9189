// SPDX-License-Identifier: MIT

//! Per-email profile cache.
//!
//! Holds the last-known profile for every user who has ever logged in on
//! this device, keyed by lower-cased email. Entries deliberately survive
//! logout so the next login renders instantly from local state.

use crate::cache::{keys, CacheStore};
use crate::error::AppError;
use crate::models::Profile;
use std::sync::Arc;

/// Typed view over the `userProfile_*` keys of the cache store.
#[derive(Clone)]
pub struct ProfileCache {
    store: Arc<dyn CacheStore>,
}

impl ProfileCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Last cached profile for `email` (case-insensitive), or `None` if the
    /// user was never cached. Unreadable entries degrade to `None`.
    pub fn load(&self, email: &str) -> Option<Profile> {
        let raw = match self.store.get(&keys::profile(email)) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read cached profile");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(profile) => Some(profile),
            Err(e) => {
                tracing::warn!(error = %e, "Corrupt cached profile record");
                None
            }
        }
    }

    /// Overwrite the cached record for `profile.email` with the complete
    /// record supplied. Partial fields are never merged silently.
    pub fn save(&self, profile: &Profile) -> Result<(), AppError> {
        let raw = serde_json::to_string(profile)
            .map_err(|e| AppError::Cache(format!("serialize profile: {}", e)))?;
        self.store.set(&keys::profile(&profile.email), &raw)
    }

    /// Bootstrap seeding: write `profile` only when no record exists yet.
    /// Returns whether a write happened.
    pub fn seed_if_absent(&self, profile: &Profile) -> Result<bool, AppError> {
        if self.load(&profile.email).is_some() {
            return Ok(false);
        }
        self.save(profile)?;
        Ok(true)
    }

    /// Persist a local edit that the backend has not confirmed. The stored
    /// record is flagged for the background sync pass.
    pub fn save_pending(&self, profile: &Profile) -> Result<(), AppError> {
        let mut pending = profile.clone();
        pending.needs_sync = true;
        self.save(&pending)
    }

    /// All cached profiles currently flagged as needing sync.
    pub fn pending(&self) -> Vec<Profile> {
        let all_keys = match self.store.keys() {
            Ok(keys) => keys,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to enumerate cache keys");
                return Vec::new();
            }
        };

        all_keys
            .iter()
            .filter(|k| k.starts_with(keys::PROFILE_PREFIX))
            .filter_map(|k| {
                let email = &k[keys::PROFILE_PREFIX.len()..];
                self.load(email)
            })
            .filter(|p| p.needs_sync)
            .collect()
    }
}
