// SPDX-License-Identifier: MIT

//! Per-email plate-list snapshot cache.
//!
//! Kept separate from the profile record so plate reads still work when the
//! backend is briefly unreachable. Never authoritative: whenever the fetch
//! that would refresh it succeeds, the backend list wins.

use crate::cache::{keys, CacheStore};
use crate::error::AppError;
use std::sync::Arc;

/// Typed view over the `userCarPlates_*` keys of the cache store.
#[derive(Clone)]
pub struct PlateCache {
    store: Arc<dyn CacheStore>,
}

impl PlateCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Overwrite the snapshot for `email`.
    pub fn store(&self, email: &str, plates: &[String]) -> Result<(), AppError> {
        let raw = serde_json::to_string(plates)
            .map_err(|e| AppError::Cache(format!("serialize plates: {}", e)))?;
        self.store.set(&keys::plates(email), &raw)
    }

    /// Last fetched snapshot for `email`; empty if never cached or
    /// unreadable. Staleness is expected and tolerated by callers.
    pub fn read(&self, email: &str) -> Vec<String> {
        let raw = match self.store.get(&keys::plates(email)) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read cached plates");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(plates) => plates,
            Err(e) => {
                tracing::warn!(error = %e, "Corrupt cached plate snapshot");
                Vec::new()
            }
        }
    }
}
