// SPDX-License-Identifier: MIT

//! Smart-Park client: session and local-cache layer for the private parking
//! reservation backend.
//!
//! This crate is the non-UI core of the mobile client. It owns the rules
//! that keep the bearer credential, cached user profiles and cached plate
//! lists consistent with the backend across login, logout, profile edits
//! and offline conditions. Screens sit on top of [`SmartParkClient`] and
//! render from the cache while the network round-trips happen.

pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod services;

use cache::{CacheStore, CredentialStore, FileStore, PlateCache, ProfileCache};
use config::Config;
use services::{
    ParkApiClient, PendingSyncService, PlateService, ReservationService, SessionService,
};
use std::sync::Arc;

/// Top-level client aggregate wiring the services over one shared cache
/// store and one API client.
#[derive(Clone)]
pub struct SmartParkClient {
    pub session: SessionService,
    pub plates: PlateService,
    pub reservations: ReservationService,
    pub sync: PendingSyncService,
}

impl SmartParkClient {
    /// Build a client over an injected cache store.
    pub fn new(config: &Config, store: Arc<dyn CacheStore>) -> Self {
        let api = ParkApiClient::new(&config.api_base_url);

        let credentials = CredentialStore::new(store.clone());
        let profiles = ProfileCache::new(store.clone());
        let plate_cache = PlateCache::new(store);

        let session = SessionService::new(api.clone(), credentials, profiles.clone());
        let plates = PlateService::new(api.clone(), session.clone(), plate_cache);
        let reservations = ReservationService::new(api.clone(), session.clone());
        let sync = PendingSyncService::new(api, session.clone(), profiles);

        Self {
            session,
            plates,
            reservations,
            sync,
        }
    }

    /// Build a client over the durable file-backed store at
    /// `config.cache_path`.
    pub fn open(config: &Config) -> Self {
        let store = Arc::new(FileStore::open(&config.cache_path));
        Self::new(config, store)
    }
}
