// SPDX-License-Identifier: MIT

//! Session facade: register, login, logout, profile updates, and the
//! authenticated-call contract every protected operation goes through.
//!
//! Session state machine: `Anonymous --login success--> Authenticated`;
//! `Authenticated --logout | auth-rejected response--> Anonymous`. There is
//! no refresh state and no client-side expiry timer; expiry is detected
//! reactively in [`SessionService::with_auth`], the single place an
//! auth-rejected response is handled.

use crate::cache::{CredentialStore, ProfileCache};
use crate::error::AppError;
use crate::models::{Credential, Profile, Registration};
use crate::services::api::{
    ParkApiClient, ProfileUpdateRequest, RegisterRequest, RegisterResponse,
};
use std::future::Future;

/// High-level session service over the API client and local caches.
#[derive(Clone)]
pub struct SessionService {
    api: ParkApiClient,
    credentials: CredentialStore,
    profiles: ProfileCache,
}

impl SessionService {
    pub fn new(api: ParkApiClient, credentials: CredentialStore, profiles: ProfileCache) -> Self {
        Self {
            api,
            credentials,
            profiles,
        }
    }

    // ─── Account Lifecycle ───────────────────────────────────────

    /// Register a new account.
    ///
    /// On success the profile cache is seeded with the submitted values;
    /// the register response carries nothing beyond what was sent.
    pub async fn register(&self, registration: &Registration) -> Result<RegisterResponse, AppError> {
        if registration.name.trim().is_empty()
            || registration.email.trim().is_empty()
            || registration.phone.trim().is_empty()
            || registration.password.trim().is_empty()
        {
            return Err(AppError::Validation(
                "Please fill in all fields".to_string(),
            ));
        }

        let request = RegisterRequest {
            name: registration.name.clone(),
            email: registration.email.clone(),
            phone: registration.phone.clone(),
            car_plate_ids: registration.car_plate_ids.clone(),
            role: registration
                .role
                .clone()
                .unwrap_or_else(|| "user".to_string()),
            password: registration.password.clone(),
        };

        let response = self.api.register(&request).await?;

        let profile = Profile {
            name: registration.name.clone(),
            email: registration.email.clone(),
            phone_number: registration.phone.clone(),
            car_plate_ids: registration.car_plate_ids.clone(),
            needs_sync: false,
        };
        self.profiles.save(&profile)?;

        tracing::info!(email = %registration.email, "Registration succeeded, profile cached");
        Ok(response)
    }

    /// Log in and store the bearer credential.
    ///
    /// The returned `user` record (when present) overwrites the cached
    /// profile for that email, so the cache reflects backend truth as of
    /// this login.
    pub async fn login(&self, email: &str, password: &str) -> Result<Credential, AppError> {
        if email.trim().is_empty() || password.trim().is_empty() {
            return Err(AppError::Validation(
                "Please fill in all fields".to_string(),
            ));
        }

        let response = self.api.login(email, password).await?;

        let credential = Credential {
            token: response.access_token,
            token_type: response.token_type,
        };
        self.credentials.store(&credential)?;

        if let Some(user) = response.user {
            let profile = Profile {
                name: user.name,
                email: user.email,
                phone_number: user.phone,
                car_plate_ids: user.car_plate_ids,
                needs_sync: false,
            };
            self.profiles.save(&profile)?;
        }

        tracing::info!("Login succeeded, credential stored");
        Ok(credential)
    }

    /// Clear the stored credential.
    ///
    /// Cached profiles are intentionally left in place so the next login
    /// renders from local state immediately.
    pub fn logout(&self) -> Result<(), AppError> {
        self.credentials.clear()?;
        tracing::info!("Logged out, credential cleared");
        Ok(())
    }

    // ─── Profile ─────────────────────────────────────────────────

    /// Push a profile update to the backend.
    ///
    /// Fails fast with [`AppError::NotAuthenticated`] when anonymous.
    /// On success the cache gets the submitted values merged with the
    /// backend-confirmed plate list; on failure the cache is untouched.
    pub async fn update_profile(&self, profile: &Profile) -> Result<Profile, AppError> {
        if profile.name.trim().is_empty()
            || profile.email.trim().is_empty()
            || profile.phone_number.trim().is_empty()
        {
            return Err(AppError::Validation(
                "Name, email, and phone number are required.".to_string(),
            ));
        }

        let request = ProfileUpdateRequest {
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone: profile.phone_number.clone(),
            car_plate_ids: profile.car_plate_ids.clone(),
        };

        let response = self
            .with_auth(|auth| async move { self.api.update_profile(&auth, &request).await })
            .await?;

        let confirmed = Profile {
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone_number: profile.phone_number.clone(),
            car_plate_ids: response.car_plate_ids,
            needs_sync: false,
        };
        self.profiles.save(&confirmed)?;

        tracing::info!(email = %confirmed.email, "Profile updated and cached");
        Ok(confirmed)
    }

    /// Persist a local profile edit that could not be (or was not) pushed
    /// yet. The entry is flagged for the background sync pass.
    pub fn stage_profile_edit(&self, profile: &Profile) -> Result<(), AppError> {
        self.profiles.save_pending(profile)
    }

    /// Last cached profile for `email`, if any. Case-insensitive.
    pub fn cached_profile(&self, email: &str) -> Option<Profile> {
        self.profiles.load(email)
    }

    // ─── Session State ───────────────────────────────────────────

    /// Whether a credential is currently stored. The stored token is the
    /// sole authority; no expiry is checked here.
    pub fn is_authenticated(&self) -> bool {
        self.credentials.get().is_some()
    }

    /// The stored credential, if a session is active.
    pub fn current_credential(&self) -> Option<Credential> {
        self.credentials.get()
    }

    /// Run a protected call under the authenticated-request contract.
    ///
    /// - With no stored credential, fails with
    ///   [`AppError::NotAuthenticated`] before the closure (and therefore
    ///   any network I/O) runs.
    /// - When the call comes back auth-rejected, the stored credential is
    ///   cleared and the caller sees [`AppError::SessionExpired`].
    ///
    /// This is the only place session expiry is detected and handled.
    pub async fn with_auth<T, F, Fut>(&self, call: F) -> Result<T, AppError>
    where
        F: FnOnce(Credential) -> Fut,
        Fut: Future<Output = Result<T, AppError>>,
    {
        let credential = self.credentials.get().ok_or(AppError::NotAuthenticated)?;

        match call(credential).await {
            Err(e) if e.is_auth_rejected() => {
                tracing::warn!("Backend rejected credential, clearing session");
                if let Err(clear_err) = self.credentials.clear() {
                    tracing::warn!(error = %clear_err, "Failed to clear rejected credential");
                }
                Err(AppError::SessionExpired)
            }
            other => other,
        }
    }
}
