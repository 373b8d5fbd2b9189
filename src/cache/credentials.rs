// SPDX-License-Identifier: MIT

//! Persistent bearer-credential storage.
//!
//! Sole authority for "is a session active": a stored token means yes,
//! anything else means no. No expiry is tracked client-side; expiry is
//! detected reactively when the backend answers 401.

use crate::cache::{keys, CacheStore};
use crate::error::AppError;
use crate::models::Credential;
use std::sync::Arc;

/// Typed view over the credential keys of the cache store.
#[derive(Clone)]
pub struct CredentialStore {
    store: Arc<dyn CacheStore>,
}

impl CredentialStore {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Persist a credential, overwriting any existing one.
    pub fn store(&self, credential: &Credential) -> Result<(), AppError> {
        self.store.set(keys::ACCESS_TOKEN, &credential.token)?;
        self.store.set(keys::TOKEN_TYPE, &credential.token_type)?;
        Ok(())
    }

    /// The stored credential, if a session is active.
    ///
    /// Never fails: store read errors are logged and reported as "no
    /// session". A token persisted without a type gets `Bearer`.
    pub fn get(&self) -> Option<Credential> {
        let token = match self.store.get(keys::ACCESS_TOKEN) {
            Ok(Some(token)) => token,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored token");
                return None;
            }
        };

        let token_type = match self.store.get(keys::TOKEN_TYPE) {
            Ok(Some(token_type)) => token_type,
            Ok(None) => "Bearer".to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored token type");
                "Bearer".to_string()
            }
        };

        Some(Credential { token, token_type })
    }

    /// Remove the stored credential. Idempotent.
    pub fn clear(&self) -> Result<(), AppError> {
        self.store.remove(keys::ACCESS_TOKEN)?;
        self.store.remove(keys::TOKEN_TYPE)?;
        Ok(())
    }
}
