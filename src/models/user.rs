//! User-facing models: profile records, registration input, credentials.

use serde::{Deserialize, Serialize};

/// Locally cached user profile, keyed by lower-cased email.
///
/// Serialized camelCase because that is the record format the mobile app has
/// always persisted under `userProfile_{email}` keys; existing caches stay
/// readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Display name.
    pub name: String,
    /// Email address. Identity is the lower-cased form; the stored value
    /// keeps the user's original casing.
    pub email: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Vehicle plate identifiers, in backend order.
    #[serde(default)]
    pub car_plate_ids: Vec<String>,
    /// Set when a local edit has not yet been confirmed by the backend.
    #[serde(default)]
    pub needs_sync: bool,
}

impl Profile {
    /// A copy of this profile marked as backend-confirmed.
    pub fn confirmed(mut self) -> Self {
        self.needs_sync = false;
        self
    }
}

/// Registration input submitted to the backend.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    /// Plates to register up front. May be empty.
    pub car_plate_ids: Vec<String>,
    /// Account role; the backend defaults this to `user`.
    pub role: Option<String>,
}

/// Bearer credential presented on protected calls.
///
/// At most one live credential exists process-wide; it is created on login
/// and destroyed on logout or on an auth-rejected response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Opaque access token issued by the backend.
    pub token: String,
    /// Token type, normally `Bearer`.
    pub token_type: String,
}

impl Credential {
    /// Value of the `Authorization` header: `"{token_type} {token}"`.
    pub fn authorization_value(&self) -> String {
        format!("{} {}", self.token_type, self.token)
    }
}
