// SPDX-License-Identifier: MIT

//! Application error types with a single shape for every boundary-crossing
//! operation.
//!
//! Every service method normalizes its failures into [`AppError`] so the UI
//! layer always has one thing to branch on. Cache *reads* never produce an
//! error at all; they degrade to empty/`None` results inside the cache layer.

use serde::Serialize;

/// Application error type returned by all session, plate, reservation and
/// sync operations.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Required local input is missing or malformed. Detected before any
    /// network call is made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A protected operation was attempted with no stored credential.
    /// Detected before any network call is made.
    #[error("Not authenticated")]
    NotAuthenticated,

    /// The backend rejected the bearer credential on a protected call (401).
    /// Classified once, inside the API client. The session facade converts
    /// this into [`AppError::SessionExpired`] after clearing the stored
    /// credential.
    #[error("Authentication rejected by backend")]
    AuthRejected,

    /// The session was invalidated after an auth-rejected response. The
    /// stored credential has already been cleared when this is returned.
    #[error("Authentication expired. Please login again.")]
    SessionExpired,

    /// The request could not complete (DNS, connect, timeout, body read).
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response with a backend-supplied `detail` message.
    #[error("{detail}")]
    Backend {
        /// HTTP status code of the rejected response.
        status: u16,
        /// The backend's `detail` field, or a synthesized `HTTP {status}`.
        detail: String,
    },

    /// The local cache store failed to persist a write.
    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Build a [`AppError::Backend`] from a status code and optional detail.
    pub fn backend(status: u16, detail: Option<String>) -> Self {
        AppError::Backend {
            status,
            detail: detail.unwrap_or_else(|| format!("HTTP {}", status)),
        }
    }

    /// True when the backend rejected the credential itself, i.e. the error
    /// that triggers session invalidation.
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self, AppError::AuthRejected)
    }

    /// True for errors produced without touching the network (validation and
    /// authentication-precondition failures).
    pub fn is_local(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::NotAuthenticated)
    }

    /// Stable discriminant for this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::NotAuthenticated => ErrorKind::NotAuthenticated,
            AppError::AuthRejected => ErrorKind::AuthRejected,
            AppError::SessionExpired => ErrorKind::SessionExpired,
            AppError::Network(_) => ErrorKind::Network,
            AppError::Backend { .. } => ErrorKind::Backend,
            AppError::Cache(_) => ErrorKind::Cache,
            AppError::Internal(_) => ErrorKind::Internal,
        }
    }
}

/// Serializable error kind, for callers that persist or display a stable
/// discriminant rather than the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Validation,
    NotAuthenticated,
    AuthRejected,
    SessionExpired,
    Network,
    Backend,
    Cache,
    Internal,
}

/// Result type alias for service operations.
pub type Result<T> = std::result::Result<T, AppError>;
