//! Application configuration loaded from environment variables.
//!
//! Nothing here is secret: the client only needs to know where the backend
//! lives and where the local cache file should be written.

use std::env;
use std::path::PathBuf;

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Smart-Park REST backend (no trailing slash).
    pub api_base_url: String,
    /// Path of the JSON file backing the persistent cache.
    pub cache_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `SMARTPARK_API_URL` is required; `SMARTPARK_CACHE_PATH` defaults to
    /// `smartpark-cache.json` in the working directory.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_base_url = env::var("SMARTPARK_API_URL")
            .map_err(|_| ConfigError::Missing("SMARTPARK_API_URL"))?;

        Ok(Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            cache_path: env::var("SMARTPARK_CACHE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("smartpark-cache.json")),
        })
    }

    /// Config for tests: points at a caller-supplied stub backend.
    pub fn test_default(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            cache_path: PathBuf::from("smartpark-cache-test.json"),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
