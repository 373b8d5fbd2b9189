// SPDX-License-Identifier: MIT

//! Key-value store backends for the local cache.
//!
//! [`CacheStore`] is the seam the whole cache layer is built on: production
//! code opens a [`FileStore`], tests inject a [`MemoryStore`], and the typed
//! stores on top never know the difference.

use crate::error::AppError;
use dashmap::DashMap;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// String key-value store with independent keys.
///
/// Implementations must tolerate concurrent access; each operation is atomic
/// per key, and no cross-key ordering is guaranteed or required.
pub trait CacheStore: Send + Sync {
    /// Read a value. `Ok(None)` when the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, AppError>;

    /// Write a value, overwriting any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), AppError>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), AppError>;

    /// All currently present keys, in no particular order.
    fn keys(&self) -> Result<Vec<String>, AppError>;
}

/// In-memory store used by tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, AppError> {
        Ok(self.entries.iter().map(|e| e.key().clone()).collect())
    }
}

/// Durable store backed by a single JSON object file.
///
/// The whole map lives in memory and the file is rewritten after each
/// mutation. Entry counts here are tiny (a credential plus a handful of
/// per-user records), so rewriting beats journaling complexity.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open a store at `path`.
    ///
    /// A missing file starts empty. An unreadable or corrupt file also
    /// starts empty, with a warning: the cache is a convenience copy of
    /// backend state, never the source of truth, so losing it must not
    /// block startup.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, String>>(&raw) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Corrupt cache file, starting empty");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Unreadable cache file, starting empty");
                HashMap::new()
            }
        };

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    /// Rewrite the backing file from the in-memory map. Caller holds the lock.
    fn persist(&self, entries: &HashMap<String, String>) -> Result<(), AppError> {
        let raw = serde_json::to_string_pretty(entries)
            .map_err(|e| AppError::Cache(format!("serialize cache: {}", e)))?;
        std::fs::write(&self.path, raw)
            .map_err(|e| AppError::Cache(format!("write {}: {}", self.path.display(), e)))
    }
}

impl CacheStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, AppError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| AppError::Cache("cache lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AppError::Cache("cache lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), AppError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| AppError::Cache("cache lock poisoned".to_string()))?;
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, AppError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| AppError::Cache("cache lock poisoned".to_string()))?;
        Ok(entries.keys().cloned().collect())
    }
}
