//! Persisted key-value settings.
//!
//! This is the dashboard's equivalent of browser local storage: a small typed
//! store for the theme choice and the profile. Values are serialized with
//! bincode and handed to a [`SettingsBackend`] as raw bytes.

mod backend;
mod memory;
mod sqlite;

pub use backend::SettingsBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

pub use crate::error::SettingsError;

/// Typed view over a [`SettingsBackend`].
///
/// Clones share the backend, so the theme context and the profile form can
/// each hold one.
#[derive(Clone)]
pub struct SettingsProvider {
    backend: Arc<dyn SettingsBackend>,
}

impl std::fmt::Debug for SettingsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SettingsProvider").finish_non_exhaustive()
    }
}

impl SettingsProvider {
    pub fn new(backend: impl SettingsBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// A provider whose values are lost when the process exits.
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Reads and decodes the value under `key`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, SettingsError> {
        let Some(bytes) = self.backend.get_bytes(key).await? else {
            return Ok(None);
        };
        let value = bincode::deserialize(&bytes).map_err(SettingsError::Deserialization)?;
        Ok(Some(value))
    }

    /// Like [`get`](Self::get), with `fallback` for a missing key.
    pub async fn get_or<T: DeserializeOwned>(&self, key: &str, fallback: T) -> Result<T, SettingsError> {
        let value = self.get(key).await?;
        Ok(value.unwrap_or(fallback))
    }

    /// Encodes `value` and stores it under `key`.
    pub async fn set<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), SettingsError> {
        let encoded = bincode::serialize(value).map_err(SettingsError::Serialization)?;
        self.backend.set_bytes(key, encoded).await
    }

    /// Forgets the value stored under `key`.
    pub async fn remove(&self, key: &str) -> Result<(), SettingsError> {
        self.backend.remove(key).await
    }
}
