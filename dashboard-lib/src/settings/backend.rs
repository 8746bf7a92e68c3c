//! Raw byte storage behind the settings provider.

use async_trait::async_trait;

use super::SettingsError;

/// Where settings bytes live.
///
/// A backend only moves opaque values in and out by key; typing is the
/// provider's job.
#[async_trait]
pub trait SettingsBackend: Send + Sync {
    /// The stored value for `key`, if any.
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), SettingsError>;
}
