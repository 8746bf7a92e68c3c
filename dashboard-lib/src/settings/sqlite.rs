//! SQLite settings backend with a read cache.

use std::path::Path;

use async_sqlite::Client;
use async_trait::async_trait;
use dashmap::DashMap;
use log::debug;

use super::{SettingsBackend, SettingsError};

/// SQLite-backed settings storage.
///
/// Every write goes straight to the database; reads are served from a
/// DashMap once a key has been seen.
pub struct SqliteBackend {
    client: Client,
    cache: DashMap<String, Vec<u8>>,
}

impl SqliteBackend {
    /// Open (or create) the settings database at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let client = async_sqlite::ClientBuilder::new().path(path).open().await?;

        client
            .conn(|conn| {
                conn.execute(
                    "CREATE TABLE IF NOT EXISTS local_storage (
                        key TEXT PRIMARY KEY,
                        value BLOB NOT NULL
                    )",
                    [],
                )
            })
            .await?;

        debug!("Opened settings database at {}", path.display());

        Ok(Self {
            client,
            cache: DashMap::new(),
        })
    }
}

#[async_trait]
impl SettingsBackend for SqliteBackend {
    async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>, SettingsError> {
        if let Some(value) = self.cache.get(key) {
            return Ok(Some(value.clone()));
        }

        let key_owned = key.to_string();
        let value = self
            .client
            .conn(move |conn| {
                let mut stmt = conn.prepare("SELECT value FROM local_storage WHERE key = ?1")?;
                let mut rows = stmt.query([&key_owned])?;
                match rows.next()? {
                    Some(row) => Ok(Some(row.get::<_, Vec<u8>>(0)?)),
                    None => Ok(None),
                }
            })
            .await?;

        if let Some(ref value) = value {
            self.cache.insert(key.to_string(), value.clone());
        }

        Ok(value)
    }

    async fn set_bytes(&self, key: &str, value: Vec<u8>) -> Result<(), SettingsError> {
        let key_owned = key.to_string();
        let value_owned = value.clone();

        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                    async_sqlite::rusqlite::params![&key_owned, &value_owned],
                )
            })
            .await?;

        self.cache.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), SettingsError> {
        let key_owned = key.to_string();

        self.client
            .conn(move |conn| conn.execute("DELETE FROM local_storage WHERE key = ?1", [&key_owned]))
            .await?;

        self.cache.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn temp_db() -> PathBuf {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir().join(format!(
            "dashboard-settings-{}-{}.db",
            std::process::id(),
            n
        ))
    }

    #[tokio::test]
    async fn test_values_survive_reopen() {
        let path = temp_db();
        {
            let backend = SqliteBackend::open(&path).await.unwrap();
            backend.set_bytes("theme", b"dark".to_vec()).await.unwrap();
        }

        let backend = SqliteBackend::open(&path).await.unwrap();
        assert_eq!(backend.get_bytes("theme").await.unwrap(), Some(b"dark".to_vec()));

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn test_remove_survives_reopen() {
        let path = temp_db();
        {
            let backend = SqliteBackend::open(&path).await.unwrap();
            backend.set_bytes("theme", b"dark".to_vec()).await.unwrap();
            // cached read before the removal
            assert!(backend.get_bytes("theme").await.unwrap().is_some());
            backend.remove("theme").await.unwrap();
            assert_eq!(backend.get_bytes("theme").await.unwrap(), None);
        }

        let backend = SqliteBackend::open(&path).await.unwrap();
        assert_eq!(backend.get_bytes("theme").await.unwrap(), None);

        let _ = std::fs::remove_file(&path);
    }
}
