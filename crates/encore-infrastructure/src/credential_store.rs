//! File-backed credential store.
//!
//! Persists the auth bearer token and the current cart identifier in a
//! single JSON map under the config directory, surviving restarts. The
//! analogue of the mobile platform's secure key-value store.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use encore_core::credentials::CredentialStore;
use encore_core::error::{EncoreError, Result};

use crate::paths::EncorePaths;
use crate::storage::atomic_json::{AtomicJsonError, AtomicJsonFile};

type CredentialMap = HashMap<String, String>;

/// Credential store backed by `credentials.json`.
///
/// Every write goes through an atomic replace with an exclusive file
/// lock, and the file is kept at mode 600 on Unix. Values are opaque
/// strings and are never logged.
pub struct FileCredentialStore {
    file: AtomicJsonFile<CredentialMap>,
}

impl FileCredentialStore {
    /// Creates a store at the default location
    /// (`~/.config/encore/credentials.json`).
    pub fn new() -> Result<Self> {
        let path = EncorePaths::credentials_file()
            .map_err(|e| EncoreError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a store with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path).with_mode(0o600),
        }
    }

    fn map_err(e: AtomicJsonError) -> EncoreError {
        match e {
            AtomicJsonError::IoError(io) => io.into(),
            AtomicJsonError::JsonError(json) => json.into(),
            AtomicJsonError::LockError(msg) => EncoreError::io(msg),
        }
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let map = self.file.load().map_err(Self::map_err)?.unwrap_or_default();
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        debug!(key, "storing credential");
        let key = key.to_string();
        let value = value.to_string();
        self.file
            .update(CredentialMap::new(), move |map| {
                map.insert(key, value);
                Ok(())
            })
            .map_err(Self::map_err)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        debug!(key, "deleting credential");
        let key = key.to_string();
        self.file
            .update(CredentialMap::new(), move |map| {
                map.remove(&key);
                Ok(())
            })
            .map_err(Self::map_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encore_core::credentials::{CART_ID_KEY, TOKEN_KEY};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_round_trip_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("credentials.json");

        let store = FileCredentialStore::with_path(path.clone());
        store.set(TOKEN_KEY, "tok-1").await.unwrap();
        store.set(CART_ID_KEY, "C1").await.unwrap();

        // A fresh handle sees the same values, as after an app restart.
        let reopened = FileCredentialStore::with_path(path);
        assert_eq!(
            reopened.get(TOKEN_KEY).await.unwrap(),
            Some("tok-1".to_string())
        );
        assert_eq!(
            reopened.get(CART_ID_KEY).await.unwrap(),
            Some("C1".to_string())
        );
    }

    #[tokio::test]
    async fn test_set_replaces_previous_value() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileCredentialStore::with_path(temp_dir.path().join("credentials.json"));

        store.set(CART_ID_KEY, "C1").await.unwrap();
        store.set(CART_ID_KEY, "C2").await.unwrap();
        assert_eq!(
            store.get(CART_ID_KEY).await.unwrap(),
            Some("C2".to_string())
        );
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileCredentialStore::with_path(temp_dir.path().join("credentials.json"));

        store.set(CART_ID_KEY, "C1").await.unwrap();
        store.delete(CART_ID_KEY).await.unwrap();
        store.delete(CART_ID_KEY).await.unwrap();
        assert_eq!(store.get(CART_ID_KEY).await.unwrap(), None);
        // Other keys are untouched.
        store.set(TOKEN_KEY, "tok").await.unwrap();
        store.delete(CART_ID_KEY).await.unwrap();
        assert_eq!(store.get(TOKEN_KEY).await.unwrap(), Some("tok".to_string()));
    }

    #[tokio::test]
    async fn test_get_on_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileCredentialStore::with_path(temp_dir.path().join("credentials.json"));
        assert_eq!(store.get(TOKEN_KEY).await.unwrap(), None);
    }
}
