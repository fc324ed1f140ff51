//! Credential store trait.
//!
//! Defines the interface for the local secure key-value store holding
//! the auth bearer token and the current cart identifier. Both values
//! are opaque strings that must survive app restarts.

use crate::error::Result;

/// Fixed key under which the auth bearer token is stored.
pub const TOKEN_KEY: &str = "token";

/// Fixed key under which the current cart identifier is stored.
pub const CART_ID_KEY: &str = "cartId";

/// Local secure key-value store for opaque credentials.
///
/// # Security Note
///
/// Implementations should ensure that:
/// - Backing files have appropriate permissions (e.g., 600 on Unix)
/// - Stored values are never logged
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    /// Reads the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes the value stored under `key`, if any.
    async fn delete(&self, key: &str) -> Result<()>;
}

/// In-memory credential store.
///
/// Used by tests and by guest sessions that should not leave
/// credentials on disk.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    values: std::sync::Mutex<std::collections::HashMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|_| crate::EncoreError::internal("credential store lock poisoned"))?;
        Ok(values.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| crate::EncoreError::internal("credential store lock poisoned"))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|_| crate::EncoreError::internal("credential store lock poisoned"))?;
        values.remove(key);
        Ok(())
    }
}
