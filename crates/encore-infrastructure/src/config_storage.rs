//! Client configuration file storage.
//!
//! Loads `config.toml` from the encore config directory. A missing file
//! yields the default configuration; the `ENCORE_API_URL` environment
//! variable overrides the base URL either way.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use encore_core::config::ClientConfig;
use encore_core::error::{EncoreError, Result};

use crate::paths::EncorePaths;

/// Storage for the client configuration file.
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Creates storage at the default path (`~/.config/encore/config.toml`).
    pub fn new() -> Result<Self> {
        let path =
            EncorePaths::config_file().map_err(|e| EncoreError::config(e.to_string()))?;
        Ok(Self { path })
    }

    /// Creates storage with a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the configuration, applying defaults and the environment
    /// override.
    pub fn load(&self) -> Result<ClientConfig> {
        let mut config = if self.path.exists() {
            let content = fs::read_to_string(&self.path)?;
            toml::from_str(&content)?
        } else {
            debug!(path = %self.path.display(), "no config file, using defaults");
            ClientConfig::default()
        };

        if let Ok(url) = std::env::var("ENCORE_API_URL") {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }

        Ok(config.normalized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let storage = ConfigStorage::with_path(temp_dir.path().join("config.toml"));
        let config = storage.load().unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_load_valid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(
            &path,
            "base_url = \"https://boxoffice.example.org/\"\ntimeout_secs = 10\n",
        )
        .unwrap();

        let config = ConfigStorage::with_path(path).load().unwrap();
        assert_eq!(config.base_url, "https://boxoffice.example.org");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        fs::write(&path, "base_url = [not toml").unwrap();

        assert!(ConfigStorage::with_path(path).load().is_err());
    }
}
