//! Unified path management for encore configuration files.
//!
//! All encore configuration and credentials live under the platform
//! config directory, resolved via the `dirs` crate.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/encore/            # Config directory
//! ├── config.toml              # Client configuration (base URL, timeout)
//! └── credentials.json         # Bearer token and current cart id
//! ```

use std::path::PathBuf;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Home directory could not be determined.
    HomeDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::HomeDirNotFound => write!(f, "Cannot find home directory"),
        }
    }
}

impl std::error::Error for PathError {}

/// Unified path management for encore.
pub struct EncorePaths;

impl EncorePaths {
    /// Returns the encore configuration directory.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to config directory (e.g., `~/.config/encore/`)
    /// - `Err(PathError::HomeDirNotFound)`: Could not determine directory
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|d| d.join("encore"))
            .ok_or(PathError::HomeDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the credentials file.
    ///
    /// # Security Note
    ///
    /// Ensure this file has appropriate permissions (e.g., 600) to
    /// prevent unauthorized access. [`crate::FileCredentialStore`]
    /// sets them on every write.
    pub fn credentials_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("credentials.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_dir() {
        let config_dir = EncorePaths::config_dir().unwrap();
        assert!(config_dir.ends_with("encore"));
    }

    #[test]
    fn test_config_file() {
        let config_file = EncorePaths::config_file().unwrap();
        assert!(config_file.ends_with("config.toml"));
        let config_dir = EncorePaths::config_dir().unwrap();
        assert!(config_file.starts_with(&config_dir));
    }

    #[test]
    fn test_credentials_file() {
        let credentials_file = EncorePaths::credentials_file().unwrap();
        assert!(credentials_file.ends_with("credentials.json"));
        let config_dir = EncorePaths::config_dir().unwrap();
        assert!(credentials_file.starts_with(&config_dir));
    }
}
