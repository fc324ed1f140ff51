//! Infrastructure layer for the Encore client.
//!
//! Provides local persistence: platform config paths, the atomic
//! credential file backing `CredentialStore`, and `config.toml` loading.

pub mod config_storage;
pub mod credential_store;
pub mod paths;
pub mod storage;

pub use config_storage::ConfigStorage;
pub use credential_store::FileCredentialStore;
pub use paths::EncorePaths;
