//! Shared command wiring: config, credential store, gateway, session.

use std::sync::Arc;

use anyhow::Result;

use encore_application::CartSessionManager;
use encore_core::credentials::CredentialStore;
use encore_core::gateway::TicketingGateway;
use encore_gateway::HttpTicketingGateway;
use encore_infrastructure::{ConfigStorage, FileCredentialStore};

/// Everything a command needs, built once per invocation.
pub struct App {
    pub gateway: Arc<dyn TicketingGateway>,
    pub credentials: Arc<dyn CredentialStore>,
    pub session: Arc<CartSessionManager>,
}

impl App {
    pub async fn init() -> Result<Self> {
        let config = ConfigStorage::new()?.load()?;
        let credentials: Arc<dyn CredentialStore> = Arc::new(FileCredentialStore::new()?);
        let gateway: Arc<dyn TicketingGateway> =
            Arc::new(HttpTicketingGateway::new(config, credentials.clone()));
        let session = Arc::new(
            CartSessionManager::restore(gateway.clone(), credentials.clone()).await?,
        );
        Ok(Self {
            gateway,
            credentials,
            session,
        })
    }
}
