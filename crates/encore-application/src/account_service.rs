//! Account profile use cases.

use std::sync::Arc;

use tracing::info;

use encore_core::error::Result;
use encore_core::gateway::TicketingGateway;
use encore_core::profile::{AccountProfile, AccountUpdate};

/// Reads and updates the signed-in patron's profile.
pub struct AccountService {
    gateway: Arc<dyn TicketingGateway>,
}

impl AccountService {
    pub fn new(gateway: Arc<dyn TicketingGateway>) -> Self {
        Self { gateway }
    }

    pub async fn profile(&self) -> Result<AccountProfile> {
        self.gateway.fetch_profile().await
    }

    pub async fn update(&self, update: &AccountUpdate) -> Result<()> {
        self.gateway.update_profile(update).await?;
        info!("account profile updated");
        Ok(())
    }
}
