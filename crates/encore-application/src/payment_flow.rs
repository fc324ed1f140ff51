//! Three-step payment flow.
//!
//! Tokenize the card, attach the token to the cart, finalize checkout.
//! The steps run strictly in order and the flow aborts on the first
//! failure; each error names the step it came from so the caller can
//! tell a declined card from a failed finalize.
//!
//! Raw card data exists only for the duration of the tokenize call and
//! is never logged or persisted.

use std::sync::Arc;

use tracing::{debug, info};

use encore_core::billing::{Order, PaymentHandoff};
use encore_core::error::{EncoreError, Result};
use encore_core::gateway::TicketingGateway;
use encore_core::payment::CardDetails;

/// Runs the tokenize / attach / finalize sequence against one cart.
pub struct PaymentFlow {
    gateway: Arc<dyn TicketingGateway>,
}

impl PaymentFlow {
    pub fn new(gateway: Arc<dyn TicketingGateway>) -> Self {
        Self { gateway }
    }

    /// Pays for the cart named by the handoff and returns the confirmed
    /// order.
    ///
    /// Takes the card by value so the raw data is dropped as soon as
    /// the token exists. The attach step is not idempotent server-side:
    /// a retry after a failed finalize could attach a second token, so
    /// no automatic retry happens here.
    pub async fn pay(&self, handoff: &PaymentHandoff, card: CardDetails) -> Result<Order> {
        let token = self
            .gateway
            .tokenize_card(&card)
            .await
            .map_err(|e| EncoreError::payment("tokenize", e.to_string()))?;
        drop(card);
        debug!(cart_id = %handoff.cart_id, "card tokenized");

        // The proxy charges the cart's full balance; the amount field
        // is fixed at zero on this endpoint.
        self.gateway
            .attach_payment(&handoff.cart_id, &token, 0.0)
            .await
            .map_err(|e| EncoreError::payment("attach", e.to_string()))?;

        let order = self
            .gateway
            .finalize_checkout(&handoff.cart_id, &handoff.billing)
            .await
            .map_err(|e| EncoreError::payment("finalize", e.to_string()))?;

        info!(order_number = %order.order_number, "order confirmed");
        Ok(order)
    }
}
