//! Ticketing gateway trait.
//!
//! The seam between the client and the box-office proxy. The HTTP
//! implementation lives in `encore-gateway`; application-layer tests
//! substitute scripted implementations.

use crate::billing::{BillingProfile, Order};
use crate::cart::{AddItemRequest, CartPayload, RemoveResponse};
use crate::catalog::{PerformanceDetail, PerformanceSummary};
use crate::error::Result;
use crate::payment::CardDetails;
use crate::profile::{AccountProfile, AccountUpdate};

/// Response to an add-to-cart call.
///
/// The backend creates a cart as a side effect of the first add and
/// returns its identifier, which the caller must persist before any
/// subsequent cart read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddToCartResponse {
    pub cart_id: String,
}

/// Authenticated access to the box-office proxy.
///
/// Every method is one backend round trip; sequencing and state
/// management live in the application layer.
#[async_trait::async_trait]
pub trait TicketingGateway: Send + Sync {
    /// Fetches the current cart state, classified per the expiry protocol.
    async fn fetch_cart(&self, cart_id: &str) -> Result<CartPayload>;

    /// Adds a priced selection; the backend creates a cart as a side
    /// effect when the caller holds none.
    async fn add_to_cart(&self, request: &AddItemRequest) -> Result<AddToCartResponse>;

    /// Removes exactly one sub-line-item's ticket unit.
    async fn remove_sub_line_item(
        &self,
        cart_id: &str,
        line_item_id: i64,
        sub_line_item_id: i64,
    ) -> Result<RemoveResponse>;

    /// Exchanges raw card data for an opaque single-use token.
    async fn tokenize_card(&self, card: &CardDetails) -> Result<String>;

    /// Attaches a payment token to the cart.
    async fn attach_payment(&self, cart_id: &str, token: &str, amount: f64) -> Result<()>;

    /// Finalizes checkout for the cart, yielding the order confirmation.
    async fn finalize_checkout(&self, cart_id: &str, billing: &BillingProfile) -> Result<Order>;

    /// Lists the published performances.
    async fn list_performances(&self) -> Result<Vec<PerformanceSummary>>;

    /// Fetches the full detail (performance, zones, prices) for one
    /// performance.
    async fn performance_detail(&self, performance_id: i64) -> Result<PerformanceDetail>;

    /// Fetches the signed-in patron's profile.
    async fn fetch_profile(&self) -> Result<AccountProfile>;

    /// Updates the patron's profile.
    async fn update_profile(&self, update: &AccountUpdate) -> Result<()>;
}
