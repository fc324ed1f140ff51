//! Checkout orchestration.
//!
//! Prepares a checkout draft by fetching the cart and the account
//! profile concurrently, then validates the draft into a payment
//! handoff. Validation is purely local: a draft that fails it never
//! reaches the network.

use std::sync::Arc;

use tracing::warn;

use encore_core::billing::{sanitize_donation, BillingProfile, PaymentHandoff};
use encore_core::cart::CartSnapshot;
use encore_core::error::{EncoreError, Result};
use encore_core::gateway::TicketingGateway;

use crate::cart_session::{CartSessionManager, CartView};

/// Everything the checkout screen edits before payment.
#[derive(Debug, Clone)]
pub struct CheckoutDraft {
    pub cart_id: String,
    pub cart: CartSnapshot,
    pub billing: BillingProfile,
    /// Free-text donation amount, sanitized only at confirmation.
    pub donation: String,
    pub order_note: String,
    /// True when preparing the draft switched the session to a
    /// replacement cart.
    pub session_renewed: bool,
}

impl CheckoutDraft {
    /// The amount to show: cart subtotal plus fees plus the donation as
    /// currently typed.
    pub fn display_total(&self) -> f64 {
        self.cart.subtotal() + self.cart.fees() + sanitize_donation(&self.donation)
    }
}

/// Builds and confirms checkout drafts.
pub struct CheckoutUseCase {
    session: Arc<CartSessionManager>,
    gateway: Arc<dyn TicketingGateway>,
}

impl CheckoutUseCase {
    pub fn new(session: Arc<CartSessionManager>, gateway: Arc<dyn TicketingGateway>) -> Self {
        Self { session, gateway }
    }

    /// Prepares a draft for the current cart.
    ///
    /// The cart load and the profile fetch run concurrently. A failed
    /// profile fetch degrades to empty billing fields rather than
    /// blocking checkout; a missing or empty cart is an error because
    /// there is nothing to pay for.
    pub async fn prepare(&self) -> Result<CheckoutDraft> {
        let (cart_result, profile_result) =
            tokio::join!(self.session.load_cart(), self.gateway.fetch_profile());

        let outcome = cart_result?;
        let cart = match outcome.view {
            CartView::Ready(snapshot) => snapshot,
            CartView::NoCart => return Err(EncoreError::not_found("cart", "current")),
        };
        let cart_id = self
            .session
            .current_cart_id()
            .await
            .ok_or_else(|| EncoreError::not_found("cart", "current"))?;

        let billing = match profile_result {
            Ok(profile) => profile.billing_prefill(),
            Err(err) => {
                warn!(error = %err, "profile unavailable, starting with blank billing fields");
                BillingProfile::default()
            }
        };

        Ok(CheckoutDraft {
            cart_id,
            cart,
            billing,
            donation: String::new(),
            order_note: String::new(),
            session_renewed: outcome.session_renewed,
        })
    }

    /// Validates the draft and turns it into a payment handoff.
    ///
    /// This is local-only: no network traffic happens here, so a
    /// validation failure costs nothing server-side.
    pub fn confirm(&self, draft: &CheckoutDraft) -> Result<PaymentHandoff> {
        draft.billing.validate()?;
        Ok(PaymentHandoff {
            cart_id: draft.cart_id.clone(),
            billing: draft.billing.clone(),
            donation: sanitize_donation(&draft.donation),
            order_note: draft.order_note.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockGateway;
    use encore_core::cart::CartPayload;
    use encore_core::credentials::{MemoryCredentialStore, CredentialStore, CART_ID_KEY};
    use encore_core::profile::{AccountProfile, Address};
    use serde_json::json;

    async fn usecase_with_cart(
        gateway: Arc<MockGateway>,
        cart_id: &str,
    ) -> CheckoutUseCase {
        let credentials = Arc::new(MemoryCredentialStore::new());
        credentials.set(CART_ID_KEY, cart_id).await.unwrap();
        let session = Arc::new(
            CartSessionManager::restore(gateway.clone(), credentials)
                .await
                .unwrap(),
        );
        CheckoutUseCase::new(session, gateway)
    }

    fn populated_cart() -> CartPayload {
        CartPayload::Active(CartSnapshot::new(json!({
            "Items": [{"Performance": {"Description": "Carmen"}}],
            "SubTotal": 40.0,
            "FeesAmount": 3.5
        })))
    }

    fn profile() -> AccountProfile {
        AccountProfile {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.org".to_string(),
            phone: "555-0100".to_string(),
            address: Some(Address {
                street1: "1 Analytical Way".to_string(),
                city: "London".to_string(),
                province: "ON".to_string(),
                postal_code: "N6A 1A1".to_string(),
                country: Some("CA".to_string()),
            }),
        }
    }

    #[tokio::test]
    async fn test_prepare_prefills_billing_from_the_profile() {
        let gateway = Arc::new(MockGateway::new());
        gateway.script_cart(Ok(populated_cart()));
        gateway.script_profile(Ok(profile()));
        let usecase = usecase_with_cart(gateway, "C1").await;

        let draft = usecase.prepare().await.unwrap();

        assert_eq!(draft.cart_id, "C1");
        assert_eq!(draft.billing.first_name, "Ada");
        assert_eq!(draft.billing.email, "ada@example.org");
        assert_eq!(draft.billing.city, "London");
        assert!(!draft.session_renewed);
    }

    #[tokio::test]
    async fn test_prepare_degrades_to_blank_billing_when_profile_fails() {
        let gateway = Arc::new(MockGateway::new());
        gateway.script_cart(Ok(populated_cart()));
        gateway.script_profile(Err(EncoreError::gateway("fetchProfile", "503")));
        let usecase = usecase_with_cart(gateway, "C1").await;

        let draft = usecase.prepare().await.unwrap();

        assert_eq!(draft.billing, BillingProfile::default());
    }

    #[tokio::test]
    async fn test_prepare_surfaces_a_renewed_session() {
        let gateway = Arc::new(MockGateway::new());
        gateway.script_cart(Ok(CartPayload::Expired {
            new_cart_id: "C2".to_string(),
        }));
        gateway.script_cart(Ok(populated_cart()));
        gateway.script_profile(Ok(profile()));
        let usecase = usecase_with_cart(gateway, "C1").await;

        let draft = usecase.prepare().await.unwrap();

        assert!(draft.session_renewed);
        assert_eq!(draft.cart_id, "C2");
    }

    #[tokio::test]
    async fn test_prepare_without_a_cart_is_not_found() {
        let gateway = Arc::new(MockGateway::new());
        gateway.script_cart(Ok(CartPayload::Empty));
        gateway.script_profile(Ok(profile()));
        let usecase = usecase_with_cart(gateway, "C1").await;

        assert!(usecase.prepare().await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_display_total_includes_the_typed_donation() {
        let gateway = Arc::new(MockGateway::new());
        gateway.script_cart(Ok(populated_cart()));
        gateway.script_profile(Ok(profile()));
        let usecase = usecase_with_cart(gateway, "C1").await;

        let mut draft = usecase.prepare().await.unwrap();
        draft.donation = "$1a0.50".to_string();

        assert!((draft.display_total() - 54.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_confirm_rejects_incomplete_billing_without_network_traffic() {
        let gateway = Arc::new(MockGateway::new());
        gateway.script_cart(Ok(populated_cart()));
        gateway.script_profile(Err(EncoreError::gateway("fetchProfile", "503")));
        let usecase = usecase_with_cart(gateway.clone(), "C1").await;

        let draft = usecase.prepare().await.unwrap();
        let calls_before = gateway.operations().len();

        let err = usecase.confirm(&draft).unwrap_err();

        assert!(err.is_validation());
        assert_eq!(gateway.operations().len(), calls_before);
    }

    #[tokio::test]
    async fn test_confirm_sanitizes_donation_and_trims_the_note() {
        let gateway = Arc::new(MockGateway::new());
        gateway.script_cart(Ok(populated_cart()));
        gateway.script_profile(Ok(profile()));
        let usecase = usecase_with_cart(gateway, "C1").await;

        let mut draft = usecase.prepare().await.unwrap();
        draft.donation = "abc25.00xyz".to_string();
        draft.order_note = "  aisle seat please  ".to_string();

        let handoff = usecase.confirm(&draft).unwrap();

        assert!((handoff.donation - 25.0).abs() < 1e-9);
        assert_eq!(handoff.order_note, "aisle seat please");
        assert_eq!(handoff.cart_id, "C1");
    }
}
