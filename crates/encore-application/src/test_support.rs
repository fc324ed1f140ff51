//! Scripted gateway for use-case tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use encore_core::billing::{BillingProfile, Order};
use encore_core::cart::{AddItemRequest, CartPayload, RemoveResponse};
use encore_core::catalog::{PerformanceDetail, PerformanceSummary};
use encore_core::error::{EncoreError, Result};
use encore_core::gateway::{AddToCartResponse, TicketingGateway};
use encore_core::payment::CardDetails;
use encore_core::profile::{AccountProfile, AccountUpdate};

/// A gateway that replays scripted responses in FIFO order and records
/// every call it receives. An unscripted call fails loudly so a test
/// cannot silently issue more traffic than it declared.
#[derive(Default)]
pub struct MockGateway {
    operations: Mutex<Vec<String>>,
    cart_responses: Mutex<VecDeque<Result<CartPayload>>>,
    add_responses: Mutex<VecDeque<Result<String>>>,
    remove_responses: Mutex<VecDeque<Result<RemoveResponse>>>,
    profile_responses: Mutex<VecDeque<Result<AccountProfile>>>,
    tokenize_responses: Mutex<VecDeque<Result<String>>>,
    attach_responses: Mutex<VecDeque<Result<()>>>,
    finalize_responses: Mutex<VecDeque<Result<Order>>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call received so far, in order, as `"method args"` strings.
    pub fn operations(&self) -> Vec<String> {
        self.operations.lock().unwrap().clone()
    }

    fn record(&self, operation: String) {
        self.operations.lock().unwrap().push(operation);
    }

    fn unscripted(method: &str) -> EncoreError {
        EncoreError::gateway(method.to_string(), "unscripted call in test")
    }

    pub fn script_cart(&self, response: Result<CartPayload>) {
        self.cart_responses.lock().unwrap().push_back(response);
    }

    pub fn script_add(&self, response: Result<String>) {
        self.add_responses.lock().unwrap().push_back(response);
    }

    pub fn script_remove(&self, response: Result<RemoveResponse>) {
        self.remove_responses.lock().unwrap().push_back(response);
    }

    pub fn script_profile(&self, response: Result<AccountProfile>) {
        self.profile_responses.lock().unwrap().push_back(response);
    }

    pub fn script_tokenize(&self, response: Result<String>) {
        self.tokenize_responses.lock().unwrap().push_back(response);
    }

    pub fn script_attach(&self, response: Result<()>) {
        self.attach_responses.lock().unwrap().push_back(response);
    }

    pub fn script_finalize(&self, response: Result<Order>) {
        self.finalize_responses.lock().unwrap().push_back(response);
    }
}

#[async_trait::async_trait]
impl TicketingGateway for MockGateway {
    async fn fetch_cart(&self, cart_id: &str) -> Result<CartPayload> {
        self.record(format!("fetch_cart {cart_id}"));
        self.cart_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Self::unscripted("fetch_cart")))
    }

    async fn add_to_cart(&self, request: &AddItemRequest) -> Result<AddToCartResponse> {
        self.record(format!(
            "add_to_cart perf={} type={} zone={} qty={}",
            request.performance_id, request.price_type_id, request.zone_id, request.quantity
        ));
        self.add_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Self::unscripted("add_to_cart")))
            .map(|cart_id| AddToCartResponse { cart_id })
    }

    async fn remove_sub_line_item(
        &self,
        cart_id: &str,
        line_item_id: i64,
        sub_line_item_id: i64,
    ) -> Result<RemoveResponse> {
        self.record(format!(
            "remove_sub_line_item {cart_id} {line_item_id} {sub_line_item_id}"
        ));
        self.remove_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Self::unscripted("remove_sub_line_item")))
    }

    async fn tokenize_card(&self, _card: &CardDetails) -> Result<String> {
        self.record("tokenize_card".to_string());
        self.tokenize_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Self::unscripted("tokenize_card")))
    }

    async fn attach_payment(&self, cart_id: &str, _token: &str, amount: f64) -> Result<()> {
        self.record(format!("attach_payment {cart_id} amount={amount}"));
        self.attach_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Self::unscripted("attach_payment")))
    }

    async fn finalize_checkout(&self, cart_id: &str, _billing: &BillingProfile) -> Result<Order> {
        self.record(format!("finalize_checkout {cart_id}"));
        self.finalize_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Self::unscripted("finalize_checkout")))
    }

    async fn list_performances(&self) -> Result<Vec<PerformanceSummary>> {
        self.record("list_performances".to_string());
        Err(Self::unscripted("list_performances"))
    }

    async fn performance_detail(&self, performance_id: i64) -> Result<PerformanceDetail> {
        self.record(format!("performance_detail {performance_id}"));
        Err(Self::unscripted("performance_detail"))
    }

    async fn fetch_profile(&self) -> Result<AccountProfile> {
        self.record("fetch_profile".to_string());
        self.profile_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Self::unscripted("fetch_profile")))
    }

    async fn update_profile(&self, _update: &AccountUpdate) -> Result<()> {
        self.record("update_profile".to_string());
        Err(Self::unscripted("update_profile"))
    }
}
