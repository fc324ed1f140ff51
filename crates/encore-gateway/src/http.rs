//! Reqwest implementation of the ticketing gateway.
//!
//! All requests go through the intermediary proxy in front of the
//! Tessitura box office. The bearer token is read from the credential
//! store at request time so a re-login takes effect without rebuilding
//! the gateway.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde_json::{Value, json};
use tracing::{debug, warn};

use encore_core::billing::{BillingProfile, Order};
use encore_core::cart::{AddItemRequest, CartPayload, RemoveResponse};
use encore_core::catalog::{PerformanceDetail, PerformanceSummary};
use encore_core::config::ClientConfig;
use encore_core::credentials::{CredentialStore, TOKEN_KEY};
use encore_core::error::{EncoreError, Result};
use encore_core::extract::{as_id_string, first_match, resolve_path};
use encore_core::gateway::{AddToCartResponse, TicketingGateway};
use encore_core::payment::CardDetails;
use encore_core::profile::{AccountProfile, AccountUpdate, ProfileResponse};

/// HTTP gateway to the box-office proxy.
pub struct HttpTicketingGateway {
    client: Client,
    base_url: String,
    timeout: Duration,
    credentials: Arc<dyn CredentialStore>,
}

impl HttpTicketingGateway {
    /// Creates a gateway from client configuration.
    pub fn new(config: ClientConfig, credentials: Arc<dyn CredentialStore>) -> Self {
        let config = config.normalized();
        Self {
            client: Client::new(),
            timeout: Duration::from_secs(config.timeout_secs),
            base_url: config.base_url,
            credentials,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Applies the stored bearer token, when present.
    ///
    /// A missing token is not an error here: some catalog endpoints are
    /// public, and authenticated endpoints will reject the request with
    /// a status the caller sees as a gateway error.
    async fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        let request = request.timeout(self.timeout);
        match self.credentials.get(TOKEN_KEY).await? {
            Some(token) => Ok(request.header("Authorization", format!("Bearer {}", token))),
            None => Ok(request),
        }
    }

    /// Sends a request and parses the JSON body, mapping transport and
    /// status failures to gateway errors tagged with the operation name.
    async fn send_json(&self, operation: &str, request: RequestBuilder) -> Result<Value> {
        let response = request
            .send()
            .await
            .map_err(|e| EncoreError::gateway(operation, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(operation, %status, "backend returned error status");
            return Err(EncoreError::gateway(
                operation,
                format!("{}: {}", status, error_text),
            ));
        }

        // An empty body is legitimate for some write endpoints.
        let text = response
            .text()
            .await
            .map_err(|e| EncoreError::gateway(operation, e.to_string()))?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&text)
            .map_err(|e| EncoreError::malformed(operation, format!("invalid JSON: {}", e)))
    }
}

#[async_trait]
impl TicketingGateway for HttpTicketingGateway {
    async fn fetch_cart(&self, cart_id: &str) -> Result<CartPayload> {
        debug!(cart_id, "fetching cart");
        let request = self
            .authorized(self.client.get(self.url(&format!("/api/cart/{}", cart_id))))
            .await?;
        let body = self.send_json("loadCart", request).await?;
        CartPayload::from_value(body).map_err(|msg| EncoreError::malformed("loadCart", msg))
    }

    async fn add_to_cart(&self, req: &AddItemRequest) -> Result<AddToCartResponse> {
        debug!(
            performance_id = req.performance_id,
            price_type_id = req.price_type_id,
            zone_id = req.zone_id,
            quantity = req.quantity,
            "adding item to cart"
        );
        let request = self
            .authorized(self.client.post(self.url("/api/cart/add")).json(req))
            .await?;
        let body = self.send_json("addToCart", request).await?;

        let cart_id = first_match(&body, &["cartId", "CartId"])
            .and_then(as_id_string)
            .ok_or_else(|| {
                EncoreError::malformed("addToCart", "response did not carry a cart id")
            })?;
        Ok(AddToCartResponse { cart_id })
    }

    async fn remove_sub_line_item(
        &self,
        cart_id: &str,
        line_item_id: i64,
        sub_line_item_id: i64,
    ) -> Result<RemoveResponse> {
        debug!(cart_id, line_item_id, sub_line_item_id, "removing cart item");
        let path = format!(
            "/api/cart/{}/remove/{}/{}",
            cart_id, line_item_id, sub_line_item_id
        );
        let request = self.authorized(self.client.delete(self.url(&path))).await?;
        let body = self.send_json("removeItem", request).await?;
        serde_json::from_value(body)
            .map_err(|e| EncoreError::malformed("removeItem", e.to_string()))
    }

    async fn tokenize_card(&self, card: &CardDetails) -> Result<String> {
        // Card fields are serialized straight into the request body and
        // dropped with it; they are never logged.
        let request = self
            .authorized(
                self.client
                    .post(self.url("/api/payment/tokenize"))
                    .json(card),
            )
            .await?;
        let body = self.send_json("tokenize", request).await?;
        resolve_path(&body, "token")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| EncoreError::malformed("tokenize", "response did not carry a token"))
    }

    async fn attach_payment(&self, cart_id: &str, token: &str, amount: f64) -> Result<()> {
        debug!(cart_id, "attaching payment to cart");
        let path = format!("/api/cart/{}/payment", cart_id);
        let request = self
            .authorized(
                self.client
                    .post(self.url(&path))
                    .json(&json!({"token": token, "amount": amount})),
            )
            .await?;
        self.send_json("attachPayment", request).await?;
        Ok(())
    }

    async fn finalize_checkout(&self, cart_id: &str, billing: &BillingProfile) -> Result<Order> {
        debug!(cart_id, "finalizing checkout");
        let path = format!("/api/cart/{}/checkout", cart_id);
        let request = self
            .authorized(
                self.client
                    .post(self.url(&path))
                    .json(&json!({"billing": billing})),
            )
            .await?;
        let body = self.send_json("checkout", request).await?;
        let order = resolve_path(&body, "order").ok_or_else(|| {
            EncoreError::malformed("checkout", "response did not carry an order")
        })?;
        serde_json::from_value(order.clone())
            .map_err(|e| EncoreError::malformed("checkout", e.to_string()))
    }

    async fn list_performances(&self) -> Result<Vec<PerformanceSummary>> {
        let request = self
            .authorized(self.client.get(self.url("/api/performances")))
            .await?;
        let body = self.send_json("listPerformances", request).await?;
        serde_json::from_value(body)
            .map_err(|e| EncoreError::malformed("listPerformances", e.to_string()))
    }

    async fn performance_detail(&self, performance_id: i64) -> Result<PerformanceDetail> {
        let path = format!("/api/performances/{}/full", performance_id);
        let request = self.authorized(self.client.get(self.url(&path))).await?;
        let body = self.send_json("performanceDetail", request).await?;
        serde_json::from_value(body)
            .map_err(|e| EncoreError::malformed("performanceDetail", e.to_string()))
    }

    async fn fetch_profile(&self) -> Result<AccountProfile> {
        let request = self
            .authorized(self.client.get(self.url("/api/auth/me")))
            .await?;
        let body = self.send_json("fetchProfile", request).await?;
        let response: ProfileResponse = serde_json::from_value(body)
            .map_err(|e| EncoreError::malformed("fetchProfile", e.to_string()))?;
        match response.user {
            Some(user) if response.success => Ok(user),
            _ => Err(EncoreError::gateway(
                "fetchProfile",
                "profile unavailable for the current session",
            )),
        }
    }

    async fn update_profile(&self, update: &AccountUpdate) -> Result<()> {
        let request = self
            .authorized(self.client.put(self.url("/api/account/update")).json(update))
            .await?;
        self.send_json("updateProfile", request).await?;
        Ok(())
    }
}
