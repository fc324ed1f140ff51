//! Cart session manager.
//!
//! Owns the current cart identifier and drives the expiry protocol: the
//! backend may declare a cart expired at any read or mutation and hand
//! back a replacement identifier. This manager swaps to the replacement
//! atomically (memory and credential store together, under the write
//! lock), then reloads exactly once against the new identifier. An
//! expired identifier is never reused.
//!
//! The manager holds no cart contents; snapshots flow through to the
//! caller in [`LoadOutcome`] and are stale the moment a mutation lands.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use encore_core::cart::{AddItemRequest, CartPayload, CartSnapshot};
use encore_core::credentials::{CredentialStore, CART_ID_KEY};
use encore_core::error::{EncoreError, Result};
use encore_core::gateway::TicketingGateway;

/// What the caller should render after a cart read.
#[derive(Debug, Clone)]
pub enum CartView {
    /// No cart exists for this session.
    NoCart,
    /// A live cart snapshot.
    Ready(CartSnapshot),
}

impl CartView {
    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// Result of a load, with the expiry signal surfaced so callers can
/// show a "your previous cart expired" notice.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub view: CartView,
    /// True when this operation switched the session to a replacement
    /// cart identifier supplied by the backend.
    pub session_renewed: bool,
}

/// Result of a single-unit removal, bundling the follow-up reload.
#[derive(Debug, Clone)]
pub struct RemoveOutcome {
    /// Whether the backend confirmed the removal. False when the cart
    /// had expired and the session switched to a fresh cart instead.
    pub removed: bool,
    pub load: LoadOutcome,
}

/// Manages the lifetime of the patron's single server-side cart.
pub struct CartSessionManager {
    gateway: Arc<dyn TicketingGateway>,
    credentials: Arc<dyn CredentialStore>,
    current_cart_id: Arc<RwLock<Option<String>>>,
}

impl CartSessionManager {
    /// Creates a manager with no active cart.
    pub fn new(gateway: Arc<dyn TicketingGateway>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            gateway,
            credentials,
            current_cart_id: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a manager seeded from the credential store, so a cart
    /// started in a previous process is resumed.
    pub async fn restore(
        gateway: Arc<dyn TicketingGateway>,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self> {
        let stored = credentials.get(CART_ID_KEY).await?;
        if stored.is_some() {
            debug!("resuming stored cart session");
        }
        Ok(Self {
            gateway,
            credentials,
            current_cart_id: Arc::new(RwLock::new(stored)),
        })
    }

    /// The cart identifier this session currently targets, if any.
    pub async fn current_cart_id(&self) -> Option<String> {
        self.current_cart_id.read().await.clone()
    }

    /// Loads the current cart.
    ///
    /// The identifier is read fresh at the start of the operation. An
    /// expired response swaps to the replacement identifier and reloads
    /// once; a definitively empty response drops the stored identifier.
    pub async fn load_cart(&self) -> Result<LoadOutcome> {
        let Some(cart_id) = self.current_cart_id().await else {
            return Ok(LoadOutcome {
                view: CartView::NoCart,
                session_renewed: false,
            });
        };

        match self.gateway.fetch_cart(&cart_id).await? {
            CartPayload::Active(snapshot) => Ok(LoadOutcome {
                view: CartView::Ready(snapshot),
                session_renewed: false,
            }),
            CartPayload::Empty => {
                // The stored identifier points at nothing; drop it so
                // the next add starts a fresh cart.
                debug!("cart is empty, dropping stored identifier");
                self.clear_cart_id().await?;
                Ok(LoadOutcome {
                    view: CartView::NoCart,
                    session_renewed: false,
                })
            }
            CartPayload::Expired { new_cart_id } => {
                let view = self.renew_session(&cart_id, new_cart_id).await?;
                Ok(LoadOutcome {
                    view,
                    session_renewed: true,
                })
            }
        }
    }

    /// Adds a priced selection to the cart.
    ///
    /// The backend creates a cart when the session holds none; the
    /// returned identifier is persisted before this method returns so a
    /// crash cannot orphan the server-side cart.
    pub async fn add_item(&self, request: &AddItemRequest) -> Result<String> {
        let response = self.gateway.add_to_cart(request).await?;
        self.adopt_cart_id(&response.cart_id).await?;
        info!(cart_id = %response.cart_id, "item added to cart");
        Ok(response.cart_id)
    }

    /// Removes one ticket unit, then reloads so the caller sees the
    /// backend's post-removal cart rather than a locally patched one.
    ///
    /// When the backend reports the cart expired instead, the session
    /// swaps to the replacement identifier and the reload targets that.
    pub async fn remove_item(&self, line_item_id: i64, sub_line_item_id: i64) -> Result<RemoveOutcome> {
        let Some(cart_id) = self.current_cart_id().await else {
            return Err(EncoreError::not_found("cart", "current"));
        };

        let response = self
            .gateway
            .remove_sub_line_item(&cart_id, line_item_id, sub_line_item_id)
            .await?;

        if response.expired {
            let new_cart_id = response.new_cart_id.ok_or_else(|| {
                EncoreError::malformed("removeItem", "expired response without a replacement cart id")
            })?;
            let view = self.renew_session(&cart_id, new_cart_id).await?;
            return Ok(RemoveOutcome {
                removed: false,
                load: LoadOutcome {
                    view,
                    session_renewed: true,
                },
            });
        }

        if !response.success {
            return Err(EncoreError::gateway(
                "removeItem",
                "backend did not confirm the removal",
            ));
        }

        // Re-reads the identifier rather than reusing the captured one;
        // another task may have swapped the session during the await.
        let load = self.load_cart().await?;
        Ok(RemoveOutcome {
            removed: true,
            load,
        })
    }

    /// Forgets the current cart identifier, in memory and on disk.
    pub async fn clear(&self) -> Result<()> {
        self.clear_cart_id().await
    }

    /// Swaps the session to a backend-supplied replacement identifier
    /// and performs the single follow-up load.
    ///
    /// The replacement cart is usually empty, which is the normal state
    /// right after an expiry; its identifier is kept either way. If the
    /// replacement itself comes back expired, the newest identifier is
    /// still adopted but no further load is issued.
    async fn renew_session(&self, old_cart_id: &str, new_cart_id: String) -> Result<CartView> {
        warn!(old_cart_id, new_cart_id = %new_cart_id, "cart expired, switching to replacement");
        self.adopt_cart_id(&new_cart_id).await?;

        match self.gateway.fetch_cart(&new_cart_id).await? {
            CartPayload::Active(snapshot) => Ok(CartView::Ready(snapshot)),
            CartPayload::Empty => Ok(CartView::NoCart),
            CartPayload::Expired { new_cart_id: newest } => {
                warn!("replacement cart expired immediately, giving up after one reload");
                self.adopt_cart_id(&newest).await?;
                Ok(CartView::NoCart)
            }
        }
    }

    /// Sets the current identifier in memory and the credential store
    /// within one write-lock critical section. Memory is updated first:
    /// even if persistence fails, the dead identifier must not be
    /// reused in this process.
    async fn adopt_cart_id(&self, cart_id: &str) -> Result<()> {
        let mut current = self.current_cart_id.write().await;
        *current = Some(cart_id.to_string());
        self.credentials.set(CART_ID_KEY, cart_id).await
    }

    async fn clear_cart_id(&self) -> Result<()> {
        let mut current = self.current_cart_id.write().await;
        *current = None;
        self.credentials.delete(CART_ID_KEY).await
    }
}
