//! Domain layer for the Encore ticketing client.
//!
//! Holds the cart/checkout domain model, the tolerant field-extraction
//! layer over the backend's inconsistent payloads, and the trait seams
//! (`TicketingGateway`, `CredentialStore`) implemented by the gateway
//! and infrastructure crates.

pub mod billing;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod credentials;
pub mod error;
pub mod extract;
pub mod gateway;
pub mod payment;
pub mod profile;

// Re-export common error type
pub use error::{EncoreError, Result};
