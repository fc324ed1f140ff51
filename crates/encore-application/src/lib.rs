//! Application layer for the Encore client.
//!
//! This crate provides the use cases that coordinate the domain and
//! gateway layers: the cart session manager (the expiry-protocol state
//! machine), the checkout orchestrator, the payment flow, and the
//! account service.

pub mod account_service;
pub mod cart_session;
pub mod checkout_usecase;
pub mod payment_flow;

#[cfg(test)]
mod test_support;

pub use account_service::AccountService;
pub use cart_session::{CartSessionManager, CartView, LoadOutcome, RemoveOutcome};
pub use checkout_usecase::{CheckoutDraft, CheckoutUseCase};
pub use payment_flow::PaymentFlow;
