//! HTTP gateway to the box-office proxy.
//!
//! Implements `encore_core::gateway::TicketingGateway` over reqwest.

pub mod http;

pub use http::HttpTicketingGateway;
