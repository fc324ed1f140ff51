//! Billing profile and checkout handoff types.
//!
//! The billing profile is a transient checkout-time structure: it is
//! pre-populated from the account profile but locally editable, and is
//! never persisted beyond the checkout flow.

use serde::{Deserialize, Serialize};

use crate::error::{EncoreError, Result};

/// Editable billing fields gathered before payment.
///
/// Wire names follow the checkout endpoint's PascalCase contract.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BillingProfile {
    #[serde(rename = "FirstName")]
    pub first_name: String,
    #[serde(rename = "LastName")]
    pub last_name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "Phone", default)]
    pub phone: String,
    #[serde(rename = "Address", default)]
    pub address: String,
    #[serde(rename = "City", default)]
    pub city: String,
    #[serde(rename = "Province", default)]
    pub province: String,
    #[serde(rename = "PostalCode", default)]
    pub postal_code: String,
}

impl BillingProfile {
    /// Validates the mandatory fields.
    ///
    /// First name, last name, and email are required before proceeding
    /// to payment; every other field is optional. Failure blocks the
    /// handoff and must not trigger any network call.
    pub fn validate(&self) -> Result<()> {
        if self.first_name.trim().is_empty()
            || self.last_name.trim().is_empty()
            || self.email.trim().is_empty()
        {
            return Err(EncoreError::validation(
                "First name, last name, and email are required",
            ));
        }
        Ok(())
    }
}

/// Sanitizes a free-text donation amount.
///
/// Keeps digits and the first decimal point, drops everything else,
/// and defaults to 0 when nothing parseable remains.
pub fn sanitize_donation(input: &str) -> f64 {
    let mut cleaned = String::with_capacity(input.len());
    let mut seen_dot = false;
    for c in input.chars() {
        if c.is_ascii_digit() {
            cleaned.push(c);
        } else if c == '.' && !seen_dot {
            cleaned.push(c);
            seen_dot = true;
        }
    }
    cleaned.parse().unwrap_or(0.0)
}

/// The immutable bundle handed from checkout to the payment flow.
#[derive(Debug, Clone)]
pub struct PaymentHandoff {
    pub cart_id: String,
    pub billing: BillingProfile,
    pub donation: f64,
    pub order_note: String,
}

/// A confirmed order. The client's only responsibility for it is
/// displaying the confirmation number.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Order {
    #[serde(rename = "OrderNumber")]
    pub order_number: String,
}
