//! Payment card types.
//!
//! Raw card data exists only transiently during entry and tokenization.
//! It is never written to disk and the payment flow takes it by value
//! so it is dropped as soon as the token is obtained.

use serde::Serialize;

/// Raw card details for tokenization.
///
/// Wire names follow the tokenization endpoint. `Debug` redacts the
/// card number and CVV so the struct can never leak through logs.
#[derive(Clone, Serialize)]
pub struct CardDetails {
    #[serde(rename = "CardNumber")]
    pub number: String,
    #[serde(rename = "ExpirationMonth")]
    pub exp_month: String,
    #[serde(rename = "ExpirationYear")]
    pub exp_year: String,
    #[serde(rename = "CVV")]
    pub cvv: String,
    #[serde(rename = "PostalCode")]
    pub postal_code: String,
}

impl std::fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardDetails")
            .field("number", &"<redacted>")
            .field("exp_month", &self.exp_month)
            .field("exp_year", &self.exp_year)
            .field("cvv", &"<redacted>")
            .field("postal_code", &self.postal_code)
            .finish()
    }
}
