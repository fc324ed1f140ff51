//! Account profile types (external collaborator surface).
//!
//! The profile endpoints use camelCase wire names, unlike the cart
//! surface. The profile's only role in the core flows is pre-filling
//! the billing form at checkout.

use serde::{Deserialize, Serialize};

use crate::billing::BillingProfile;

/// Mailing address attached to an account profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct Address {
    #[serde(default)]
    pub street1: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub province: String,
    #[serde(rename = "postalCode", default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: Option<String>,
}

/// The signed-in patron's account profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: Option<Address>,
}

impl AccountProfile {
    /// Pre-fills an editable billing profile from the account data.
    pub fn billing_prefill(&self) -> BillingProfile {
        let address = self.address.clone().unwrap_or_default();
        BillingProfile {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: address.street1,
            city: address.city,
            province: address.province,
            postal_code: address.postal_code,
        }
    }
}

/// Envelope shape of the `auth/me` response.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub user: Option<AccountProfile>,
}

/// Body for the account update endpoint.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AccountUpdate {
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}
