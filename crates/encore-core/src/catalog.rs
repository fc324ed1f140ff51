//! Performance catalog types (read-only collaborator data).
//!
//! The catalog endpoints are stable compared to the cart surface, so
//! these are typed structs; only the raw performance object inside a
//! detail response stays as JSON because its field set varies.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cart::AddItemRequest;
use crate::extract::{first_match, resolve_path};

/// Known patron category labels, keyed by the backend's price type ids.
pub fn price_type_label(price_type_id: i64) -> String {
    match price_type_id {
        17 => "Adult".to_string(),
        364 => "Child / Youth".to_string(),
        371 => "Promo".to_string(),
        370 => "Comp".to_string(),
        other => format!("Type {}", other),
    }
}

/// One performance in the catalog listing.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PerformanceSummary {
    #[serde(rename = "Id")]
    pub id: i64,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "Date", default)]
    pub date: Option<String>,
    /// Venue name, as the backend publishes it.
    #[serde(rename = "Text3", default)]
    pub venue: Option<String>,
    /// Venue address line.
    #[serde(rename = "Text4", default)]
    pub venue_address: Option<String>,
}

/// A seating zone used for price grouping.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Zone {
    #[serde(rename = "Id")]
    pub id: i64,
    #[serde(rename = "Description", default)]
    pub description: String,
}

/// Wrapper shape the backend uses in the detail response's zone list.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ZoneEntry {
    #[serde(rename = "Zone")]
    pub zone: Zone,
}

/// One price point: a patron category within a zone.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PriceEntry {
    #[serde(rename = "PriceTypeId")]
    pub price_type_id: i64,
    #[serde(rename = "ZoneId", default)]
    pub zone_id: Option<i64>,
    #[serde(rename = "Price", default)]
    pub price: f64,
}

/// The full detail payload for one performance.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PerformanceDetail {
    pub performance: Value,
    #[serde(default)]
    pub zones: Vec<ZoneEntry>,
    #[serde(default)]
    pub prices: Vec<PriceEntry>,
}

impl PerformanceDetail {
    pub fn title(&self) -> &str {
        first_match(&self.performance, &["Description", "Text1"])
            .and_then(Value::as_str)
            .unwrap_or("Untitled Event")
    }

    pub fn date_raw(&self) -> Option<&str> {
        resolve_path(&self.performance, "Date").and_then(Value::as_str)
    }

    pub fn venue(&self) -> Option<&str> {
        resolve_path(&self.performance, "Text3").and_then(Value::as_str)
    }

    /// General admission performances list prices flat; seated ones are
    /// grouped by zone.
    pub fn is_general_admission(&self) -> bool {
        resolve_path(&self.performance, "BestSeatMap.IsGA").and_then(Value::as_bool)
            == Some(true)
    }

    /// Zone label for display, with a `Zone {id}` fallback.
    pub fn zone_label(&self, zone_id: i64) -> String {
        self.zones
            .iter()
            .find(|z| z.zone.id == zone_id)
            .map(|z| z.zone.description.clone())
            .unwrap_or_else(|| format!("Zone {}", zone_id))
    }

    /// Prices grouped by zone, preserving the backend's order.
    pub fn prices_by_zone(&self) -> Vec<(i64, Vec<&PriceEntry>)> {
        let mut grouped: Vec<(i64, Vec<&PriceEntry>)> = Vec::new();
        for price in &self.prices {
            let zone_id = price.zone_id.unwrap_or(0);
            match grouped.iter_mut().find(|(id, _)| *id == zone_id) {
                Some((_, bucket)) => bucket.push(price),
                None => grouped.push((zone_id, vec![price])),
            }
        }
        grouped
    }

    /// Finds the price entry matching a selection, if offered.
    pub fn find_price(&self, price_type_id: i64, zone_id: Option<i64>) -> Option<&PriceEntry> {
        self.prices.iter().find(|p| {
            p.price_type_id == price_type_id
                && (zone_id.is_none() || p.zone_id == zone_id)
        })
    }
}

/// A transient price selection made on the performance detail screen.
///
/// Not persisted; only used to build the add-to-cart request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectedPrice {
    pub price_type_id: i64,
    pub zone_id: Option<i64>,
    pub price: f64,
}

impl SelectedPrice {
    pub fn from_entry(entry: &PriceEntry) -> Self {
        Self {
            price_type_id: entry.price_type_id,
            zone_id: entry.zone_id,
            price: entry.price,
        }
    }

    /// Builds the add-to-cart request. A missing zone is sent as 0,
    /// which the backend treats as "no zone" for general admission.
    pub fn to_request(&self, performance_id: i64, quantity: u32) -> AddItemRequest {
        AddItemRequest {
            performance_id,
            price_type_id: self.price_type_id,
            zone_id: self.zone_id.unwrap_or(0),
            quantity,
        }
    }
}
