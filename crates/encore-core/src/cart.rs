//! Cart domain model.
//!
//! A cart is a server-held collection of selected tickets referenced by
//! an opaque identifier. The backend returns cart objects in several
//! inconsistent shapes, so the snapshot keeps the raw JSON and derives
//! every display field through the extraction layer in [`crate::extract`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::extract::{
    as_id_i64, as_money, first_array, first_match, format_money, resolve_path,
};

/// Classification of a cart response from the backend.
///
/// Expiry is a protocol event, not an error: the server invalidates the
/// old identifier and supplies a replacement that the client must adopt
/// atomically. An empty response is a legitimate terminal state.
#[derive(Debug, Clone)]
pub enum CartPayload {
    /// Server declared the cart expired and supplied a replacement id.
    Expired { new_cart_id: String },
    /// Response was null or an object with zero keys.
    Empty,
    /// A live cart object.
    Active(CartSnapshot),
}

impl CartPayload {
    /// Classifies a raw cart response.
    ///
    /// An `expired: true` object that carries no replacement identifier
    /// is a protocol violation: the dead identifier must not be reused,
    /// so the shape is rejected rather than guessed at.
    pub fn from_value(value: Value) -> Result<Self, String> {
        if value.is_null() {
            return Ok(Self::Empty);
        }

        if resolve_path(&value, "expired").and_then(Value::as_bool) == Some(true) {
            let new_cart_id = first_match(&value, &["newCartId", "newSessionKey"])
                .and_then(crate::extract::as_id_string)
                .ok_or_else(|| "expired response did not carry a replacement cart id".to_string())?;
            return Ok(Self::Expired { new_cart_id });
        }

        match &value {
            Value::Object(map) if map.is_empty() => Ok(Self::Empty),
            Value::Object(_) => Ok(Self::Active(CartSnapshot::new(value))),
            other => Err(format!("unexpected cart payload type: {}", type_name(other))),
        }
    }
}

fn type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// An immutable snapshot of one cart response.
///
/// All totals are derived at display time; the client never recomputes
/// totals after a mutation; it reloads the cart and lets the server's
/// numbers win.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSnapshot(Value);

const ITEM_PATHS: &[&str] = &["Items", "LineItems", "Products", "Items.Item"];
const SUBTOTAL_PATHS: &[&str] = &["SubTotal", "Totals.SubTotal", "Amount.Subtotal"];
const TOTAL_PATHS: &[&str] = &["Total", "Totals.Total", "Amount.Total"];
const CART_FEE_PATHS: &[&str] = &["FeesAmount", "Totals.Fees"];

impl CartSnapshot {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The raw backend payload.
    pub fn raw(&self) -> &Value {
        &self.0
    }

    /// The line items of this cart, whichever key the backend used.
    pub fn items(&self) -> Vec<LineItemView<'_>> {
        first_array(&self.0, ITEM_PATHS)
            .map(|items| items.iter().map(LineItemView).collect())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    pub fn subtotal(&self) -> f64 {
        as_money(first_match(&self.0, SUBTOTAL_PATHS))
    }

    /// Order fees, with a three-tier fallback precedence.
    ///
    /// 1. A cart-level aggregate fee field.
    /// 2. The sum of `OrderFees[].Amount`, if that list is non-empty.
    /// 3. The sum of every sub-line-item's `SubLineItemFees[].Amount`.
    ///
    /// The first tier that yields a value wins even when it is zero;
    /// only an absent or null result falls through to the next tier.
    pub fn fees(&self) -> f64 {
        if let Some(v) = first_match(&self.0, CART_FEE_PATHS) {
            return as_money(Some(v));
        }

        if let Some(order_fees) = resolve_path(&self.0, "OrderFees").and_then(Value::as_array) {
            if !order_fees.is_empty() {
                return order_fees
                    .iter()
                    .map(|f| as_money(resolve_path(f, "Amount")))
                    .sum();
            }
        }

        self.items()
            .iter()
            .flat_map(|item| item.sub_line_items())
            .flat_map(|sub| {
                resolve_path(sub, "SubLineItemFees")
                    .and_then(Value::as_array)
                    .into_iter()
                    .flatten()
            })
            .map(|fee| as_money(resolve_path(fee, "Amount")))
            .sum()
    }

    /// Cart total; derived from subtotal + fees when the backend did
    /// not supply one.
    pub fn total(&self) -> f64 {
        match first_match(&self.0, TOTAL_PATHS) {
            Some(v) => as_money(Some(v)),
            None => self.subtotal() + self.fees(),
        }
    }

    pub fn subtotal_display(&self) -> String {
        format_money(self.subtotal())
    }

    pub fn fees_display(&self) -> String {
        format_money(self.fees())
    }

    pub fn total_display(&self) -> String {
        format_money(self.total())
    }
}

const TITLE_PATHS: &[&str] = &[
    "Performance.Description",
    "Performance.LineItem.Performance.Description",
    "Performance.LineItem.Description",
    "ProductName",
    "Description",
];
const DATE_PATHS: &[&str] = &[
    "Performance.PerformanceDateTime",
    "Performance.Date",
    "Performance.LineItem.Performance.PerformanceDateTime",
];
const SUB_LINE_ITEM_PATHS: &[&str] = &["Performance.LineItem.SubLineItems", "SubLineItems"];
const UNIT_PRICE_PATHS: &[&str] = &[
    "Performance.LineItem.SubLineItems.0.SubLineItemDetails.0.OriginalPrice",
    "Performance.LineItem.SubLineItems.0.DueAmount",
    "Price.Value",
];
const DETAIL_PATHS: &[&str] = &["Zone.Description", "PriceType.Description"];
const LINE_ITEM_ID_PATHS: &[&str] = &["Performance.LineItem.Id", "LineItem.Id", "Id"];
const SUB_LINE_ITEM_ID_PATHS: &[&str] = &[
    "Performance.LineItem.SubLineItems.0.Id",
    "SubLineItems.0.Id",
];

/// A read-only view over one line item of a cart snapshot.
///
/// One line item owns zero or more sub-line-items; each sub-line-item
/// is one physical ticket, so display quantity is the count of
/// sub-line-items.
#[derive(Debug, Clone, Copy)]
pub struct LineItemView<'a>(pub(crate) &'a Value);

impl<'a> LineItemView<'a> {
    pub fn raw(&self) -> &'a Value {
        self.0
    }

    pub fn title(&self) -> &str {
        first_match(self.0, TITLE_PATHS)
            .and_then(Value::as_str)
            .unwrap_or("Untitled Event")
    }

    /// The raw performance date string, if any shape carried one.
    pub fn date_raw(&self) -> Option<&str> {
        first_match(self.0, DATE_PATHS).and_then(Value::as_str)
    }

    /// Human-readable performance date.
    ///
    /// Falls back to the raw string when the value is not RFC 3339, and
    /// to `"Unknown date"` when absent entirely.
    pub fn date_display(&self) -> String {
        let Some(raw) = self.date_raw() else {
            return "Unknown date".to_string();
        };
        match chrono::DateTime::parse_from_rfc3339(raw) {
            Ok(dt) => dt.format("%a, %b %e %Y %l:%M %p").to_string(),
            Err(_) => match chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S") {
                Ok(dt) => dt.format("%a, %b %e %Y %l:%M %p").to_string(),
                Err(_) => raw.to_string(),
            },
        }
    }

    fn sub_line_items(&self) -> impl Iterator<Item = &'a Value> {
        first_array(self.0, SUB_LINE_ITEM_PATHS)
            .map(|v| v.iter())
            .into_iter()
            .flatten()
    }

    /// Display quantity: the number of sub-line-items when present (at
    /// least 1), otherwise 1.
    pub fn quantity(&self) -> usize {
        match first_array(self.0, SUB_LINE_ITEM_PATHS) {
            Some(subs) => subs.len().max(1),
            None => 1,
        }
    }

    /// Unit price from the first sub-line-item's original price or due
    /// amount, coerced to 0 when absent.
    pub fn unit_price(&self) -> f64 {
        as_money(first_match(self.0, UNIT_PRICE_PATHS))
    }

    pub fn unit_price_display(&self) -> String {
        format_money(self.unit_price())
    }

    /// Zone / price-type label for the secondary display line.
    pub fn detail(&self) -> &str {
        first_match(self.0, DETAIL_PATHS)
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    pub fn line_item_id(&self) -> Option<i64> {
        first_match(self.0, LINE_ITEM_ID_PATHS).and_then(as_id_i64)
    }

    /// Identifier of the first sub-line-item. Removal always targets
    /// exactly one ticket unit, so this is the removal handle.
    pub fn sub_line_item_id(&self) -> Option<i64> {
        first_match(self.0, SUB_LINE_ITEM_ID_PATHS).and_then(as_id_i64)
    }

    /// All sub-line-item identifiers carried by this line item.
    pub fn sub_line_item_ids(&self) -> Vec<i64> {
        self.sub_line_items()
            .filter_map(|sub| resolve_path(sub, "Id").and_then(as_id_i64))
            .collect()
    }
}

/// Request body for adding one priced selection to the cart.
///
/// The backend creates a cart as a side effect of the first add when no
/// identifier is supplied, and returns the identifier to persist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AddItemRequest {
    pub performance_id: i64,
    pub price_type_id: i64,
    pub zone_id: i64,
    pub quantity: u32,
}

/// Response to a removal call.
///
/// A remove can itself declare expiry; the caller must then perform the
/// same atomic identifier swap as on load before re-reading the cart.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoveResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub expired: bool,
    #[serde(rename = "newCartId", default)]
    pub new_cart_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot(v: Value) -> CartSnapshot {
        CartSnapshot::new(v)
    }

    #[test]
    fn test_payload_expired() {
        let payload =
            CartPayload::from_value(json!({"expired": true, "newCartId": "C2"})).unwrap();
        match payload {
            CartPayload::Expired { new_cart_id } => assert_eq!(new_cart_id, "C2"),
            other => panic!("expected Expired, got {:?}", other),
        }
    }

    #[test]
    fn test_payload_expired_numeric_replacement_id() {
        let payload = CartPayload::from_value(json!({"expired": true, "newCartId": 77})).unwrap();
        match payload {
            CartPayload::Expired { new_cart_id } => assert_eq!(new_cart_id, "77"),
            other => panic!("expected Expired, got {:?}", other),
        }
    }

    #[test]
    fn test_payload_expired_without_replacement_is_an_error() {
        assert!(CartPayload::from_value(json!({"expired": true})).is_err());
    }

    #[test]
    fn test_payload_empty_shapes() {
        assert!(matches!(
            CartPayload::from_value(json!(null)).unwrap(),
            CartPayload::Empty
        ));
        assert!(matches!(
            CartPayload::from_value(json!({})).unwrap(),
            CartPayload::Empty
        ));
    }

    #[test]
    fn test_payload_active() {
        let payload = CartPayload::from_value(json!({"Products": []})).unwrap();
        assert!(matches!(payload, CartPayload::Active(_)));
    }

    #[test]
    fn test_items_resolution_order() {
        let cart = snapshot(json!({
            "Items": [{"Description": "A"}],
            "Products": [{"Description": "B"}],
        }));
        let items = cart.items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title(), "A");
    }

    #[test]
    fn test_items_nested_item_array_shape() {
        let cart = snapshot(json!({"Items": {"Item": [{"Description": "A"}]}}));
        // "Items" exists but is not an array, so the nested path wins.
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_subtotal_fallback_paths() {
        assert_eq!(snapshot(json!({"SubTotal": 10.0})).subtotal(), 10.0);
        assert_eq!(
            snapshot(json!({"Totals": {"SubTotal": 11.0}})).subtotal(),
            11.0
        );
        assert_eq!(
            snapshot(json!({"Amount": {"Subtotal": "12.00"}})).subtotal(),
            12.0
        );
        assert_eq!(snapshot(json!({"Other": 1})).subtotal(), 0.0);
    }

    #[test]
    fn test_fees_tier_one_cart_level() {
        let cart = snapshot(json!({"FeesAmount": 4.25, "OrderFees": [{"Amount": 99.0}]}));
        assert_eq!(cart.fees(), 4.25);
    }

    #[test]
    fn test_fees_tier_one_zero_still_wins() {
        let cart = snapshot(json!({"FeesAmount": 0.0, "OrderFees": [{"Amount": 99.0}]}));
        assert_eq!(cart.fees(), 0.0);
    }

    #[test]
    fn test_fees_tier_two_order_fees_sum() {
        // Scenario C: no cart-level fee field, OrderFees present.
        let cart = snapshot(json!({
            "OrderFees": [{"Amount": 2.50}, {"Amount": 1.00}],
        }));
        assert_eq!(cart.fees(), 3.50);
    }

    #[test]
    fn test_fees_tier_two_skipped_when_empty() {
        let cart = snapshot(json!({
            "OrderFees": [],
            "Products": [{
                "Performance": {"LineItem": {"SubLineItems": [
                    {"SubLineItemFees": [{"Amount": 1.25}]}
                ]}}
            }],
        }));
        assert_eq!(cart.fees(), 1.25);
    }

    #[test]
    fn test_fees_tier_three_walks_every_sub_line_item() {
        let cart = snapshot(json!({
            "Products": [
                {"Performance": {"LineItem": {"SubLineItems": [
                    {"SubLineItemFees": [{"Amount": 1.0}, {"Amount": 0.5}]},
                    {"SubLineItemFees": [{"Amount": 2.0}]}
                ]}}},
                {"Performance": {"LineItem": {"SubLineItems": [
                    {"SubLineItemFees": [{"Amount": 0.25}]}
                ]}}}
            ],
        }));
        assert_eq!(cart.fees(), 3.75);
    }

    #[test]
    fn test_fees_tier_three_skips_sub_items_without_fee_lists() {
        let cart = snapshot(json!({
            "Products": [{
                "Performance": {"LineItem": {"SubLineItems": [
                    {"SubLineItemFees": [{"Amount": 1.0}]},
                    {"Id": 11},
                    {"SubLineItemFees": null},
                    {"SubLineItemFees": [{"Amount": 0.5}]}
                ]}}
            }],
        }));
        assert_eq!(cart.fees(), 1.5);
    }

    #[test]
    fn test_fees_never_nan_when_everything_is_missing() {
        let cart = snapshot(json!({"Unrelated": true}));
        let fees = cart.fees();
        assert!(fees.is_finite());
        assert!(fees >= 0.0);
    }

    #[test]
    fn test_fees_null_cart_level_falls_through() {
        let cart = snapshot(json!({
            "FeesAmount": null,
            "OrderFees": [{"Amount": 2.0}],
        }));
        assert_eq!(cart.fees(), 2.0);
    }

    #[test]
    fn test_total_derived_when_absent() {
        let cart = snapshot(json!({"SubTotal": 10.0, "FeesAmount": 1.5}));
        assert_eq!(cart.total(), 11.5);
        assert_eq!(cart.total_display(), "11.50");
    }

    #[test]
    fn test_total_explicit_wins() {
        let cart = snapshot(json!({"SubTotal": 10.0, "FeesAmount": 1.5, "Total": 99.0}));
        assert_eq!(cart.total(), 99.0);
    }

    fn product_item(subs: Value) -> Value {
        json!({
            "Performance": {
                "Description": "Winter Gala",
                "PerformanceDateTime": "2026-02-14T19:30:00",
                "LineItem": {"Id": 5, "SubLineItems": subs}
            },
            "Zone": {"Description": "Orchestra"}
        })
    }

    #[test]
    fn test_line_item_title_and_detail() {
        let v = product_item(json!([]));
        let item = LineItemView(&v);
        assert_eq!(item.title(), "Winter Gala");
        assert_eq!(item.detail(), "Orchestra");
    }

    #[test]
    fn test_line_item_title_default() {
        let v = json!({"Something": 1});
        assert_eq!(LineItemView(&v).title(), "Untitled Event");
    }

    #[test]
    fn test_quantity_is_sub_line_item_count() {
        let v = product_item(json!([{"Id": 9}, {"Id": 10}, {"Id": 11}]));
        assert_eq!(LineItemView(&v).quantity(), 3);
    }

    #[test]
    fn test_quantity_defaults_to_one() {
        // Empty array still displays as 1; a non-array shape displays as 1.
        let empty = product_item(json!([]));
        assert_eq!(LineItemView(&empty).quantity(), 1);
        let not_array = product_item(json!("unexpected"));
        assert_eq!(LineItemView(&not_array).quantity(), 1);
    }

    #[test]
    fn test_unit_price_precedence() {
        let detailed = product_item(json!([
            {"Id": 9, "DueAmount": 20.0, "SubLineItemDetails": [{"OriginalPrice": 25.0}]}
        ]));
        assert_eq!(LineItemView(&detailed).unit_price(), 25.0);

        let due_only = product_item(json!([{"Id": 9, "DueAmount": 20.0}]));
        assert_eq!(LineItemView(&due_only).unit_price(), 20.0);

        let bare = json!({"Price": {"Value": 15.0}});
        assert_eq!(LineItemView(&bare).unit_price(), 15.0);

        let nothing = json!({});
        assert_eq!(LineItemView(&nothing).unit_price(), 0.0);
    }

    #[test]
    fn test_removal_identity() {
        let v = product_item(json!([{"Id": 9}, {"Id": 10}]));
        let item = LineItemView(&v);
        assert_eq!(item.line_item_id(), Some(5));
        assert_eq!(item.sub_line_item_id(), Some(9));
        assert_eq!(item.sub_line_item_ids(), vec![9, 10]);
    }

    #[test]
    fn test_date_display_falls_back_to_raw() {
        let v = json!({"Performance": {"Date": "sometime soon"}});
        assert_eq!(LineItemView(&v).date_display(), "sometime soon");
        let none = json!({});
        assert_eq!(LineItemView(&none).date_display(), "Unknown date");
    }

    #[test]
    fn test_add_item_request_wire_names() {
        let req = AddItemRequest {
            performance_id: 42,
            price_type_id: 17,
            zone_id: 0,
            quantity: 2,
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(
            v,
            json!({"performanceId": 42, "priceTypeId": 17, "zoneId": 0, "quantity": 2})
        );
    }

    #[test]
    fn test_remove_response_optional_fields() {
        let r: RemoveResponse = serde_json::from_value(json!({"success": true})).unwrap();
        assert!(r.success);
        assert!(!r.expired);
        assert!(r.new_cart_id.is_none());

        let r: RemoveResponse =
            serde_json::from_value(json!({"success": false, "expired": true, "newCartId": "Y"}))
                .unwrap();
        assert!(r.expired);
        assert_eq!(r.new_cart_id.as_deref(), Some("Y"));
    }
}
