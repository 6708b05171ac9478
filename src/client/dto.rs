//! Request/response bodies of the ordering API

use crate::menu::MenuItem;
use chrono::NaiveDateTime;
use serde::Deserialize;

/// Prefix of every order number issued by the API
pub const ORDER_NUMBER_PREFIX: &str = "CAT";

const ORDER_NUMBER_TIME_FORMAT: &str = "%y%m%d%H%M%S";

/// Shown when the server gives no usable reason for a failure
pub const FALLBACK_FAILURE_MESSAGE: &str = "Order submission failed, please try again";

/// Confirmation of an accepted order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderReceipt {
    /// Number generated by the server (e.g. "CAT231225143530")
    pub order_number: String,
    /// Confirmation message from the server
    pub message: String,
}

impl OrderReceipt {
    pub fn new(order_number: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            order_number: order_number.into(),
            message: message.into(),
        }
    }

    /// Server-local time encoded in the order number
    ///
    /// `None` when the number does not have the `CAT` + `YYMMDDHHmmss` shape.
    pub fn placed_at(&self) -> Option<NaiveDateTime> {
        let stamp = self.order_number.strip_prefix(ORDER_NUMBER_PREFIX)?;
        NaiveDateTime::parse_from_str(stamp, ORDER_NUMBER_TIME_FORMAT).ok()
    }
}

/// Body of `POST /api/orders/`, success or failure
///
/// Failures come either as `{"success": false, "message": ...}` or as a
/// validation error `{"detail": ...}` whose detail is a string or a list of
/// field errors. Error responses of the menu endpoints share the `detail` shape.
#[derive(Debug, Deserialize)]
pub(crate) struct OrderResponseBody {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, rename = "orderNumber")]
    pub order_number: Option<String>,
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl OrderResponseBody {
    /// Reason given by the server, from `detail` first, then `message`
    pub fn reason(&self) -> Option<String> {
        match &self.detail {
            Some(serde_json::Value::String(s)) if !s.is_empty() => return Some(s.clone()),
            Some(serde_json::Value::Array(entries)) => {
                let messages: Vec<&str> = entries
                    .iter()
                    .filter_map(|e| e.get("msg").and_then(|m| m.as_str()))
                    .collect();
                if !messages.is_empty() {
                    return Some(messages.join("; "));
                }
            }
            _ => {}
        }

        self.message.clone().filter(|m| !m.is_empty())
    }

    /// Human-readable reason for a failed submission
    pub fn failure_message(&self) -> String {
        self.reason().unwrap_or_else(|| FALLBACK_FAILURE_MESSAGE.to_string())
    }
}

/// Body of `GET /api/menu/item/{id}`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ItemLookupBody {
    Found(MenuItem),
    Missing {
        #[allow(dead_code)]
        error: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_placed_at() {
        let receipt = OrderReceipt::new("CAT231225143530", "ok");
        let placed = receipt.placed_at().unwrap();
        assert_eq!(placed.year(), 2023);
        assert_eq!(placed.month(), 12);
        assert_eq!(placed.day(), 25);
        assert_eq!(placed.hour(), 14);
        assert_eq!(placed.minute(), 35);
        assert_eq!(placed.second(), 30);
    }

    #[test]
    fn test_placed_at_rejects_other_shapes() {
        assert!(OrderReceipt::new("ORD-1", "ok").placed_at().is_none());
        assert!(OrderReceipt::new("CAT99", "ok").placed_at().is_none());
    }

    #[test]
    fn test_failure_message_prefers_detail() {
        let body: OrderResponseBody =
            serde_json::from_str(r#"{"detail": "Invalid item: zz", "message": "other"}"#).unwrap();
        assert_eq!(body.failure_message(), "Invalid item: zz");
    }

    #[test]
    fn test_failure_message_from_validation_list() {
        let body: OrderResponseBody = serde_json::from_str(
            r#"{"detail": [{"loc": ["body", "items"], "msg": "too short"},
                           {"loc": ["body", "note"], "msg": "too long"}]}"#,
        )
        .unwrap();
        assert_eq!(body.failure_message(), "too short; too long");
    }

    #[test]
    fn test_failure_message_fallbacks() {
        let body: OrderResponseBody =
            serde_json::from_str(r#"{"success": false, "message": "Kitchen closed"}"#).unwrap();
        assert_eq!(body.failure_message(), "Kitchen closed");

        let body: OrderResponseBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.reason(), None);
        assert_eq!(body.failure_message(), FALLBACK_FAILURE_MESSAGE);
    }

    #[test]
    fn test_item_lookup_body() {
        let found: ItemLookupBody =
            serde_json::from_str(r#"{"id": "m1", "name": "Curry", "price": 120}"#).unwrap();
        assert!(matches!(found, ItemLookupBody::Found(item) if item.id == "m1"));

        let missing: ItemLookupBody = serde_json::from_str(r#"{"error": "not found"}"#).unwrap();
        assert!(matches!(missing, ItemLookupBody::Missing { .. }));
    }
}
