//! Order submission payload
//!
//! An `OrderSubmission` is an immutable snapshot of the cart and order form,
//! built by [`Cart::build_order_payload`](super::Cart::build_order_payload)
//! and serialized as the body of `POST /api/orders/`.

use super::line::CartLine;
use super::options::PickupMethod;
use serde::{Deserialize, Serialize};

/// Longest accepted customer name, in characters
pub const MAX_CUSTOMER_NAME_LEN: usize = 50;
/// Longest accepted note, in characters
pub const MAX_NOTE_LEN: usize = 200;
/// Most lines accepted in one order
pub const MAX_ORDER_LINES: usize = 50;

/// Snapshot of an order ready for transmission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderSubmission {
    customer_name: String,
    #[serde(rename = "diningOption")]
    pickup_method: PickupMethod,
    #[serde(default)]
    note: Option<String>,
    items: Vec<CartLine>,
    total_amount: u64,
}

impl OrderSubmission {
    pub(crate) fn new(
        customer_name: String,
        pickup_method: PickupMethod,
        note: Option<String>,
        items: Vec<CartLine>,
        total_amount: u64,
    ) -> Self {
        Self {
            customer_name,
            pickup_method,
            note,
            items,
            total_amount,
        }
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn pickup_method(&self) -> PickupMethod {
        self.pickup_method
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    pub fn items(&self) -> &[CartLine] {
        &self.items
    }

    pub fn total_amount(&self) -> u64 {
        self.total_amount
    }
}
