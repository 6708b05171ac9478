//! Ordering API Client
//!
//! Talks to the two external collaborators the cart depends on:
//!
//! - **Menu Catalog API**: `GET /api/menu/`, `GET /api/menu/item/{id}`
//! - **Order Submission API**: `POST /api/orders/`
//!
//! The traits below are the seams the order session is written against;
//! [`ApiClient`] implements both over HTTP.

mod dto;
mod error;
mod http;

pub use dto::{OrderReceipt, FALLBACK_FAILURE_MESSAGE, ORDER_NUMBER_PREFIX};
pub use error::{TransportError, TransportResult};
pub use http::{ApiClient, REQUEST_ID_HEADER};

use crate::cart::OrderSubmission;
use crate::menu::Menu;
use async_trait::async_trait;

/// Source of the full menu
#[async_trait]
pub trait MenuSource: Send + Sync {
    /// Fetch the menu, grouped by category
    async fn fetch_menu(&self) -> TransportResult<Menu>;
}

/// Destination for finished orders
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Send one order; a single attempt, never retried
    async fn submit_order(&self, order: &OrderSubmission) -> TransportResult<OrderReceipt>;
}
