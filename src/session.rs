//! Ordering session
//!
//! `OrderSession` owns the cart for one session together with the menu it
//! resolves items against and the gateway orders are sent through. It is the
//! only write path to the cart.
//!
//! `submit` borrows the session mutably for the whole network call, so a
//! second submission cannot start while one is in flight.

use crate::cart::{AddOutcome, AddRequest, Cart, CartLine, CartResult, ValidationError};
use crate::client::{MenuSource, OrderGateway, OrderReceipt, TransportError, TransportResult};
use crate::menu::Menu;
use thiserror::Error;

/// Why a submission did not go through
///
/// In both cases the cart is left intact so the user can fix the form or
/// try again.
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Transport(#[from] TransportError),
}

impl SubmitError {
    /// Message suitable for showing to the customer
    pub fn user_message(&self) -> String {
        match self {
            SubmitError::Validation(e) => e.to_string(),
            SubmitError::Transport(e) => e.user_message(),
        }
    }
}

/// One rendered cart line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    /// 1-based position as shown to the user
    pub position: usize,
    pub label: String,
    pub subtotal: u64,
}

/// What the UI re-renders after each cart mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartSummary {
    pub lines: Vec<SummaryLine>,
    pub total: u64,
}

impl CartSummary {
    pub fn from_cart(cart: &Cart) -> Self {
        let lines = cart
            .lines()
            .iter()
            .enumerate()
            .map(|(i, line)| SummaryLine {
                position: i + 1,
                label: line.to_string(),
                subtotal: line.subtotal(),
            })
            .collect();

        Self {
            lines,
            total: cart.compute_total(),
        }
    }
}

impl std::fmt::Display for CartSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.lines.is_empty() {
            writeln!(f, "Your cart is empty")?;
        }
        for line in &self.lines {
            writeln!(f, "{:>3}. {:<36} NT$ {:>6}", line.position, line.label, line.subtotal)?;
        }
        write!(f, "{:<41} NT$ {:>6}", "     Total", self.total)
    }
}

/// One customer's ordering session
pub struct OrderSession<G> {
    menu: Menu,
    cart: Cart,
    gateway: G,
}

impl<G: OrderGateway> OrderSession<G> {
    /// Start a session with an already loaded menu and an empty cart
    pub fn new(menu: Menu, gateway: G) -> Self {
        Self {
            menu,
            cart: Cart::new(),
            gateway,
        }
    }

    /// Fetch the menu and start a session
    pub async fn load(source: &impl MenuSource, gateway: G) -> TransportResult<Self> {
        let menu = source.fetch_menu().await?;
        Ok(Self::new(menu, gateway))
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn add(&mut self, request: AddRequest) -> CartResult<AddOutcome> {
        self.cart.add_line(&self.menu, request)
    }

    pub fn remove(&mut self, index: usize) -> CartResult<CartLine> {
        self.cart.remove_line(index)
    }

    pub fn clear(&mut self) {
        self.cart.clear();
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary::from_cart(&self.cart)
    }

    /// Validate, send the order and empty the cart once the API confirms it
    pub async fn submit(
        &mut self,
        customer_name: &str,
        pickup_method: &str,
        note: &str,
    ) -> Result<OrderReceipt, SubmitError> {
        let order = self
            .cart
            .build_order_payload(customer_name, pickup_method, note)
            .map_err(|e| {
                tracing::info!(reason = %e, "Order form rejected");
                e
            })?;

        match self.gateway.submit_order(&order).await {
            Ok(receipt) => {
                self.cart.clear();
                tracing::info!(order_number = %receipt.order_number, "Order placed, cart cleared");
                Ok(receipt)
            }
            Err(e) => {
                tracing::warn!(error = %e, lines = self.cart.len(), "Order submission failed, cart kept");
                Err(e.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{DrinkOptions, OrderSubmission, Sweetness, Temperature};
    use crate::menu::{Category, MenuItem};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Gateway that records submissions and answers from a script
    #[derive(Default)]
    struct ScriptedGateway {
        fail_with: Option<u16>,
        sent: Mutex<Vec<OrderSubmission>>,
    }

    #[async_trait]
    impl OrderGateway for ScriptedGateway {
        async fn submit_order(&self, order: &OrderSubmission) -> TransportResult<OrderReceipt> {
            self.sent.lock().unwrap().push(order.clone());
            match self.fail_with {
                Some(status) => Err(TransportError::Rejected {
                    status,
                    message: "Kitchen closed".to_string(),
                }),
                None => Ok(OrderReceipt::new("CAT240101120000", "Order received")),
            }
        }
    }

    struct StaticMenu(Menu);

    #[async_trait]
    impl MenuSource for StaticMenu {
        async fn fetch_menu(&self) -> TransportResult<Menu> {
            Ok(self.0.clone())
        }
    }

    fn menu() -> Menu {
        Menu::new(vec![
            (Category::Soups, vec![MenuItem::new("soup1", "Miso Soup", 50)]),
            (Category::Drinks, vec![MenuItem::new("tea1", "Fruit Tea", 30)]),
        ])
    }

    #[tokio::test]
    async fn test_submit_success_clears_cart() {
        let mut session = OrderSession::new(menu(), ScriptedGateway::default());
        session.add(AddRequest::item("soup1", 2)).unwrap();

        let receipt = session.submit("Mei", "dine-in", "").await.unwrap();

        assert_eq!(receipt.order_number, "CAT240101120000");
        assert!(session.cart().is_empty());
        assert_eq!(session.summary().total, 0);

        let sent = session.gateway.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].total_amount(), 100);
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_cart() {
        let gateway = ScriptedGateway {
            fail_with: Some(500),
            ..Default::default()
        };
        let mut session = OrderSession::new(menu(), gateway);
        session.add(AddRequest::item("soup1", 1)).unwrap();

        let err = session.submit("Mei", "takeout", "").await.unwrap_err();

        assert!(matches!(err, SubmitError::Transport(_)));
        assert_eq!(err.user_message(), "Kitchen closed");
        assert_eq!(session.cart().len(), 1);
    }

    #[tokio::test]
    async fn test_validation_failure_sends_nothing() {
        let mut session = OrderSession::new(menu(), ScriptedGateway::default());
        session.add(AddRequest::item("soup1", 1)).unwrap();

        let err = session.submit("  ", "dine-in", "").await.unwrap_err();

        assert!(matches!(
            err,
            SubmitError::Validation(ValidationError::MissingCustomerName)
        ));
        assert_eq!(session.cart().len(), 1);
        assert!(session.gateway.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_cart_is_not_submitted() {
        let mut session = OrderSession::new(menu(), ScriptedGateway::default());

        let err = session.submit("Mei", "dine-in", "").await.unwrap_err();
        assert!(matches!(err, SubmitError::Validation(ValidationError::EmptyCart)));
        assert!(session.gateway.sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_from_source() {
        let session = OrderSession::load(&StaticMenu(menu()), ScriptedGateway::default())
            .await
            .unwrap();
        assert_eq!(session.menu().len(), 2);
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_summary_lines() {
        let mut session = OrderSession::new(menu(), ScriptedGateway::default());
        session.add(AddRequest::item("soup1", 2)).unwrap();
        session
            .add(AddRequest::drink(
                "tea1",
                1,
                DrinkOptions::new(Temperature::NoIce, Sweetness::HalfSugar),
            ))
            .unwrap();

        let summary = session.summary();
        assert_eq!(summary.total, 130);
        assert_eq!(summary.lines[0].position, 1);
        assert_eq!(summary.lines[0].label, "Miso Soup x2");
        assert_eq!(summary.lines[1].label, "Fruit Tea x1 (去冰, 半糖)");
        assert_eq!(summary.lines[1].subtotal, 30);

        let rendered = summary.to_string();
        assert!(rendered.contains("Miso Soup x2"));
        assert!(rendered.contains("130"));
    }

    #[test]
    fn test_empty_summary_render() {
        let session = OrderSession::new(menu(), ScriptedGateway::default());
        assert!(session.summary().to_string().starts_with("Your cart is empty"));
    }
}
