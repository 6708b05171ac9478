//! The Cart Manager
//!
//! Owns the ordered list of cart lines for one session. Every write goes
//! through `add_line`, `remove_line` or `clear`; equal lines are always
//! merged so the cart never holds two lines with the same identity.

use super::error::{CartError, CartResult, ValidationError};
use super::line::{CartLine, MAX_QUANTITY, MIN_QUANTITY};
use super::options::{DrinkOptions, PickupMethod};
use super::order::{OrderSubmission, MAX_CUSTOMER_NAME_LEN, MAX_NOTE_LEN, MAX_ORDER_LINES};
use crate::menu::MenuCatalog;

/// A request to add an item to the cart
///
/// `drink` being set is what marks the request as a drink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddRequest {
    pub item_id: String,
    pub quantity: u32,
    pub drink: Option<DrinkOptions>,
}

impl AddRequest {
    /// Request for a non-drink item
    pub fn item(item_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
            drink: None,
        }
    }

    /// Request for a drink with its options
    pub fn drink(item_id: impl Into<String>, quantity: u32, options: DrinkOptions) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
            drink: Some(options),
        }
    }
}

/// What an add did to the cart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended at `index`
    Appended { index: usize },
    /// The request was merged into the existing line at `index`
    Merged {
        index: usize,
        /// Quantity of the line after the merge
        quantity: u32,
        /// The merged quantity hit the per-line ceiling
        clamped: bool,
    },
    /// The item id did not resolve in the catalog; nothing changed
    Ignored,
}

/// Derived cart state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartState {
    Empty,
    NonEmpty,
}

/// Ordered collection of cart lines; insertion order is display order
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item, merging into an equal line when one exists
    ///
    /// An id the catalog cannot resolve is a no-op (`AddOutcome::Ignored`).
    /// Merged quantities are clamped to 99.
    pub fn add_line(
        &mut self,
        catalog: &impl MenuCatalog,
        request: AddRequest,
    ) -> CartResult<AddOutcome> {
        if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&request.quantity) {
            return Err(CartError::InvalidQuantity(request.quantity));
        }

        let Some((item, category)) = catalog.find_item(&request.item_id) else {
            tracing::debug!(item_id = %request.item_id, "Item not in catalog, add ignored");
            return Ok(AddOutcome::Ignored);
        };

        let drink = if category.is_drink() {
            match request.drink {
                Some(options) => Some(options),
                None => return Err(CartError::MissingDrinkOptions(item.id.clone())),
            }
        } else {
            if request.drink.is_some() {
                tracing::debug!(item_id = %item.id, "Drink options dropped for non-drink item");
            }
            None
        };

        if let Some(index) = self
            .lines
            .iter()
            .position(|line| line.is_same_line(&item.id, drink))
        {
            let line = &mut self.lines[index];
            let wanted = line.quantity + request.quantity;
            let clamped = wanted > MAX_QUANTITY;
            line.quantity = wanted.min(MAX_QUANTITY);

            if clamped {
                tracing::warn!(
                    item_id = %item.id,
                    requested = wanted,
                    max = MAX_QUANTITY,
                    "Merged quantity clamped"
                );
            }
            tracing::debug!(item_id = %item.id, index, quantity = line.quantity, "Merged into existing line");

            return Ok(AddOutcome::Merged {
                index,
                quantity: line.quantity,
                clamped,
            });
        }

        self.lines.push(CartLine::new(
            item.id.clone(),
            item.name.clone(),
            item.price,
            request.quantity,
            drink,
        ));
        let index = self.lines.len() - 1;
        tracing::debug!(item_id = %item.id, index, quantity = request.quantity, "Appended line");

        Ok(AddOutcome::Appended { index })
    }

    /// Remove the line at `index`; later lines shift down by one
    pub fn remove_line(&mut self, index: usize) -> CartResult<CartLine> {
        if index >= self.lines.len() {
            return Err(CartError::InvalidIndex {
                index,
                len: self.lines.len(),
            });
        }
        let line = self.lines.remove(index);
        tracing::debug!(item_id = %line.item_id, index, "Removed line");
        Ok(line)
    }

    /// Sum of `unit_price * quantity` over all lines
    pub fn compute_total(&self) -> u64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Validate the order form and snapshot the cart into a submission
    ///
    /// The cart is never modified, whether this succeeds or fails.
    pub fn build_order_payload(
        &self,
        customer_name: &str,
        pickup_method: &str,
        note: &str,
    ) -> Result<OrderSubmission, ValidationError> {
        let customer_name = customer_name.trim();
        if customer_name.is_empty() {
            return Err(ValidationError::MissingCustomerName);
        }
        let name_len = customer_name.chars().count();
        if name_len > MAX_CUSTOMER_NAME_LEN {
            return Err(ValidationError::CustomerNameTooLong {
                len: name_len,
                max: MAX_CUSTOMER_NAME_LEN,
            });
        }

        let pickup_method: PickupMethod = pickup_method
            .parse()
            .map_err(|_| ValidationError::InvalidPickupMethod(pickup_method.to_string()))?;

        if self.lines.is_empty() {
            return Err(ValidationError::EmptyCart);
        }
        if self.lines.len() > MAX_ORDER_LINES {
            return Err(ValidationError::TooManyLines {
                len: self.lines.len(),
                max: MAX_ORDER_LINES,
            });
        }

        let note = note.trim();
        let note_len = note.chars().count();
        if note_len > MAX_NOTE_LEN {
            return Err(ValidationError::NoteTooLong {
                len: note_len,
                max: MAX_NOTE_LEN,
            });
        }
        let note = (!note.is_empty()).then(|| note.to_string());

        Ok(OrderSubmission::new(
            customer_name.to_string(),
            pickup_method,
            note,
            self.lines.clone(),
            self.compute_total(),
        ))
    }

    /// Empty the cart
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in display order
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn state(&self) -> CartState {
        if self.lines.is_empty() {
            CartState::Empty
        } else {
            CartState::NonEmpty
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::options::{Sweetness, Temperature};
    use crate::menu::{Category, Menu, MenuItem};

    fn test_menu() -> Menu {
        Menu::new(vec![
            (Category::Mains, vec![MenuItem::new("m1", "Curry Rice", 120)]),
            (Category::Soups, vec![MenuItem::new("soup1", "Miso Soup", 50)]),
            (Category::Desserts, vec![MenuItem::new("d1", "Pudding", 60)]),
            (Category::Drinks, vec![MenuItem::new("tea1", "Fruit Tea", 30)]),
        ])
    }

    fn tea(temperature: Temperature, sweetness: Sweetness, quantity: u32) -> AddRequest {
        AddRequest::drink("tea1", quantity, DrinkOptions::new(temperature, sweetness))
    }

    #[test]
    fn test_soup_scenario() {
        let menu = test_menu();
        let mut cart = Cart::new();

        let outcome = cart.add_line(&menu, AddRequest::item("soup1", 2)).unwrap();
        assert_eq!(outcome, AddOutcome::Appended { index: 0 });
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.compute_total(), 100);

        let outcome = cart.add_line(&menu, AddRequest::item("soup1", 1)).unwrap();
        assert_eq!(
            outcome,
            AddOutcome::Merged {
                index: 0,
                quantity: 3,
                clamped: false
            }
        );
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.compute_total(), 150);

        cart.remove_line(0).unwrap();
        assert!(cart.is_empty());
        assert_eq!(cart.compute_total(), 0);
        assert_eq!(cart.state(), CartState::Empty);
    }

    #[test]
    fn test_drink_scenario() {
        let menu = test_menu();
        let mut cart = Cart::new();

        cart.add_line(&menu, tea(Temperature::NormalIce, Sweetness::HalfSugar, 1))
            .unwrap();
        cart.add_line(&menu, tea(Temperature::LessIce, Sweetness::HalfSugar, 1))
            .unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.compute_total(), 60);
    }

    #[test]
    fn test_drink_differing_sweetness_is_distinct() {
        let menu = test_menu();
        let mut cart = Cart::new();

        cart.add_line(&menu, tea(Temperature::Hot, Sweetness::NoSugar, 1))
            .unwrap();
        let outcome = cart
            .add_line(&menu, tea(Temperature::Hot, Sweetness::LessSugar, 1))
            .unwrap();

        assert_eq!(outcome, AddOutcome::Appended { index: 1 });
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_identical_adds_collapse_to_one_line() {
        let menu = test_menu();
        let mut cart = Cart::new();
        let quantities = [3, 1, 7, 2, 5];

        for q in quantities {
            cart.add_line(&menu, tea(Temperature::Warm, Sweetness::LightSugar, q))
                .unwrap();
        }

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, quantities.iter().sum::<u32>());
    }

    #[test]
    fn test_unknown_item_is_noop() {
        let menu = test_menu();
        let mut cart = Cart::new();

        let outcome = cart.add_line(&menu, AddRequest::item("ghost", 1)).unwrap();
        assert_eq!(outcome, AddOutcome::Ignored);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_bounds() {
        let menu = test_menu();
        let mut cart = Cart::new();

        assert_eq!(
            cart.add_line(&menu, AddRequest::item("m1", 0)),
            Err(CartError::InvalidQuantity(0))
        );
        assert_eq!(
            cart.add_line(&menu, AddRequest::item("m1", 100)),
            Err(CartError::InvalidQuantity(100))
        );
        assert!(cart.add_line(&menu, AddRequest::item("m1", 99)).is_ok());
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_merge_clamps_at_max() {
        let menu = test_menu();
        let mut cart = Cart::new();

        cart.add_line(&menu, AddRequest::item("m1", 60)).unwrap();
        let outcome = cart.add_line(&menu, AddRequest::item("m1", 60)).unwrap();

        assert_eq!(
            outcome,
            AddOutcome::Merged {
                index: 0,
                quantity: 99,
                clamped: true
            }
        );
        assert_eq!(cart.compute_total(), 99 * 120);
    }

    #[test]
    fn test_drink_requires_options() {
        let menu = test_menu();
        let mut cart = Cart::new();

        let err = cart.add_line(&menu, AddRequest::item("tea1", 1)).unwrap_err();
        assert_eq!(err, CartError::MissingDrinkOptions("tea1".to_string()));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_options_dropped_for_food() {
        let menu = test_menu();
        let mut cart = Cart::new();
        let options = DrinkOptions::new(Temperature::Hot, Sweetness::NoSugar);

        cart.add_line(&menu, AddRequest::drink("m1", 1, options)).unwrap();
        cart.add_line(&menu, AddRequest::item("m1", 1)).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert!(cart.lines()[0].temperature.is_none());
        assert!(cart.lines()[0].sweetness.is_none());
    }

    #[test]
    fn test_snapshot_survives_catalog_change() {
        let mut cart = Cart::new();
        cart.add_line(&test_menu(), AddRequest::item("m1", 1)).unwrap();

        let repriced = Menu::new(vec![(
            Category::Mains,
            vec![MenuItem::new("m1", "Curry Rice Deluxe", 200)],
        )]);
        cart.add_line(&repriced, AddRequest::item("m1", 1)).unwrap();

        assert_eq!(cart.lines()[0].name, "Curry Rice");
        assert_eq!(cart.compute_total(), 240);
    }

    #[test]
    fn test_remove_shifts_and_excludes_once() {
        let menu = test_menu();
        let mut cart = Cart::new();
        cart.add_line(&menu, AddRequest::item("m1", 1)).unwrap();
        cart.add_line(&menu, AddRequest::item("soup1", 2)).unwrap();
        cart.add_line(&menu, AddRequest::item("d1", 1)).unwrap();
        let before = cart.compute_total();

        let removed = cart.remove_line(1).unwrap();
        assert_eq!(removed.item_id, "soup1");
        assert_eq!(cart.compute_total(), before - removed.subtotal());
        assert_eq!(cart.lines()[1].item_id, "d1");
        assert_eq!(cart.state(), CartState::NonEmpty);
    }

    #[test]
    fn test_remove_out_of_range() {
        let menu = test_menu();
        let mut cart = Cart::new();
        cart.add_line(&menu, AddRequest::item("m1", 1)).unwrap();

        assert_eq!(
            cart.remove_line(1),
            Err(CartError::InvalidIndex { index: 1, len: 1 })
        );
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_clear() {
        let menu = test_menu();
        let mut cart = Cart::new();
        cart.add_line(&menu, AddRequest::item("m1", 2)).unwrap();
        cart.add_line(&menu, tea(Temperature::Hot, Sweetness::NoSugar, 1))
            .unwrap();

        cart.clear();
        assert!(cart.lines().is_empty());
        assert_eq!(cart.compute_total(), 0);
        assert_eq!(cart.state(), CartState::Empty);
    }

    #[test]
    fn test_payload_requires_name() {
        let menu = test_menu();
        let mut cart = Cart::new();

        assert_eq!(
            cart.build_order_payload("", "dine-in", ""),
            Err(ValidationError::MissingCustomerName)
        );

        cart.add_line(&menu, AddRequest::item("m1", 1)).unwrap();
        assert_eq!(
            cart.build_order_payload("   \t", "dine-in", ""),
            Err(ValidationError::MissingCustomerName)
        );
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_payload_requires_items() {
        let cart = Cart::new();
        assert_eq!(
            cart.build_order_payload("Mei", "takeout", ""),
            Err(ValidationError::EmptyCart)
        );
    }

    #[test]
    fn test_payload_rejects_pickup_method() {
        let menu = test_menu();
        let mut cart = Cart::new();
        cart.add_line(&menu, AddRequest::item("m1", 1)).unwrap();

        assert_eq!(
            cart.build_order_payload("Mei", "delivery", ""),
            Err(ValidationError::InvalidPickupMethod("delivery".to_string()))
        );
    }

    #[test]
    fn test_payload_length_limits() {
        let menu = test_menu();
        let mut cart = Cart::new();
        cart.add_line(&menu, AddRequest::item("m1", 1)).unwrap();

        let long_name = "貓".repeat(MAX_CUSTOMER_NAME_LEN + 1);
        assert!(matches!(
            cart.build_order_payload(&long_name, "dine-in", ""),
            Err(ValidationError::CustomerNameTooLong { len: 51, max: 50 })
        ));

        let long_note = "x".repeat(MAX_NOTE_LEN + 1);
        assert!(matches!(
            cart.build_order_payload("Mei", "dine-in", &long_note),
            Err(ValidationError::NoteTooLong { .. })
        ));
    }

    #[test]
    fn test_payload_snapshot() {
        let menu = test_menu();
        let mut cart = Cart::new();
        cart.add_line(&menu, AddRequest::item("soup1", 2)).unwrap();
        cart.add_line(&menu, tea(Temperature::NormalIce, Sweetness::HalfSugar, 1))
            .unwrap();

        let order = cart
            .build_order_payload("  Mei  ", "外帶", "  no cilantro ")
            .unwrap();

        assert_eq!(order.customer_name(), "Mei");
        assert_eq!(order.pickup_method(), PickupMethod::Takeout);
        assert_eq!(order.note(), Some("no cilantro"));
        assert_eq!(order.items().len(), 2);
        assert_eq!(order.total_amount(), 130);

        // Building the payload leaves the cart untouched
        assert_eq!(cart.len(), 2);

        let blank_note = cart.build_order_payload("Mei", "dine-in", "   ").unwrap();
        assert_eq!(blank_note.note(), None);
    }

    #[test]
    fn test_payload_wire_format() {
        let menu = test_menu();
        let mut cart = Cart::new();
        cart.add_line(&menu, AddRequest::item("m1", 1)).unwrap();
        cart.add_line(&menu, tea(Temperature::Hot, Sweetness::NormalSugar, 2))
            .unwrap();

        let order = cart.build_order_payload("Mei", "dine-in", "").unwrap();
        let value = serde_json::to_value(&order).unwrap();

        assert_eq!(value["customerName"], "Mei");
        assert_eq!(value["diningOption"], "內用");
        assert_eq!(value["totalAmount"], 180);
        assert_eq!(value["items"][0]["id"], "m1");
        assert!(value["items"][0].get("temperature").is_none());
        assert_eq!(value["items"][1]["temperature"], "熱");
        assert_eq!(value["items"][1]["sweetness"], "正常糖");
        assert_eq!(value["items"][1]["quantity"], 2);
    }
}
