//! Cart line items

use super::options::{DrinkOptions, Sweetness, Temperature};
use serde::{Deserialize, Serialize};

/// Smallest quantity a single add may request
pub const MIN_QUANTITY: u32 = 1;
/// Largest quantity a line may hold
pub const MAX_QUANTITY: u32 = 99;

/// One distinguishable purchasable configuration in the cart
///
/// Name and price are snapshots taken when the line was added, so later
/// catalog changes never alter an order in progress. Serializes to the item
/// shape of the Order Submission API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    #[serde(rename = "id")]
    pub item_id: String,
    pub name: String,
    #[serde(rename = "price")]
    pub unit_price: u32,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Temperature>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sweetness: Option<Sweetness>,
}

impl CartLine {
    /// Create a line; drink options are only set when `drink` is given
    pub fn new(
        item_id: impl Into<String>,
        name: impl Into<String>,
        unit_price: u32,
        quantity: u32,
        drink: Option<DrinkOptions>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            name: name.into(),
            unit_price,
            quantity,
            temperature: drink.map(|d| d.temperature),
            sweetness: drink.map(|d| d.sweetness),
        }
    }

    /// Drink options of this line, if it is a drink
    pub fn drink_options(&self) -> Option<DrinkOptions> {
        match (self.temperature, self.sweetness) {
            (Some(t), Some(s)) => Some(DrinkOptions::new(t, s)),
            _ => None,
        }
    }

    /// Line identity: same item and, for drinks, same temperature and sweetness
    pub fn is_same_line(&self, item_id: &str, drink: Option<DrinkOptions>) -> bool {
        self.item_id == item_id
            && self.temperature == drink.map(|d| d.temperature)
            && self.sweetness == drink.map(|d| d.sweetness)
    }

    /// `unit_price * quantity`
    pub fn subtotal(&self) -> u64 {
        u64::from(self.unit_price) * u64::from(self.quantity)
    }
}

impl std::fmt::Display for CartLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} x{}", self.name, self.quantity)?;

        let options: Vec<&str> = [
            self.temperature.map(|t| t.label()),
            self.sweetness.map(|s| s.label()),
        ]
        .into_iter()
        .flatten()
        .collect();

        if !options.is_empty() {
            write!(f, " ({})", options.join(", "))?;
        }
        Ok(())
    }
}
