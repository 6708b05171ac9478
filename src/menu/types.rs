//! Core data types for the menu catalog
//!
//! - `MenuItem`: one orderable dish or drink
//! - `Category`: which section of the menu an item lives in

use serde::{Deserialize, Serialize};

/// A single item on the menu
///
/// Prices are whole currency units; the catalog never deals in fractions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuItem {
    /// Unique identifier within the catalog (e.g. "m1", "dr3")
    pub id: String,
    /// Display name
    pub name: String,
    /// Unit price in whole currency units
    pub price: u32,
}

impl MenuItem {
    /// Create a new menu item
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }
}

/// Section of the menu
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Main dishes
    Mains,
    /// Soups
    Soups,
    /// Desserts
    Desserts,
    /// Drinks (the only category with temperature/sweetness options)
    Drinks,
}

impl Category {
    /// All categories in display order
    pub fn all() -> &'static [Category] {
        &[
            Category::Mains,
            Category::Soups,
            Category::Desserts,
            Category::Drinks,
        ]
    }

    /// Whether items in this category carry drink options
    pub fn is_drink(&self) -> bool {
        matches!(self, Category::Drinks)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Mains => write!(f, "mains"),
            Category::Soups => write!(f, "soups"),
            Category::Desserts => write!(f, "desserts"),
            Category::Drinks => write!(f, "drinks"),
        }
    }
}
