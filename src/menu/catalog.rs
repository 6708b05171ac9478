//! Menu catalog
//!
//! Holds the menu as served by the Menu Catalog API and resolves items by id.
//! Lookups go through an index built once at construction instead of scanning
//! every category on each add.

use super::types::{Category, MenuItem};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Read-only item lookup used by the cart
pub trait MenuCatalog {
    /// Resolve an item id to the item and the category it belongs to
    fn find_item(&self, id: &str) -> Option<(&MenuItem, Category)>;
}

/// One category of the menu with its items in display order
#[derive(Debug, Clone, PartialEq)]
pub struct MenuSection {
    pub category: Category,
    pub items: Vec<MenuItem>,
}

/// The full menu, grouped by category
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(from = "MenuData", into = "MenuData")]
pub struct Menu {
    sections: Vec<MenuSection>,
    /// id -> (section index, item index)
    index: HashMap<String, (usize, usize)>,
}

/// Wire shape of `GET /api/menu/`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
struct MenuData {
    #[serde(default)]
    mains: Vec<MenuItem>,
    #[serde(default)]
    soups: Vec<MenuItem>,
    #[serde(default)]
    desserts: Vec<MenuItem>,
    #[serde(default)]
    drinks: Vec<MenuItem>,
}

impl From<MenuData> for Menu {
    fn from(data: MenuData) -> Self {
        Menu::new(vec![
            (Category::Mains, data.mains),
            (Category::Soups, data.soups),
            (Category::Desserts, data.desserts),
            (Category::Drinks, data.drinks),
        ])
    }
}

impl From<Menu> for MenuData {
    fn from(menu: Menu) -> Self {
        let mut data = MenuData::default();
        for section in menu.sections {
            let target = match section.category {
                Category::Mains => &mut data.mains,
                Category::Soups => &mut data.soups,
                Category::Desserts => &mut data.desserts,
                Category::Drinks => &mut data.drinks,
            };
            target.extend(section.items);
        }
        data
    }
}

impl Menu {
    /// Build a menu from (category, items) pairs, keeping the given order
    ///
    /// When an id appears more than once, the first occurrence wins.
    pub fn new(sections: Vec<(Category, Vec<MenuItem>)>) -> Self {
        let sections: Vec<MenuSection> = sections
            .into_iter()
            .map(|(category, items)| MenuSection { category, items })
            .collect();

        let mut index = HashMap::new();
        for (s, section) in sections.iter().enumerate() {
            for (i, item) in section.items.iter().enumerate() {
                if index.contains_key(&item.id) {
                    tracing::warn!(item_id = %item.id, category = %section.category, "Duplicate menu item id ignored");
                    continue;
                }
                index.insert(item.id.clone(), (s, i));
            }
        }

        Self { sections, index }
    }

    /// Sections in display order
    pub fn sections(&self) -> &[MenuSection] {
        &self.sections
    }

    /// Items of one category (empty if the category is absent)
    pub fn items(&self, category: Category) -> &[MenuItem] {
        self.sections
            .iter()
            .find(|s| s.category == category)
            .map(|s| s.items.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the id names an item in the drinks category
    pub fn is_drink(&self, id: &str) -> bool {
        self.find_item(id)
            .map(|(_, category)| category.is_drink())
            .unwrap_or(false)
    }

    /// Number of distinct items
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// True if the menu has no items
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl MenuCatalog for Menu {
    fn find_item(&self, id: &str) -> Option<(&MenuItem, Category)> {
        let &(s, i) = self.index.get(id)?;
        let section = &self.sections[s];
        Some((&section.items[i], section.category))
    }
}
