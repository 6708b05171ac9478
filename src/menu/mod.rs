//! Menu Catalog
//!
//! Types for the read-only menu the cart resolves items against:
//!
//! - **types**: `MenuItem` and `Category`
//! - **catalog**: `Menu` and the `MenuCatalog` lookup trait

pub mod catalog;
pub mod types;

pub use catalog::{Menu, MenuCatalog, MenuSection};
pub use types::{Category, MenuItem};
