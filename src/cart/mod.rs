//! Cart Manager
//!
//! Client-side shopping cart for one ordering session:
//!
//! - **options**: drink temperature/sweetness and pickup method
//! - **line**: `CartLine` and the line identity rule
//! - **manager**: `Cart` with add/merge, remove, total and payload building
//! - **order**: the `OrderSubmission` snapshot sent to the API
//! - **error**: `CartError` and `ValidationError`
//!
//! # Example
//!
//! ```rust
//! use canteen::cart::{AddRequest, Cart, DrinkOptions, Sweetness, Temperature};
//! use canteen::menu::{Category, Menu, MenuItem};
//!
//! let menu = Menu::new(vec![
//!     (Category::Soups, vec![MenuItem::new("s1", "Miso Soup", 30)]),
//!     (Category::Drinks, vec![MenuItem::new("dr1", "Latte", 80)]),
//! ]);
//!
//! let mut cart = Cart::new();
//! cart.add_line(&menu, AddRequest::item("s1", 2)).unwrap();
//! cart.add_line(
//!     &menu,
//!     AddRequest::drink("dr1", 1, DrinkOptions::new(Temperature::Hot, Sweetness::NoSugar)),
//! )
//! .unwrap();
//!
//! assert_eq!(cart.compute_total(), 140);
//! ```

pub mod error;
pub mod line;
pub mod manager;
pub mod options;
pub mod order;

pub use error::{CartError, CartResult, ValidationError};
pub use line::{CartLine, MAX_QUANTITY, MIN_QUANTITY};
pub use manager::{AddOutcome, AddRequest, Cart, CartState};
pub use options::{DrinkOptions, ParseOptionError, PickupMethod, Sweetness, Temperature};
pub use order::{OrderSubmission, MAX_CUSTOMER_NAME_LEN, MAX_NOTE_LEN, MAX_ORDER_LINES};
