//! # Canteen
//!
//! Ordering client for the canteen's REST API: the shopping cart a customer
//! builds while browsing the menu, and the plumbing that turns it into an order.
//!
//! ## Features
//!
//! - **Cart Manager**: add/merge/remove lines, totals, order payload validation
//! - **Menu catalog**: indexed lookup of items fetched from the API
//! - **API client**: typed menu and order endpoints over `reqwest`
//! - **Order session**: owns the cart for one session and runs the submit flow
//! - **Shell**: interactive command-line ordering
//!
//! ## Modules
//!
//! - [`cart`]: Cart Manager and order payload
//! - [`menu`]: Menu catalog types
//! - [`client`]: REST client for the ordering API
//! - [`session`]: One customer's ordering session
//! - [`shell`]: Interactive command grammar
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use canteen::cart::{AddRequest, DrinkOptions, Sweetness, Temperature};
//! use canteen::client::ApiClient;
//! use canteen::session::OrderSession;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = ApiClient::new("http://localhost:8000", Duration::from_secs(30))?;
//!     let mut session = OrderSession::load(&api, api.clone()).await?;
//!
//!     session.add(AddRequest::item("m1", 1))?;
//!     session.add(AddRequest::drink(
//!         "dr1",
//!         2,
//!         DrinkOptions::new(Temperature::LessIce, Sweetness::HalfSugar),
//!     ))?;
//!     println!("{}", session.summary());
//!
//!     let receipt = session.submit("Mei", "takeout", "no cilantro").await?;
//!     println!("Order number: {}", receipt.order_number);
//!
//!     Ok(())
//! }
//! ```

pub mod cart;
pub mod client;
pub mod config;
pub mod logging;
pub mod menu;
pub mod session;
pub mod shell;

// Re-export top-level types for convenience
pub use cart::{
    AddOutcome, AddRequest, Cart, CartError, CartLine, CartState, DrinkOptions, OrderSubmission,
    PickupMethod, Sweetness, Temperature, ValidationError,
};

pub use menu::{Category, Menu, MenuCatalog, MenuItem};

pub use client::{ApiClient, MenuSource, OrderGateway, OrderReceipt, TransportError};

pub use session::{CartSummary, OrderSession, SubmitError};

pub use config::{ApiConfig, Config, ConfigError, LoggingConfig, OrderingConfig};
