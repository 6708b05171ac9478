//! Cart error types

use thiserror::Error;

/// Errors from cart mutations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    /// Requested quantity is outside 1..=99
    #[error("Invalid quantity: {0} (must be between 1 and 99)")]
    InvalidQuantity(u32),

    /// A drink was added without temperature and sweetness
    #[error("Drink {0} requires temperature and sweetness")]
    MissingDrinkOptions(String),

    /// Line index does not exist
    #[error("Invalid line index {index} (cart has {len} lines)")]
    InvalidIndex { index: usize, len: usize },
}

/// Order form validation failures
///
/// Always recovered locally: the message is shown to the user, nothing is
/// sent and the cart is left as it was.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter your name")]
    MissingCustomerName,

    #[error("Name is too long ({len} characters, at most {max})")]
    CustomerNameTooLong { len: usize, max: usize },

    #[error("Invalid pickup method: {0}")]
    InvalidPickupMethod(String),

    #[error("Please choose at least one item")]
    EmptyCart,

    #[error("Too many items in one order ({len} lines, at most {max})")]
    TooManyLines { len: usize, max: usize },

    #[error("Note is too long ({len} characters, at most {max})")]
    NoteTooLong { len: usize, max: usize },
}

/// Result type alias for cart mutations
pub type CartResult<T> = Result<T, CartError>;
