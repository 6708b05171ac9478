//! Transport error types

use thiserror::Error;

/// Errors talking to the ordering API
///
/// None of these are retried automatically; they are shown to the user and
/// the cart is kept so the order can be sent again by hand.
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Ordering service unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered but refused the request
    #[error("Rejected by server ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Unreadable response: {0}")]
    Decode(String),
}

impl TransportError {
    /// Sort a reqwest failure into timeout / unreachable / other
    pub(crate) fn classify(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Unavailable
        } else {
            TransportError::Request(err)
        }
    }

    /// Message suitable for showing to the customer
    pub fn user_message(&self) -> String {
        match self {
            TransportError::Rejected { message, .. } => message.clone(),
            TransportError::Unavailable | TransportError::Timeout => {
                "Could not reach the ordering service, please try again".to_string()
            }
            TransportError::Request(_) | TransportError::Decode(_) => {
                "Something went wrong sending the order, please try again".to_string()
            }
        }
    }
}

impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        TransportError::Decode(err.to_string())
    }
}

/// Result type alias for API calls
pub type TransportResult<T> = Result<T, TransportError>;
