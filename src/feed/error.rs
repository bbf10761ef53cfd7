//! Feed boundary error types

use crate::orderbook::Side;
use std::fmt;

/// Errors raised while turning raw feed payloads into delta batches
#[derive(Debug)]
pub enum FeedError {
    /// Payload is not valid JSON or not an object
    Json(serde_json::Error),

    /// A `[price, size]` entry could not be accepted
    InvalidLevel {
        /// Side the entry belongs to
        side: Side,
        /// Position of the entry within its side
        index: usize,
        /// Why the entry was rejected
        reason: String,
    },

    /// Feed configuration is unusable
    InvalidConfig(String),
}

impl fmt::Display for FeedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedError::Json(err) => write!(f, "Malformed payload: {}", err),
            FeedError::InvalidLevel {
                side,
                index,
                reason,
            } => write!(f, "Invalid {} level at index {}: {}", side, index, reason),
            FeedError::InvalidConfig(message) => write!(f, "Invalid feed config: {}", message),
        }
    }
}

impl std::error::Error for FeedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FeedError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::Json(err)
    }
}
