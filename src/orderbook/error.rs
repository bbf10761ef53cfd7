//! Order book error types

use super::level::Side;
use std::fmt;

/// Errors that can occur when querying the OrderBook
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderBookError {
    /// Price group index outside the bucket width table
    InvalidPriceGroup(usize),

    /// Invalid price level for the requested computation
    InvalidPriceLevel(u64),

    /// The requested side has no levels
    EmptyBook {
        /// The side that was empty
        side: Side,
    },
}

impl fmt::Display for OrderBookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderBookError::InvalidPriceGroup(index) => {
                write!(f, "Invalid price group: {}", index)
            }
            OrderBookError::InvalidPriceLevel(price) => write!(f, "Invalid price level: {}", price),
            OrderBookError::EmptyBook { side } => write!(f, "No {} levels in book", side),
        }
    }
}

impl std::error::Error for OrderBookError {}
