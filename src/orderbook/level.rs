//! Aggregated price level and the fixed-point price key

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of price keys per whole price unit (prices are keyed in cents).
pub const PRICE_SCALE: u64 = 100;

/// Convert a price in native units into its fixed-point key.
///
/// The price is scaled by [`PRICE_SCALE`] and rounded to the nearest key, so
/// `50000.5` and `50000.50000001` land on the same level.
pub fn price_to_key(price: f64) -> u64 {
    (price * PRICE_SCALE as f64).round() as u64
}

/// Like [`price_to_key`], but `None` when the scaled price is negative, not
/// finite or does not fit in a `u64` key.
pub fn checked_price_key(price: f64) -> Option<u64> {
    let scaled = (price * PRICE_SCALE as f64).round();
    (scaled.is_finite() && scaled >= 0.0 && scaled < u64::MAX as f64).then_some(scaled as u64)
}

/// Convert a fixed-point key back into native price units.
pub fn key_to_price(price_key: u64) -> f64 {
    price_key as f64 / PRICE_SCALE as f64
}

/// Side of the book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Resting buy interest, best price is the highest
    Bid,
    /// Resting sell interest, best price is the lowest
    Ask,
}

impl Side {
    /// Returns true when `a` sits closer to the inside of the book than `b`.
    pub fn is_better(&self, a: u64, b: u64) -> bool {
        match self {
            Side::Bid => a > b,
            Side::Ask => a < b,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => write!(f, "BID"),
            Side::Ask => write!(f, "ASK"),
        }
    }
}

/// Resting quantity at one exact price.
///
/// `total` is the cumulative size from the best level of the side down to and
/// including this one. It is only meaningful on ladders published in a
/// snapshot; ladders under construction carry `total == 0.0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceLevel {
    /// Quantity resting at this price
    pub size: f64,

    /// Cumulative quantity from the inside of the book through this price
    pub total: f64,
}

impl PriceLevel {
    /// A level with the given size and no cumulative total yet
    pub fn new(size: f64) -> Self {
        Self { size, total: 0.0 }
    }
}
