//! Incremental price-level updates

use super::level::price_to_key;
use serde::{Deserialize, Serialize};

/// A single `(price, size)` change for one side of the book.
///
/// `price` is in native units and is converted to its fixed-point key when
/// applied. A `size` of zero removes the level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelUpdate {
    /// Price in native units
    pub price: f64,

    /// New resting size at this price, zero to remove
    pub size: f64,
}

impl LevelUpdate {
    /// Create an update for `price` with the new resting `size`
    pub fn new(price: f64, size: f64) -> Self {
        Self { price, size }
    }

    /// Fixed-point key for this update's price
    pub fn price_key(&self) -> u64 {
        price_to_key(self.price)
    }
}

impl From<(f64, f64)> for LevelUpdate {
    fn from((price, size): (f64, f64)) -> Self {
        Self::new(price, size)
    }
}

/// One update message worth of changes for one or both sides.
///
/// A side that is `None` was not present in the message and is left untouched
/// when the batch is applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeltaBatch {
    /// Changes to the bid ladder
    pub bids: Option<Vec<LevelUpdate>>,

    /// Changes to the ask ladder
    pub asks: Option<Vec<LevelUpdate>>,
}

impl DeltaBatch {
    /// Create a batch touching both sides
    pub fn new(bids: Vec<LevelUpdate>, asks: Vec<LevelUpdate>) -> Self {
        Self {
            bids: Some(bids),
            asks: Some(asks),
        }
    }

    /// Create a batch touching only the bid side
    pub fn bids_only(bids: Vec<LevelUpdate>) -> Self {
        Self {
            bids: Some(bids),
            asks: None,
        }
    }

    /// Create a batch touching only the ask side
    pub fn asks_only(asks: Vec<LevelUpdate>) -> Self {
        Self {
            bids: None,
            asks: Some(asks),
        }
    }

    /// Build a batch from raw `(price, size)` pairs
    pub fn from_pairs(bids: Option<&[(f64, f64)]>, asks: Option<&[(f64, f64)]>) -> Self {
        let convert = |pairs: &[(f64, f64)]| -> Vec<LevelUpdate> {
            pairs.iter().map(|pair| LevelUpdate::from(*pair)).collect()
        };
        Self {
            bids: bids.map(convert),
            asks: asks.map(convert),
        }
    }

    /// Whether neither side is present
    pub fn is_empty(&self) -> bool {
        self.bids.is_none() && self.asks.is_none()
    }

    /// Number of level updates across both sides
    pub fn len(&self) -> usize {
        self.bids.as_ref().map_or(0, Vec::len) + self.asks.as_ref().map_or(0, Vec::len)
    }
}
