//! One side of the book: price key to aggregated level

use super::level::{PriceLevel, Side};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::trace;

/// A single side of the book (bids or asks).
///
/// Levels are stored unordered and the order is derived on read, since the
/// only ordering that matters depends on which side the ladder represents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceLadder {
    levels: HashMap<u64, PriceLevel>,
}

impl PriceLadder {
    /// Create an empty ladder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the size resting at `price_key`, or remove the level when `size == 0`.
    ///
    /// Removing a key that is not present is a no-op. Cumulative totals are
    /// not maintained here; see [`PriceLadder::with_totals`].
    pub fn upsert_or_remove(&mut self, price_key: u64, size: f64) {
        if size == 0.0 {
            if self.levels.remove(&price_key).is_some() {
                trace!("ladder: removed level {}", price_key);
            }
        } else {
            trace!("ladder: set level {} to size {}", price_key, size);
            self.levels.insert(price_key, PriceLevel::new(size));
        }
    }

    /// Get the level resting at `price_key`, if any
    pub fn get(&self, price_key: u64) -> Option<&PriceLevel> {
        self.levels.get(&price_key)
    }

    /// Whether a level exists at `price_key`
    pub fn contains(&self, price_key: u64) -> bool {
        self.levels.contains_key(&price_key)
    }

    /// Number of price levels
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether the ladder has no levels
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Sum of the sizes of every level
    pub fn total_size(&self) -> f64 {
        self.levels.values().map(|level| level.size).sum()
    }

    /// Iterate over levels in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (u64, &PriceLevel)> {
        self.levels.iter().map(|(key, level)| (*key, level))
    }

    /// Price keys ordered from the inside of the book outwards:
    /// descending for bids, ascending for asks.
    pub fn sorted_keys(&self, side: Side) -> Vec<u64> {
        let mut keys: Vec<u64> = self.levels.keys().copied().collect();
        match side {
            Side::Bid => keys.sort_unstable_by(|a, b| b.cmp(a)),
            Side::Ask => keys.sort_unstable(),
        }
        keys
    }

    /// Levels ordered from the inside of the book outwards
    pub fn levels(&self, side: Side) -> Vec<(u64, PriceLevel)> {
        self.sorted_keys(side)
            .into_iter()
            .filter_map(|key| self.levels.get(&key).map(|level| (key, *level)))
            .collect()
    }

    /// The innermost level for the given side
    pub fn best(&self, side: Side) -> Option<(u64, PriceLevel)> {
        let key = match side {
            Side::Bid => self.levels.keys().max(),
            Side::Ask => self.levels.keys().min(),
        }?;
        self.levels.get(key).map(|level| (*key, *level))
    }

    /// Return a copy of this ladder with cumulative totals recomputed.
    ///
    /// Levels are walked from the inside of the book outwards and each level's
    /// total becomes the running sum of sizes seen so far.
    pub fn with_totals(&self, side: Side) -> Self {
        let mut levels = HashMap::with_capacity(self.levels.len());
        let mut running_total = 0.0;

        for key in self.sorted_keys(side) {
            if let Some(level) = self.levels.get(&key) {
                running_total += level.size;
                levels.insert(
                    key,
                    PriceLevel {
                        size: level.size,
                        total: running_total,
                    },
                );
            }
        }

        Self { levels }
    }
}

impl FromIterator<(u64, f64)> for PriceLadder {
    fn from_iter<I: IntoIterator<Item = (u64, f64)>>(iter: I) -> Self {
        let mut ladder = PriceLadder::new();
        for (price_key, size) in iter {
            ladder.upsert_or_remove(price_key, size);
        }
        ladder
    }
}
