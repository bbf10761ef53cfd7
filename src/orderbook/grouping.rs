//! Regrouping of price levels into coarser buckets

use super::error::OrderBookError;
use super::ladder::PriceLadder;
use super::level::{PRICE_SCALE, Side, key_to_price};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// Allowed bucket widths in price keys (cents), finest first.
///
/// In native price units: 0.5, 1, 2.5, 5, 10, 25, 50, 100, 250, 500, 1000, 2500.
pub const PRICE_GROUPS: [u64; 12] = [
    50, 100, 250, 500, 1_000, 2_500, 5_000, 10_000, 25_000, 50_000, 100_000, 250_000,
];

/// Index into [`PRICE_GROUPS`] selecting the current bucket width.
///
/// Moving past either end of the table is a saturating no-op; `can_increment`
/// and `can_decrement` let a caller disable the matching control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PriceGroup {
    index: usize,
}

impl PriceGroup {
    /// Index selected when nothing else is configured (a width of 1.00)
    pub const DEFAULT_INDEX: usize = 1;

    /// The finest grouping available
    pub fn finest() -> Self {
        Self { index: 0 }
    }

    /// The coarsest grouping available
    pub fn coarsest() -> Self {
        Self {
            index: PRICE_GROUPS.len() - 1,
        }
    }

    /// Select the grouping at `index`, `None` when outside the table
    pub fn new(index: usize) -> Option<Self> {
        (index < PRICE_GROUPS.len()).then_some(Self { index })
    }

    /// Position in the width table
    pub fn index(&self) -> usize {
        self.index
    }

    /// Bucket width in price keys
    pub fn width_cents(&self) -> u64 {
        PRICE_GROUPS[self.index]
    }

    /// Bucket width in native price units
    pub fn width(&self) -> f64 {
        key_to_price(self.width_cents())
    }

    /// Whether a coarser grouping exists
    pub fn can_increment(&self) -> bool {
        self.index + 1 < PRICE_GROUPS.len()
    }

    /// Whether a finer grouping exists
    pub fn can_decrement(&self) -> bool {
        self.index > 0
    }

    /// Step to the next coarser width. Returns false when already coarsest.
    pub fn increment(&mut self) -> bool {
        if !self.can_increment() {
            return false;
        }
        self.index += 1;
        trace!("price group incremented to {}", self.width());
        true
    }

    /// Step to the next finer width. Returns false when already finest.
    pub fn decrement(&mut self) -> bool {
        if !self.can_decrement() {
            return false;
        }
        self.index -= 1;
        trace!("price group decremented to {}", self.width());
        true
    }
}

impl Default for PriceGroup {
    fn default() -> Self {
        Self {
            index: Self::DEFAULT_INDEX,
        }
    }
}

impl TryFrom<usize> for PriceGroup {
    type Error = OrderBookError;

    fn try_from(index: usize) -> Result<Self, Self::Error> {
        PriceGroup::new(index).ok_or(OrderBookError::InvalidPriceGroup(index))
    }
}

impl fmt::Display for PriceGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Group: {:.2}", self.width())
    }
}

/// One bucket of a grouped ladder
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupedLevel {
    /// Bucket identity, the rounded-up price key
    pub price_key: u64,

    /// Sum of the sizes of every level folded into this bucket
    pub size: f64,

    /// Running size from the first bucket through this one
    pub total: f64,
}

impl GroupedLevel {
    /// Bucket price in native units
    pub fn price(&self) -> f64 {
        key_to_price(self.price_key)
    }
}

/// A ladder folded into buckets, kept in the order the buckets were first seen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupedLadder {
    levels: Vec<GroupedLevel>,
}

impl GroupedLadder {
    /// The first bucket, the inside of the book when grouped in side order
    pub fn top(&self) -> Option<&GroupedLevel> {
        self.levels.first()
    }

    /// Bucket at `index` in traversal order
    pub fn get(&self, index: usize) -> Option<&GroupedLevel> {
        self.levels.get(index)
    }

    /// Bucket identified by `price_key`
    pub fn find(&self, price_key: u64) -> Option<&GroupedLevel> {
        self.levels.iter().find(|level| level.price_key == price_key)
    }

    /// Iterate buckets in traversal order
    pub fn iter(&self) -> impl Iterator<Item = &GroupedLevel> {
        self.levels.iter()
    }

    /// Number of buckets
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether there are no buckets
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Sum of all bucket sizes
    pub fn total_size(&self) -> f64 {
        self.levels.iter().map(|level| level.size).sum()
    }

    /// Bucket keys in traversal order
    pub fn price_keys(&self) -> Vec<u64> {
        self.levels.iter().map(|level| level.price_key).collect()
    }

    /// Borrow the buckets as a slice
    pub fn as_slice(&self) -> &[GroupedLevel] {
        &self.levels
    }
}

/// Bucket key for `price_key`: rounded up to the next multiple of `width_cents`.
///
/// Both sides round up. A width of zero leaves the key unchanged.
pub fn bucket_key(price_key: u64, width_cents: u64) -> u64 {
    if width_cents == 0 {
        return price_key;
    }
    price_key.div_ceil(width_cents).saturating_mul(width_cents)
}

/// Fold the levels of `ladder` into buckets of `width_cents`, visiting
/// `sorted_keys` in order.
///
/// The first key seen for a bucket fixes its position. Each bucket's total is
/// the running sum of grouped sizes, so it follows the grouped ordering and
/// not the ungrouped totals carried by the ladder. Keys missing from the
/// ladder are skipped.
pub fn group(ladder: &PriceLadder, sorted_keys: &[u64], width_cents: u64) -> GroupedLadder {
    let mut levels: Vec<GroupedLevel> = Vec::new();
    let mut positions: HashMap<u64, usize> = HashMap::new();
    let mut running_total = 0.0;

    for &price_key in sorted_keys {
        let Some(level) = ladder.get(price_key) else {
            continue;
        };
        running_total += level.size;
        let bucket = bucket_key(price_key, width_cents);

        match positions.get(&bucket) {
            Some(&position) => {
                let grouped = &mut levels[position];
                grouped.size += level.size;
                grouped.total += level.size;
            }
            None => {
                positions.insert(bucket, levels.len());
                levels.push(GroupedLevel {
                    price_key: bucket,
                    size: level.size,
                    total: running_total,
                });
            }
        }
    }

    trace!(
        "grouped {} levels into {} buckets of width {}",
        sorted_keys.len(),
        levels.len(),
        width_cents as f64 / PRICE_SCALE as f64
    );
    GroupedLadder { levels }
}

/// Group one side of `ladder` in that side's natural order
pub fn group_side(ladder: &PriceLadder, side: Side, group_setting: PriceGroup) -> GroupedLadder {
    let keys = ladder.sorted_keys(side);
    group(ladder, &keys, group_setting.width_cents())
}
