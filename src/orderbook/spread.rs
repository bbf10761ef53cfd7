//! Best bid/ask spread

use super::level::PRICE_SCALE;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Distance between the best ask and the best bid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spread {
    /// `ask - bid` in native price units, rounded to two decimals
    pub absolute: f64,

    /// `absolute` as a percentage of the best bid, rounded to two decimals
    pub percent: f64,
}

impl Spread {
    /// Compute the spread from the top ask and top bid price keys.
    ///
    /// Both keys must come from non-empty ladders and `top_bid` must be
    /// non-zero; callers go through the `Option` returning accessors on
    /// snapshots and views, which enforce that.
    pub fn between(top_ask: u64, top_bid: u64) -> Self {
        let scale = PRICE_SCALE as f64;
        let absolute = round2((top_ask as f64 - top_bid as f64) / scale);
        let percent = round2(absolute / (top_bid as f64 / scale) * 100.0);
        Self { absolute, percent }
    }

    /// Spread between the given top keys, `None` when either is missing or
    /// the best bid sits at zero.
    pub fn from_top(top_ask: Option<u64>, top_bid: Option<u64>) -> Option<Self> {
        match (top_ask, top_bid) {
            (Some(ask), Some(bid)) if bid > 0 => Some(Self::between(ask, bid)),
            _ => None,
        }
    }
}

impl fmt::Display for Spread {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} ({:.2}%)", self.absolute, self.percent)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
