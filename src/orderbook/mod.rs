//! OrderBook implementation aggregating price-level deltas into sorted ladders.

pub mod book;
pub mod delta;
mod error;
pub mod grouping;
pub mod ladder;
pub mod level;
mod snapshot;
pub mod spread;
pub mod view;

pub use book::OrderBook;
pub use delta::{DeltaBatch, LevelUpdate};
pub use error::OrderBookError;
pub use grouping::{GroupedLadder, GroupedLevel, PRICE_GROUPS, PriceGroup, group};
pub use ladder::PriceLadder;
pub use level::{PRICE_SCALE, PriceLevel, Side, checked_price_key, key_to_price, price_to_key};
pub use snapshot::OrderBookSnapshot;
pub use spread::Spread;
pub use view::{BookRow, BookView, DEFAULT_MAX_ROWS};
