//! Display-ready view of a snapshot at a given price grouping

use super::grouping::{GroupedLadder, GroupedLevel, PriceGroup};
use super::level::Side;
use super::snapshot::OrderBookSnapshot;
use super::spread::Spread;
use serde::{Deserialize, Serialize};

/// Number of rows per side shown when nothing else is configured
pub const DEFAULT_MAX_ROWS: usize = 10;

/// One row of a rendered side
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BookRow {
    /// Bucket price key
    pub price_key: u64,

    /// Bucket price in native units
    pub price: f64,

    /// Size resting in the bucket
    pub size: f64,

    /// Cumulative size from the inside of the book through this bucket
    pub total: f64,

    /// `total` as a percentage of the displayed rows' combined size, for depth bars
    pub depth_percent: f64,
}

/// Grouped bids and asks truncated to a row limit, plus the grouped spread.
///
/// Both sides are ordered from the inside of the book outwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookView {
    /// The symbol of the book the view was taken from
    pub symbol: String,

    /// Sequence of the snapshot the view was taken from
    pub sequence: u64,

    /// Grouping used to build the view
    pub group: PriceGroup,

    /// Bid rows, highest bucket first
    pub bids: Vec<BookRow>,

    /// Ask rows, lowest bucket first
    pub asks: Vec<BookRow>,

    /// Spread between the top grouped ask and bid, `None` if a side is empty
    pub spread: Option<Spread>,
}

impl BookView {
    /// Build a view of `snapshot` grouped at `group` with at most `max_rows`
    /// rows per side.
    pub fn build(snapshot: &OrderBookSnapshot, group: PriceGroup, max_rows: usize) -> Self {
        let grouped_bids = snapshot.grouped(Side::Bid, group);
        let grouped_asks = snapshot.grouped(Side::Ask, group);

        let spread = Spread::from_top(
            grouped_asks.top().map(|level| level.price_key),
            grouped_bids.top().map(|level| level.price_key),
        );

        Self {
            symbol: snapshot.symbol.clone(),
            sequence: snapshot.sequence,
            group,
            bids: rows(&grouped_bids, max_rows),
            asks: rows(&grouped_asks, max_rows),
            spread,
        }
    }

    /// Rows for one side
    pub fn side(&self, side: Side) -> &[BookRow] {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    /// Combined size of the displayed rows on one side
    pub fn displayed_size(&self, side: Side) -> f64 {
        self.side(side).iter().map(|row| row.size).sum()
    }
}

fn rows(grouped: &GroupedLadder, max_rows: usize) -> Vec<BookRow> {
    let shown: Vec<&GroupedLevel> = grouped.iter().take(max_rows).collect();
    let displayed_size: f64 = shown.iter().map(|level| level.size).sum();

    shown
        .into_iter()
        .map(|level| BookRow {
            price_key: level.price_key,
            price: level.price(),
            size: level.size,
            total: level.total,
            depth_percent: if displayed_size > 0.0 {
                level.total / displayed_size * 100.0
            } else {
                0.0
            },
        })
        .collect()
}
