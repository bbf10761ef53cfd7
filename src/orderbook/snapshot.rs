//! Order book snapshot for market data

use super::delta::{DeltaBatch, LevelUpdate};
use super::error::OrderBookError;
use super::grouping::{GroupedLadder, PriceGroup, group_side};
use super::ladder::PriceLadder;
use super::level::{PRICE_SCALE, PriceLevel, Side};
use super::spread::Spread;
use crate::utils::current_time_millis;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// The state of the order book after a batch has been applied.
///
/// Published snapshots are never mutated; every batch produces a new one with
/// cumulative totals recomputed on both ladders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderBookSnapshot {
    /// The symbol or identifier for this order book
    pub symbol: String,

    /// Number of batches applied to produce this snapshot
    pub sequence: u64,

    /// Timestamp when the snapshot was created (milliseconds since epoch)
    pub timestamp: u64,

    /// Bid price levels
    pub bids: PriceLadder,

    /// Ask price levels
    pub asks: PriceLadder,
}

impl OrderBookSnapshot {
    /// An empty snapshot for `symbol`
    pub fn empty(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            sequence: 0,
            timestamp: current_time_millis(),
            bids: PriceLadder::new(),
            asks: PriceLadder::new(),
        }
    }

    /// Produce the snapshot that results from applying `batch` to this one.
    ///
    /// Sides absent from the batch are carried over. Totals are recomputed on
    /// both ladders regardless of which side changed.
    pub fn apply(&self, batch: &DeltaBatch) -> Self {
        let bids = match &batch.bids {
            Some(updates) => apply_updates(&self.bids, updates),
            None => self.bids.clone(),
        };
        let asks = match &batch.asks {
            Some(updates) => apply_updates(&self.asks, updates),
            None => self.asks.clone(),
        };

        Self {
            symbol: self.symbol.clone(),
            sequence: self.sequence + 1,
            timestamp: current_time_millis(),
            bids: bids.with_totals(Side::Bid),
            asks: asks.with_totals(Side::Ask),
        }
    }

    /// The ladder for one side
    pub fn ladder(&self, side: Side) -> &PriceLadder {
        match side {
            Side::Bid => &self.bids,
            Side::Ask => &self.asks,
        }
    }

    /// Whether both ladders are empty
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }

    /// Get the best bid price key and its level
    pub fn best_bid(&self) -> Option<(u64, PriceLevel)> {
        let bid = self.bids.best(Side::Bid);
        trace!("best_bid: {:?}", bid);
        bid
    }

    /// Get the best ask price key and its level
    pub fn best_ask(&self) -> Option<(u64, PriceLevel)> {
        let ask = self.asks.best(Side::Ask);
        trace!("best_ask: {:?}", ask);
        ask
    }

    /// Get the mid price in native units (average of best bid and best ask)
    pub fn mid_price(&self) -> Option<f64> {
        let mid_price = match (self.best_bid(), self.best_ask()) {
            (Some((bid, _)), Some((ask, _))) => {
                Some((bid as f64 + ask as f64) / 2.0 / PRICE_SCALE as f64)
            }
            _ => None,
        };
        trace!("mid_price: {:?}", mid_price);
        mid_price
    }

    /// Spread between the ungrouped best ask and best bid
    pub fn spread(&self) -> Option<Spread> {
        self.try_spread().ok()
    }

    /// Spread between the ungrouped best ask and best bid, naming the reason
    /// when it cannot be computed
    pub fn try_spread(&self) -> Result<Spread, OrderBookError> {
        let (bid, _) = self
            .best_bid()
            .ok_or(OrderBookError::EmptyBook { side: Side::Bid })?;
        let (ask, _) = self
            .best_ask()
            .ok_or(OrderBookError::EmptyBook { side: Side::Ask })?;
        if bid == 0 {
            return Err(OrderBookError::InvalidPriceLevel(bid));
        }
        Ok(Spread::between(ask, bid))
    }

    /// Calculate the total volume on the bid side
    pub fn total_bid_volume(&self) -> f64 {
        let volume = self.bids.total_size();
        trace!("total_bid_volume: {:?}", volume);
        volume
    }

    /// Calculate the total volume on the ask side
    pub fn total_ask_volume(&self) -> f64 {
        let volume = self.asks.total_size();
        trace!("total_ask_volume: {:?}", volume);
        volume
    }

    /// Bid levels, highest price first
    pub fn bids_sorted(&self) -> Vec<(u64, PriceLevel)> {
        self.bids.levels(Side::Bid)
    }

    /// Ask levels, lowest price first
    pub fn asks_sorted(&self) -> Vec<(u64, PriceLevel)> {
        self.asks.levels(Side::Ask)
    }

    /// One side folded into buckets of the given grouping
    pub fn grouped(&self, side: Side, group: PriceGroup) -> GroupedLadder {
        group_side(self.ladder(side), side, group)
    }
}

fn apply_updates(ladder: &PriceLadder, updates: &[LevelUpdate]) -> PriceLadder {
    let mut updated = ladder.clone();
    for update in updates {
        updated.upsert_or_remove(update.price_key(), update.size);
    }
    updated
}
