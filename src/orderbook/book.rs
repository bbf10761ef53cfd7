//! Core OrderBook implementation holding the published snapshot

use super::delta::DeltaBatch;
use super::grouping::{GroupedLadder, PriceGroup};
use super::level::Side;
use super::snapshot::OrderBookSnapshot;
use super::spread::Spread;
use super::view::BookView;
use arc_swap::ArcSwap;
use std::sync::Arc;
use tracing::{debug, trace};

/// The OrderBook folds delta batches into bid and ask ladders and publishes
/// the result as an immutable snapshot.
///
/// Writers build the next snapshot from the current one and swap it in with a
/// single atomic store, so readers always see either the state before a batch
/// or the state after it, never a partially applied batch.
pub struct OrderBook {
    /// The symbol or identifier for this order book
    pub(super) symbol: String,

    /// The latest published snapshot
    pub(super) current: ArcSwap<OrderBookSnapshot>,
}

impl OrderBook {
    /// Create a new, empty order book for the given symbol
    pub fn new(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            current: ArcSwap::from_pointee(OrderBookSnapshot::empty(symbol)),
        }
    }

    /// Get the symbol of this order book
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Apply one batch of level updates.
    ///
    /// Every `(price, size)` pair is applied with upsert-or-remove semantics,
    /// totals are recomputed on both ladders and the new snapshot is published.
    /// A batch with neither side present leaves the book untouched.
    pub fn apply_delta_batch(&self, batch: &DeltaBatch) -> Arc<OrderBookSnapshot> {
        if batch.is_empty() {
            trace!("Order book {}: ignoring empty batch", self.symbol);
            return self.snapshot();
        }

        let mut published = None;
        self.current.rcu(|current| {
            let next = Arc::new(current.apply(batch));
            published = Some(Arc::clone(&next));
            next
        });

        let snapshot = published.unwrap_or_else(|| self.snapshot());
        debug!(
            "Order book {}: applied {} updates, sequence {} ({} bids, {} asks)",
            self.symbol,
            batch.len(),
            snapshot.sequence,
            snapshot.bids.len(),
            snapshot.asks.len()
        );
        snapshot
    }

    /// Apply raw `(price, size)` pairs, prices in native units
    pub fn apply_levels(
        &self,
        bids: Option<&[(f64, f64)]>,
        asks: Option<&[(f64, f64)]>,
    ) -> Arc<OrderBookSnapshot> {
        self.apply_delta_batch(&DeltaBatch::from_pairs(bids, asks))
    }

    /// Drop every level on both sides.
    ///
    /// Used when a feed resubscribes and the far end is about to resend the
    /// whole book. The sequence keeps counting.
    pub fn clear(&self) {
        self.current.rcu(|current| {
            let mut cleared = OrderBookSnapshot::empty(&current.symbol);
            cleared.sequence = current.sequence + 1;
            cleared
        });
        debug!("Order book {}: cleared", self.symbol);
    }

    /// The latest published snapshot
    pub fn snapshot(&self) -> Arc<OrderBookSnapshot> {
        self.current.load_full()
    }

    /// Number of batches applied so far
    pub fn sequence(&self) -> u64 {
        self.current.load().sequence
    }

    /// Get the best bid price key, if any
    pub fn best_bid(&self) -> Option<u64> {
        self.current.load().best_bid().map(|(price, _)| price)
    }

    /// Get the best ask price key, if any
    pub fn best_ask(&self) -> Option<u64> {
        self.current.load().best_ask().map(|(price, _)| price)
    }

    /// Spread between the ungrouped top of book
    pub fn spread(&self) -> Option<Spread> {
        self.current.load().spread()
    }

    /// One side of the current snapshot grouped at `group`
    pub fn grouped(&self, side: Side, group: PriceGroup) -> GroupedLadder {
        self.current.load().grouped(side, group)
    }

    /// Display-ready view of the current snapshot
    pub fn view(&self, group: PriceGroup, max_rows: usize) -> BookView {
        BookView::build(&self.snapshot(), group, max_rows)
    }
}
