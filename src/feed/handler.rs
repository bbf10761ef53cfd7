//! Gate between a feed and the order book

use super::message::parse_message;
use crate::orderbook::{DeltaBatch, OrderBook};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use tracing::{debug, info, trace, warn};

/// What happened to one incoming message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedOutcome {
    /// The batch was applied and produced the snapshot with this sequence
    Applied {
        /// Sequence of the published snapshot
        sequence: u64,
    },
    /// The handler is paused and the message was dropped
    Paused,
    /// The message carried no book data (acks, heartbeats)
    Ignored,
    /// The message was malformed and dropped
    Rejected,
}

/// Message counters since the handler was created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedStats {
    /// Batches applied to the book
    pub applied: u64,
    /// Messages dropped while paused
    pub dropped: u64,
    /// Messages without book data
    pub ignored: u64,
    /// Malformed messages
    pub rejected: u64,
}

/// Receives raw feed messages, validates them and applies the resulting
/// batches to the book unless paused.
///
/// Pausing drops incoming messages rather than queueing them. After a resume
/// the book only reflects messages received from then on, so a paused view is
/// stale until the far end resends the levels that changed.
pub struct FeedHandler {
    book: Arc<OrderBook>,
    paused: AtomicBool,
    applied: AtomicU64,
    dropped: AtomicU64,
    ignored: AtomicU64,
    rejected: AtomicU64,
}

impl FeedHandler {
    /// Create a handler feeding `book`
    pub fn new(book: Arc<OrderBook>) -> Self {
        Self {
            book,
            paused: AtomicBool::new(false),
            applied: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
            ignored: AtomicU64::new(0),
            rejected: AtomicU64::new(0),
        }
    }

    /// The book this handler feeds
    pub fn book(&self) -> &Arc<OrderBook> {
        &self.book
    }

    /// Stop applying incoming messages
    pub fn pause(&self) {
        self.paused.store(true, Ordering::SeqCst);
        info!("Feed for {}: paused", self.book.symbol());
    }

    /// Resume applying incoming messages
    pub fn resume(&self) {
        self.paused.store(false, Ordering::SeqCst);
        info!("Feed for {}: resumed", self.book.symbol());
    }

    /// Flip the pause flag, returning the new state
    pub fn toggle_pause(&self) -> bool {
        let paused = !self.paused.fetch_xor(true, Ordering::SeqCst);
        info!(
            "Feed for {}: {}",
            self.book.symbol(),
            if paused { "paused" } else { "resumed" }
        );
        paused
    }

    /// Whether incoming messages are currently dropped
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::SeqCst)
    }

    /// Handle one raw payload from the transport
    pub fn on_message(&self, payload: &str) -> FeedOutcome {
        if self.is_paused() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            trace!("Feed for {}: dropped message while paused", self.book.symbol());
            return FeedOutcome::Paused;
        }

        match parse_message(payload) {
            Ok(Some(batch)) => self.apply(&batch),
            Ok(None) => {
                self.ignored.fetch_add(1, Ordering::Relaxed);
                trace!("Feed for {}: message without levels", self.book.symbol());
                FeedOutcome::Ignored
            }
            Err(err) => {
                self.rejected.fetch_add(1, Ordering::Relaxed);
                warn!("Feed for {}: parsing error: {}", self.book.symbol(), err);
                FeedOutcome::Rejected
            }
        }
    }

    /// Handle an already parsed batch, subject to the same pause gate
    pub fn on_batch(&self, batch: &DeltaBatch) -> FeedOutcome {
        if self.is_paused() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return FeedOutcome::Paused;
        }
        if batch.is_empty() {
            self.ignored.fetch_add(1, Ordering::Relaxed);
            return FeedOutcome::Ignored;
        }
        self.apply(batch)
    }

    /// Called by the transport after it has re-subscribed.
    ///
    /// The far end resends the full book on subscription, so the stale levels
    /// are dropped first.
    pub fn on_reconnect(&self) {
        self.book.clear();
        info!(
            "Feed for {}: reconnected, waiting for a fresh book",
            self.book.symbol()
        );
    }

    /// Counters since creation
    pub fn stats(&self) -> FeedStats {
        FeedStats {
            applied: self.applied.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            ignored: self.ignored.load(Ordering::Relaxed),
            rejected: self.rejected.load(Ordering::Relaxed),
        }
    }

    fn apply(&self, batch: &DeltaBatch) -> FeedOutcome {
        let snapshot = self.book.apply_delta_batch(batch);
        self.applied.fetch_add(1, Ordering::Relaxed);
        debug!(
            "Feed for {}: batch applied, sequence {}",
            self.book.symbol(),
            snapshot.sequence
        );
        FeedOutcome::Applied {
            sequence: snapshot.sequence,
        }
    }
}
