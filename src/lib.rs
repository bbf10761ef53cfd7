//! # Price-Level Order Book Aggregation Engine
//!
//! An order book engine for streaming depth feeds. It consumes batches of
//! incremental `(price, size)` updates and maintains a queryable view of the
//! book: two sorted ladders, each level's resting size and cumulative depth,
//! the best bid/ask spread, and regrouping of levels into coarser buckets.
//!
//! ## Key Features
//!
//! - **Fixed-Point Price Keys**: Prices are keyed as integer cents, so levels
//!   merge deterministically and never drift through floating point equality.
//!
//! - **Upsert-or-Remove Deltas**: A size of zero removes a level, any other size
//!   replaces it. Removing a missing level is a no-op, so replaying a batch is
//!   harmless.
//!
//! - **Cumulative Depth**: Every published level carries the running size from
//!   the inside of the book: bids accumulate from the highest price down, asks
//!   from the lowest price up.
//!
//! - **Atomic Snapshots**: Each batch produces a new immutable
//!   [`OrderBookSnapshot`] that is swapped in with a single atomic store.
//!   Readers on other threads see the book before or after a batch, never
//!   halfway through one.
//!
//! - **Price Grouping**: Levels fold into buckets from a fixed table of twelve
//!   widths (0.5 to 2500), with saturating [`PriceGroup`] steps a UI can bind
//!   to plus/minus controls.
//!
//! - **Spread**: Absolute and percentage spread between the top grouped ask and
//!   bid, reported as `None` instead of NaN when a side is empty.
//!
//! ## Data Flow
//!
//! 1. A transport delivers a raw message to [`FeedHandler::on_message`].
//! 2. The handler validates it into a [`DeltaBatch`] (or drops it when paused
//!    or malformed) and calls [`OrderBook::apply_delta_batch`].
//! 3. The book publishes a new snapshot with totals recomputed on both sides.
//! 4. [`OrderBook::view`] groups the snapshot at the selected [`PriceGroup`],
//!    truncates each side to the row limit and derives the spread.
//!
//! ## Example
//!
//! ```rust
//! use depthbook_rs::{OrderBook, PriceGroup, Side};
//!
//! let book = OrderBook::new("PI_XBTUSD");
//! book.apply_levels(None, Some(&[(10.0, 100.0), (20.0, 200.0)]));
//! book.apply_levels(Some(&[(15.0, 150.0), (25.0, 250.0)]), None);
//!
//! let snapshot = book.snapshot();
//! assert_eq!(snapshot.asks.get(2000).map(|level| level.total), Some(300.0));
//! assert_eq!(snapshot.bids.get(1500).map(|level| level.total), Some(400.0));
//!
//! let grouped = book.grouped(Side::Ask, PriceGroup::default());
//! assert_eq!(grouped.total_size(), 300.0);
//! ```
//!
//! ## Scope
//!
//! The engine is a read-only aggregated view of one instrument's feed. It does
//! not persist state, multiplex instruments, track individual orders or match
//! trades. Socket handling and rendering belong to the caller.

pub mod feed;
pub mod orderbook;

mod utils;

pub use feed::{FeedConfig, FeedError, FeedHandler, FeedOutcome, FeedStats, parse_message};
pub use orderbook::{
    BookRow, BookView, DEFAULT_MAX_ROWS, DeltaBatch, GroupedLadder, GroupedLevel, LevelUpdate,
    OrderBook, OrderBookError, OrderBookSnapshot, PRICE_GROUPS, PriceGroup, PriceLadder,
    PriceLevel, Side, Spread,
};
pub use utils::{current_time_millis, setup_logger};
