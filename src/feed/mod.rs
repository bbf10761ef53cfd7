//! Boundary between a depth feed transport and the order book.
//!
//! The transport (socket lifecycle, reconnect timer) is owned by the caller.
//! This module validates raw payloads, gates them on the pause flag and applies
//! the resulting batches.

mod config;
mod error;
mod handler;
mod message;

pub use config::FeedConfig;
pub use error::FeedError;
pub use handler::{FeedHandler, FeedOutcome, FeedStats};
pub use message::{FeedMessage, parse_message};
