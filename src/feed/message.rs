//! Parsing of raw update messages into delta batches

use super::error::FeedError;
use crate::orderbook::{DeltaBatch, LevelUpdate, Side, checked_price_key};
use serde::Deserialize;
use serde_json::Value;

/// A raw update message as delivered by the feed.
///
/// Only `bids` and `asks` feed the book. They are kept as raw JSON so that a
/// side which is present but not an array can be skipped instead of failing
/// the whole message. Other fields (`feed`, `product_id`, `event`, ...) do
/// not affect the book.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedMessage {
    /// Feed name, e.g. `book_ui_1` or `book_ui_1_snapshot`
    #[serde(default)]
    pub feed: Option<String>,

    /// Instrument the message refers to
    #[serde(default)]
    pub product_id: Option<String>,

    /// Control event (`subscribed`, `info`, `heartbeat`, ...)
    #[serde(default)]
    pub event: Option<String>,

    /// Bid entries as `[price, size]` pairs
    #[serde(default)]
    pub bids: Option<Value>,

    /// Ask entries as `[price, size]` pairs
    #[serde(default)]
    pub asks: Option<Value>,
}

impl FeedMessage {
    /// Validate the message and convert it into a batch.
    ///
    /// Returns `Ok(None)` when neither side carries an array. A single bad
    /// entry rejects the whole message so no partial batch reaches the book.
    pub fn into_batch(self) -> Result<Option<DeltaBatch>, FeedError> {
        let bids = parse_side(Side::Bid, self.bids.as_ref())?;
        let asks = parse_side(Side::Ask, self.asks.as_ref())?;

        let batch = DeltaBatch { bids, asks };
        Ok((!batch.is_empty()).then_some(batch))
    }
}

/// Parse a raw payload into a delta batch.
pub fn parse_message(payload: &str) -> Result<Option<DeltaBatch>, FeedError> {
    let message: FeedMessage = serde_json::from_str(payload)?;
    message.into_batch()
}

fn parse_side(side: Side, raw: Option<&Value>) -> Result<Option<Vec<LevelUpdate>>, FeedError> {
    let Some(Value::Array(entries)) = raw else {
        return Ok(None);
    };

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_level(side, index, entry))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn parse_level(side: Side, index: usize, entry: &Value) -> Result<LevelUpdate, FeedError> {
    let invalid = |reason: &str| FeedError::InvalidLevel {
        side,
        index,
        reason: reason.to_string(),
    };

    let pair = match entry {
        Value::Array(pair) if pair.len() == 2 => pair,
        _ => return Err(invalid("expected a [price, size] pair")),
    };

    let price = pair[0]
        .as_f64()
        .filter(|price| price.is_finite())
        .ok_or_else(|| invalid("price is not a number"))?;
    if price < 0.0 {
        return Err(invalid("price is negative"));
    }
    if checked_price_key(price).is_none() {
        return Err(invalid("price is out of range"));
    }

    let size = pair[1]
        .as_f64()
        .filter(|size| size.is_finite())
        .ok_or_else(|| invalid("size is not a number"))?;
    if size < 0.0 {
        return Err(invalid("size is negative"));
    }

    Ok(LevelUpdate::new(price, size))
}
