//! Feed subscription configuration

use super::error::FeedError;
use crate::orderbook::DEFAULT_MAX_ROWS;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

/// Where the feed connects, what it subscribes to, and how it presents the book.
///
/// The transport itself lives outside this crate; this only carries the values
/// a transport needs plus the row limit used to build views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// WebSocket endpoint
    pub url: String,

    /// Feed name sent in the subscription
    pub feed: String,

    /// Instruments to subscribe to; the book tracks the first one
    pub product_ids: Vec<String>,

    /// Fixed delay before reconnecting after a close or error
    pub reconnect_delay_ms: u64,

    /// Rows per side in a rendered view
    pub max_rows: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: "wss://www.cryptofacilities.com/ws/v1".to_string(),
            feed: "book_ui_1".to_string(),
            product_ids: vec!["PI_XBTUSD".to_string()],
            reconnect_delay_ms: 5_000,
            max_rows: DEFAULT_MAX_ROWS,
        }
    }
}

impl FeedConfig {
    /// Load and validate a config from JSON. Missing fields take their defaults.
    pub fn from_json(raw: &str) -> Result<Self, FeedError> {
        let config: FeedConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values a transport and view rely on
    pub fn validate(&self) -> Result<(), FeedError> {
        if self.url.is_empty() {
            return Err(FeedError::InvalidConfig("url is empty".to_string()));
        }
        if self.product_ids.is_empty() {
            return Err(FeedError::InvalidConfig(
                "at least one product id is required".to_string(),
            ));
        }
        if self.max_rows == 0 {
            return Err(FeedError::InvalidConfig(
                "max_rows must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Instrument the book is built for
    pub fn symbol(&self) -> &str {
        self.product_ids.first().map(String::as_str).unwrap_or_default()
    }

    /// Delay before reconnecting
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }

    /// Subscription request sent once the socket opens
    pub fn subscribe_message(&self) -> String {
        self.control_message("subscribe")
    }

    /// Request to stop receiving updates
    pub fn unsubscribe_message(&self) -> String {
        self.control_message("unsubscribe")
    }

    fn control_message(&self, event: &str) -> String {
        json!({
            "event": event,
            "feed": self.feed,
            "product_ids": self.product_ids,
        })
        .to_string()
    }
}
