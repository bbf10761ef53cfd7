// demos/src/bin/replay_feed.rs
//
// Replays a file of newline-delimited feed messages through the handler and
// prints the grouped book after each applied batch. Without a path argument a
// short built-in session is replayed.
//
//   LOGLEVEL=debug cargo run -p demos --bin replay_feed -- messages.jsonl 4

use depthbook_rs::{
    BookView, FeedConfig, FeedHandler, FeedOutcome, OrderBook, PriceGroup, setup_logger,
};
use std::sync::Arc;
use tracing::{info, warn};

const SAMPLE_SESSION: &[&str] = &[
    r#"{"event":"subscribed","feed":"book_ui_1","product_ids":["PI_XBTUSD"]}"#,
    r#"{"feed":"book_ui_1_snapshot","product_id":"PI_XBTUSD","bids":[[50000.0,1200],[49999.5,300],[49998.0,2500],[49990.0,100]],"asks":[[50001.0,800],[50001.5,1500],[50003.0,40],[50010.0,900]]}"#,
    r#"{"feed":"book_ui_1","product_id":"PI_XBTUSD","bids":[[49999.5,0],[50000.5,75]]}"#,
    r#"{"feed":"book_ui_1","product_id":"PI_XBTUSD","asks":[[50001.0,0]]}"#,
    r#"{"feed":"book_ui_1","product_id":"PI_XBTUSD","bids":"<script>sneaky</script>"}"#,
    r#"{"feed":"book_ui_1","product_id":"PI_XBTUSD","asks":[[50002.0,"oops"]]}"#,
];

fn main() {
    setup_logger();

    let config = FeedConfig::default();
    let args: Vec<String> = std::env::args().collect();
    let group = args
        .get(2)
        .and_then(|raw| raw.parse::<usize>().ok())
        .and_then(PriceGroup::new)
        .unwrap_or_default();

    let messages: Vec<String> = match args.get(1) {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(contents) => contents.lines().map(str::to_string).collect(),
            Err(err) => {
                warn!("Could not read {}: {}", path, err);
                return;
            }
        },
        None => SAMPLE_SESSION.iter().map(|line| line.to_string()).collect(),
    };

    info!("Replaying {} messages for {}", messages.len(), config.symbol());
    info!("Subscription: {}", config.subscribe_message());

    let handler = FeedHandler::new(Arc::new(OrderBook::new(config.symbol())));
    for message in messages.iter().filter(|line| !line.trim().is_empty()) {
        match handler.on_message(message) {
            FeedOutcome::Applied { sequence } => {
                info!("Applied batch {}", sequence);
                print_view(&handler.book().view(group, config.max_rows));
            }
            outcome => info!("Message outcome: {:?}", outcome),
        }
    }

    let stats = handler.stats();
    info!(
        "Done: {}",
        serde_json::to_string(&stats).unwrap_or_else(|_| format!("{:?}", stats))
    );
}

fn print_view(view: &BookView) {
    info!("{} ({})", view.symbol, view.group);
    for row in view.asks.iter().rev() {
        info!(
            "  ASK {:>12.2} {:>10.4} {:>10.4} {:>6.1}%",
            row.price, row.size, row.total, row.depth_percent
        );
    }
    match view.spread {
        Some(spread) => info!("  Spread {}", spread),
        None => info!("  Spread unavailable"),
    }
    for row in &view.bids {
        info!(
            "  BID {:>12.2} {:>10.4} {:>10.4} {:>6.1}%",
            row.price, row.size, row.total, row.depth_percent
        );
    }
}
