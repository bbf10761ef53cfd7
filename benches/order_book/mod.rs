pub mod apply_batches;

// Import common benchmarks into the main bench group
pub fn register_benchmarks(c: &mut criterion::Criterion) {
    apply_batches::register_benchmarks(c);
    grouping::register_benchmarks(c);
}

use depthbook_rs::{DeltaBatch, LevelUpdate, OrderBook};

/// Book with `levels` levels on each side around 50000
pub fn setup_order_book_with_levels(levels: u64) -> OrderBook {
    let order_book = OrderBook::new("TEST-SYMBOL");
    order_book.apply_delta_batch(&DeltaBatch::new(
        (0..levels)
            .map(|i| LevelUpdate::new(49_999.5 - i as f64 * 0.5, (10 + i % 7) as f64))
            .collect(),
        (0..levels)
            .map(|i| LevelUpdate::new(50_000.0 + i as f64 * 0.5, (10 + i % 5) as f64))
            .collect(),
    ));
    order_book
}
