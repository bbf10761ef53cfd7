use criterion::Criterion;
use depthbook_rs::{DeltaBatch, LevelUpdate, OrderBook};

pub fn benchmark_data(c: &mut Criterion) {
    let mut group = c.benchmark_group("Basic OrderBook Operations");

    // Benchmark for creating a new order book
    group.bench_function("create_order_book", |b| {
        b.iter(|| {
            let _order_book = OrderBook::new("TEST-SYMBOL");
        })
    });

    // Benchmark for applying a single level to an empty book
    group.bench_function("apply_single_level", |b| {
        b.iter(|| {
            let order_book = OrderBook::new("TEST-SYMBOL");
            order_book.apply_delta_batch(&DeltaBatch::bids_only(vec![LevelUpdate::new(
                1000.0, 10.0,
            )]));
        })
    });

    group.finish();
}
