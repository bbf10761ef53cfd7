use super::setup_order_book_with_levels;
use criterion::{BenchmarkId, Criterion};
use depthbook_rs::{DeltaBatch, LevelUpdate};
use std::hint::black_box;

/// Register benchmarks for applying delta batches to a populated book
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("OrderBook - Apply Batches");

    // Typical incremental message: a handful of levels on one side
    group.bench_function("small_one_sided_batch", |b| {
        let order_book = setup_order_book_with_levels(100);
        let batch = DeltaBatch::bids_only(vec![
            LevelUpdate::new(49_999.5, 42.0),
            LevelUpdate::new(49_998.0, 0.0),
            LevelUpdate::new(49_990.0, 7.0),
        ]);
        b.iter(|| black_box(order_book.apply_delta_batch(&batch)));
    });

    // Totals are recomputed over the whole book, so cost scales with depth
    for depth in [25u64, 250, 2_500].iter() {
        group.bench_with_input(
            BenchmarkId::new("batch_depth_scaling", depth),
            depth,
            |b, &depth| {
                let order_book = setup_order_book_with_levels(depth);
                let batch = DeltaBatch::asks_only(vec![LevelUpdate::new(50_000.0, 99.0)]);
                b.iter(|| black_box(order_book.apply_delta_batch(&batch)));
            },
        );
    }

    group.finish();
}
