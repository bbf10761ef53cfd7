use crate::order_book::setup_order_book_with_levels;
use criterion::{BenchmarkId, Criterion};
use depthbook_rs::{DeltaBatch, LevelUpdate, OrderBook, PriceGroup};
use std::hint::black_box;
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};

/// Register benchmarks with one writer applying batches while readers build views
pub fn register_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("OrderBook - Reader Contention");

    for reader_count in [0usize, 2, 4, 8].iter() {
        group.bench_with_input(
            BenchmarkId::new("writer_with_readers", reader_count),
            reader_count,
            |b, &reader_count| {
                b.iter_custom(|iters| measure_writer_with_readers(reader_count, iters));
            },
        );
    }

    group.finish();
}

/// Time spent by the writer applying `iterations` batches while `reader_count`
/// threads continuously read snapshots and build views.
fn measure_writer_with_readers(reader_count: usize, iterations: u64) -> Duration {
    let order_book: Arc<OrderBook> = Arc::new(setup_order_book_with_levels(200));
    let barrier = Arc::new(Barrier::new(reader_count + 1)); // +1 for the writer
    let running = Arc::new(std::sync::atomic::AtomicBool::new(true));

    let handles: Vec<_> = (0..reader_count)
        .map(|_| {
            let thread_book = Arc::clone(&order_book);
            let thread_barrier = Arc::clone(&barrier);
            let thread_running = Arc::clone(&running);
            thread::spawn(move || {
                thread_barrier.wait();
                while thread_running.load(std::sync::atomic::Ordering::Relaxed) {
                    black_box(thread_book.view(PriceGroup::default(), 10));
                }
            })
        })
        .collect();

    barrier.wait();
    let start = Instant::now();
    for i in 0..iterations {
        let size = (1 + i % 50) as f64;
        black_box(
            order_book.apply_delta_batch(&DeltaBatch::bids_only(vec![LevelUpdate::new(
                49_999.5, size,
            )])),
        );
    }
    let elapsed = start.elapsed();

    running.store(false, std::sync::atomic::Ordering::Relaxed);
    for handle in handles {
        let _ = handle.join();
    }
    elapsed
}
