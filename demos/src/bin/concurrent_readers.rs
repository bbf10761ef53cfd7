// demos/src/bin/concurrent_readers.rs
//
// One writer thread applies synthetic delta batches while reader threads keep
// grouping the latest snapshot, then reports throughput for both.

use depthbook_rs::{DeltaBatch, LevelUpdate, OrderBook, PriceGroup, Side, setup_logger};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;

// Number of reader threads
const READER_COUNT: usize = 4;
// Duration of the run in seconds
const TEST_DURATION_SECS: u64 = 3;

fn main() {
    setup_logger();
    info!("Concurrent snapshot readers");
    info!("Readers: {}", READER_COUNT);
    info!("Duration: {} seconds", TEST_DURATION_SECS);

    let book = Arc::new(OrderBook::new("PI_XBTUSD"));
    populate(&book, 200);

    let barrier = Arc::new(Barrier::new(READER_COUNT + 2)); // readers + writer + main
    let running = Arc::new(AtomicBool::new(true));

    let writer = {
        let book = Arc::clone(&book);
        let barrier = Arc::clone(&barrier);
        let running = Arc::clone(&running);
        thread::spawn(move || {
            barrier.wait();
            let mut batches = 0u64;
            while running.load(Ordering::Relaxed) {
                let offset = (batches % 200) as f64 * 0.5;
                let size = if batches % 3 == 0 {
                    0.0
                } else {
                    (1 + batches % 40) as f64 * 0.5
                };
                book.apply_delta_batch(&DeltaBatch::new(
                    vec![LevelUpdate::new(49_999.5 - offset, size)],
                    vec![LevelUpdate::new(50_000.0 + offset, size)],
                ));
                batches += 1;
            }
            batches
        })
    };

    let readers: Vec<_> = (0..READER_COUNT)
        .map(|reader_id| {
            let book = Arc::clone(&book);
            let barrier = Arc::clone(&barrier);
            let running = Arc::clone(&running);
            thread::spawn(move || {
                barrier.wait();
                let mut group = PriceGroup::finest();
                let mut reads = 0u64;
                while running.load(Ordering::Relaxed) {
                    let snapshot = book.snapshot();
                    let grouped = snapshot.grouped(Side::Bid, group);
                    debug_assert_eq!(grouped.total_size(), snapshot.total_bid_volume());
                    if reads % 1_000 == 0 && !group.increment() {
                        group = PriceGroup::finest();
                    }
                    reads += 1;
                }
                info!("Reader {} done", reader_id);
                reads
            })
        })
        .collect();

    let start = Instant::now();
    barrier.wait();
    thread::sleep(Duration::from_secs(TEST_DURATION_SECS));
    running.store(false, Ordering::Relaxed);

    let batches = writer.join().unwrap_or_default();
    let reads: u64 = readers
        .into_iter()
        .map(|handle| handle.join().unwrap_or_default())
        .sum();
    let elapsed = start.elapsed().as_secs_f64();

    info!("Batches applied: {} ({:.0}/s)", batches, batches as f64 / elapsed);
    info!("Grouped reads: {} ({:.0}/s)", reads, reads as f64 / elapsed);

    let view = book.view(PriceGroup::default(), 5);
    info!("Final sequence: {}", view.sequence);
    match view.spread {
        Some(spread) => info!("Final spread: {}", spread),
        None => info!("Final spread unavailable"),
    }
}

fn populate(book: &OrderBook, levels: u64) {
    let bids = (0..levels)
        .map(|i| LevelUpdate::new(49_999.5 - i as f64 * 0.5, (10 + i % 7) as f64))
        .collect();
    let asks = (0..levels)
        .map(|i| LevelUpdate::new(50_000.0 + i as f64 * 0.5, (10 + i % 5) as f64))
        .collect();
    book.apply_delta_batch(&DeltaBatch::new(bids, asks));
    info!("Populated {} levels per side", levels);
}
