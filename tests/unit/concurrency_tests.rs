//! Readers on other threads must only ever observe fully applied batches.

use depthbook_rs::{DeltaBatch, LevelUpdate, OrderBook, PriceGroup, Side};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;

const BATCHES: u64 = 2_000;
const READERS: usize = 4;

// Batch `n` moves both sides to a single level at price `n` with size `n`.
fn stepping_batch(n: u64) -> DeltaBatch {
    let updates = vec![
        LevelUpdate::new((n - 1) as f64, 0.0),
        LevelUpdate::new(n as f64, n as f64),
    ];
    DeltaBatch::new(updates.clone(), updates)
}

#[test]
fn test_readers_never_see_partial_batches() {
    let book = Arc::new(OrderBook::new("CONCURRENT"));
    let running = Arc::new(AtomicBool::new(true));
    let barrier = Arc::new(Barrier::new(READERS + 1));

    let mut handles = Vec::with_capacity(READERS);
    for _ in 0..READERS {
        let reader_book = Arc::clone(&book);
        let reader_running = Arc::clone(&running);
        let reader_barrier = Arc::clone(&barrier);

        handles.push(thread::spawn(move || {
            reader_barrier.wait();
            let mut last_sequence = 0;
            let mut observed = 0u64;

            while reader_running.load(Ordering::Relaxed) {
                let snapshot = reader_book.snapshot();
                let sequence = snapshot.sequence;
                assert!(sequence >= last_sequence, "sequence went backwards");
                last_sequence = sequence;

                if sequence > 0 {
                    let key = sequence * 100;
                    let expected = Some(sequence as f64);
                    assert_eq!(snapshot.bids.len(), 1);
                    assert_eq!(snapshot.asks.len(), 1);
                    assert_eq!(snapshot.bids.get(key).map(|level| level.size), expected);
                    assert_eq!(snapshot.asks.get(key).map(|level| level.size), expected);

                    let grouped = snapshot.grouped(Side::Ask, PriceGroup::coarsest());
                    assert_eq!(grouped.total_size(), sequence as f64);
                }
                observed += 1;
            }
            observed
        }));
    }

    barrier.wait();
    for n in 1..=BATCHES {
        book.apply_delta_batch(&stepping_batch(n));
    }
    running.store(false, Ordering::Relaxed);

    for handle in handles {
        let observed = handle.join().expect("reader panicked");
        assert!(observed > 0);
    }

    assert_eq!(book.sequence(), BATCHES);
    assert_eq!(book.best_bid(), Some(BATCHES * 100));
}

#[test]
fn test_concurrent_writers_do_not_lose_batches() {
    let book = Arc::new(OrderBook::new("WRITERS"));
    let writers = 4;
    let per_writer = 250;

    let handles: Vec<_> = (0..writers)
        .map(|writer| {
            let writer_book = Arc::clone(&book);
            thread::spawn(move || {
                for i in 0..per_writer {
                    let price = (writer * per_writer + i) as f64;
                    writer_book.apply_levels(Some(&[(price, 1.0)]), None);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("writer panicked");
    }

    let snapshot = book.snapshot();
    assert_eq!(snapshot.sequence, (writers * per_writer) as u64);
    assert_eq!(snapshot.bids.len(), writers * per_writer);
    assert_eq!(snapshot.total_bid_volume(), (writers * per_writer) as f64);
}
