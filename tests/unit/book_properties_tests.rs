//! Invariants of the published ladders and grouped views, checked over
//! deterministic pseudo-random batch sequences.

use depthbook_rs::{
    DeltaBatch, LevelUpdate, OrderBook, OrderBookSnapshot, PRICE_GROUPS, PriceGroup, Side,
};

/// Small linear congruential generator so runs are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

fn random_updates(rng: &mut Lcg, base: f64, count: usize) -> Vec<LevelUpdate> {
    (0..count)
        .map(|_| {
            let price = base + rng.below(400) as f64 * 0.5;
            // Roughly one in four updates removes its level, the rest carry
            // quarter-unit sizes
            let size = if rng.below(4) == 0 {
                0.0
            } else {
                (1 + rng.below(2_000)) as f64 * 0.25
            };
            LevelUpdate::new(price, size)
        })
        .collect()
}

fn random_batch(rng: &mut Lcg) -> DeltaBatch {
    match rng.below(3) {
        0 => DeltaBatch::bids_only(random_updates(rng, 49_800.0, 20)),
        1 => DeltaBatch::asks_only(random_updates(rng, 50_000.0, 20)),
        _ => DeltaBatch::new(
            random_updates(rng, 49_800.0, 10),
            random_updates(rng, 50_000.0, 10),
        ),
    }
}

fn assert_ladder_invariants(snapshot: &OrderBookSnapshot) {
    for side in [Side::Bid, Side::Ask] {
        let levels = snapshot.ladder(side).levels(side);
        if let Some((_, best)) = levels.first() {
            assert_eq!(best.total, best.size, "{side} best level total must equal its size");
        }

        let mut running = 0.0;
        for (price_key, level) in &levels {
            assert!(level.size > 0.0, "{side} level {price_key} kept with zero size");
            running += level.size;
            assert_eq!(level.total, running, "{side} total at {price_key}");
        }

        for pair in levels.windows(2) {
            assert!(side.is_better(pair[0].0, pair[1].0), "{side} ladder not sorted");
            assert!(pair[0].1.total <= pair[1].1.total, "{side} totals not monotonic");
        }
    }
}

#[test]
fn test_invariants_hold_after_every_batch() {
    let book = OrderBook::new("PROP");
    let mut rng = Lcg(7);

    for _ in 0..200 {
        book.apply_delta_batch(&random_batch(&mut rng));
        assert_ladder_invariants(&book.snapshot());
    }
    assert_eq!(book.sequence(), 200);
}

#[test]
fn test_grouping_conserves_size_for_random_books() {
    let book = OrderBook::new("PROP");
    let mut rng = Lcg(11);
    for _ in 0..50 {
        book.apply_delta_batch(&random_batch(&mut rng));
    }
    let snapshot = book.snapshot();

    for index in 0..PRICE_GROUPS.len() {
        let group = PriceGroup::new(index).expect("valid index");
        for side in [Side::Bid, Side::Ask] {
            let grouped = snapshot.grouped(side, group);
            assert_eq!(
                grouped.total_size(),
                snapshot.ladder(side).total_size(),
                "{side} size changed by grouping at {}",
                group.width()
            );
            let totals: Vec<f64> = grouped.iter().map(|level| level.total).collect();
            assert!(totals.windows(2).all(|pair| pair[0] <= pair[1]));
        }
    }
}

#[test]
fn test_upsert_then_remove_leaves_level_absent() {
    let book = OrderBook::new("PROP");
    let mut rng = Lcg(23);

    for _ in 0..100 {
        let price = 100.0 + rng.below(1_000) as f64 * 0.01;
        let size = (1 + rng.below(1_000)) as f64;
        let key = LevelUpdate::new(price, size).price_key();

        book.apply_levels(Some(&[(price, size)]), None);
        assert!(book.snapshot().bids.contains(key));

        book.apply_levels(Some(&[(price, 0.0)]), None);
        assert!(!book.snapshot().bids.contains(key));
    }
    assert!(book.snapshot().bids.is_empty());
}

#[test]
fn test_reapplying_a_batch_is_idempotent() {
    let book = OrderBook::new("PROP");
    let mut rng = Lcg(31);
    for _ in 0..10 {
        book.apply_delta_batch(&random_batch(&mut rng));
    }

    let batch = random_batch(&mut rng);
    let once = book.apply_delta_batch(&batch);
    let twice = book.apply_delta_batch(&batch);
    assert_eq!(once.bids, twice.bids);
    assert_eq!(once.asks, twice.asks);
}

#[test]
fn test_worked_example_from_feed_pairs() {
    let book = OrderBook::new("PI_XBTUSD");
    book.apply_levels(None, Some(&[(10.0, 100.0), (20.0, 200.0)]));
    book.apply_levels(Some(&[(15.0, 150.0), (25.0, 250.0)]), None);
    let snapshot = book.snapshot();

    let asks: Vec<(u64, f64, f64)> = snapshot
        .asks_sorted()
        .into_iter()
        .map(|(key, level)| (key, level.size, level.total))
        .collect();
    let bids: Vec<(u64, f64, f64)> = snapshot
        .bids_sorted()
        .into_iter()
        .map(|(key, level)| (key, level.size, level.total))
        .collect();

    assert_eq!(asks, vec![(1000, 100.0, 100.0), (2000, 200.0, 300.0)]);
    assert_eq!(bids, vec![(2500, 250.0, 250.0), (1500, 150.0, 400.0)]);

    book.apply_levels(None, Some(&[(10.0, 0.0)]));
    assert!(!book.snapshot().asks.contains(1000));
    assert_eq!(book.snapshot().asks.get(2000).map(|level| level.total), Some(200.0));
}
