//! Discard and relocation policy tests.
//!
//! The shelf must always sacrifice the order predicted to spoil soonest, and
//! must prefer rescuing an order back into its freed dedicated store over
//! discarding anything.

use larder::{DeterministicRng, Kitchen, NullSink, OrderRequest, TempClass};

const PICKUP_DELAY_MS: u64 = 500;
const SHELF_CAPACITY: usize = 12;
const DEDICATED_CAPACITY: usize = 6;

/// Generate `count` orders of `temp` with unique pseudo-random freshness
/// values in `start..start + spread`.
fn generate_orders(
    rng: &mut DeterministicRng,
    count: usize,
    temp: TempClass,
    start_freshness: u32,
    spread: usize,
) -> Vec<OrderRequest> {
    let mut used = Vec::new();
    let mut orders = Vec::with_capacity(count);

    for i in 0..count {
        let mut freshness = start_freshness + rng.next_usize(0, spread) as u32;
        while used.contains(&freshness) {
            freshness = start_freshness + rng.next_usize(0, spread) as u32;
        }
        used.push(freshness);

        orders.push(OrderRequest::new(
            format!("{temp}-{i}-{freshness}"),
            format!("{temp}-{freshness}"),
            temp,
            freshness,
        ));
    }

    orders
}

/// Two order sets with pairwise-equal freshness but different classes.
fn generate_same_freshness_pairs(
    first: TempClass,
    second: TempClass,
    count: usize,
) -> (Vec<OrderRequest>, Vec<OrderRequest>) {
    const START_FRESHNESS: u32 = 50;

    let build = |temp: TempClass, i: usize, freshness: u32| {
        OrderRequest::new(
            format!("{temp}{i}{freshness}"),
            format!("{temp}{freshness}"),
            temp,
            freshness,
        )
    };

    let firsts = (0..count)
        .map(|i| build(first, i, START_FRESHNESS + i as u32))
        .collect();
    let seconds = (0..count)
        .map(|i| build(second, i, START_FRESHNESS + i as u32))
        .collect();
    (firsts, seconds)
}

#[test]
fn discards_predicted_least_fresh_shelf_orders() {
    for seed in 0..20 {
        let mut rng = DeterministicRng::new(seed);

        // These should be evicted in order of freshness once the shelf churns.
        let start_orders = generate_orders(&mut rng, SHELF_CAPACITY, TempClass::Room, 50, 100);
        let mut check_orders = start_orders.clone();
        check_orders.sort_by_key(|order| order.freshness_secs);

        // All strictly fresher than every start order.
        let replace_orders = generate_orders(&mut rng, SHELF_CAPACITY, TempClass::Room, 300, 100);

        let kitchen = Kitchen::new(NullSink::new());
        for order in &start_orders {
            kitchen.place(order.clone(), PICKUP_DELAY_MS);
        }

        // Each fresher placement must evict exactly the next-least-fresh
        // original order.
        for (replace, evicted) in replace_orders.iter().zip(&check_orders) {
            kitchen.place(replace.clone(), PICKUP_DELAY_MS);
            assert!(
                kitchen.pickup(&evicted.id).is_none(),
                "seed {seed}: {} should have been discarded",
                evicted.id
            );
        }
    }
}

#[test]
fn discards_smallest_estimate_from_a_full_shelf() {
    // Shelf capacity 12, freshness 50..=61 at zero delay → estimates
    // 50000..=61000. The 13th Room order evicts the 50000 entry.
    let kitchen = Kitchen::new(NullSink::new());
    for freshness in 50..62u32 {
        kitchen.place(
            OrderRequest::new(format!("r{freshness}"), "x", TempClass::Room, freshness),
            0,
        );
    }

    kitchen.place(OrderRequest::new("r-extra", "x", TempClass::Room, 300), 0);

    assert!(kitchen.pickup("r50").is_none());
    for freshness in 51..62u32 {
        assert!(
            kitchen.pickup(&format!("r{freshness}")).is_some(),
            "r{freshness} should remain retrievable"
        );
    }
    assert!(kitchen.pickup("r-extra").is_some());
}

#[test]
fn discards_hot_shelf_orders_before_room_orders() {
    let mut rng = DeterministicRng::new(7);
    let hot_dummies = generate_orders(&mut rng, DEDICATED_CAPACITY, TempClass::Hot, 999, 50);
    let replace_orders = generate_orders(&mut rng, DEDICATED_CAPACITY, TempClass::Room, 999, 50);

    let (room_orders, hot_orders) =
        generate_same_freshness_pairs(TempClass::Room, TempClass::Hot, DEDICATED_CAPACITY);

    let kitchen = Kitchen::new(NullSink::new());

    // Dummies occupy all of Hot storage, so no move can rescue a Hot order.
    for dummy in &hot_dummies {
        kitchen.place(dummy.clone(), PICKUP_DELAY_MS);
    }

    // Alternate Room/Hot onto the shelf until it is exactly full. Hot orders
    // decay at double rate there, so every Hot estimate undercuts every Room
    // estimate despite equal nominal freshness.
    for (room, hot) in room_orders.iter().zip(&hot_orders) {
        kitchen.place(room.clone(), PICKUP_DELAY_MS);
        kitchen.place(hot.clone(), PICKUP_DELAY_MS);
    }

    for (replace, hot) in replace_orders.iter().zip(&hot_orders) {
        kitchen.place(replace.clone(), PICKUP_DELAY_MS);
        assert!(
            kitchen.pickup(&hot.id).is_none(),
            "{} should have been discarded before any Room order",
            hot.id
        );
    }

    for room in &room_orders {
        let order = kitchen.pickup(&room.id).expect("Room order must survive");
        assert_eq!(order.id(), room.id);
    }
}

#[test]
fn relocates_hot_shelf_orders_when_hot_storage_frees_up() {
    let mut rng = DeterministicRng::new(11);
    let hot_dummies = generate_orders(&mut rng, DEDICATED_CAPACITY, TempClass::Hot, 999, 50);
    let extra_rooms = generate_orders(&mut rng, DEDICATED_CAPACITY, TempClass::Room, 999, 50);

    let (room_orders, hot_orders) =
        generate_same_freshness_pairs(TempClass::Room, TempClass::Hot, DEDICATED_CAPACITY);

    let kitchen = Kitchen::new(NullSink::new());
    for dummy in &hot_dummies {
        kitchen.place(dummy.clone(), PICKUP_DELAY_MS);
    }
    for (room, hot) in room_orders.iter().zip(&hot_orders) {
        kitchen.place(room.clone(), PICKUP_DELAY_MS);
        kitchen.place(hot.clone(), PICKUP_DELAY_MS);
    }

    // Free one Hot slot before each extra placement: the kitchen must move a
    // Hot shelf resident into Hot storage instead of discarding anything.
    for (dummy, extra) in hot_dummies.iter().zip(&extra_rooms) {
        kitchen.pickup(&dummy.id).expect("dummy occupies Hot storage");
        kitchen.place(extra.clone(), PICKUP_DELAY_MS);
    }

    // All six Hot orders now live in Hot storage; all Room orders survived.
    for hot in &hot_orders {
        assert!(
            kitchen.pickup(&hot.id).is_some(),
            "{} should have been relocated, not discarded",
            hot.id
        );
    }
    for room in room_orders.iter().chain(&extra_rooms) {
        assert!(kitchen.pickup(&room.id).is_some());
    }
}
