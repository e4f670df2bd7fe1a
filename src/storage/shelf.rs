//! OverflowShelf - shared bounded store ordered by estimated freshness.
//!
//! `TigerStyle`: Deterministic total order, O(1) class membership, counters
//! never drift from the map.
//!
//! The shelf keys its ordered map by `(shelf_freshness_ms, insertion_seq)`:
//! the monotonically increasing sequence number breaks ties among equal
//! freshness values deterministically, in arrival order. A secondary id→key
//! index gives O(log n) removal by id, and per-class resident counters answer
//! "does the shelf hold any order of class X" without scanning.

use std::collections::{BTreeMap, HashMap};

use super::OrderStore;
use crate::constants::TEMP_CLASS_COUNT;
use crate::order::{Order, TempClass};

/// Ordered-map key: freshness first, then arrival order among equals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct ShelfKey {
    freshness_ms: i64,
    seq: u64,
}

/// The shared overflow shelf, bounded and freshness-ordered.
#[derive(Debug)]
pub struct OverflowShelf {
    capacity: usize,
    next_seq: u64,
    by_freshness: BTreeMap<ShelfKey, Order>,
    by_id: HashMap<String, ShelfKey>,
    class_counts: [usize; TEMP_CLASS_COUNT],
}

impl OverflowShelf {
    /// Create a shelf holding at most `capacity` orders.
    ///
    /// # Preconditions
    /// - `capacity` must be > 0
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");

        Self {
            capacity,
            next_seq: 0,
            by_freshness: BTreeMap::new(),
            by_id: HashMap::with_capacity(capacity),
            class_counts: [0; TEMP_CLASS_COUNT],
        }
    }

    /// Configured capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// O(1): whether any resident order has class `temp`.
    #[must_use]
    pub fn contains_class(&self, temp: TempClass) -> bool {
        self.class_counts[temp.index()] > 0
    }

    /// Whether an order with this id is resident.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Remove and return the least-fresh order.
    ///
    /// # Panics
    /// Panics if the shelf is empty. Reaching this with an empty shelf means
    /// the caller's fullness accounting is broken, which is an internal logic
    /// fault, not a recoverable condition.
    pub fn pop_least_fresh(&mut self) -> Order {
        assert!(
            !self.by_freshness.is_empty(),
            "pop_least_fresh on an empty shelf"
        );

        let (_, order) = self
            .by_freshness
            .pop_first()
            .expect("shelf is non-empty");
        self.by_id.remove(order.id());
        self.class_counts[order.temp().index()] -= 1;

        self.debug_check_consistency();
        order
    }

    /// Remove and return the least-fresh resident order of class `temp`.
    ///
    /// Scans in ascending freshness order so the item of that class closest
    /// to spoiling is the one rescued. Guard with [`Self::contains_class`] to
    /// keep the miss case O(1).
    pub fn remove_class(&mut self, temp: TempClass) -> Option<Order> {
        let key = self
            .by_freshness
            .iter()
            .find(|(_, order)| order.temp() == temp)
            .map(|(key, _)| *key)?;

        let order = self
            .by_freshness
            .remove(&key)
            .expect("key was just found in the map");
        self.by_id.remove(order.id());
        self.class_counts[temp.index()] -= 1;

        self.debug_check_consistency();
        Some(order)
    }

    /// Map, index, and counters must describe the same population.
    fn debug_check_consistency(&self) {
        debug_assert_eq!(self.by_freshness.len(), self.by_id.len());
        debug_assert_eq!(
            self.class_counts.iter().sum::<usize>(),
            self.by_freshness.len()
        );
    }
}

impl OrderStore for OverflowShelf {
    fn temp(&self) -> TempClass {
        TempClass::Room
    }

    fn store(&mut self, order: Order) -> Result<(), Order> {
        if !self.has_space() || self.by_id.contains_key(order.id()) {
            return Err(order);
        }

        let key = ShelfKey {
            freshness_ms: order.shelf_freshness_ms(),
            seq: self.next_seq,
        };
        self.next_seq += 1;

        self.by_id.insert(order.id().to_owned(), key);
        self.class_counts[order.temp().index()] += 1;
        self.by_freshness.insert(key, order);

        // Postconditions
        assert!(self.by_freshness.len() <= self.capacity, "capacity invariant violated");
        self.debug_check_consistency();
        Ok(())
    }

    fn has_space(&self) -> bool {
        self.by_freshness.len() < self.capacity
    }

    fn remove(&mut self, id: &str) -> Option<Order> {
        let key = self.by_id.remove(id)?;
        let order = self
            .by_freshness
            .remove(&key)
            .expect("id index and freshness map out of sync");
        self.class_counts[order.temp().index()] -= 1;

        self.debug_check_consistency();
        Some(order)
    }

    fn len(&self) -> usize {
        self.by_freshness.len()
    }
}

// =============================================================================
// Tests
// =============================================================================
