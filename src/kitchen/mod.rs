//! Kitchen - the transactional placement/pickup orchestrator.
//!
//! `TigerStyle`: One lock, one total order, no I/O while holding it.
//!
//! # Design
//!
//! A single mutex guards the catalogue and all three stores as one unit, so
//! every `place`/`pickup` is atomic: no observer ever sees a half-completed
//! move or discard. Lock hold time is bounded (amortized O(log n) shelf
//! operations); event emission inside the transaction is an unbounded-channel
//! send and never blocks.
//!
//! # Placement
//!
//! An order goes to the ideal store for its class. If that is full, a
//! non-Room order falls back to the shared shelf. If the shelf is also full,
//! the kitchen first tries to *move* a shelf resident of some other class
//! into its now-free dedicated store; only when no move is possible does it
//! *discard* the shelf order predicted to spoil soonest. Either way exactly
//! one shelf slot opens and the new order takes it.
//!
//! # Expected non-errors
//!
//! Placing a duplicate id is a silent no-op ([`PlaceOutcome::Duplicate`]);
//! picking up an unknown or already-removed id returns `None`. Neither emits
//! an event. Internal invariant violations (an empty shelf believed full,
//! counter drift) panic - they indicate a logic defect, not a transient
//! condition.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::dst::Clock;
use crate::events::{ActionKind, ActionRecord, ActionSink, SinkError};
use crate::order::{Order, OrderRequest, TempClass};
use crate::storage::{OrderStore, StorageConfig, StorageRouter};

/// Result of a placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceOutcome {
    /// The order was stored; the location is `Room` when it went to the shelf
    Stored(TempClass),
    /// An order with this id is already held; nothing changed
    Duplicate,
}

/// Catalogue + stores, mutated only under the kitchen lock.
#[derive(Debug)]
struct KitchenState {
    router: StorageRouter,
    /// id → holding location (`Room` = shelf)
    catalogue: HashMap<String, TempClass>,
}

impl KitchenState {
    /// Catalogue and physical stores must describe the same population.
    fn debug_check_consistency(&self) {
        debug_assert_eq!(self.catalogue.len(), self.router.total_len());
    }
}

/// The transactional state machine coordinating placement, relocation,
/// discard, and pickup.
pub struct Kitchen<S: ActionSink> {
    state: Mutex<KitchenState>,
    sink: S,
    clock: Clock,
}

impl<S: ActionSink> Kitchen<S> {
    /// Create a kitchen with default storage capacities and the wall clock.
    #[must_use]
    pub fn new(sink: S) -> Self {
        Self::with_config(sink, StorageConfig::default())
    }

    /// Create a kitchen with explicit storage capacities.
    #[must_use]
    pub fn with_config(sink: S, config: StorageConfig) -> Self {
        Self {
            state: Mutex::new(KitchenState {
                router: StorageRouter::new(&config),
                catalogue: HashMap::new(),
            }),
            sink,
            clock: Clock::system(),
        }
    }

    /// Use `clock` for event timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Place an order, storing it in the best available location.
    ///
    /// Duplicate ids are ignored. May relocate or discard a shelf resident
    /// to make room; every state change emits an event to the sink.
    ///
    /// # Panics
    /// Panics when internal storage invariants are violated (a logic defect,
    /// never a caller error).
    pub fn place(&self, request: OrderRequest, pickup_delay_ms: u64) -> PlaceOutcome {
        let order = Order::new(request, pickup_delay_ms);
        let temp = order.temp();

        let mut state = self.state.lock().expect("kitchen state lock poisoned");

        if state.catalogue.contains_key(order.id()) {
            return PlaceOutcome::Duplicate;
        }

        // Ideal store first (for Room orders this is the shelf already).
        let order = match self.try_store(&mut state, temp, order) {
            Ok(()) => return PlaceOutcome::Stored(temp),
            Err(order) => order,
        };

        // Secondary ideal: the shared shelf.
        let order = if temp == TempClass::Room {
            order
        } else {
            match self.try_store(&mut state, TempClass::Room, order) {
                Ok(()) => return PlaceOutcome::Stored(TempClass::Room),
                Err(order) => order,
            }
        };

        // Shelf is full: free exactly one slot, preferring a move to a
        // discard. Moving into the new order's own class is pointless - its
        // dedicated store was full a moment ago.
        let skip = (temp != TempClass::Room).then_some(temp);
        if !self.try_move_from_shelf(&mut state, skip) {
            self.discard_least_fresh(&mut state);
        }

        let stored = self.try_store(&mut state, TempClass::Room, order);
        assert!(
            stored.is_ok(),
            "shelf refused an order right after a slot was freed"
        );

        state.debug_check_consistency();
        PlaceOutcome::Stored(TempClass::Room)
    }

    /// Remove and return the order with this id, wherever it is held.
    ///
    /// Returns `None` for unknown or already-removed ids (no event emitted).
    pub fn pickup(&self, id: &str) -> Option<Order> {
        let mut state = self.state.lock().expect("kitchen state lock poisoned");

        let location = *state.catalogue.get(id)?;

        let Some(order) = state.router.store_for_mut(location).remove(id) else {
            // Catalogue said the order is here but the store disagrees. A
            // latent consistency bug; degrade to "not found" rather than
            // corrupt state further.
            tracing::error!(id, %location, "catalogue points at a store that does not hold the order");
            return None;
        };

        state.catalogue.remove(id);
        state.debug_check_consistency();
        self.emit(ActionKind::Pickup, id, location);
        Some(order)
    }

    /// Number of orders currently held across all stores.
    pub fn stored_count(&self) -> usize {
        let state = self.state.lock().expect("kitchen state lock poisoned");
        state.debug_check_consistency();
        state.catalogue.len()
    }

    /// The event sink.
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Drain the sink's queue and stop its workers.
    ///
    /// # Errors
    /// Propagates [`SinkError`] from the sink.
    pub async fn shutdown(&self) -> Result<(), SinkError> {
        self.sink.finish().await
    }

    /// Store into the store for `target`; on success record the catalogue
    /// entry and emit a Place event.
    fn try_store(
        &self,
        state: &mut KitchenState,
        target: TempClass,
        order: Order,
    ) -> Result<(), Order> {
        let id = order.id().to_owned();
        state.router.store_for_mut(target).store(order)?;
        state.catalogue.insert(id.clone(), target);
        self.emit(ActionKind::Place, &id, target);
        Ok(())
    }

    /// Relocate the least-fresh shelf resident of the first dedicated class
    /// (skipping `skip`) that has both free dedicated capacity and a shelf
    /// resident. Returns whether a move happened.
    fn try_move_from_shelf(&self, state: &mut KitchenState, skip: Option<TempClass>) -> bool {
        for temp in TempClass::DEDICATED {
            if skip == Some(temp) {
                continue;
            }
            if !state.router.dedicated(temp).has_space()
                || !state.router.shelf().contains_class(temp)
            {
                continue;
            }

            let moved = state
                .router
                .shelf_mut()
                .remove_class(temp)
                .unwrap_or_else(|| panic!("shelf class counter out of sync for {temp}"));
            let id = moved.id().to_owned();

            let stored = state.router.dedicated_mut(temp).store(moved);
            assert!(
                stored.is_ok(),
                "dedicated {temp} store refused an order despite reporting space"
            );

            state.catalogue.insert(id.clone(), temp);
            self.emit(ActionKind::Move, &id, temp);
            return true;
        }
        false
    }

    /// Evict the shelf order predicted to spoil soonest.
    fn discard_least_fresh(&self, state: &mut KitchenState) {
        let discarded = state.router.shelf_mut().pop_least_fresh();
        state.catalogue.remove(discarded.id());
        self.emit(ActionKind::Discard, discarded.id(), TempClass::Room);
    }

    fn emit(&self, kind: ActionKind, order_id: &str, location: TempClass) {
        let record = ActionRecord::new(kind, order_id, self.clock.now_ms(), location);
        self.sink.log_action(record);
    }
}

// =============================================================================
// Tests
// =============================================================================
