//! # Larder
//!
//! A freshness-aware, bounded storage engine for perishable orders.
//!
//! ## Features
//!
//! - **Strict capacity limits**: dedicated Hot/Cold stores plus a shared
//!   overflow shelf, none of which ever exceeds its configured size
//! - **Freshness-ordered eviction**: the shelf tracks a decay-adjusted
//!   freshness estimate and always discards the order predicted to spoil
//!   soonest, after first trying to relocate another order back to its
//!   now-free ideal store
//! - **Linearizable transactions**: one lock over catalogue + stores, so
//!   concurrent callers always observe some total order of operations
//! - **Decoupled event pipeline**: placements, moves, pickups, and discards
//!   stream to composable sinks over non-blocking queues with
//!   drain-then-close shutdown
//! - **Deterministic testing**: simulated clock and seeded RNG so every
//!   scenario is reproducible
//!
//! ## Quick Start
//!
//! ```rust
//! use larder::{Kitchen, NullSink, OrderRequest, TempClass};
//!
//! let kitchen = Kitchen::new(NullSink::new());
//!
//! // Place an order that should be picked up in about two seconds.
//! kitchen.place(
//!     OrderRequest::new("order-1", "lasagna", TempClass::Hot, 120),
//!     2_000,
//! );
//!
//! // Later: pick it up by id.
//! let order = kitchen.pickup("order-1").expect("still stored");
//! assert_eq!(order.name(), "lasagna");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │                    Kitchen (orchestrator)               │
//! │        place / move / discard / pickup + catalogue      │
//! ├─────────────────────────────────────────────────────────┤
//! │  StorageRouter                                          │
//! │    Hot  → BoundedStore      Cold → BoundedStore         │
//! │    Room → OverflowShelf (freshness-ordered, shared)     │
//! ├─────────────────────────────────────────────────────────┤
//! │  ActionSink pipeline   │ console / JSON file / fan-out  │
//! │  dst                   │ SimClock + DeterministicRng    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Pickup scheduling (when to call [`Kitchen::pickup`] after a delay) is the
//! caller's responsibility; see `demos/simulate.rs` for a complete driver.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod constants;
pub mod dst;
pub mod events;
pub mod kitchen;
pub mod order;
pub mod storage;

// Re-export common types
pub use constants::*;
pub use dst::{Clock, DeterministicRng, SimClock};
pub use events::{
    ActionKind, ActionRecord, ActionSink, ConsoleSink, JsonFileSink, MultiSink, NullSink,
    SinkError,
};
pub use kitchen::{Kitchen, PlaceOutcome};
pub use order::{Order, OrderRequest, TempClass};
pub use storage::{BoundedStore, OrderStore, OverflowShelf, StorageConfig, StorageRouter};
