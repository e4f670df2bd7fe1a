//! Action events emitted by the kitchen.
//!
//! A closed union of event kinds with one fixed payload shape. Records
//! serialize to the external contract `{"action", "timestamp", "id"}` with
//! epoch-millisecond timestamps; the storage location rides along for
//! human-readable output but is not part of the persisted record.

pub mod sink;

pub use sink::{ActionSink, ConsoleSink, JsonFileSink, MultiSink, NullSink, SinkError};

use serde::Serialize;

use crate::order::TempClass;

/// What happened to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Stored into some store at placement time
    Place,
    /// Relocated from the shelf into its dedicated store
    Move,
    /// Removed by the caller
    Pickup,
    /// Evicted from the shelf as predicted least fresh
    Discard,
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionKind::Place => write!(f, "place"),
            ActionKind::Move => write!(f, "move"),
            ActionKind::Pickup => write!(f, "pickup"),
            ActionKind::Discard => write!(f, "discard"),
        }
    }
}

/// One emitted event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionRecord {
    /// The event kind
    #[serde(rename = "action")]
    pub kind: ActionKind,
    /// Epoch milliseconds at emission time
    #[serde(rename = "timestamp")]
    pub timestamp_ms: u64,
    /// The order the event concerns
    #[serde(rename = "id")]
    pub order_id: String,
    /// Store involved (display only, not persisted)
    #[serde(skip)]
    pub location: TempClass,
}

impl ActionRecord {
    /// Build a record.
    #[must_use]
    pub fn new(kind: ActionKind, order_id: impl Into<String>, timestamp_ms: u64, location: TempClass) -> Self {
        Self {
            kind,
            timestamp_ms,
            order_id: order_id.into(),
            location,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
