//! Order model - requests and their decay-adjusted freshness.
//!
//! `TigerStyle`: Immutable after construction, freshness computed exactly once.
//!
//! An [`OrderRequest`] is the externally supplied record (JSON upstream). An
//! [`Order`] wraps it together with `shelf_freshness_ms`, the estimated
//! freshness the order will have at pickup time *if it sits on the shelf*:
//! full decay rate for Room orders (the shelf IS their ideal environment),
//! double rate for Hot/Cold orders held off their ideal storage. Lower values
//! are closer to (or past) spoiling and are evicted first.

use serde::{Deserialize, Serialize};

use crate::constants::{SHELF_DECAY_RATE_DIVISOR, TEMP_CLASS_COUNT, TIME_MS_PER_SEC};

/// Temperature class an order must be stored at.
///
/// `Room` is special: its ideal store is the shared overflow shelf itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TempClass {
    /// Ambient temperature; stored on the shared shelf
    Room,
    /// Heated storage
    Hot,
    /// Refrigerated storage
    Cold,
}

impl TempClass {
    /// The dedicated (non-shelf) classes, in move-preference order.
    pub const DEDICATED: [TempClass; 2] = [TempClass::Hot, TempClass::Cold];

    /// Stable small index for per-class counters.
    #[must_use]
    pub(crate) fn index(self) -> usize {
        let idx = match self {
            TempClass::Room => 0,
            TempClass::Hot => 1,
            TempClass::Cold => 2,
        };
        debug_assert!(idx < TEMP_CLASS_COUNT);
        idx
    }
}

impl std::fmt::Display for TempClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TempClass::Room => write!(f, "Room"),
            TempClass::Hot => write!(f, "Hot"),
            TempClass::Cold => write!(f, "Cold"),
        }
    }
}

/// An incoming order request, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Unique order identifier
    pub id: String,
    /// Display name (not used by the engine)
    pub name: String,
    /// Required temperature class
    pub temp: TempClass,
    /// Ideal-storage freshness in seconds
    pub freshness_secs: u32,
}

impl OrderRequest {
    /// Create a request.
    ///
    /// # Preconditions
    /// - `id` must not be empty
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>, temp: TempClass, freshness_secs: u32) -> Self {
        let id = id.into();
        assert!(!id.is_empty(), "order id must not be empty");

        Self {
            id,
            name: name.into(),
            temp,
            freshness_secs,
        }
    }
}

/// A placed order: the request plus its shelf-freshness estimate.
///
/// Created once at placement, destroyed exactly once by pickup or discard.
/// A move between stores relocates the same `Order` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    request: OrderRequest,
    /// Estimated freshness (ms) remaining at pickup time if shelf-resident.
    /// Negative means the order is predicted to be spoiled at pickup.
    shelf_freshness_ms: i64,
}

impl Order {
    /// Build an order from a request and the anticipated pickup delay.
    ///
    /// Room orders decay at the ideal rate on the shelf; Hot/Cold orders
    /// decay [`SHELF_DECAY_RATE_DIVISOR`] times faster there.
    #[must_use]
    pub fn new(request: OrderRequest, pickup_delay_ms: u64) -> Self {
        let ideal_ms = i64::from(request.freshness_secs) * TIME_MS_PER_SEC;
        let on_shelf_ms = if request.temp == TempClass::Room {
            ideal_ms
        } else {
            ideal_ms / SHELF_DECAY_RATE_DIVISOR
        };
        let shelf_freshness_ms = on_shelf_ms - pickup_delay_ms as i64;

        Self {
            request,
            shelf_freshness_ms,
        }
    }

    /// Order identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.request.id
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.request.name
    }

    /// Required temperature class.
    #[must_use]
    pub fn temp(&self) -> TempClass {
        self.request.temp
    }

    /// Estimated shelf freshness at pickup, in milliseconds (may be negative).
    #[must_use]
    pub fn shelf_freshness_ms(&self) -> i64 {
        self.shelf_freshness_ms
    }

    /// The wrapped request.
    #[must_use]
    pub fn request(&self) -> &OrderRequest {
        &self.request
    }
}

// =============================================================================
// Tests
// =============================================================================
