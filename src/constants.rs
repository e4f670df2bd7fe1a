//! `TigerStyle` Constants
//!
//! All limits use big-endian naming: `CATEGORY_SPECIFICS_UNIT_LIMIT`
//! Example: `SHELF_ORDERS_COUNT_DEFAULT` (not `DEFAULT_SHELF_SIZE`)
//!
//! Every constant includes units in the name:
//! - _`COUNT_*` for quantity limits
//! - _MS for milliseconds

// =============================================================================
// Storage Capacities
// =============================================================================

/// Default capacity of each dedicated (Hot/Cold) store
pub const STORE_DEDICATED_ORDERS_COUNT_DEFAULT: usize = 6;

/// Default capacity of the shared overflow shelf
pub const SHELF_ORDERS_COUNT_DEFAULT: usize = 12;

/// Number of temperature classes (Room, Hot, Cold)
pub const TEMP_CLASS_COUNT: usize = 3;

// =============================================================================
// Freshness Model
// =============================================================================

/// Freshness decays at this multiple of the ideal rate while shelf-resident
/// off the ideal environment (Hot/Cold orders on the Room shelf)
pub const SHELF_DECAY_RATE_DIVISOR: i64 = 2;

// =============================================================================
// Time Constants
// =============================================================================

/// Milliseconds per second
pub const TIME_MS_PER_SEC: i64 = 1000;

// =============================================================================
// DST (Deterministic Simulation Testing) Limits
// =============================================================================

/// Maximum time advance per step in milliseconds
pub const DST_TIME_ADVANCE_MS_MAX: u64 = 86_400_000; // 24 hours

// =============================================================================
// Tests
// =============================================================================
