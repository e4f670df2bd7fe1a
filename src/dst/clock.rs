//! SimClock - simulated time, and the wall/sim Clock switch.
//!
//! `TigerStyle`: Time only moves forward, all time operations are explicit.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

use crate::constants::DST_TIME_ADVANCE_MS_MAX;

/// A simulated clock for deterministic testing.
///
/// Thread-safe via `Arc<AtomicU64>`; clones share the same time. Supports
/// async sleep with notify so time-dependent tasks can coordinate.
#[derive(Debug, Clone)]
pub struct SimClock {
    /// Current time in milliseconds since epoch (thread-safe)
    current_ms: Arc<AtomicU64>,
    /// Notify waiters when time advances
    notify: Arc<Notify>,
}

impl SimClock {
    /// Create a new clock starting at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::at_ms(0)
    }

    /// Create a clock starting at the given millisecond timestamp.
    #[must_use]
    pub fn at_ms(start_ms: u64) -> Self {
        Self {
            current_ms: Arc::new(AtomicU64::new(start_ms)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Get current time in milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.current_ms.load(Ordering::SeqCst)
    }

    /// Advance time by the given milliseconds and return the new time.
    ///
    /// # Panics
    /// Panics if `ms` exceeds [`DST_TIME_ADVANCE_MS_MAX`].
    pub fn advance_ms(&self, ms: u64) -> u64 {
        // Precondition
        assert!(
            ms <= DST_TIME_ADVANCE_MS_MAX,
            "advance_ms({}) exceeds max ({})",
            ms,
            DST_TIME_ADVANCE_MS_MAX
        );

        let old_time = self.current_ms.fetch_add(ms, Ordering::SeqCst);
        let new_time = old_time.saturating_add(ms);

        // Notify all waiters that time has advanced
        self.notify.notify_waiters();

        // Postcondition
        assert!(new_time >= old_time, "time must not go backwards");

        new_time
    }

    /// Get elapsed time since a given timestamp.
    ///
    /// # Panics
    /// Panics if `since` is in the future.
    #[must_use]
    pub fn elapsed_since(&self, since: u64) -> u64 {
        let current = self.now_ms();
        assert!(
            since <= current,
            "elapsed_since({}) is in the future (now={})",
            since,
            current
        );

        current - since
    }

    /// Sleep until the given duration has passed.
    ///
    /// Yields and waits for the clock to be advanced by another task; returns
    /// once `now_ms >= start + duration_ms`.
    pub async fn sleep_ms(&self, duration_ms: u64) {
        let target_ms = self.now_ms() + duration_ms;

        while self.now_ms() < target_ms {
            self.notify.notified().await;
        }
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Time source for event timestamps: the wall clock or a [`SimClock`].
///
/// The kitchen stamps every emitted record through one of these, so tests
/// can pin timestamps while production uses real time.
#[derive(Debug, Clone)]
pub enum Clock {
    /// Wall-clock epoch milliseconds
    System,
    /// Simulated time
    Sim(SimClock),
}

impl Clock {
    /// The wall clock.
    #[must_use]
    pub fn system() -> Self {
        Clock::System
    }

    /// A simulated clock.
    #[must_use]
    pub fn sim(clock: SimClock) -> Self {
        Clock::Sim(clock)
    }

    /// Current time in epoch milliseconds.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        match self {
            Clock::System => {
                let ms = chrono::Utc::now().timestamp_millis();
                debug_assert!(ms >= 0, "system clock before epoch");
                ms as u64
            }
            Clock::Sim(sim) => sim.now_ms(),
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Clock::System
    }
}

// =============================================================================
// Tests
// =============================================================================
