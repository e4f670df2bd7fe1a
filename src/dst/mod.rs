//! Deterministic simulation tooling.
//!
//! `TigerStyle`: Same seed, same run. All time and randomness used by tests
//! and the demo driver flow through here so every scenario is reproducible.

pub mod clock;
pub mod rng;

pub use clock::{Clock, SimClock};
pub use rng::DeterministicRng;
