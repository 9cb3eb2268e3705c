//! Logical clock for declaration and event timestamps.
//!
//! Timestamps order events inside one match. They are ticks of a
//! monotonic counter owned by the game state, never wall-clock time, so
//! a replayed match stamps every record identically.

use serde::{Deserialize, Serialize};

/// A tick of the match clock.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(pub u64);

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Monotonic tick counter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchClock {
    ticks: u64,
}

impl MatchClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock and return the new tick.
    pub fn tick(&mut self) -> Timestamp {
        self.ticks += 1;
        Timestamp(self.ticks)
    }

    /// The most recent tick handed out.
    #[must_use]
    pub fn now(&self) -> Timestamp {
        Timestamp(self.ticks)
    }
}
