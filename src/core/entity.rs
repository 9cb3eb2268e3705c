//! Card instance identification.
//!
//! Every physical card in a match gets an `InstanceId` when the match is
//! built. Ids are allocated from a per-game counter, so two matches built
//! from the same decks and seed hand out identical ids.
//!
//! ```
//! use shield_duel::core::InstanceId;
//!
//! let mut alloc = InstanceId::allocator();
//! assert_eq!(alloc.next_id(), InstanceId(0));
//! assert_eq!(alloc.next_id(), InstanceId(1));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance within one match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Create a fresh allocator starting at zero.
    #[must_use]
    pub const fn allocator() -> InstanceAllocator {
        InstanceAllocator { next: 0 }
    }
}

impl From<u32> for InstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card#{}", self.0)
    }
}

/// Monotonic instance id allocator.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceAllocator {
    next: u32,
}

impl InstanceAllocator {
    /// Allocate the next id.
    pub fn next_id(&mut self) -> InstanceId {
        let id = InstanceId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next
    }
}
