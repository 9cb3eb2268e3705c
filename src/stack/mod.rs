//! Response ordering.
//!
//! The engine has two places where the defending player answers before an
//! action completes: the shield-trigger chain (FIFO by break order) and
//! the interrupt stack (LIFO). Both are built on `ResponderQueue`.
//!
//! ## Example Usage
//!
//! ```
//! use shield_duel::core::Timestamp;
//! use shield_duel::stack::ResponderQueue;
//!
//! let mut queue = ResponderQueue::new();
//! queue.push("first", Timestamp(1));
//! queue.push("second", Timestamp(2));
//!
//! // FIFO consumption
//! assert_eq!(queue.head().unwrap().payload, "first");
//!
//! // LIFO unwinding
//! let unwound: Vec<_> = queue.drain_lifo().into_iter().map(|e| e.payload).collect();
//! assert_eq!(unwound, vec!["second", "first"]);
//! ```

mod queue;

pub use queue::{Queued, ResponderQueue, ResponseId};

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Status of a response-driven resolution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolutionStatus {
    /// Nothing left to resolve.
    Complete,

    /// Waiting for a player to respond or pass.
    WaitingForResponse(PlayerId),
}
