//! Shield triggers and interrupts.
//!
//! When unblocked attackers break shields, each revealed card with the
//! trigger marker becomes a `ShieldTriggerEvent`. Events from one combat
//! form a chain answered strictly in break order. While the chain is
//! open, the defending player may also stack interrupts on the pending
//! attack; those unwind last-in first-out.
//!
//! ## Key Components
//!
//! - [`ShieldTriggerStack`]: The FIFO trigger chain with response history
//! - [`ShieldBreakResult`]: What one broken shield revealed
//! - [`InterruptStack`]: The LIFO interrupt layers over a pending action
//!
//! ## Example Usage
//!
//! ```
//! use shield_duel::core::{GameAction, GameActionKind, PlayerId, Timestamp};
//! use shield_duel::triggers::{InterruptLayer, InterruptStack};
//!
//! let mut stack = InterruptStack::new();
//! stack.begin(GameAction {
//!     id: 0,
//!     kind: GameActionKind::Attack,
//!     player: PlayerId::FIRST,
//!     card: None,
//!     timestamp: Timestamp(1),
//! });
//!
//! for t in 2..5 {
//!     let layer = InterruptLayer { player: PlayerId::SECOND, action: GameActionKind::ShieldTrigger, card: None };
//!     stack.add_interrupt(layer, PlayerId::SECOND, true, Timestamp(t)).unwrap();
//! }
//!
//! let resolution = stack.resolve();
//! let stamps: Vec<_> = resolution.layers.iter().map(|l| l.timestamp.0).collect();
//! assert_eq!(stamps, vec![4, 3, 2]);
//! ```

mod interrupt;
mod shield;

pub use interrupt::{is_interruptible, InterruptLayer, InterruptResolution, InterruptStack};
pub use shield::{
    batch_shield_break, check_shield_break, ChainStatus, ShieldBreakResult, ShieldTriggerEvent,
    ShieldTriggerResponse, ShieldTriggerStack, ShieldTriggerState, TriggerAction,
};
