//! Match store and action API.
//!
//! A `Match` owns the `GameState`, the template catalog and the host's
//! effect resolver. Hosts build one with `MatchBuilder` and drive it with
//! the action methods; each returns an `ActionResult`.
//!
//! ## Key Components
//!
//! - [`MatchBuilder`]: Decks, config, resolver and seed
//! - [`Match`]: Actions, status and snapshots
//! - [`ActionResult`]: Success flag, affected cards, messages and errors

mod action;
mod builder;
mod duel;
pub mod snapshot;

pub use action::{ActionResult, PaymentSelection};
pub use builder::MatchBuilder;
pub use duel::Match;
