//! Effect system for card abilities.
//!
//! Ability text is an opaque tag. The host supplies an `EffectResolver`
//! that turns a tag into `EffectMutation`s; the engine applies them.
//!
//! ## Design Philosophy
//!
//! The engine never interprets rules text. Mutations are limited to
//! generic operations:
//! - Move cards between zones
//! - Tap, untap and damage cards
//! - Draw cards and adjust mana

mod effect;
mod resolver;

pub use effect::{EffectContext, EffectMutation, EffectRequest};
pub use resolver::{apply_mutations, request_for, resolve_ability, EffectResolver, NoopResolver};
