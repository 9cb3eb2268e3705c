//! # shield-duel
//!
//! Rules engine for a two-player card game played with shields.
//!
//! Each player has a deck, a hand, a mana zone, a battle zone, a shield
//! zone and a graveyard. Turns cycle start → draw → main → attack → end.
//! Unblocked attackers break shields; a broken shield carrying the
//! trigger marker can be used for free by its owner before the attack
//! completes.
//!
//! ## Design Principles
//!
//! 1. **One Store**: All match state lives in `GameState`. Cards are value
//!    records in a flat arena keyed by instance id; zones hold ids.
//!
//! 2. **Commit on Success**: Actions run on a cheap clone (persistent `im`
//!    collections) and replace the state only when they succeed.
//!
//! 3. **Deterministic**: A seeded RNG drives every shuffle and a
//!    monotonic clock stamps every event, so a seed plus an action list
//!    replays a match exactly.
//!
//! 4. **Opaque Abilities**: The engine never interprets rules text. An
//!    `EffectResolver` supplied by the host turns ability tags into
//!    zone and stat mutations.
//!
//! ## Modules
//!
//! - `core`: Ids, players, phases, zones, clock, RNG, config, game state
//! - `cards`: Templates, instances, arena and registry
//! - `zones`: Pure zone moves and per-player zone lists
//! - `mana`: Cost validation, payment and refill
//! - `battle`: Attack/block declarations and damage
//! - `stack`: Generic responder queue shared by both response stacks
//! - `triggers`: Shield-trigger chain and interrupt stack
//! - `effects`: Effect resolver seam and mutations
//! - `rules`: Turn state, phase engine, combat and end conditions
//! - `game`: The `Match` action API and snapshots

pub mod battle;
pub mod cards;
pub mod core;
pub mod effects;
pub mod error;
pub mod game;
pub mod mana;
pub mod rules;
pub mod stack;
pub mod triggers;
pub mod zones;

// Re-export commonly used types
pub use crate::core::{
    EndCondition, GameAction, GameActionKind, GameRng, GameRngState, GameState, InstanceId, Phase, PlayerId,
    PlayerPair, PlayerState, RulesConfig, Timestamp, Zone,
};

pub use crate::cards::{CardArena, CardInstance, CardRegistry, CardTemplate, CardType, Rarity, TemplateId};

pub use crate::zones::{PlayerZones, ZoneCards};

pub use crate::battle::{BattlePhaseState, BattleResult, BattleWinner};

pub use crate::stack::{ResolutionStatus, ResponderQueue, ResponseId};

pub use crate::triggers::{InterruptStack, ShieldBreakResult, ShieldTriggerEvent, ShieldTriggerStack, TriggerAction};

pub use crate::effects::{EffectMutation, EffectRequest, EffectResolver, NoopResolver};

pub use crate::rules::{EndReason, GameResult, PhaseResult, TurnState};

pub use crate::game::{ActionResult, Match, MatchBuilder, PaymentSelection};

pub use crate::error::{Result, RulesError};
