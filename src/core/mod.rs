//! Core engine types: ids, players, phases, zones, clock, RNG,
//! configuration and the game state aggregate.

pub mod clock;
pub mod config;
pub mod entity;
pub mod phase;
pub mod player;
pub mod rng;
pub mod state;
pub mod zone;

pub use clock::{MatchClock, Timestamp};
pub use config::{EndCondition, RulesConfig};
pub use entity::{InstanceAllocator, InstanceId};
pub use phase::Phase;
pub use player::{PlayerId, PlayerPair};
pub use rng::{GameRng, GameRngState};
pub use state::{GameAction, GameActionKind, GameId, GameState, MoveRecord, PlayerState};
pub use zone::Zone;
