//! Turn structure and match rules.
//!
//! - [`TurnState`]: what the active player has done this turn
//! - [`advance_phase`]: the start → draw → main → attack → end cycle
//! - [`resolve_combat`]: battles plus shield breaks
//! - [`check_game_end`]: deck-out and the configured shield policy

mod combat;
mod end;
mod phases;
mod turn;

pub use combat::{resolve_combat, CombatReport};
pub use end::{apply_game_end, check_game_end, EndReason, GameResult};
pub use phases::{
    advance_phase, advance_to, execute_attack, execute_draw, execute_end, execute_main, execute_phase,
    execute_start, PhaseResult,
};
pub use turn::TurnState;
