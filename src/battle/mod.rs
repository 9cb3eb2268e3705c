//! Battle system: attack and block declarations, damage resolution.
//!
//! Attacks accumulate in `BattlePhaseState::pending` until resolved.
//! Resolution is pure (`resolve_battle`); `apply_battle_results` writes the
//! outcome back to the game state.

mod declaration;
mod resolution;

pub use declaration::{can_attack, can_block, AttackDeclaration, BattlePhaseState, BlockDeclaration};
pub use resolution::{apply_battle_results, resolve_battle, BattleResult, BattleSummary, BattleWinner};
