//! Per-turn bookkeeping.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{GameActionKind, PlayerId};

/// What the active player has done so far this turn.
///
/// Replaced wholesale when the turn passes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnState {
    pub turn_number: u32,
    pub current_player: PlayerId,
    pub actions: Vector<GameActionKind>,
    pub cards_played: u32,
    pub attacks_declared: u32,
    pub mana_spent: u32,
    /// Cards charged from hand into the mana zone.
    pub mana_charged: u32,
    pub phase_passed: bool,
}

impl TurnState {
    #[must_use]
    pub fn new(turn_number: u32, current_player: PlayerId) -> Self {
        Self {
            turn_number,
            current_player,
            actions: Vector::new(),
            cards_played: 0,
            attacks_declared: 0,
            mana_spent: 0,
            mana_charged: 0,
            phase_passed: false,
        }
    }

    /// Count an action against this turn.
    pub fn record_turn_action(&mut self, kind: GameActionKind) {
        match kind {
            GameActionKind::PlayCard => self.cards_played += 1,
            GameActionKind::ChargeMana => self.mana_charged += 1,
            GameActionKind::Attack => self.attacks_declared += 1,
            GameActionKind::PassTurn => self.phase_passed = true,
            GameActionKind::Block
            | GameActionKind::ShieldBreak
            | GameActionKind::DamageAssignment
            | GameActionKind::ShieldTrigger
            | GameActionKind::Discard => {}
        }
        self.actions.push_back(kind);
    }

    pub fn record_mana_spent(&mut self, amount: u32) {
        self.mana_spent += amount;
    }

    /// Mark the current phase as passed by the active player.
    pub fn pass_turn(&mut self) {
        self.record_turn_action(GameActionKind::PassTurn);
    }
}

impl std::fmt::Display for TurnState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Turn {} ({}): {} card(s) played, {} attack(s), {} mana spent, {} charged",
            self.turn_number, self.current_player, self.cards_played, self.attacks_declared, self.mana_spent, self.mana_charged
        )?;
        if self.phase_passed {
            write!(f, ", passed")?;
        }
        Ok(())
    }
}
