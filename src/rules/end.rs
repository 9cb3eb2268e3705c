//! Win/loss detection.

use log::info;
use serde::{Deserialize, Serialize};

use crate::core::{EndCondition, GameState, PlayerId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// The loser had to draw from an empty deck.
    DeckOut,
    /// The loser took a direct hit with no shields left.
    ShieldsBelowZero,
    /// The loser had this many shields destroyed.
    ShieldsDestroyed(u32),
}

/// Result of a completed match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub winner: PlayerId,
    pub loser: PlayerId,
    pub reason: EndReason,
}

impl GameResult {
    /// `loser` lost for `reason`; the opponent wins.
    #[must_use]
    pub fn loss(loser: PlayerId, reason: EndReason) -> Self {
        Self {
            winner: loser.opponent(),
            loser,
            reason,
        }
    }

    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winner == player
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self.reason {
            EndReason::DeckOut => "decked out".to_string(),
            EndReason::ShieldsBelowZero => "ran out of shields".to_string(),
            EndReason::ShieldsDestroyed(n) => format!("lost {} shields", n),
        };
        write!(f, "{} wins: {} {}", self.winner, self.loser, reason)
    }
}

/// Check whether the match is decided.
///
/// A recorded result (e.g. a deck-out during the draw phase) takes
/// precedence. Otherwise the shield policy from the config is applied to
/// the defending player first, then the active player.
#[must_use]
pub fn check_game_end(state: &GameState) -> Option<GameResult> {
    if let Some(outcome) = state.outcome {
        return Some(outcome);
    }

    let order = [state.defending_player(), state.current_player];
    order.into_iter().find_map(|player| {
        let p = state.player(player);
        match state.config.end_condition {
            EndCondition::ShieldsBelowZero if p.shields < 0 => {
                Some(GameResult::loss(player, EndReason::ShieldsBelowZero))
            }
            EndCondition::ShieldsDestroyed(limit) if p.shields_destroyed >= limit => {
                Some(GameResult::loss(player, EndReason::ShieldsDestroyed(limit)))
            }
            _ => None,
        }
    })
}

/// Run `check_game_end` and record the result on the state.
pub fn apply_game_end(state: &mut GameState) -> Option<GameResult> {
    let result = check_game_end(state)?;
    if !state.is_game_over {
        info!("{}", result);
        state.finish(result);
    }
    Some(result)
}
