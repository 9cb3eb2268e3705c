//! Combat resolution against the game state.
//!
//! Drains the pending battles, writes damage and destruction back, then
//! breaks one defending shield per unblocked attacker. Hits beyond the
//! remaining shields land as direct hits and push the shield count below
//! zero.

use log::info;
use smallvec::SmallVec;

use crate::battle::{apply_battle_results, BattleSummary};
use crate::core::{GameActionKind, GameState, InstanceId, Zone};
use crate::error::Result;
use crate::triggers::{batch_shield_break, ShieldBreakResult};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CombatReport {
    pub summary: BattleSummary,
    /// Creatures sent to the graveyard by battle damage.
    pub destroyed: SmallVec<[InstanceId; 4]>,
    /// Shields broken, in shield order.
    pub breaks: Vec<ShieldBreakResult>,
    pub direct_hits: u32,
    /// True when the breaks opened a shield-trigger chain.
    pub triggers_pending: bool,
}

impl CombatReport {
    /// Every card that changed zone.
    #[must_use]
    pub fn cards_affected(&self) -> Vec<InstanceId> {
        self.destroyed
            .iter()
            .copied()
            .chain(self.breaks.iter().filter_map(|b| b.revealed))
            .collect()
    }

    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        let mut messages: Vec<String> = self.summary.results.iter().map(ToString::to_string).collect();
        messages.extend(self.breaks.iter().map(ToString::to_string));
        messages
    }
}

/// Resolve every pending battle and break shields for unblocked hits.
///
/// Triggering shields go to their owner's hand and open a chain on
/// `shield_triggers`; the attack is then held on the interrupt stack until
/// the chain is done. Other broken shields go to the graveyard.
pub fn resolve_combat(state: &mut GameState) -> Result<CombatReport> {
    let summary = state.battle.resolve_all_battles(&state.cards)?;
    let destroyed = apply_battle_results(state, &summary.results)?;

    let defending = state.defending_player();
    let hits = summary.unblocked_hits;
    let available = state.players[defending].zones.shield_zone.len();
    let indices: Vec<usize> = (0..hits.min(available)).collect();

    let mut breaks = Vec::new();
    if !indices.is_empty() {
        breaks = batch_shield_break(
            &state.players[defending].zones.shield_zone,
            &indices,
            defending,
            &state.cards,
            &mut state.shield_triggers,
            &mut state.clock,
        )?;

        for result in &breaks {
            let Some(card) = result.revealed else { continue };
            let to = if result.triggered.is_some() { Zone::Hand } else { Zone::Graveyard };
            state.move_card(card, to)?;
            state.player_mut(defending).shields_destroyed += 1;
        }
    }

    let direct_hits = (hits - indices.len()) as u32;
    for _ in 0..direct_hits {
        state.player_mut(defending).shields -= 1;
        state.shield_triggers.record_break(ShieldBreakResult::direct_hit(defending));
    }

    let triggers_pending = state.shield_triggers.has_unresolved();
    if triggers_pending {
        let attacker = state.current_player;
        let action = state.push_action(GameActionKind::Attack, attacker, None);
        state.interrupts.begin(action);
    }

    info!(
        "combat: {} battle(s), {} shield(s) broken, {} direct hit(s) on {}",
        summary.results.len(),
        breaks.len(),
        direct_hits,
        defending
    );

    Ok(CombatReport {
        summary,
        destroyed,
        breaks,
        direct_hits,
        triggers_pending,
    })
}
