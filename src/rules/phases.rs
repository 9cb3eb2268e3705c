//! Turn phase engine.
//!
//! `advance_phase` moves the match to the next phase and runs that
//! phase's automatic effects. Each phase reports back a `PhaseResult`;
//! `success == false` means automatic advancement must stop (deck-out,
//! an open trigger chain).

use log::{debug, info, warn};

use super::combat::resolve_combat;
use super::end::{apply_game_end, EndReason, GameResult};
use super::turn::TurnState;
use crate::battle::can_attack;
use crate::core::{GameState, InstanceId, Phase, Zone};
use crate::error::{Result, RulesError};
use crate::mana::reset_mana_for_new_turn;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PhaseResult {
    pub success: bool,
    pub phase: Phase,
    /// `None` when advancement is halted.
    pub next_phase: Option<Phase>,
    pub messages: Vec<String>,
    pub cards_affected: Vec<InstanceId>,
    pub errors: Vec<RulesError>,
}

impl PhaseResult {
    fn ok(phase: Phase) -> Self {
        Self {
            success: true,
            phase,
            next_phase: Some(phase.next()),
            messages: Vec::new(),
            cards_affected: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn halt(mut self, error: RulesError) -> Self {
        self.success = false;
        self.next_phase = None;
        self.errors.push(error);
        self
    }
}

/// Run the automatic effects of `phase` for the active player.
pub fn execute_phase(state: &mut GameState, phase: Phase) -> PhaseResult {
    match phase {
        Phase::Start => execute_start(state),
        Phase::Draw => execute_draw(state),
        Phase::Main => execute_main(state),
        Phase::Attack => execute_attack(state),
        Phase::End => execute_end(state),
    }
}

/// Refresh the active player's creatures and refill mana.
pub fn execute_start(state: &mut GameState) -> PhaseResult {
    let mut result = PhaseResult::ok(Phase::Start);
    let player = state.current_player;

    let creatures: Vec<InstanceId> = state.player(player).zones.battle_zone.iter().copied().collect();
    for id in creatures {
        match state.cards.update(id, |c| c.reset_combat_state()) {
            Ok(()) => result.cards_affected.push(id),
            Err(err) => result.errors.push(err),
        }
    }

    let growth = state.config.mana_per_turn;
    let ceiling = state.config.max_mana;
    let p = state.player_mut(player);
    let refill = reset_mana_for_new_turn(p.max_mana, growth, p.zones.mana_zone.len(), ceiling);
    p.max_mana = refill.max_mana;
    p.mana = refill.mana;

    state.battle.reset();

    result.messages.push(format!(
        "{} readies {} creature(s), mana {}/{} ({} available)",
        player,
        result.cards_affected.len(),
        refill.mana,
        refill.max_mana,
        refill.available
    ));
    result
}

/// Draw one card. An empty deck loses the match.
pub fn execute_draw(state: &mut GameState) -> PhaseResult {
    let result = PhaseResult::ok(Phase::Draw);
    let player = state.current_player;

    match state.draw_cards(player, 1) {
        Ok(drawn) => PhaseResult {
            messages: vec![format!("{} draws {} card(s)", player, drawn.len())],
            cards_affected: drawn.into_vec(),
            ..result
        },
        Err(err) => {
            if matches!(err, RulesError::DeckEmpty(_)) {
                let outcome = GameResult::loss(player, EndReason::DeckOut);
                info!("{}", outcome);
                state.finish(outcome);
            }
            warn!("draw failed: {}", err);
            result.halt(err)
        }
    }
}

pub fn execute_main(state: &mut GameState) -> PhaseResult {
    let mut result = PhaseResult::ok(Phase::Main);
    result.messages.push(format!("{} may play cards", state.current_player));
    result
}

/// Report the creatures eligible to attack this turn.
pub fn execute_attack(state: &mut GameState) -> PhaseResult {
    let mut result = PhaseResult::ok(Phase::Attack);
    let player = state.current_player;
    let turn = state.turn_count;

    result.cards_affected = state
        .cards_in(player, Zone::BattleZone)
        .filter(|c| can_attack(c, turn))
        .map(|c| c.id)
        .collect();
    result
        .messages
        .push(format!("{} has {} eligible attacker(s)", player, result.cards_affected.len()));
    result
}

/// Report hand overflow. Discarding is left to the player.
pub fn execute_end(state: &mut GameState) -> PhaseResult {
    let mut result = PhaseResult::ok(Phase::End);
    let player = state.current_player;
    let hand = state.player(player).zones.hand.len();
    let limit = state.config.max_hand_size;

    if hand > limit {
        result.messages.push(format!(
            "{} holds {} cards, {} over the limit of {}",
            player,
            hand,
            hand - limit,
            limit
        ));
    }
    result
}

/// Enter the next phase and execute it.
///
/// Leaving the attack phase resolves pending battles first. If that opens
/// a shield-trigger chain or decides the match, the phase stays put and
/// the result reports the halt.
pub fn advance_phase(state: &mut GameState) -> Result<PhaseResult> {
    if state.is_game_over {
        return Err(RulesError::GameOver);
    }
    if state.shield_triggers.has_unresolved() {
        return Err(RulesError::TriggersPending);
    }

    let mut combat_messages = Vec::new();
    let mut combat_cards = Vec::new();
    if state.phase == Phase::Attack && state.battle.has_pending() {
        let report = resolve_combat(state)?;
        combat_messages = report.messages();
        combat_cards = report.cards_affected();

        let halted = if apply_game_end(state).is_some() {
            Some(RulesError::GameOver)
        } else if report.triggers_pending {
            Some(RulesError::TriggersPending)
        } else {
            None
        };
        if let Some(error) = halted {
            let mut result = PhaseResult::ok(Phase::Attack).halt(error);
            result.messages = combat_messages;
            result.cards_affected = combat_cards;
            return Ok(result);
        }
    }

    let from = state.phase;
    let next = from.next();
    if from.wraps() {
        state.turn_count += 1;
        state.current_player = state.current_player.opponent();
        state.turn = TurnState::new(state.turn_count, state.current_player);
        info!("turn {} begins for {}", state.turn_count, state.current_player);
    }
    state.phase = next;
    debug!("{} -> {} (turn {})", from, next, state.turn_count);

    let mut result = execute_phase(state, next);
    if !combat_messages.is_empty() {
        combat_messages.append(&mut result.messages);
        result.messages = combat_messages;
        combat_cards.append(&mut result.cards_affected);
        result.cards_affected = combat_cards;
    }
    Ok(result)
}

/// Advance until `target` is reached or a phase halts.
pub fn advance_to(state: &mut GameState, target: Phase) -> Result<Vec<PhaseResult>> {
    let mut results = Vec::new();
    loop {
        let result = advance_phase(state)?;
        let halted = !result.success;
        results.push(result);
        if halted || state.phase == target {
            return Ok(results);
        }
    }
}
