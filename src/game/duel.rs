//! The match store and its action API.
//!
//! Every action runs against a clone of the current `GameState` and is
//! committed only when it returns `Ok`. A rejected action leaves the
//! match exactly as it was and reports the error in its `ActionResult`.

use log::{info, warn};
use smallvec::SmallVec;

use super::action::{ActionResult, PaymentSelection};
use super::snapshot;
use crate::cards::{CardInstance, CardRegistry, CardType};
use crate::core::{GameActionKind, GameState, InstanceId, Phase, PlayerId, Zone};
use crate::effects::{resolve_ability, EffectContext, EffectResolver};
use crate::error::{Result, RulesError};
use crate::mana::{apply_mana_cost, is_valid_mana_card, validate_mana_cost};
use crate::rules::{self, GameResult};
use crate::stack::{Queued, ResolutionStatus, ResponseId};
use crate::triggers::{InterruptLayer, ShieldTriggerEvent, ShieldTriggerResponse, TriggerAction};

/// A running match.
pub struct Match {
    state: GameState,
    registry: CardRegistry,
    resolver: Box<dyn EffectResolver>,
}

impl Match {
    pub(crate) fn from_parts(state: GameState, registry: CardRegistry, resolver: Box<dyn EffectResolver>) -> Self {
        Self {
            state,
            registry,
            resolver,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.state.is_game_over
    }

    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.state.outcome
    }

    /// Who the match is waiting on.
    #[must_use]
    pub fn status(&self) -> ResolutionStatus {
        match self.state.shield_triggers.next_event() {
            Some(event) => ResolutionStatus::WaitingForResponse(event.payload.player),
            None => ResolutionStatus::Complete,
        }
    }

    /// The shield-trigger event awaiting a response.
    #[must_use]
    pub fn next_trigger(&self) -> Option<&Queued<ShieldTriggerEvent>> {
        self.state.shield_triggers.next_event()
    }

    // === Snapshots ===

    pub fn snapshot(&self) -> Result<Vec<u8>> {
        snapshot::to_bytes(&self.state)
    }

    /// Rebuild a match from a snapshot.
    pub fn restore(bytes: &[u8], registry: CardRegistry, resolver: impl EffectResolver + 'static) -> Result<Self> {
        let state = snapshot::from_bytes(bytes)?;
        Ok(Self::from_parts(state, registry, Box::new(resolver)))
    }

    fn execute<F>(&mut self, f: F) -> ActionResult
    where
        F: FnOnce(&mut GameState, &mut dyn EffectResolver) -> Result<ActionResult>,
    {
        let mut draft = self.state.clone();
        match f(&mut draft, self.resolver.as_mut()) {
            Ok(result) => {
                self.state = draft;
                result
            }
            Err(err) => {
                warn!("action rejected: {}", err);
                ActionResult::failed(err)
            }
        }
    }

    // === Main Phase ===

    /// Play a card from the active player's hand.
    ///
    /// The cost comes out of the mana pool first; the rest is paid with
    /// mana-zone cards, which go to the graveyard. Creatures and
    /// fortresses enter the battle zone, spells go to the graveyard.
    /// The card's ability, if any, is handed to the resolver.
    pub fn play_card(&mut self, card: InstanceId, payment: PaymentSelection) -> ActionResult {
        self.execute(move |state, resolver| {
            ensure_live(state)?;
            ensure_phase(state, Phase::Main)?;
            ensure_no_triggers(state)?;

            let player = state.current_player;
            let instance = require_in_zone(state, card, player, Zone::Hand)?.clone();
            let cost = instance.cost();
            let consumed = pay_cost(state, player, cost, &payment)?;

            let destination = match instance.card_type() {
                CardType::Creature | CardType::Fortress => Zone::BattleZone,
                CardType::Spell => Zone::Graveyard,
            };
            state.move_card(card, destination)?;
            state.turn.record_turn_action(GameActionKind::PlayCard);
            state.turn.record_mana_spent(cost);

            let touched = resolve_ability(state, resolver, card, player, EffectContext::CardPlayed)?;
            info!("{} plays {} for {} mana", player, instance, cost);

            Ok(ActionResult::ok()
                .with_cards([card])
                .with_cards(consumed)
                .with_cards(touched)
                .with_message(format!("{} played {}", player, instance)))
        })
    }

    /// Put a card from hand into the mana zone.
    pub fn charge_mana(&mut self, card: InstanceId) -> ActionResult {
        self.execute(move |state, _| {
            ensure_live(state)?;
            ensure_phase(state, Phase::Main)?;
            ensure_no_triggers(state)?;

            if state.turn.mana_charged >= state.config.mana_charges_per_turn {
                return Err(RulesError::ManaChargeLimit);
            }
            let player = state.current_player;
            let instance = require_in_zone(state, card, player, Zone::Hand)?;
            if !is_valid_mana_card(instance) {
                return Err(RulesError::InvalidManaCard(card));
            }

            state.move_card(card, Zone::ManaZone)?;
            state.turn.record_turn_action(GameActionKind::ChargeMana);
            Ok(ActionResult::ok()
                .with_cards([card])
                .with_message(format!("{} charges {} as mana", player, card)))
        })
    }

    // === Attack Phase ===

    /// Declare an attack. `None` attacks the defending player directly.
    pub fn declare_attack(&mut self, attacker: InstanceId, defender: Option<InstanceId>) -> ActionResult {
        self.execute(move |state, _| {
            ensure_live(state)?;
            ensure_phase(state, Phase::Attack)?;
            ensure_no_triggers(state)?;

            let owner = state.card(attacker)?.owner;
            if owner != state.current_player {
                return Err(RulesError::NotActivePlayer(owner));
            }

            let turn = state.turn_count;
            let timestamp = state.tick();
            let declaration = state
                .battle
                .declare_attack(&mut state.cards, attacker, defender, turn, timestamp)?;
            state.turn.record_turn_action(GameActionKind::Attack);

            let target = match declaration.defender {
                Some(card) => card.to_string(),
                None => state.defending_player().to_string(),
            };
            Ok(ActionResult::ok()
                .with_cards([attacker])
                .with_cards(defender)
                .with_message(format!("{} attacks {}", attacker, target)))
        })
    }

    /// Block a pending attack with one of the defending player's creatures.
    pub fn declare_block(&mut self, blocker: InstanceId, attacker: InstanceId) -> ActionResult {
        self.execute(move |state, _| {
            ensure_live(state)?;
            ensure_phase(state, Phase::Attack)?;
            ensure_no_triggers(state)?;

            let owner = state.card(blocker)?.owner;
            if owner != state.defending_player() {
                return Err(RulesError::NotDefendingPlayer(owner));
            }

            let timestamp = state.tick();
            state
                .battle
                .declare_block(&mut state.cards, blocker, attacker, timestamp)?;
            state.turn.record_turn_action(GameActionKind::Block);

            Ok(ActionResult::ok()
                .with_cards([blocker, attacker])
                .with_message(format!("{} blocks {}", blocker, attacker)))
        })
    }

    /// Resolve all declared battles and break shields.
    pub fn resolve_combat(&mut self) -> ActionResult {
        self.execute(|state, _| {
            ensure_live(state)?;
            ensure_phase(state, Phase::Attack)?;
            ensure_no_triggers(state)?;

            let report = rules::resolve_combat(state)?;
            let mut result = ActionResult::ok().with_cards(report.cards_affected());
            result.messages = report.messages();
            if let Some(outcome) = rules::apply_game_end(state) {
                result = result.with_message(outcome.to_string());
            }
            Ok(result)
        })
    }

    // === Responses ===

    /// Stack an interrupt on the pending attack.
    ///
    /// Only the defending player may interrupt, and only while a shield
    /// trigger is waiting for its response.
    pub fn add_interrupt(
        &mut self,
        player: PlayerId,
        action: GameActionKind,
        card: Option<InstanceId>,
    ) -> ActionResult {
        self.execute(move |state, _| {
            ensure_live(state)?;

            let defending = state.defending_player();
            let window = state.shield_triggers.can_interrupt();
            let timestamp = state.tick();
            let layer = InterruptLayer { player, action, card };
            let id = state.interrupts.add_interrupt(layer, defending, window, timestamp)?;

            Ok(ActionResult::ok()
                .with_cards(card)
                .with_message(format!("{} interrupts with {} ({})", player, action, id)))
        })
    }

    /// Answer the shield-trigger event at the head of the chain.
    ///
    /// `PlayTriggeredCard` puts a creature or fortress into the battle
    /// zone; `CastSpell` casts a spell for free. Either way the card's
    /// ability goes to the resolver. `Pass` keeps the card in hand.
    pub fn respond_to_shield_trigger(&mut self, event: ResponseId, action: TriggerAction) -> ActionResult {
        self.execute(move |state, resolver| {
            ensure_live(state)?;

            let pending = state
                .shield_triggers
                .get(event)
                .ok_or(RulesError::TriggerNotFound(event))?
                .payload
                .clone();
            state.shield_triggers.begin_resolution(event)?;

            let mut result = ActionResult::ok();
            if action != TriggerAction::Pass {
                if let Some(card) = pending.triggered_card {
                    let touched = use_trigger(state, resolver, card, pending.player, action)?;
                    result = result.with_cards(touched);
                }
            }

            let timestamp = state.tick();
            state.shield_triggers.resolve_event(ShieldTriggerResponse {
                player: pending.player,
                event,
                action,
                card: pending.triggered_card,
                timestamp,
            })?;
            result = result.with_message(format!("{} answers {} with {:?}", pending.player, event, action));

            close_chain(state, resolver, result)
        })
    }

    /// Pass on the head trigger event, e.g. when its owner timed out.
    pub fn auto_pass_shield_trigger(&mut self) -> ActionResult {
        self.execute(|state, resolver| {
            ensure_live(state)?;

            let timestamp = state.tick();
            let passed = state.shield_triggers.auto_pass(timestamp)?;
            let result = ActionResult::ok().with_message(format!("{} passed automatically", passed.id));
            close_chain(state, resolver, result)
        })
    }

    // === Turn Flow ===

    /// Discard a card from the active player's hand.
    pub fn discard_from_hand(&mut self, card: InstanceId) -> ActionResult {
        self.execute(move |state, _| {
            ensure_live(state)?;

            let player = state.current_player;
            require_in_zone(state, card, player, Zone::Hand)?;
            state.move_card(card, Zone::Graveyard)?;
            state.turn.record_turn_action(GameActionKind::Discard);

            Ok(ActionResult::ok()
                .with_cards([card])
                .with_message(format!("{} discards {}", player, card)))
        })
    }

    /// Move to the next phase and run it.
    ///
    /// A halted phase (deck-out, open trigger chain) is still committed;
    /// `success` is false and the errors say why.
    pub fn advance_phase(&mut self) -> ActionResult {
        self.execute(|state, _| rules::advance_phase(state).map(ActionResult::from))
    }

    /// Pass the rest of the turn and run the opponent's start phase.
    pub fn end_turn(&mut self) -> ActionResult {
        self.execute(|state, _| {
            state.turn.pass_turn();
            let results = rules::advance_to(state, Phase::Start)?;
            let mut combined = ActionResult::ok();
            for result in results {
                let result = ActionResult::from(result);
                combined.success &= result.success;
                combined.cards_affected.extend(result.cards_affected);
                combined.messages.extend(result.messages);
                combined.errors.extend(result.errors);
            }
            Ok(combined)
        })
    }

    /// Check the end conditions and record a result.
    pub fn check_game_end(&mut self) -> Option<GameResult> {
        rules::apply_game_end(&mut self.state)
    }
}

fn ensure_live(state: &GameState) -> Result<()> {
    if state.is_game_over {
        return Err(RulesError::GameOver);
    }
    Ok(())
}

fn ensure_phase(state: &GameState, phase: Phase) -> Result<()> {
    if state.phase != phase {
        return Err(RulesError::WrongPhase(state.phase));
    }
    Ok(())
}

fn ensure_no_triggers(state: &GameState) -> Result<()> {
    if state.shield_triggers.has_unresolved() {
        return Err(RulesError::TriggersPending);
    }
    Ok(())
}

/// `card` must belong to `player` and sit in `zone`.
fn require_in_zone(state: &GameState, card: InstanceId, player: PlayerId, zone: Zone) -> Result<&CardInstance> {
    let instance = state.card(card)?;
    if instance.owner != player {
        return Err(RulesError::NotActivePlayer(instance.owner));
    }
    if instance.zone != zone {
        return Err(RulesError::CardNotFound(card));
    }
    Ok(instance)
}

/// Pay `cost` for `player` and move consumed mana cards to the graveyard.
fn pay_cost(
    state: &mut GameState,
    player: PlayerId,
    cost: u32,
    payment: &PaymentSelection,
) -> Result<SmallVec<[InstanceId; 4]>> {
    let pool = state.player(player).mana;

    let (from_pool, consumed) = match payment {
        PaymentSelection::Auto => {
            let applied = apply_mana_cost(pool, &state.player(player).zones.mana_zone, cost)?;
            (pool - applied.remaining_mana, applied.consumed)
        }
        PaymentSelection::Cards(ids) => {
            let offered = ids
                .iter()
                .map(|&id| require_in_zone(state, id, player, Zone::ManaZone))
                .collect::<Result<Vec<_>>>()?;
            let plan = validate_mana_cost(cost, pool, &offered)?;
            (plan.from_pool, plan.payment_cards)
        }
    };

    state.player_mut(player).spend_mana(from_pool);
    for &card in &consumed {
        state.move_card(card, Zone::Graveyard)?;
    }
    Ok(consumed)
}

/// Put a triggered card to use and resolve its ability.
fn use_trigger(
    state: &mut GameState,
    resolver: &mut dyn EffectResolver,
    card: InstanceId,
    player: PlayerId,
    action: TriggerAction,
) -> Result<SmallVec<[InstanceId; 4]>> {
    let card_type = require_in_zone(state, card, player, Zone::Hand)?.card_type();
    let destination = match (action, card_type) {
        (TriggerAction::PlayTriggeredCard, CardType::Creature | CardType::Fortress) => Zone::BattleZone,
        (TriggerAction::CastSpell, CardType::Spell) => Zone::Graveyard,
        _ => return Err(RulesError::TriggerActionMismatch(card)),
    };

    state.move_card(card, destination)?;
    let mut touched: SmallVec<[InstanceId; 4]> = SmallVec::new();
    touched.push(card);
    touched.extend(resolve_ability(state, resolver, card, player, EffectContext::ShieldTrigger)?);
    info!("{} uses shield trigger {}", player, card);
    Ok(touched)
}

/// Once the chain is exhausted, unwind interrupts and release the
/// pending attack.
fn close_chain(state: &mut GameState, resolver: &mut dyn EffectResolver, mut result: ActionResult) -> Result<ActionResult> {
    if state.shield_triggers.has_unresolved() {
        return Ok(result);
    }

    let resolution = state.interrupts.resolve();
    for layer in &resolution.layers {
        if let Some(card) = layer.payload.card {
            let touched = resolve_ability(state, resolver, card, layer.payload.player, EffectContext::Interrupt)?;
            result = result.with_cards(touched);
        }
    }
    if let Some(action) = &resolution.main_action {
        state.pop_action();
        result = result.with_message(format!(
            "chain complete, {} resumes after {} interrupt(s)",
            action.kind,
            resolution.layers.len()
        ));
    }

    if let Some(outcome) = rules::apply_game_end(state) {
        result = result.with_message(outcome.to_string());
    }
    Ok(result)
}
