//! Shield trigger and interrupt integration tests.
//!
//! The second player's deck is all trigger creatures, so every broken
//! shield opens a chain.

use std::cell::RefCell;
use std::rc::Rc;

use shield_duel::cards::{CardRegistry, CardTemplate, CardType, TemplateId};
use shield_duel::core::{EndCondition, GameActionKind, InstanceId, Phase, PlayerId, RulesConfig, Zone};
use shield_duel::effects::{EffectContext, EffectMutation, EffectRequest};
use shield_duel::error::RulesError;
use shield_duel::game::{Match, MatchBuilder, PaymentSelection};
use shield_duel::rules::EndReason;
use shield_duel::stack::ResolutionStatus;
use shield_duel::triggers::TriggerAction;
use shield_duel::GameState;

const BOLSHACK: TemplateId = TemplateId(1);
const TRIGGER_GUARD: TemplateId = TemplateId(2);
const PLAIN_GUARD: TemplateId = TemplateId(3);

type Calls = Rc<RefCell<Vec<(InstanceId, EffectContext, String)>>>;

fn registry() -> CardRegistry {
    CardRegistry::from_templates(vec![
        CardTemplate::new(BOLSHACK, "Bolshack Dragon", CardType::Creature)
            .with_cost(1)
            .with_power(3000),
        CardTemplate::new(TRIGGER_GUARD, "Emerald Sentry", CardType::Creature)
            .with_cost(1)
            .with_power(1000)
            .with_ability("shield-trigger:guard"),
        CardTemplate::new(PLAIN_GUARD, "Aqua Soldier", CardType::Creature)
            .with_cost(1)
            .with_power(1000),
    ])
}

fn recording_duel(config: RulesConfig, defender_deck: TemplateId) -> (Match, Calls) {
    let calls: Calls = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&calls);
    let resolver = move |request: &EffectRequest, _state: &GameState| {
        log.borrow_mut()
            .push((request.source, request.context, request.tag.clone()));
        Vec::<EffectMutation>::new()
    };

    let duel = MatchBuilder::new(registry())
        .config(config)
        .deck(PlayerId::FIRST, vec![BOLSHACK; 20])
        .deck(PlayerId::SECOND, vec![defender_deck; 20])
        .resolver(resolver)
        .build(7)
        .unwrap();
    (duel, calls)
}

fn advance_to(duel: &mut Match, phase: Phase) {
    loop {
        let result = duel.advance_phase();
        assert!(result.success, "advance failed: {:?}", result.errors);
        if duel.state().phase == phase {
            return;
        }
    }
}

/// Play a Bolshack on turn 1, pass turn 2, and attack directly on turn 3.
fn attack_into_shields(duel: &mut Match) -> InstanceId {
    advance_to(duel, Phase::Main);
    let attacker = *duel.state().player(PlayerId::FIRST).zones.hand.front().unwrap();
    assert!(duel.play_card(attacker, PaymentSelection::Auto).success);
    advance_to(duel, Phase::Start);
    advance_to(duel, Phase::Start);
    advance_to(duel, Phase::Attack);

    assert!(duel.declare_attack(attacker, None).success);
    attacker
}

#[test]
fn test_broken_trigger_opens_chain() {
    let (mut duel, _) = recording_duel(RulesConfig::default(), TRIGGER_GUARD);
    attack_into_shields(&mut duel);
    let top_shield = *duel.state().player(PlayerId::SECOND).zones.shield_zone.front().unwrap();

    assert!(duel.resolve_combat().success);

    assert_eq!(duel.status(), ResolutionStatus::WaitingForResponse(PlayerId::SECOND));
    let event = duel.next_trigger().unwrap();
    assert_eq!(event.payload.triggered_card, Some(top_shield));
    assert_eq!(duel.state().card(top_shield).unwrap().zone, Zone::Hand);
    assert_eq!(duel.state().player(PlayerId::SECOND).shields, 3);

    let blocked = duel.advance_phase();
    assert_eq!(blocked.error(), Some(&RulesError::TriggersPending));
}

#[test]
fn test_block_waits_for_open_chain() {
    let (mut duel, _) = recording_duel(RulesConfig::default(), TRIGGER_GUARD);
    let attacker = attack_into_shields(&mut duel);
    let top_shield = *duel.state().player(PlayerId::SECOND).zones.shield_zone.front().unwrap();
    assert!(duel.resolve_combat().success);

    let block = duel.declare_block(top_shield, attacker);
    assert_eq!(block.error(), Some(&RulesError::TriggersPending));
}

#[test]
fn test_play_triggered_creature() {
    let (mut duel, calls) = recording_duel(RulesConfig::default(), TRIGGER_GUARD);
    attack_into_shields(&mut duel);
    assert!(duel.resolve_combat().success);
    let event = duel.next_trigger().unwrap().clone();
    let card = event.payload.triggered_card.unwrap();

    let result = duel.respond_to_shield_trigger(event.id, TriggerAction::PlayTriggeredCard);

    assert!(result.success, "{:?}", result.errors);
    assert_eq!(duel.state().card(card).unwrap().zone, Zone::BattleZone);
    assert_eq!(duel.status(), ResolutionStatus::Complete);
    assert!(duel.state().action_stack.is_empty());
    assert_eq!(
        calls.borrow().as_slice(),
        &[(card, EffectContext::ShieldTrigger, "shield-trigger:guard".to_string())]
    );
    assert!(duel.advance_phase().success);
}

#[test]
fn test_mismatched_trigger_action_is_rejected() {
    let (mut duel, calls) = recording_duel(RulesConfig::default(), TRIGGER_GUARD);
    attack_into_shields(&mut duel);
    assert!(duel.resolve_combat().success);
    let event = duel.next_trigger().unwrap().clone();
    let card = event.payload.triggered_card.unwrap();

    let result = duel.respond_to_shield_trigger(event.id, TriggerAction::CastSpell);

    assert_eq!(result.error(), Some(&RulesError::TriggerActionMismatch(card)));
    assert_eq!(duel.next_trigger().map(|e| e.id), Some(event.id));
    assert!(calls.borrow().is_empty());
}

#[test]
fn test_pass_keeps_card_in_hand() {
    let (mut duel, calls) = recording_duel(RulesConfig::default(), TRIGGER_GUARD);
    attack_into_shields(&mut duel);
    assert!(duel.resolve_combat().success);
    let event = duel.next_trigger().unwrap().clone();
    let card = event.payload.triggered_card.unwrap();

    assert!(duel.respond_to_shield_trigger(event.id, TriggerAction::Pass).success);

    assert_eq!(duel.state().card(card).unwrap().zone, Zone::Hand);
    assert!(calls.borrow().is_empty());
    assert_eq!(duel.state().shield_triggers.history().len(), 1);
}

#[test]
fn test_unknown_event_id() {
    let (mut duel, _) = recording_duel(RulesConfig::default(), TRIGGER_GUARD);
    attack_into_shields(&mut duel);
    assert!(duel.resolve_combat().success);

    let bogus = shield_duel::stack::ResponseId(77);
    let result = duel.respond_to_shield_trigger(bogus, TriggerAction::Pass);
    assert_eq!(result.error(), Some(&RulesError::TriggerNotFound(bogus)));
}

#[test]
fn test_auto_pass() {
    let (mut duel, _) = recording_duel(RulesConfig::default(), TRIGGER_GUARD);
    attack_into_shields(&mut duel);
    assert!(duel.resolve_combat().success);

    assert!(duel.auto_pass_shield_trigger().success);
    assert_eq!(duel.status(), ResolutionStatus::Complete);

    let history = duel.state().shield_triggers.history();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].action, TriggerAction::Pass);

    let again = duel.auto_pass_shield_trigger();
    assert_eq!(again.error(), Some(&RulesError::NoTriggerPending));
}

#[test]
fn test_interrupts_unwind_newest_first() {
    let (mut duel, calls) = recording_duel(RulesConfig::default(), TRIGGER_GUARD);
    attack_into_shields(&mut duel);
    assert!(duel.resolve_combat().success);

    let triggered = duel.next_trigger().unwrap().payload.triggered_card.unwrap();
    let hand: Vec<InstanceId> = duel
        .state()
        .player(PlayerId::SECOND)
        .zones
        .hand
        .iter()
        .copied()
        .filter(|&c| c != triggered)
        .collect();
    let (older, newer) = (hand[0], hand[1]);

    assert!(duel
        .add_interrupt(PlayerId::SECOND, GameActionKind::ShieldTrigger, Some(older))
        .success);
    assert!(duel.add_interrupt(PlayerId::SECOND, GameActionKind::PlayCard, None).success);
    assert!(duel
        .add_interrupt(PlayerId::SECOND, GameActionKind::ShieldTrigger, Some(newer))
        .success);

    let wrong = duel.add_interrupt(PlayerId::FIRST, GameActionKind::PlayCard, None);
    assert_eq!(wrong.error(), Some(&RulesError::NotDefendingPlayer(PlayerId::FIRST)));

    assert!(duel.auto_pass_shield_trigger().success);

    let order: Vec<(InstanceId, EffectContext)> = calls.borrow().iter().map(|(c, ctx, _)| (*c, *ctx)).collect();
    assert_eq!(
        order,
        vec![(newer, EffectContext::Interrupt), (older, EffectContext::Interrupt)]
    );
    assert!(duel.state().interrupts.main_action().is_none());
    assert!(duel
        .state()
        .interrupts
        .log()
        .any(|line| line == "resolve main action attack"));
}

#[test]
fn test_interrupt_needs_open_trigger() {
    let (mut duel, _) = recording_duel(RulesConfig::default(), TRIGGER_GUARD);
    attack_into_shields(&mut duel);

    let result = duel.add_interrupt(PlayerId::SECOND, GameActionKind::PlayCard, None);
    assert_eq!(result.error(), Some(&RulesError::NoTriggerPending));
}

#[test]
fn test_plain_shields_open_no_chain() {
    let (mut duel, _) = recording_duel(RulesConfig::default(), PLAIN_GUARD);
    attack_into_shields(&mut duel);
    assert!(duel.resolve_combat().success);

    assert_eq!(duel.status(), ResolutionStatus::Complete);
    assert_eq!(duel.state().player(PlayerId::SECOND).zones.graveyard.len(), 1);
}

#[test]
fn test_direct_hit_without_shields_ends_match() {
    let config = RulesConfig::default().with_initial_shields(0);
    let (mut duel, _) = recording_duel(config, PLAIN_GUARD);
    attack_into_shields(&mut duel);

    let result = duel.resolve_combat();

    assert!(result.success);
    assert!(duel.is_over());
    let outcome = duel.result().unwrap();
    assert_eq!(outcome.winner, PlayerId::FIRST);
    assert_eq!(outcome.reason, EndReason::ShieldsBelowZero);
    assert_eq!(duel.state().player(PlayerId::SECOND).shields, -1);

    assert_eq!(duel.advance_phase().error(), Some(&RulesError::GameOver));
}

#[test]
fn test_shields_destroyed_policy_ends_match() {
    let config = RulesConfig::default().with_end_condition(EndCondition::ShieldsDestroyed(1));
    let (mut duel, _) = recording_duel(config, PLAIN_GUARD);
    attack_into_shields(&mut duel);

    assert!(duel.resolve_combat().success);

    let outcome = duel.result().unwrap();
    assert_eq!(outcome.loser, PlayerId::SECOND);
    assert_eq!(outcome.reason, EndReason::ShieldsDestroyed(1));
    assert_eq!(duel.state().player(PlayerId::SECOND).shields, 3);
}

#[test]
fn test_shields_below_zero_policy_ignores_breaks() {
    let (mut duel, _) = recording_duel(RulesConfig::default(), PLAIN_GUARD);
    attack_into_shields(&mut duel);

    assert!(duel.resolve_combat().success);
    assert!(!duel.is_over());
    assert_eq!(duel.check_game_end(), None);
}

#[test]
fn test_chain_follows_shield_order() {
    let (mut duel, _) = recording_duel(RulesConfig::default(), TRIGGER_GUARD);
    let mut attackers = Vec::new();

    advance_to(&mut duel, Phase::Main);
    for plays in [1, 2] {
        for _ in 0..plays {
            let card = *duel.state().player(PlayerId::FIRST).zones.hand.front().unwrap();
            assert!(duel.play_card(card, PaymentSelection::Auto).success);
            attackers.push(card);
        }
        advance_to(&mut duel, Phase::Start);
        advance_to(&mut duel, Phase::Start);
        advance_to(&mut duel, Phase::Main);
    }
    advance_to(&mut duel, Phase::Attack);
    assert_eq!(duel.state().turn_count, 5);

    let shields: Vec<InstanceId> = duel.state().player(PlayerId::SECOND).zones.shield_zone.iter().copied().collect();
    for &attacker in &attackers {
        assert!(duel.declare_attack(attacker, None).success);
    }
    assert!(duel.resolve_combat().success);

    let chain = duel.state().shield_triggers.chain();
    assert_eq!(chain.length, 3);
    assert_eq!(chain.resolved, 0);

    let second = duel.state().shield_triggers.get(shield_duel::stack::ResponseId(chain.next.unwrap().0 + 1)).unwrap().id;
    let early = duel.respond_to_shield_trigger(second, TriggerAction::Pass);
    assert_eq!(early.error(), Some(&RulesError::TriggerNotFound(second)));

    for expected in &shields[..3] {
        let event = duel.next_trigger().unwrap().clone();
        assert_eq!(event.payload.triggered_card, Some(*expected));
        assert!(duel.respond_to_shield_trigger(event.id, TriggerAction::Pass).success);
    }
    assert_eq!(duel.status(), ResolutionStatus::Complete);
    assert_eq!(duel.state().player(PlayerId::SECOND).shields, 1);
}
