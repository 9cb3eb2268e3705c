//! Effect resolution.
//!
//! `EffectResolver` is the seam to the host's ability interpreter. The
//! engine builds an `EffectRequest`, asks the resolver for mutations and
//! applies them with `apply_mutations`.

use log::{debug, warn};
use smallvec::SmallVec;

use super::effect::{EffectContext, EffectMutation, EffectRequest};
use crate::core::{GameState, InstanceId, PlayerId, Zone};
use crate::error::Result;

/// Interprets ability tags.
///
/// Implementations must be deterministic given the request and state for
/// replays to match.
pub trait EffectResolver {
    fn resolve(&mut self, request: &EffectRequest, state: &GameState) -> Vec<EffectMutation>;
}

impl<F> EffectResolver for F
where
    F: FnMut(&EffectRequest, &GameState) -> Vec<EffectMutation>,
{
    fn resolve(&mut self, request: &EffectRequest, state: &GameState) -> Vec<EffectMutation> {
        self(request, state)
    }
}

/// Resolver that ignores every tag.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopResolver;

impl EffectResolver for NoopResolver {
    fn resolve(&mut self, request: &EffectRequest, _state: &GameState) -> Vec<EffectMutation> {
        debug!("ignoring ability '{}' of {}", request.tag, request.source);
        Vec::new()
    }
}

/// Build a request for `source`'s ability, if it has one.
pub fn request_for(
    state: &GameState,
    source: InstanceId,
    controller: PlayerId,
    context: EffectContext,
) -> Result<Option<EffectRequest>> {
    let card = state.card(source)?;
    Ok(card.template.ability_tag().map(|tag| EffectRequest {
        source,
        controller,
        tag: tag.to_string(),
        context,
    }))
}

/// Ask the resolver about `source`'s ability and apply the answer.
///
/// Returns the cards touched by the mutations.
pub fn resolve_ability(
    state: &mut GameState,
    resolver: &mut dyn EffectResolver,
    source: InstanceId,
    controller: PlayerId,
    context: EffectContext,
) -> Result<SmallVec<[InstanceId; 4]>> {
    let Some(request) = request_for(state, source, controller, context)? else {
        return Ok(SmallVec::new());
    };
    let mutations = resolver.resolve(&request, state);
    debug!("{} '{}' -> {} mutation(s)", source, request.tag, mutations.len());
    apply_mutations(state, &mutations)
}

/// Apply mutations in order. Stops at the first one that fails.
pub fn apply_mutations(state: &mut GameState, mutations: &[EffectMutation]) -> Result<SmallVec<[InstanceId; 4]>> {
    let mut affected = SmallVec::new();

    for mutation in mutations {
        match *mutation {
            EffectMutation::MoveCard { card, to } => {
                state.move_card(card, to)?;
                affected.push(card);
            }
            EffectMutation::Tap { card } => {
                state.cards.update(card, |c| c.is_tapped = true)?;
                affected.push(card);
            }
            EffectMutation::Untap { card } => {
                state.cards.update(card, |c| c.is_tapped = false)?;
                affected.push(card);
            }
            EffectMutation::Damage { card, amount } => {
                let target = state.card(card)?;
                if target.zone != Zone::BattleZone {
                    warn!("damage to {} outside the battle zone ignored", card);
                    continue;
                }
                let total = target.damage.saturating_add(amount);
                if target.is_lethal_damage(total) {
                    state.move_card(card, Zone::Graveyard)?;
                } else {
                    state.cards.update(card, |c| c.damage = total)?;
                }
                affected.push(card);
            }
            EffectMutation::DrawCards { player, count } => {
                if state.player(player).zones.deck.is_empty() {
                    warn!("{} has no cards to draw", player);
                    continue;
                }
                affected.extend(state.draw_cards(player, count)?);
            }
            EffectMutation::AdjustMana { player, delta } => {
                let player_state = state.player_mut(player);
                let mana = (player_state.mana as i64 + delta as i64).clamp(0, player_state.max_mana as i64);
                player_state.mana = mana as u32;
            }
        }
    }

    Ok(affected)
}
