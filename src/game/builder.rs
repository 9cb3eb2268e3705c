//! Match setup.

use log::info;

use super::duel::Match;
use crate::cards::{CardRegistry, TemplateId};
use crate::core::{GameState, PlayerId, PlayerPair, RulesConfig, Zone};
use crate::effects::{EffectResolver, NoopResolver};
use crate::error::Result;
use crate::rules::execute_start;

/// Builder for a `Match`.
///
/// ```
/// use shield_duel::cards::{CardRegistry, CardTemplate, CardType, TemplateId};
/// use shield_duel::core::{Phase, PlayerId};
/// use shield_duel::game::MatchBuilder;
///
/// let registry = CardRegistry::from_templates(vec![
///     CardTemplate::new(TemplateId::new(1), "Aqua Soldier", CardType::Creature).with_cost(2).with_power(1000),
/// ]);
/// let deck = vec![TemplateId::new(1); 20];
///
/// let duel = MatchBuilder::new(registry)
///     .deck(PlayerId::FIRST, deck.clone())
///     .deck(PlayerId::SECOND, deck)
///     .build(42)
///     .unwrap();
///
/// assert_eq!(duel.state().phase, Phase::Start);
/// assert_eq!(duel.state().player(PlayerId::FIRST).shields, 4);
/// assert_eq!(duel.state().player(PlayerId::FIRST).zones.hand.len(), 3);
/// ```
pub struct MatchBuilder {
    registry: CardRegistry,
    config: RulesConfig,
    decks: PlayerPair<Vec<TemplateId>>,
    resolver: Box<dyn EffectResolver>,
}

impl MatchBuilder {
    pub fn new(registry: CardRegistry) -> Self {
        Self {
            registry,
            config: RulesConfig::default(),
            decks: PlayerPair::with_value(Vec::new()),
            resolver: Box::new(NoopResolver),
        }
    }

    pub fn config(mut self, config: RulesConfig) -> Self {
        self.config = config;
        self
    }

    /// Deck list for `player`, top card first before shuffling.
    pub fn deck(mut self, player: PlayerId, templates: Vec<TemplateId>) -> Self {
        self.decks[player] = templates;
        self
    }

    pub fn resolver(mut self, resolver: impl EffectResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Create the cards, shuffle, deal shields and hands, then run the
    /// first start phase.
    pub fn build(self, seed: u64) -> Result<Match> {
        self.config.validate()?;
        let mut state = GameState::new(self.config, seed);

        for (player, deck) in self.decks.iter() {
            for &template in deck {
                let id = state.allocator.next_id();
                let card = self
                    .registry
                    .instantiate(template, id, player, Zone::Deck, &state.config.trigger_marker)?;
                state.add_card(card);
            }
        }

        for player in PlayerId::both() {
            state.shuffle_deck(player);
            deal(&mut state, player)?;
        }

        execute_start(&mut state);
        info!(
            "match {} ready: {} vs {}",
            state.id,
            state.player(PlayerId::FIRST).zones.stats(),
            state.player(PlayerId::SECOND).zones.stats()
        );

        Ok(Match::from_parts(state, self.registry, self.resolver))
    }
}

/// Shields first, then the opening hand. A short deck deals what it has.
fn deal(state: &mut GameState, player: PlayerId) -> Result<()> {
    for _ in 0..state.config.initial_shields {
        let Some(&card) = state.player(player).zones.deck.front() else {
            break;
        };
        state.move_card(card, Zone::ShieldZone)?;
    }

    let hand = state.config.starting_hand_size;
    if hand > 0 && !state.player(player).zones.deck.is_empty() {
        state.draw_cards(player, hand)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardTemplate, CardType};

    fn registry() -> CardRegistry {
        CardRegistry::from_templates(vec![
            CardTemplate::new(TemplateId::new(1), "Aqua Soldier", CardType::Creature)
                .with_cost(2)
                .with_power(1000),
            CardTemplate::new(TemplateId::new(2), "Holy Awe", CardType::Spell)
                .with_cost(6)
                .with_ability("shield-trigger:tap-all"),
        ])
    }

    fn deck() -> Vec<TemplateId> {
        (0..20).map(|i| TemplateId::new(1 + i % 2)).collect()
    }

    #[test]
    fn test_setup_deals_shields_and_hand() {
        let duel = MatchBuilder::new(registry())
            .deck(PlayerId::FIRST, deck())
            .deck(PlayerId::SECOND, deck())
            .build(5)
            .unwrap();
        let state = duel.state();

        for player in PlayerId::both() {
            let p = state.player(player);
            assert_eq!(p.shields, 4);
            assert_eq!(p.zones.shield_zone.len(), 4);
            assert_eq!(p.zones.hand.len(), 3);
            assert_eq!(p.zones.deck.len(), 13);
            assert_eq!(state.total_card_count(player), 20);
        }
        assert_eq!(state.player(PlayerId::FIRST).max_mana, 1);
        assert_eq!(state.player(PlayerId::SECOND).max_mana, 0);
    }

    #[test]
    fn test_trigger_eligibility_read_at_setup() {
        let duel = MatchBuilder::new(registry())
            .deck(PlayerId::FIRST, deck())
            .deck(PlayerId::SECOND, deck())
            .build(5)
            .unwrap();

        for card in duel.state().cards.iter() {
            assert_eq!(card.can_shield_trigger, card.template.id == TemplateId::new(2));
        }
    }

    #[test]
    fn test_same_seed_same_shuffle() {
        let build = |seed| {
            MatchBuilder::new(registry())
                .deck(PlayerId::FIRST, deck())
                .deck(PlayerId::SECOND, deck())
                .build(seed)
                .unwrap()
        };
        let a = build(17);
        let b = build(17);

        assert_eq!(a.snapshot().unwrap(), b.snapshot().unwrap());
    }

    #[test]
    fn test_unknown_template_fails() {
        let result = MatchBuilder::new(registry())
            .deck(PlayerId::FIRST, vec![TemplateId::new(9)])
            .build(1);
        assert!(result.is_err());
    }

    #[test]
    fn test_short_deck_deals_what_it_has() {
        let duel = MatchBuilder::new(registry())
            .deck(PlayerId::FIRST, vec![TemplateId::new(1); 5])
            .deck(PlayerId::SECOND, deck())
            .build(3)
            .unwrap();

        let p = duel.state().player(PlayerId::FIRST);
        assert_eq!(p.zones.shield_zone.len(), 4);
        assert_eq!(p.zones.hand.len(), 1);
        assert!(p.zones.deck.is_empty());
    }
}
