//! Cost payment.
//!
//! A cost is paid from the player's mana pool first. Any shortfall is
//! covered one-for-one by mana-eligible cards taken from the mana zone;
//! a card's own cost does not matter, each one is worth exactly 1 mana.
//! Cards used this way are consumed (the caller moves them to the
//! graveyard).

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::placement::is_valid_mana_card;
use crate::cards::CardInstance;
use crate::core::InstanceId;
use crate::error::{Result, RulesError};
use crate::zones::ZoneCards;

/// A validated payment plan.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaPayment {
    /// Total cost covered.
    pub amount: u32,
    /// Portion paid from the mana pool.
    pub from_pool: u32,
    /// Mana-zone cards consumed for the rest, one mana each.
    pub payment_cards: SmallVec<[InstanceId; 4]>,
}

/// Outcome of applying a cost against a pool and a mana zone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppliedCost {
    pub remaining_mana: u32,
    pub mana_zone: ZoneCards,
    pub consumed: SmallVec<[InstanceId; 4]>,
}

/// Dry-run result of paying a cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaSimulation {
    pub can_afford: bool,
    pub from_pool: u32,
    pub cards_needed: u32,
    pub remaining_mana: u32,
}

/// Check that `available_mana` plus the offered payment cards cover `required_cost`.
///
/// When the pool alone covers the cost no cards are consumed. Otherwise
/// exactly the shortfall is taken from the offered cards, in the order
/// given; surplus offers are ignored and duplicates count once. Offering
/// a card that cannot pay mana fails with `InvalidManaCard`.
///
/// ```
/// use shield_duel::mana::validate_mana_cost;
///
/// let payment = validate_mana_cost(3, 5, &[]).unwrap();
/// assert!(payment.payment_cards.is_empty());
/// assert!(validate_mana_cost(6, 5, &[]).is_err());
/// ```
pub fn validate_mana_cost(
    required_cost: u32,
    available_mana: u32,
    payment_cards: &[&CardInstance],
) -> Result<ManaPayment> {
    if available_mana >= required_cost {
        return Ok(ManaPayment {
            amount: required_cost,
            from_pool: required_cost,
            payment_cards: SmallVec::new(),
        });
    }

    let mut seen = FxHashSet::default();
    let mut eligible: SmallVec<[InstanceId; 4]> = SmallVec::new();
    for card in payment_cards {
        if !is_valid_mana_card(card) {
            return Err(RulesError::InvalidManaCard(card.id));
        }
        if seen.insert(card.id) {
            eligible.push(card.id);
        }
    }

    let shortfall = required_cost - available_mana;
    let offered = eligible.len() as u32;
    if offered < shortfall {
        return Err(RulesError::InsufficientMana {
            required: required_cost,
            available: available_mana + offered,
        });
    }

    eligible.truncate(shortfall as usize);
    Ok(ManaPayment {
        amount: required_cost,
        from_pool: available_mana,
        payment_cards: eligible,
    })
}

/// Pay `cost` from `current_mana`, then from the front of `mana_zone`.
///
/// Takes the minimum number of mana-zone cards. Fails with
/// `InsufficientMana` and consumes nothing when pool and zone together
/// fall short.
pub fn apply_mana_cost(current_mana: u32, mana_zone: &ZoneCards, cost: u32) -> Result<AppliedCost> {
    let from_pool = current_mana.min(cost);
    let remainder = (cost - from_pool) as usize;

    if remainder > mana_zone.len() {
        return Err(RulesError::InsufficientMana {
            required: cost,
            available: current_mana + mana_zone.len() as u32,
        });
    }

    let mut zone = mana_zone.clone();
    let consumed: SmallVec<[InstanceId; 4]> = (0..remainder).filter_map(|_| zone.pop_front()).collect();

    Ok(AppliedCost {
        remaining_mana: current_mana - from_pool,
        mana_zone: zone,
        consumed,
    })
}

/// Report how a cost would be paid without touching any state.
#[must_use]
pub fn simulate_mana_cost(current_mana: u32, mana_zone_cards: usize, cost: u32) -> ManaSimulation {
    let from_pool = current_mana.min(cost);
    let cards_needed = cost - from_pool;

    ManaSimulation {
        can_afford: cards_needed as usize <= mana_zone_cards,
        from_pool,
        cards_needed,
        remaining_mana: current_mana - from_pool,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cards::{CardTemplate, CardType, TemplateId};
    use crate::core::{PlayerId, Zone};

    fn mana_card(id: u32, card_type: CardType) -> CardInstance {
        let template = Arc::new(CardTemplate::new(TemplateId::new(id), "Mana", card_type).with_cost(7));
        CardInstance::new(InstanceId(id), template, PlayerId::FIRST, Zone::ManaZone)
    }

    fn zone(ids: &[u32]) -> ZoneCards {
        ids.iter().map(|&i| InstanceId(i)).collect()
    }

    #[test]
    fn test_pool_covers_cost() {
        let card = mana_card(1, CardType::Creature);
        let payment = validate_mana_cost(2, 4, &[&card]).unwrap();

        assert_eq!(payment.from_pool, 2);
        assert!(payment.payment_cards.is_empty());
    }

    #[test]
    fn test_shortfall_covered_by_cards() {
        let cards: Vec<_> = (1..=3).map(|i| mana_card(i, CardType::Spell)).collect();
        let refs: Vec<_> = cards.iter().collect();

        let payment = validate_mana_cost(5, 2, &refs).unwrap();

        assert_eq!(payment.amount, 5);
        assert_eq!(payment.from_pool, 2);
        assert_eq!(payment.payment_cards.len(), 3);
    }

    #[test]
    fn test_surplus_offers_are_not_consumed() {
        let cards: Vec<_> = (1..=4).map(|i| mana_card(i, CardType::Creature)).collect();
        let refs: Vec<_> = cards.iter().collect();

        let payment = validate_mana_cost(3, 1, &refs).unwrap();
        assert_eq!(payment.payment_cards.as_slice(), &[InstanceId(1), InstanceId(2)]);
    }

    #[test]
    fn test_insufficient_payment() {
        let card = mana_card(1, CardType::Creature);
        let err = validate_mana_cost(5, 2, &[&card, &card]).unwrap_err();

        assert_eq!(err, RulesError::InsufficientMana { required: 5, available: 3 });
    }

    #[test]
    fn test_fortress_cannot_pay() {
        let fortress = mana_card(9, CardType::Fortress);
        let err = validate_mana_cost(3, 0, &[&fortress]).unwrap_err();

        assert_eq!(err, RulesError::InvalidManaCard(InstanceId(9)));
    }

    #[test]
    fn test_apply_spends_pool_first() {
        let applied = apply_mana_cost(3, &zone(&[10, 11]), 2).unwrap();

        assert_eq!(applied.remaining_mana, 1);
        assert!(applied.consumed.is_empty());
        assert_eq!(applied.mana_zone.len(), 2);
    }

    #[test]
    fn test_apply_takes_minimum_cards() {
        let applied = apply_mana_cost(1, &zone(&[10, 11, 12]), 3).unwrap();

        assert_eq!(applied.remaining_mana, 0);
        assert_eq!(applied.consumed.as_slice(), &[InstanceId(10), InstanceId(11)]);
        assert_eq!(applied.mana_zone, zone(&[12]));
    }

    #[test]
    fn test_apply_insufficient() {
        let err = apply_mana_cost(1, &zone(&[10]), 5).unwrap_err();
        assert_eq!(err, RulesError::InsufficientMana { required: 5, available: 2 });
    }

    #[test]
    fn test_simulate() {
        let sim = simulate_mana_cost(2, 1, 4);
        assert!(!sim.can_afford);
        assert_eq!(sim.cards_needed, 2);

        let sim = simulate_mana_cost(2, 3, 4);
        assert!(sim.can_afford);
        assert_eq!(sim.from_pool, 2);
        assert_eq!(sim.remaining_mana, 0);
    }
}
