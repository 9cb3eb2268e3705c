//! Mana zone placement and turn-start refill.

use serde::{Deserialize, Serialize};

use crate::cards::CardInstance;
use crate::core::InstanceId;
use crate::error::{Result, RulesError};
use crate::zones::moves;
use crate::zones::ZoneCards;

/// Only creatures and spells can be charged as mana.
#[must_use]
pub fn is_valid_mana_card(card: &CardInstance) -> bool {
    card.template.is_mana_eligible()
}

/// Add a card to the mana zone, rejecting cards that cannot pay mana.
pub fn add_card_to_mana_zone(mana_zone: &ZoneCards, card: &CardInstance) -> Result<ZoneCards> {
    if !is_valid_mana_card(card) {
        return Err(RulesError::InvalidManaCard(card.id));
    }
    let mut zone = mana_zone.clone();
    zone.push_back(card.id);
    Ok(zone)
}

pub fn remove_card_from_mana_zone(mana_zone: &ZoneCards, card: InstanceId) -> Result<ZoneCards> {
    moves::remove_card(mana_zone, card)
}

/// Check a batch of cards for mana placement; fails on the first invalid one.
pub fn validate_multiple_mana_placement(cards: &[&CardInstance]) -> Result<()> {
    match cards.iter().find(|card| !is_valid_mana_card(card)) {
        Some(card) => Err(RulesError::InvalidManaCard(card.id)),
        None => Ok(()),
    }
}

/// Mana a player can pay right now: pool plus one per mana-zone card,
/// capped at the ceiling.
#[must_use]
pub fn calculate_available_mana(current_mana: u32, mana_zone_cards: usize, ceiling: u32) -> u32 {
    current_mana.saturating_add(mana_zone_cards as u32).min(ceiling)
}

/// Values computed at turn start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManaRefill {
    /// New pool ceiling.
    pub max_mana: u32,
    /// Pool after the refill.
    pub mana: u32,
    /// Total payable including mana-zone cards.
    pub available: u32,
}

/// Grow the ceiling by `growth` (capped) and refill the pool to it.
///
/// ```
/// use shield_duel::mana::reset_mana_for_new_turn;
///
/// let refill = reset_mana_for_new_turn(12, 1, 3, 13);
/// assert_eq!(refill.max_mana, 13);
/// assert_eq!(refill.mana, 13);
/// assert_eq!(refill.available, 13);
/// ```
#[must_use]
pub fn reset_mana_for_new_turn(max_mana: u32, growth: u32, mana_zone_cards: usize, ceiling: u32) -> ManaRefill {
    let max_mana = max_mana.saturating_add(growth).min(ceiling);
    ManaRefill {
        max_mana,
        mana: max_mana,
        available: calculate_available_mana(max_mana, mana_zone_cards, ceiling),
    }
}
