//! Pure zone move operations.
//!
//! Each function takes the zones it touches by reference and returns
//! fresh zones plus the moved card id; the inputs are never modified, so
//! a failed move leaves every zone exactly as it was. Callers write the
//! returned zones back, update the card's `zone` field and append a move
//! record (see `GameState::move_card`).
//!
//! Zones are `im::Vector`s: the returned copies share structure with the
//! inputs and cost O(log n) to build.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::InstanceId;
use crate::error::{Result, RulesError};

/// Card ids held by one zone. Index 0 is the top of ordered zones.
pub type ZoneCards = Vector<InstanceId>;

/// Outcome of moving one card between two zones.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub from: ZoneCards,
    pub to: ZoneCards,
    pub card: InstanceId,
}

/// Outcome of drawing from a deck into a hand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrawResult {
    pub deck: ZoneCards,
    pub hand: ZoneCards,
    /// Drawn ids in draw order. Shorter than requested when the deck ran out.
    pub drawn: SmallVec<[InstanceId; 4]>,
}

/// Draw up to `count` cards from the top of `deck` to the end of `hand`.
///
/// Drawing from an empty deck draws nothing; deciding whether that loses
/// the game is the turn engine's job.
#[must_use]
pub fn draw(deck: &ZoneCards, hand: &ZoneCards, count: usize) -> DrawResult {
    let mut deck = deck.clone();
    let mut hand = hand.clone();
    let mut drawn = SmallVec::new();

    for _ in 0..count {
        match deck.pop_front() {
            Some(id) => {
                hand.push_back(id);
                drawn.push(id);
            }
            None => break,
        }
    }

    DrawResult { deck, hand, drawn }
}

/// Remove a card by id.
pub fn remove_card(zone: &ZoneCards, card: InstanceId) -> Result<ZoneCards> {
    let index = zone
        .index_of(&card)
        .ok_or(RulesError::CardNotFound(card))?;
    let mut zone = zone.clone();
    zone.remove(index);
    Ok(zone)
}

/// Remove the card at `index`.
pub fn remove_at(zone: &ZoneCards, index: usize) -> Result<(ZoneCards, InstanceId)> {
    if index >= zone.len() {
        return Err(RulesError::InvalidZoneIndex { index, len: zone.len() });
    }
    let mut zone = zone.clone();
    let card = zone.remove(index);
    Ok((zone, card))
}

/// Move a card from one zone to the end of another.
pub fn transfer(from: &ZoneCards, to: &ZoneCards, card: InstanceId) -> Result<Transfer> {
    let from = remove_card(from, card)?;
    let mut to = to.clone();
    to.push_back(card);
    Ok(Transfer { from, to, card })
}

/// Move a card from any zone to its owner's graveyard.
pub fn send_to_graveyard(from: &ZoneCards, graveyard: &ZoneCards, card: InstanceId) -> Result<Transfer> {
    transfer(from, graveyard, card)
}

/// Move a card out of the hand (to the battle zone, mana zone or graveyard).
pub fn move_card_from_hand(hand: &ZoneCards, destination: &ZoneCards, card: InstanceId) -> Result<Transfer> {
    transfer(hand, destination, card)
}

#[must_use]
pub fn add_to_battle_zone(zone: &ZoneCards, card: InstanceId) -> ZoneCards {
    let mut zone = zone.clone();
    zone.push_back(card);
    zone
}

pub fn remove_from_battle_zone(zone: &ZoneCards, card: InstanceId) -> Result<ZoneCards> {
    remove_card(zone, card)
}

/// Add a card to the shield zone, failing once the zone is at capacity.
pub fn add_to_shield_zone(zone: &ZoneCards, card: InstanceId, capacity: usize) -> Result<ZoneCards> {
    if zone.len() >= capacity {
        return Err(RulesError::ShieldZoneFull { capacity });
    }
    let mut zone = zone.clone();
    zone.push_back(card);
    Ok(zone)
}

pub fn remove_from_shield_zone(zone: &ZoneCards, index: usize) -> Result<(ZoneCards, InstanceId)> {
    remove_at(zone, index)
}
