//! Combat damage and destruction.
//!
//! A blocked battle deals damage both ways at once: each side takes the
//! other's power. A card is destroyed once its accumulated damage reaches
//! its own power. An unblocked attacker deals its power as shield damage
//! to the defending player instead.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::declaration::BattlePhaseState;
use crate::cards::{CardArena, CardInstance};
use crate::core::{GameState, InstanceId, Zone};
use crate::error::Result;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleWinner {
    Attacker,
    Defender,
    BothDestroyed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleResult {
    pub attacker: InstanceId,
    pub defender: Option<InstanceId>,
    pub damage_to_attacker: u32,
    pub damage_to_defender: u32,
    /// Power dealt to the defending player's shields when unblocked.
    pub shield_damage: u32,
    pub destroyed: SmallVec<[InstanceId; 2]>,
    /// `None` when both sides survive a blocked battle.
    pub winner: Option<BattleWinner>,
}

impl BattleResult {
    #[must_use]
    pub fn is_unblocked(&self) -> bool {
        self.defender.is_none()
    }
}

impl std::fmt::Display for BattleResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.defender {
            None => write!(f, "{} attacks directly for {}", self.attacker, self.shield_damage),
            Some(defender) => {
                let outcome = match self.winner {
                    Some(BattleWinner::Attacker) => "attacker wins",
                    Some(BattleWinner::Defender) => "defender wins",
                    Some(BattleWinner::BothDestroyed) => "both destroyed",
                    None => "both survive",
                };
                write!(
                    f,
                    "{} vs {}: {} ({} / {} damage)",
                    self.attacker, defender, outcome, self.damage_to_attacker, self.damage_to_defender
                )
            }
        }
    }
}

/// Results of draining the pending battles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BattleSummary {
    pub results: Vec<BattleResult>,
    pub total_unblocked_damage: u32,
    pub unblocked_hits: usize,
}

impl std::fmt::Display for BattleSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} battle(s), {} unblocked for {} damage",
            self.results.len(),
            self.unblocked_hits,
            self.total_unblocked_damage
        )?;
        for result in &self.results {
            writeln!(f, "  {}", result)?;
        }
        Ok(())
    }
}

/// Compute one battle without touching any state.
#[must_use]
pub fn resolve_battle(attacker: &CardInstance, defender: Option<&CardInstance>) -> BattleResult {
    let Some(defender) = defender else {
        return BattleResult {
            attacker: attacker.id,
            defender: None,
            damage_to_attacker: 0,
            damage_to_defender: 0,
            shield_damage: attacker.power(),
            destroyed: SmallVec::new(),
            winner: Some(BattleWinner::Attacker),
        };
    };

    let damage_to_attacker = defender.power();
    let damage_to_defender = attacker.power();
    let attacker_destroyed = attacker.is_lethal_damage(attacker.damage.saturating_add(damage_to_attacker));
    let defender_destroyed = defender.is_lethal_damage(defender.damage.saturating_add(damage_to_defender));

    let mut destroyed = SmallVec::new();
    if attacker_destroyed {
        destroyed.push(attacker.id);
    }
    if defender_destroyed {
        destroyed.push(defender.id);
    }

    let winner = match (attacker_destroyed, defender_destroyed) {
        (true, true) => Some(BattleWinner::BothDestroyed),
        (false, true) => Some(BattleWinner::Attacker),
        (true, false) => Some(BattleWinner::Defender),
        (false, false) => None,
    };

    BattleResult {
        attacker: attacker.id,
        defender: Some(defender.id),
        damage_to_attacker,
        damage_to_defender,
        shield_damage: 0,
        destroyed,
        winner,
    }
}

impl BattlePhaseState {
    /// Resolve every pending battle in declaration order.
    ///
    /// Each battle sees the damage and destruction of the ones before it.
    /// Battles whose attacker or defender has left the battle zone fizzle
    /// and produce no result.
    pub fn resolve_all_battles(&mut self, cards: &CardArena) -> Result<BattleSummary> {
        let mut summary = BattleSummary::default();
        let mut cards = cards.clone();

        while let Some(attack) = self.pending.pop_front() {
            let attacker = cards.require(attack.attacker)?;
            if attacker.zone != Zone::BattleZone {
                debug!("{} left the battle zone, attack fizzles", attack.attacker);
                continue;
            }
            let defender = match attack.defender {
                Some(id) => {
                    let card = cards.require(id)?;
                    if card.zone != Zone::BattleZone {
                        debug!("{} left the battle zone, attack fizzles", id);
                        continue;
                    }
                    Some(card)
                }
                None => None,
            };

            let result = resolve_battle(attacker, defender);
            record_battle(&mut cards, &result)?;
            if result.is_unblocked() {
                summary.total_unblocked_damage += result.shield_damage;
                summary.unblocked_hits += 1;
            }
            self.resolved.push_back(result.clone());
            summary.results.push(result);
        }

        Ok(summary)
    }
}

/// Both sides of a result, paired with the damage each took.
fn battle_hits(result: &BattleResult) -> impl Iterator<Item = (InstanceId, u32)> {
    [
        (Some(result.attacker), result.damage_to_attacker),
        (result.defender, result.damage_to_defender),
    ]
    .into_iter()
    .filter_map(|(card, damage)| card.map(|card| (card, damage)))
}

/// Mirror a result into the working arena used while draining battles.
fn record_battle(cards: &mut CardArena, result: &BattleResult) -> Result<()> {
    for (card, damage) in battle_hits(result) {
        if result.destroyed.contains(&card) {
            cards.update(card, |c| c.zone = Zone::Graveyard)?;
        } else if damage > 0 {
            cards.update(card, |c| c.damage = c.damage.saturating_add(damage))?;
        }
    }
    Ok(())
}

/// Write battle outcomes back to the game state.
///
/// Survivors keep the damage they took; destroyed cards go to their
/// owner's graveyard with tap, attack and damage cleared.
pub fn apply_battle_results(state: &mut GameState, results: &[BattleResult]) -> Result<SmallVec<[InstanceId; 4]>> {
    let mut graveyard = SmallVec::new();

    for result in results {
        for (card, damage) in battle_hits(result) {
            if result.destroyed.contains(&card) {
                state.move_card(card, Zone::Graveyard)?;
                graveyard.push(card);
            } else if damage > 0 {
                state.cards.update(card, |c| c.damage = c.damage.saturating_add(damage))?;
            }
        }
        info!("{}", result);
    }

    Ok(graveyard)
}
