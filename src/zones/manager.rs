//! Per-player zone lists.
//!
//! `PlayerZones` holds one `ZoneCards` list per zone for a single player.
//! It answers location and size questions; moves themselves go through
//! the pure functions in `moves` and are written back with `set`.

use serde::{Deserialize, Serialize};

use super::moves::ZoneCards;
use crate::core::{InstanceId, Zone};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerZones {
    pub deck: ZoneCards,
    pub hand: ZoneCards,
    pub graveyard: ZoneCards,
    pub mana_zone: ZoneCards,
    pub battle_zone: ZoneCards,
    pub shield_zone: ZoneCards,
}

impl PlayerZones {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, zone: Zone) -> &ZoneCards {
        match zone {
            Zone::Deck => &self.deck,
            Zone::Hand => &self.hand,
            Zone::Graveyard => &self.graveyard,
            Zone::ManaZone => &self.mana_zone,
            Zone::BattleZone => &self.battle_zone,
            Zone::ShieldZone => &self.shield_zone,
        }
    }

    /// Replace a zone's contents.
    pub fn set(&mut self, zone: Zone, cards: ZoneCards) {
        let slot = match zone {
            Zone::Deck => &mut self.deck,
            Zone::Hand => &mut self.hand,
            Zone::Graveyard => &mut self.graveyard,
            Zone::ManaZone => &mut self.mana_zone,
            Zone::BattleZone => &mut self.battle_zone,
            Zone::ShieldZone => &mut self.shield_zone,
        };
        *slot = cards;
    }

    /// Find the zone holding a card.
    #[must_use]
    pub fn locate(&self, card: InstanceId) -> Option<Zone> {
        Zone::ALL.into_iter().find(|&zone| self.get(zone).contains(&card))
    }

    #[must_use]
    pub fn contains(&self, zone: Zone, card: InstanceId) -> bool {
        self.get(zone).contains(&card)
    }

    /// Cards across every zone. Constant for the whole match.
    #[must_use]
    pub fn total_card_count(&self) -> usize {
        Zone::ALL.iter().map(|&zone| self.get(zone).len()).sum()
    }

    #[must_use]
    pub fn stats(&self) -> ZoneStats {
        ZoneStats {
            deck: self.deck.len(),
            hand: self.hand.len(),
            graveyard: self.graveyard.len(),
            mana_zone: self.mana_zone.len(),
            battle_zone: self.battle_zone.len(),
            shield_zone: self.shield_zone.len(),
        }
    }
}

/// Zone sizes for one player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneStats {
    pub deck: usize,
    pub hand: usize,
    pub graveyard: usize,
    pub mana_zone: usize,
    pub battle_zone: usize,
    pub shield_zone: usize,
}

impl ZoneStats {
    #[must_use]
    pub fn total(&self) -> usize {
        self.deck + self.hand + self.graveyard + self.mana_zone + self.battle_zone + self.shield_zone
    }
}

impl std::fmt::Display for ZoneStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "deck {} | hand {} | mana {} | battle {} | shields {} | graveyard {}",
            self.deck, self.hand, self.mana_zone, self.battle_zone, self.shield_zone, self.graveyard
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zones() -> PlayerZones {
        let mut zones = PlayerZones::new();
        zones.set(Zone::Deck, (0..5).map(InstanceId).collect());
        zones.set(Zone::Hand, (5..8).map(InstanceId).collect());
        zones.set(Zone::ShieldZone, (8..12).map(InstanceId).collect());
        zones
    }

    #[test]
    fn test_locate() {
        let zones = zones();

        assert_eq!(zones.locate(InstanceId(0)), Some(Zone::Deck));
        assert_eq!(zones.locate(InstanceId(6)), Some(Zone::Hand));
        assert_eq!(zones.locate(InstanceId(11)), Some(Zone::ShieldZone));
        assert_eq!(zones.locate(InstanceId(99)), None);
    }

    #[test]
    fn test_total_card_count() {
        let zones = zones();
        assert_eq!(zones.total_card_count(), 12);
        assert_eq!(zones.stats().total(), 12);
    }

    #[test]
    fn test_stats_display() {
        let stats = zones().stats();
        assert_eq!(stats.shield_zone, 4);
        assert_eq!(
            stats.to_string(),
            "deck 5 | hand 3 | mana 0 | battle 0 | shields 4 | graveyard 0"
        );
    }
}
