//! Zone names.
//!
//! Every player owns one of each zone. Zones are disjoint: a card
//! instance sits in exactly one zone of its owner at any time.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Ordered; index 0 is the top card.
    Deck,
    /// Ordered by arrival.
    Hand,
    Graveyard,
    ManaZone,
    BattleZone,
    /// Ordered by shield index; capacity-limited.
    ShieldZone,
}

impl Zone {
    pub const ALL: [Zone; 6] = [
        Zone::Deck,
        Zone::Hand,
        Zone::Graveyard,
        Zone::ManaZone,
        Zone::BattleZone,
        Zone::ShieldZone,
    ];

    /// Whether card order inside the zone carries meaning.
    #[must_use]
    pub const fn is_ordered(self) -> bool {
        matches!(self, Zone::Deck | Zone::Hand | Zone::ShieldZone)
    }

    /// Whether the opponent may see the cards in this zone.
    #[must_use]
    pub const fn is_public(self) -> bool {
        matches!(self, Zone::Graveyard | Zone::ManaZone | Zone::BattleZone)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Zone::Deck => "deck",
            Zone::Hand => "hand",
            Zone::Graveyard => "graveyard",
            Zone::ManaZone => "mana zone",
            Zone::BattleZone => "battle zone",
            Zone::ShieldZone => "shield zone",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
