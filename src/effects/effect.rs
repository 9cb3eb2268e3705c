//! Effect mutations.
//!
//! The engine does not interpret ability text. An external resolver reads
//! the tag and answers with a list of `EffectMutation`s, which are the
//! only changes an ability can make.

use serde::{Deserialize, Serialize};

use crate::core::{InstanceId, PlayerId, Zone};

/// Why an ability is being resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectContext {
    /// A card entered play from the hand.
    CardPlayed,
    /// A shield trigger was used.
    ShieldTrigger,
    /// An interrupt layer is unwinding.
    Interrupt,
}

/// An ability waiting for the resolver.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectRequest {
    pub source: InstanceId,
    pub controller: PlayerId,
    /// Opaque ability tag from the card template.
    pub tag: String,
    pub context: EffectContext,
}

/// An atomic zone or stat change.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectMutation {
    /// Move a card to one of its owner's zones.
    MoveCard { card: InstanceId, to: Zone },

    Tap { card: InstanceId },
    Untap { card: InstanceId },

    /// Add damage to a battle-zone card; lethal damage destroys it.
    Damage { card: InstanceId, amount: u32 },

    /// Draw from the top of a player's deck. Stops quietly on an empty deck.
    DrawCards { player: PlayerId, count: usize },

    /// Change a player's mana pool, clamped to `0..=max_mana`.
    AdjustMana { player: PlayerId, delta: i32 },
}

impl EffectMutation {
    /// Destroy a card: move it to its owner's graveyard.
    #[must_use]
    pub fn destroy(card: InstanceId) -> Self {
        Self::MoveCard { card, to: Zone::Graveyard }
    }

    /// The card this mutation targets, if any.
    #[must_use]
    pub fn target_card(&self) -> Option<InstanceId> {
        match self {
            EffectMutation::MoveCard { card, .. }
            | EffectMutation::Tap { card }
            | EffectMutation::Untap { card }
            | EffectMutation::Damage { card, .. } => Some(*card),
            EffectMutation::DrawCards { .. } | EffectMutation::AdjustMana { .. } => None,
        }
    }
}
