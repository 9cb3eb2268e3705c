//! Card instances - runtime card state.
//!
//! `CardInstance` is one physical card in one match. It points at its
//! shared template and tracks the per-game mutable state: tap and attack
//! flags, accumulated damage, and the zone it currently sits in.
//!
//! Instances are never deleted. A destroyed card is moved to its owner's
//! graveyard, which is itself a zone.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::definition::{CardTemplate, CardType};
use crate::core::{InstanceId, PlayerId, Zone};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardInstance {
    /// Unique within the match.
    pub id: InstanceId,

    /// Shared, immutable printed data.
    pub template: Arc<CardTemplate>,

    pub owner: PlayerId,

    /// Current zone. Kept in lockstep with the owner's zone lists by the
    /// game state store.
    pub zone: Zone,

    pub is_tapped: bool,
    pub is_attacking: bool,

    /// Damage accumulated this turn cycle. Cleared at the owner's start
    /// phase or when the card leaves the battle zone.
    pub damage: u32,

    /// Cached from the template's rules text when the instance is created.
    pub can_shield_trigger: bool,

    /// Turn on which the card entered its current zone.
    pub created_turn: u32,
}

impl CardInstance {
    #[must_use]
    pub fn new(id: InstanceId, template: Arc<CardTemplate>, owner: PlayerId, zone: Zone) -> Self {
        Self {
            id,
            template,
            owner,
            zone,
            is_tapped: false,
            is_attacking: false,
            damage: 0,
            can_shield_trigger: false,
            created_turn: 0,
        }
    }

    #[must_use]
    pub fn with_shield_trigger(mut self, can_trigger: bool) -> Self {
        self.can_shield_trigger = can_trigger;
        self
    }

    #[must_use]
    pub fn with_created_turn(mut self, turn: u32) -> Self {
        self.created_turn = turn;
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.template.name
    }

    #[must_use]
    pub fn power(&self) -> u32 {
        self.template.power
    }

    #[must_use]
    pub fn cost(&self) -> u32 {
        self.template.cost
    }

    #[must_use]
    pub fn card_type(&self) -> CardType {
        self.template.card_type
    }

    #[must_use]
    pub fn is_creature(&self) -> bool {
        self.template.is_creature()
    }

    /// A card is destroyed once its accumulated damage reaches its power.
    #[must_use]
    pub fn is_lethal_damage(&self, damage: u32) -> bool {
        damage >= self.power()
    }

    /// Clear tap, attack and damage state.
    pub fn reset_combat_state(&mut self) {
        self.is_tapped = false;
        self.is_attacking = false;
        self.damage = 0;
    }
}

impl std::fmt::Display for CardInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.template.name, self.id)
    }
}
