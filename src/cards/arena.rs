//! Flat card-instance store.
//!
//! Every instance of a match lives here as a value record keyed by its
//! `InstanceId`. Zones hold ids only, so there is exactly one copy of each
//! card and every mutation is an explicit replace-by-id.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::instance::CardInstance;
use crate::core::InstanceId;
use crate::error::{Result, RulesError};

/// Persistent map from instance id to card record.
///
/// Backed by `im::OrdMap`, so cloning the arena for a state snapshot is
/// O(1) and iteration order is deterministic.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardArena {
    cards: OrdMap<InstanceId, CardInstance>,
}

impl CardArena {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a card record.
    pub fn insert(&mut self, card: CardInstance) {
        self.cards.insert(card.id, card);
    }

    #[must_use]
    pub fn get(&self, id: InstanceId) -> Option<&CardInstance> {
        self.cards.get(&id)
    }

    /// Look up a card, failing with `CardNotFound`.
    pub fn require(&self, id: InstanceId) -> Result<&CardInstance> {
        self.cards.get(&id).ok_or(RulesError::CardNotFound(id))
    }

    /// Replace a card with an updated copy.
    pub fn update(&mut self, id: InstanceId, f: impl FnOnce(&mut CardInstance)) -> Result<()> {
        let mut card = self.require(id)?.clone();
        f(&mut card);
        self.cards.insert(id, card);
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, id: InstanceId) -> bool {
        self.cards.contains_key(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate in id order.
    pub fn iter(&self) -> impl Iterator<Item = &CardInstance> {
        self.cards.values()
    }
}
