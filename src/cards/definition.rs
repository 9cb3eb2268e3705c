//! Card templates - static card data.
//!
//! `CardTemplate` holds the immutable printed properties of a card. The
//! catalog that supplies templates is external; the engine only reads
//! them. Instance-specific data (tap state, damage, zone) lives in
//! `CardInstance`.

use serde::{Deserialize, Serialize};

/// Identifier of a card template in the external catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TemplateId(pub u32);

impl TemplateId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for TemplateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Template({})", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardType {
    Creature,
    Spell,
    Fortress,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    SuperRare,
}

/// Static card definition.
///
/// ## Example
///
/// ```
/// use shield_duel::cards::{CardTemplate, CardType, TemplateId};
///
/// let hand = CardTemplate::new(TemplateId::new(5), "Demon Hand", CardType::Spell)
///     .with_cost(6)
///     .with_ability("shield-trigger:destroy-1");
///
/// assert!(hand.has_trigger_marker("shield-trigger"));
/// assert!(hand.is_mana_eligible());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTemplate {
    pub id: TemplateId,
    pub name: String,
    pub cost: u32,
    pub power: u32,
    #[serde(default)]
    pub rarity: Rarity,
    pub card_type: CardType,
    #[serde(default)]
    pub description: String,
    /// Opaque ability tag, e.g. `"shield-trigger:destroy-1"`. Interpreted
    /// only by the external effect resolver.
    #[serde(default)]
    pub ability_text: String,
}

impl CardTemplate {
    #[must_use]
    pub fn new(id: TemplateId, name: impl Into<String>, card_type: CardType) -> Self {
        Self {
            id,
            name: name.into(),
            cost: 0,
            power: 0,
            rarity: Rarity::default(),
            card_type,
            description: String::new(),
            ability_text: String::new(),
        }
    }

    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    #[must_use]
    pub fn with_power(mut self, power: u32) -> Self {
        self.power = power;
        self
    }

    #[must_use]
    pub fn with_rarity(mut self, rarity: Rarity) -> Self {
        self.rarity = rarity;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_ability(mut self, ability_text: impl Into<String>) -> Self {
        self.ability_text = ability_text.into();
        self
    }

    #[must_use]
    pub fn is_creature(&self) -> bool {
        self.card_type == CardType::Creature
    }

    /// Creatures and spells each pay one mana from the mana zone.
    #[must_use]
    pub fn is_mana_eligible(&self) -> bool {
        matches!(self.card_type, CardType::Creature | CardType::Spell)
    }

    /// Whether the ability text carries the shield-trigger marker.
    ///
    /// Eligibility depends only on the printed card, never on game state.
    #[must_use]
    pub fn has_trigger_marker(&self, marker: &str) -> bool {
        self.ability_text
            .split(',')
            .map(str::trim)
            .any(|tag| tag == marker || tag.strip_prefix(marker).is_some_and(|rest| rest.starts_with(':')))
    }

    /// The ability tag to hand to the effect resolver, if any.
    #[must_use]
    pub fn ability_tag(&self) -> Option<&str> {
        let tag = self.ability_text.trim();
        (!tag.is_empty()).then_some(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spell(ability: &str) -> CardTemplate {
        CardTemplate::new(TemplateId::new(1), "Test Spell", CardType::Spell).with_ability(ability)
    }

    #[test]
    fn test_template_builder() {
        let card = CardTemplate::new(TemplateId::new(1), "Aqua Hulcus", CardType::Creature)
            .with_cost(3)
            .with_power(2000)
            .with_rarity(Rarity::Uncommon)
            .with_ability("cip-draw-1");

        assert_eq!(card.cost, 3);
        assert_eq!(card.power, 2000);
        assert_eq!(card.rarity, Rarity::Uncommon);
        assert!(card.is_creature());
        assert_eq!(card.ability_tag(), Some("cip-draw-1"));
    }

    #[test]
    fn test_mana_eligibility() {
        let fortress = CardTemplate::new(TemplateId::new(2), "Keep", CardType::Fortress);
        assert!(!fortress.is_mana_eligible());
        assert!(spell("").is_mana_eligible());
    }

    #[test]
    fn test_trigger_marker() {
        assert!(spell("shield-trigger").has_trigger_marker("shield-trigger"));
        assert!(spell("shield-trigger:tap-all-enemy").has_trigger_marker("shield-trigger"));
        assert!(spell("cip-draw-1, shield-trigger:destroy-1").has_trigger_marker("shield-trigger"));
        assert!(!spell("shield-triggered").has_trigger_marker("shield-trigger"));
        assert!(!spell("cip-mana-charge-1").has_trigger_marker("shield-trigger"));
    }

    #[test]
    fn test_empty_ability_has_no_tag() {
        assert_eq!(spell("  ").ability_tag(), None);
    }

    #[test]
    fn test_template_serialization() {
        let card = spell("shield-trigger:destroy-1").with_cost(6);

        let json = serde_json::to_string(&card).unwrap();
        let deserialized: CardTemplate = serde_json::from_str(&json).unwrap();

        assert_eq!(card, deserialized);
    }
}
