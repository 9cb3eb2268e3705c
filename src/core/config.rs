//! Rules configuration.
//!
//! `RulesConfig` holds the numeric constants of the ruleset plus the
//! end-of-game policy. The defaults match the standard ruleset; hosts can
//! tweak them with builder methods or load them from JSON.
//!
//! ```
//! use shield_duel::core::{EndCondition, RulesConfig};
//!
//! let config = RulesConfig::default()
//!     .with_initial_shields(3)
//!     .with_end_condition(EndCondition::ShieldsDestroyed(5));
//!
//! assert_eq!(config.initial_shields, 3);
//! assert_eq!(config.max_mana, 13);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, RulesError};

/// How a match decides that a player lost on shields.
///
/// Deck-out is always a loss regardless of this policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCondition {
    /// A player loses once their shield count drops below zero, i.e. they
    /// take a direct hit while holding no shields.
    ShieldsBelowZero,
    /// A player loses once this many of their shields have been destroyed.
    ShieldsDestroyed(u32),
}

impl Default for EndCondition {
    fn default() -> Self {
        EndCondition::ShieldsBelowZero
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Ceiling for `max_mana` and for available mana.
    pub max_mana: u32,

    /// `max_mana` growth per turn start.
    pub mana_per_turn: u32,

    /// Shield zone capacity.
    pub shield_capacity: usize,

    /// Shields dealt from the deck at match start.
    pub initial_shields: usize,

    /// Cards drawn into hand at match start.
    pub starting_hand_size: usize,

    /// Hand size checked at end of turn.
    pub max_hand_size: usize,

    /// Cards a player may charge from hand to mana zone per turn.
    pub mana_charges_per_turn: u32,

    /// Prefix of `ability_text` that marks a shield trigger.
    pub trigger_marker: String,

    pub end_condition: EndCondition,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            max_mana: 13,
            mana_per_turn: 1,
            shield_capacity: 4,
            initial_shields: 4,
            starting_hand_size: 3,
            max_hand_size: 6,
            mana_charges_per_turn: 1,
            trigger_marker: "shield-trigger".to_string(),
            end_condition: EndCondition::default(),
        }
    }
}

impl RulesConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs that would break the engine's invariants.
    pub fn validate(&self) -> Result<()> {
        if self.initial_shields > self.shield_capacity {
            return Err(RulesError::Config(format!(
                "initial_shields ({}) exceeds shield_capacity ({})",
                self.initial_shields, self.shield_capacity
            )));
        }
        if self.trigger_marker.is_empty() {
            return Err(RulesError::Config("trigger_marker must not be empty".to_string()));
        }
        Ok(())
    }

    #[must_use]
    pub fn with_max_mana(mut self, max: u32) -> Self {
        self.max_mana = max;
        self
    }

    #[must_use]
    pub fn with_initial_shields(mut self, count: usize) -> Self {
        self.initial_shields = count;
        self
    }

    #[must_use]
    pub fn with_starting_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }

    #[must_use]
    pub fn with_max_hand_size(mut self, size: usize) -> Self {
        self.max_hand_size = size;
        self
    }

    #[must_use]
    pub fn with_end_condition(mut self, condition: EndCondition) -> Self {
        self.end_condition = condition;
        self
    }

    #[must_use]
    pub fn with_trigger_marker(mut self, marker: impl Into<String>) -> Self {
        self.trigger_marker = marker.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RulesConfig::default();

        assert_eq!(config.max_mana, 13);
        assert_eq!(config.shield_capacity, 4);
        assert_eq!(config.max_hand_size, 6);
        assert_eq!(config.end_condition, EndCondition::ShieldsBelowZero);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = RulesConfig::from_json(r#"{"starting_hand_size": 5}"#).unwrap();

        assert_eq!(config.starting_hand_size, 5);
        assert_eq!(config.max_mana, 13);
    }

    #[test]
    fn test_from_json_end_condition() {
        let config =
            RulesConfig::from_json(r#"{"end_condition": {"ShieldsDestroyed": 5}}"#).unwrap();
        assert_eq!(config.end_condition, EndCondition::ShieldsDestroyed(5));
    }

    #[test]
    fn test_from_json_rejects_too_many_shields() {
        let err = RulesConfig::from_json(r#"{"initial_shields": 9}"#).unwrap_err();
        assert!(matches!(err, RulesError::Config(_)));
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(matches!(RulesConfig::from_json("{"), Err(RulesError::Config(_))));
    }
}
