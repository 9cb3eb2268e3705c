//! Action inputs and results.

use serde::{Deserialize, Serialize};

use crate::core::InstanceId;
use crate::error::RulesError;
use crate::rules::PhaseResult;

/// How a card's cost is paid once the mana pool runs short.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentSelection {
    /// Take mana-zone cards from the front of the zone.
    #[default]
    Auto,
    /// Use exactly these mana-zone cards, in this order.
    Cards(Vec<InstanceId>),
}

/// Outcome of one action.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActionResult {
    pub success: bool,
    pub cards_affected: Vec<InstanceId>,
    pub messages: Vec<String>,
    pub errors: Vec<RulesError>,
}

impl ActionResult {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn failed(error: RulesError) -> Self {
        Self {
            success: false,
            messages: vec![error.to_string()],
            errors: vec![error],
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_cards(mut self, cards: impl IntoIterator<Item = InstanceId>) -> Self {
        self.cards_affected.extend(cards);
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.messages.push(message.into());
        self
    }

    /// First error, if the action failed.
    #[must_use]
    pub fn error(&self) -> Option<&RulesError> {
        self.errors.first()
    }
}

impl From<PhaseResult> for ActionResult {
    fn from(result: PhaseResult) -> Self {
        Self {
            success: result.success,
            cards_affected: result.cards_affected,
            messages: result.messages,
            errors: result.errors,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_result_carries_error() {
        let result = ActionResult::failed(RulesError::ManaChargeLimit);

        assert!(!result.success);
        assert_eq!(result.error(), Some(&RulesError::ManaChargeLimit));
        assert_eq!(result.messages, vec!["Mana already charged this turn".to_string()]);
    }

    #[test]
    fn test_builder() {
        let result = ActionResult::ok().with_cards([InstanceId(1), InstanceId(2)]).with_message("done");

        assert!(result.success);
        assert_eq!(result.cards_affected.len(), 2);
        assert_eq!(result.error(), None);
    }
}
