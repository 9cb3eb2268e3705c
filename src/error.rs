//! Error types for the rules engine.
//!
//! Every rule violation reachable through normal play is a `RulesError`
//! returned to the caller. Panics are reserved for callers that bypass
//! validation (e.g. spending more mana than the player has).

use thiserror::Error;

use crate::cards::{InstanceId, TemplateId};
use crate::core::{Phase, PlayerId};
use crate::stack::ResponseId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RulesError {
    #[error("Invalid zone index {index} (zone holds {len} cards)")]
    InvalidZoneIndex { index: usize, len: usize },

    #[error("Card not found: {0}")]
    CardNotFound(InstanceId),

    #[error("Insufficient mana: need {required}, can pay {available}")]
    InsufficientMana { required: u32, available: u32 },

    #[error("Card cannot be used as mana: {0}")]
    InvalidManaCard(InstanceId),

    #[error("Shield zone is full ({capacity} cards)")]
    ShieldZoneFull { capacity: usize },

    #[error("{0} cannot attack")]
    IllegalAttacker(InstanceId),

    #[error("{0} cannot block")]
    IllegalBlocker(InstanceId),

    #[error("{0} has no cards left to draw")]
    DeckEmpty(PlayerId),

    #[error("Defender not found: {0}")]
    DefenderNotFound(InstanceId),

    #[error("Action not allowed during the {0} phase")]
    WrongPhase(Phase),

    #[error("{0} is not the active player")]
    NotActivePlayer(PlayerId),

    #[error("{0} is not the defending player")]
    NotDefendingPlayer(PlayerId),

    #[error("No shield trigger is waiting for a response")]
    NoTriggerPending,

    #[error("Shield trigger event not found: {0}")]
    TriggerNotFound(ResponseId),

    #[error("{0} cannot be used that way as a shield trigger")]
    TriggerActionMismatch(InstanceId),

    #[error("Shield triggers must be resolved first")]
    TriggersPending,

    #[error("Mana already charged this turn")]
    ManaChargeLimit,

    #[error("The game is over")]
    GameOver,

    #[error("Unknown card template: {0}")]
    UnknownTemplate(TemplateId),

    #[error("Invalid rules config: {0}")]
    Config(String),

    #[error("Snapshot error: {0}")]
    Snapshot(String),
}

impl From<bincode::Error> for RulesError {
    fn from(err: bincode::Error) -> Self {
        RulesError::Snapshot(err.to_string())
    }
}

impl From<serde_json::Error> for RulesError {
    fn from(err: serde_json::Error) -> Self {
        RulesError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RulesError>;
