//! State snapshots.
//!
//! bincode for compact replay checkpoints, JSON for inspection.

use crate::core::GameState;
use crate::error::{Result, RulesError};

pub fn to_bytes(state: &GameState) -> Result<Vec<u8>> {
    Ok(bincode::serialize(state)?)
}

pub fn from_bytes(bytes: &[u8]) -> Result<GameState> {
    Ok(bincode::deserialize(bytes)?)
}

pub fn to_json(state: &GameState) -> Result<String> {
    serde_json::to_string_pretty(state).map_err(|e| RulesError::Snapshot(e.to_string()))
}

pub fn from_json(json: &str) -> Result<GameState> {
    serde_json::from_str(json).map_err(|e| RulesError::Snapshot(e.to_string()))
}
