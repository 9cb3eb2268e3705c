//! Zone system for card locations.
//!
//! Each player owns six zones: deck, hand, graveyard, mana zone, battle
//! zone and shield zone. Zones store instance ids; the card records
//! themselves live in the `CardArena`.
//!
//! ## Key Types
//!
//! - `Zone`: Zone name (from `core`)
//! - `ZoneCards`: Persistent id list for one zone
//! - `PlayerZones`: The six zones of one player
//! - `moves`: Pure move operations returning updated zones

pub mod manager;
pub mod moves;

pub use manager::{PlayerZones, ZoneStats};
pub use moves::{DrawResult, Transfer, ZoneCards};

pub use crate::core::Zone;
