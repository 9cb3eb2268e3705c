//! Card system: templates, instances, the instance arena and the registry.
//!
//! ## Key Types
//!
//! - `TemplateId`: Identifier for card templates in the external catalog
//! - `CardTemplate`: Immutable printed card data
//! - `CardInstance`: Runtime card state (zone, owner, tap/attack/damage)
//! - `CardArena`: Flat instance store keyed by `InstanceId`
//! - `CardRegistry`: Template lookup and instantiation

pub mod arena;
pub mod definition;
pub mod instance;
pub mod registry;

pub use arena::CardArena;
pub use definition::{CardTemplate, CardType, Rarity, TemplateId};
pub use instance::CardInstance;
pub use registry::CardRegistry;

pub use crate::core::InstanceId;
