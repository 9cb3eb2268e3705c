//! Mana system: cost validation, payment and mana zone placement.
//!
//! The pool (`PlayerState::mana`) refills at turn start. Costs above the
//! pool are covered by consuming mana-zone cards at one mana each.

mod payment;
mod placement;

pub use payment::{apply_mana_cost, simulate_mana_cost, validate_mana_cost, AppliedCost, ManaPayment, ManaSimulation};
pub use placement::{
    add_card_to_mana_zone, calculate_available_mana, is_valid_mana_card, remove_card_from_mana_zone,
    reset_mana_for_new_turn, validate_multiple_mana_placement, ManaRefill,
};
