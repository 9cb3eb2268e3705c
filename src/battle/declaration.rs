//! Attack and block declarations.

use im::Vector;
use log::debug;
use serde::{Deserialize, Serialize};

use super::resolution::BattleResult;
use crate::cards::{CardArena, CardInstance};
use crate::core::{InstanceId, PlayerId, Timestamp, Zone};
use crate::error::{Result, RulesError};

/// A creature may attack when it is an untapped, non-attacking creature
/// in the battle zone that entered before the current turn.
#[must_use]
pub fn can_attack(card: &CardInstance, current_turn: u32) -> bool {
    card.is_creature()
        && !card.is_tapped
        && !card.is_attacking
        && card.zone == Zone::BattleZone
        && card.created_turn < current_turn
}

/// Blocking has no summoning-sickness restriction.
#[must_use]
pub fn can_block(card: &CardInstance) -> bool {
    card.is_creature() && !card.is_tapped && card.zone == Zone::BattleZone
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackDeclaration {
    pub attacker: InstanceId,
    pub player: PlayerId,
    /// `None` is a direct attack on the opposing player's shields.
    pub defender: Option<InstanceId>,
    /// Set once a blocker redirected this attack.
    pub is_blocked: bool,
    pub timestamp: Timestamp,
}

impl AttackDeclaration {
    #[must_use]
    pub fn is_direct(&self) -> bool {
        self.defender.is_none()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockDeclaration {
    pub blocker: InstanceId,
    pub attacker: InstanceId,
    pub player: PlayerId,
    pub timestamp: Timestamp,
}

/// Attack-phase bookkeeping for the current turn.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattlePhaseState {
    /// Every attack declared this turn, as declared.
    pub attacks: Vector<AttackDeclaration>,
    pub blocks: Vector<BlockDeclaration>,
    /// Attacks waiting for resolution, in declaration order. Blocks
    /// rewrite their defender.
    pub pending: Vector<AttackDeclaration>,
    pub resolved: Vector<BattleResult>,
}

impl BattlePhaseState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Declare an attack. Taps the attacker and marks it attacking.
    pub fn declare_attack(
        &mut self,
        cards: &mut CardArena,
        attacker: InstanceId,
        defender: Option<InstanceId>,
        current_turn: u32,
        timestamp: Timestamp,
    ) -> Result<AttackDeclaration> {
        let card = cards.require(attacker)?;
        if !can_attack(card, current_turn) {
            return Err(RulesError::IllegalAttacker(attacker));
        }
        let player = card.owner;

        if let Some(target) = defender {
            let target_card = cards.get(target).ok_or(RulesError::DefenderNotFound(target))?;
            if target_card.owner == player || target_card.zone != Zone::BattleZone {
                return Err(RulesError::DefenderNotFound(target));
            }
        }

        cards.update(attacker, |c| {
            c.is_tapped = true;
            c.is_attacking = true;
        })?;

        let declaration = AttackDeclaration {
            attacker,
            player,
            defender,
            is_blocked: false,
            timestamp,
        };
        debug!("{} declares attack with {} on {:?}", player, attacker, defender);
        self.attacks.push_back(declaration.clone());
        self.pending.push_back(declaration.clone());
        Ok(declaration)
    }

    /// Redirect a pending attack onto `blocker`. Taps the blocker.
    pub fn declare_block(
        &mut self,
        cards: &mut CardArena,
        blocker: InstanceId,
        attacker: InstanceId,
        timestamp: Timestamp,
    ) -> Result<BlockDeclaration> {
        let card = cards.require(blocker)?;
        let index = self
            .pending
            .iter()
            .position(|a| a.attacker == attacker)
            .ok_or(RulesError::CardNotFound(attacker))?;

        let attack = &self.pending[index];
        if !can_block(card) || card.owner == attack.player || attack.is_blocked {
            return Err(RulesError::IllegalBlocker(blocker));
        }
        let player = card.owner;

        cards.update(blocker, |c| c.is_tapped = true)?;

        let mut redirected = attack.clone();
        redirected.defender = Some(blocker);
        redirected.is_blocked = true;
        self.pending.set(index, redirected);

        let block = BlockDeclaration {
            blocker,
            attacker,
            player,
            timestamp,
        };
        debug!("{} blocks {} with {}", player, attacker, blocker);
        self.blocks.push_back(block.clone());
        Ok(block)
    }

    /// Forget all declarations and results.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cards::{CardTemplate, CardType, TemplateId};

    fn creature(id: u32, owner: PlayerId, created_turn: u32) -> CardInstance {
        let template = Arc::new(CardTemplate::new(TemplateId::new(1), "Creature", CardType::Creature).with_power(1000));
        CardInstance::new(InstanceId(id), template, owner, Zone::BattleZone).with_created_turn(created_turn)
    }

    fn arena() -> CardArena {
        let mut arena = CardArena::new();
        arena.insert(creature(1, PlayerId::FIRST, 1));
        arena.insert(creature(2, PlayerId::SECOND, 1));
        arena.insert(creature(3, PlayerId::SECOND, 2));
        arena
    }

    #[test]
    fn test_summoning_sickness() {
        let fresh = creature(1, PlayerId::FIRST, 3);
        assert!(!can_attack(&fresh, 3));
        assert!(can_attack(&fresh, 4));
        assert!(can_block(&fresh));
    }

    #[test]
    fn test_spell_cannot_attack_or_block() {
        let template = Arc::new(CardTemplate::new(TemplateId::new(2), "Spell", CardType::Spell));
        let spell = CardInstance::new(InstanceId(5), template, PlayerId::FIRST, Zone::BattleZone);

        assert!(!can_attack(&spell, 9));
        assert!(!can_block(&spell));
    }

    #[test]
    fn test_declare_attack_taps_attacker() {
        let mut arena = arena();
        let mut battle = BattlePhaseState::new();

        let attack = battle
            .declare_attack(&mut arena, InstanceId(1), None, 2, Timestamp(1))
            .unwrap();

        assert!(attack.is_direct());
        assert!(arena.require(InstanceId(1)).unwrap().is_tapped);
        assert!(arena.require(InstanceId(1)).unwrap().is_attacking);
        assert!(battle.has_pending());

        let again = battle.declare_attack(&mut arena, InstanceId(1), None, 2, Timestamp(2));
        assert_eq!(again.unwrap_err(), RulesError::IllegalAttacker(InstanceId(1)));
    }

    #[test]
    fn test_declare_attack_unknown_defender() {
        let mut arena = arena();
        let mut battle = BattlePhaseState::new();

        let err = battle
            .declare_attack(&mut arena, InstanceId(1), Some(InstanceId(77)), 2, Timestamp(1))
            .unwrap_err();

        assert_eq!(err, RulesError::DefenderNotFound(InstanceId(77)));
        assert!(!arena.require(InstanceId(1)).unwrap().is_tapped);
        assert!(!battle.has_pending());
    }

    #[test]
    fn test_block_redirects_attack() {
        let mut arena = arena();
        let mut battle = BattlePhaseState::new();
        battle.declare_attack(&mut arena, InstanceId(1), None, 2, Timestamp(1)).unwrap();

        battle.declare_block(&mut arena, InstanceId(3), InstanceId(1), Timestamp(2)).unwrap();

        assert_eq!(battle.pending[0].defender, Some(InstanceId(3)));
        assert!(battle.pending[0].is_blocked);
        assert!(battle.attacks[0].is_direct());
        assert!(arena.require(InstanceId(3)).unwrap().is_tapped);
    }

    #[test]
    fn test_illegal_blocks() {
        let mut arena = arena();
        let mut battle = BattlePhaseState::new();
        battle.declare_attack(&mut arena, InstanceId(1), None, 2, Timestamp(1)).unwrap();

        assert_eq!(
            battle.declare_block(&mut arena, InstanceId(2), InstanceId(9), Timestamp(2)),
            Err(RulesError::CardNotFound(InstanceId(9)))
        );

        battle.declare_block(&mut arena, InstanceId(2), InstanceId(1), Timestamp(3)).unwrap();
        assert_eq!(
            battle.declare_block(&mut arena, InstanceId(3), InstanceId(1), Timestamp(4)),
            Err(RulesError::IllegalBlocker(InstanceId(3)))
        );
    }

    #[test]
    fn test_reset() {
        let mut arena = arena();
        let mut battle = BattlePhaseState::new();
        battle.declare_attack(&mut arena, InstanceId(1), None, 2, Timestamp(1)).unwrap();

        battle.reset();
        assert!(!battle.has_pending());
        assert!(battle.attacks.is_empty());
    }
}
