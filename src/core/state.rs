//! Game state: the root aggregate of one match.
//!
//! ## PlayerState
//!
//! Per-player data: shields, mana, and the six zones.
//!
//! ## GameState
//!
//! Everything needed to continue a match:
//! - Both players, turn pointer, phase and game-over flags
//! - The flat card arena and the append-only move history
//! - Per-turn scratch data, pending battles, the shield-trigger chain and
//!   the interrupt stack
//! - The pending-action stack
//! - Clock, id allocator and RNG
//!
//! All collections are `im` persistent structures, so `clone()` is cheap
//! and actions can run against a copy that is only committed on success.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::clock::{MatchClock, Timestamp};
use super::config::RulesConfig;
use super::entity::{InstanceAllocator, InstanceId};
use super::phase::Phase;
use super::player::{PlayerId, PlayerPair};
use super::rng::GameRng;
use super::zone::Zone;
use crate::battle::BattlePhaseState;
use crate::cards::{CardArena, CardInstance};
use crate::error::{Result, RulesError};
use crate::rules::{GameResult, TurnState};
use crate::triggers::{InterruptStack, ShieldTriggerStack};
use crate::zones::moves::{self, ZoneCards};
use crate::zones::PlayerZones;

/// Identifier of one match, derived from the match seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameId(pub u64);

impl std::fmt::Display for GameId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Game({:016x})", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub id: PlayerId,
    pub name: String,

    /// Remaining shields. Tracks the shield zone size and goes negative
    /// when a player takes a hit with no shields left.
    pub shields: i32,

    /// Shields broken so far, direct hits included.
    pub shields_destroyed: u32,

    pub zones: PlayerZones,

    /// Mana available this turn. Never exceeds `max_mana`.
    pub mana: u32,

    /// Grows by one per turn up to the configured ceiling.
    pub max_mana: u32,
}

impl PlayerState {
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            shields: 0,
            shields_destroyed: 0,
            zones: PlayerZones::new(),
            mana: 0,
            max_mana: 0,
        }
    }

    /// Spend mana from the pool.
    ///
    /// Panics if `amount` exceeds the available mana: callers validate
    /// costs with the mana system first.
    pub fn spend_mana(&mut self, amount: u32) {
        assert!(
            amount <= self.mana,
            "Mana overspend: {} tried to spend {} with {} available",
            self.id,
            amount,
            self.mana
        );
        self.mana -= amount;
    }
}

/// Kind of a player or engine action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameActionKind {
    PlayCard,
    ChargeMana,
    Attack,
    Block,
    ShieldBreak,
    DamageAssignment,
    ShieldTrigger,
    Discard,
    PassTurn,
}

impl GameActionKind {
    /// Whether the defending player may respond before this action completes.
    #[must_use]
    pub const fn is_interruptible(self) -> bool {
        matches!(
            self,
            GameActionKind::PlayCard
                | GameActionKind::Attack
                | GameActionKind::ShieldBreak
                | GameActionKind::DamageAssignment
        )
    }
}

impl std::fmt::Display for GameActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            GameActionKind::PlayCard => "play-card",
            GameActionKind::ChargeMana => "charge-mana",
            GameActionKind::Attack => "attack",
            GameActionKind::Block => "block",
            GameActionKind::ShieldBreak => "shield-break",
            GameActionKind::DamageAssignment => "damage-assignment",
            GameActionKind::ShieldTrigger => "shield-trigger",
            GameActionKind::Discard => "discard",
            GameActionKind::PassTurn => "pass-turn",
        })
    }
}

/// Entry of the pending-action stack.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameAction {
    pub id: u32,
    pub kind: GameActionKind,
    pub player: PlayerId,
    pub card: Option<InstanceId>,
    pub timestamp: Timestamp,
}

/// One zone change in the append-only move history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub card: InstanceId,
    pub owner: PlayerId,
    pub from: Zone,
    pub to: Zone,
    pub turn: u32,
    pub timestamp: Timestamp,
}

impl std::fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[turn {} {}] {} {}: {} -> {}",
            self.turn, self.timestamp, self.owner, self.card, self.from, self.to
        )
    }
}

/// Full state of one match.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameState {
    pub id: GameId,
    pub config: RulesConfig,
    pub players: PlayerPair<PlayerState>,

    /// Whose turn it is.
    pub current_player: PlayerId,
    pub phase: Phase,

    /// Starts at 1 and increments on every end → start wrap.
    pub turn_count: u32,

    pub is_game_over: bool,
    pub winner: Option<PlayerId>,
    pub outcome: Option<GameResult>,

    /// Main actions waiting on responses, innermost last.
    pub action_stack: Vector<GameAction>,

    pub cards: CardArena,
    pub history: Vector<MoveRecord>,

    pub turn: TurnState,
    pub battle: BattlePhaseState,
    pub shield_triggers: ShieldTriggerStack,
    pub interrupts: InterruptStack,

    pub clock: MatchClock,
    pub allocator: InstanceAllocator,
    next_action_id: u32,
    pub rng: GameRng,
}

impl GameState {
    /// Create an empty match with no cards.
    ///
    /// Player 1 starts; the match opens on turn 1 in the start phase.
    #[must_use]
    pub fn new(config: RulesConfig, seed: u64) -> Self {
        let rng = GameRng::new(seed);
        let id = GameId(rng.for_context("game-id").next_u64());

        Self {
            id,
            config,
            players: PlayerPair::new(
                PlayerState::new(PlayerId::FIRST, "Player 1"),
                PlayerState::new(PlayerId::SECOND, "Player 2"),
            ),
            current_player: PlayerId::FIRST,
            phase: Phase::Start,
            turn_count: 1,
            is_game_over: false,
            winner: None,
            outcome: None,
            action_stack: Vector::new(),
            cards: CardArena::new(),
            history: Vector::new(),
            turn: TurnState::new(1, PlayerId::FIRST),
            battle: BattlePhaseState::new(),
            shield_triggers: ShieldTriggerStack::new(),
            interrupts: InterruptStack::new(),
            clock: MatchClock::new(),
            allocator: InstanceId::allocator(),
            next_action_id: 0,
            rng,
        }
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &PlayerState {
        &self.players[player]
    }

    pub fn player_mut(&mut self, player: PlayerId) -> &mut PlayerState {
        &mut self.players[player]
    }

    /// The player not holding the turn.
    #[must_use]
    pub fn defending_player(&self) -> PlayerId {
        self.current_player.opponent()
    }

    pub fn card(&self, id: InstanceId) -> Result<&CardInstance> {
        self.cards.require(id)
    }

    /// Advance the match clock.
    pub fn tick(&mut self) -> Timestamp {
        self.clock.tick()
    }

    // === Card Placement ===

    /// Place a newly created card into its owner's zone.
    ///
    /// Used while building a match; afterwards cards only move.
    pub fn add_card(&mut self, card: CardInstance) {
        let zones = &mut self.players[card.owner].zones;
        let mut list = zones.get(card.zone).clone();
        list.push_back(card.id);
        zones.set(card.zone, list);
        if card.zone == Zone::ShieldZone {
            self.players[card.owner].shields += 1;
        }
        self.cards.insert(card);
    }

    /// Move a card from its current zone to `to` in its owner's zones.
    ///
    /// Updates the zone lists, the card's `zone` field and the move
    /// history together. Leaving the battle zone clears tap, attack and
    /// damage state. Entering the shield zone respects its capacity.
    pub fn move_card(&mut self, card: InstanceId, to: Zone) -> Result<MoveRecord> {
        let instance = self.cards.require(card)?;
        let owner = instance.owner;
        let from = instance.zone;
        let zones = &self.players[owner].zones;

        let (from_list, to_list) = if from == to {
            let mut list = moves::remove_card(zones.get(from), card)?;
            list.push_back(card);
            (list.clone(), list)
        } else if to == Zone::ShieldZone {
            let remaining = moves::remove_card(zones.get(from), card)?;
            let shields = moves::add_to_shield_zone(zones.get(to), card, self.config.shield_capacity)?;
            (remaining, shields)
        } else {
            let transfer = moves::transfer(zones.get(from), zones.get(to), card)?;
            (transfer.from, transfer.to)
        };

        self.write_zones(owner, from, from_list, to, to_list);
        Ok(self.relocate(card, owner, from, to))
    }

    /// Draw up to `count` cards from the top of a player's deck.
    ///
    /// Fails with `DeckEmpty` only when the deck has no cards at all.
    pub fn draw_cards(&mut self, player: PlayerId, count: usize) -> Result<SmallVec<[InstanceId; 4]>> {
        let zones = &self.players[player].zones;
        if zones.deck.is_empty() {
            return Err(RulesError::DeckEmpty(player));
        }

        let result = moves::draw(&zones.deck, &zones.hand, count);
        self.write_zones(player, Zone::Deck, result.deck, Zone::Hand, result.hand);
        for &card in &result.drawn {
            self.relocate(card, player, Zone::Deck, Zone::Hand);
        }
        Ok(result.drawn)
    }

    /// Shuffle a player's deck with the match RNG.
    pub fn shuffle_deck(&mut self, player: PlayerId) {
        let deck = self.rng.shuffled(&self.players[player].zones.deck);
        self.players[player].zones.deck = deck;
    }

    fn write_zones(&mut self, owner: PlayerId, from: Zone, from_list: ZoneCards, to: Zone, to_list: ZoneCards) {
        let player = &mut self.players[owner];
        player.zones.set(from, from_list);
        player.zones.set(to, to_list);
        if from != to {
            if from == Zone::ShieldZone {
                player.shields -= 1;
            }
            if to == Zone::ShieldZone {
                player.shields += 1;
            }
        }
    }

    fn relocate(&mut self, card: InstanceId, owner: PlayerId, from: Zone, to: Zone) -> MoveRecord {
        let turn = self.turn_count;
        // The zone lists already hold the card, so the arena entry exists.
        let _ = self.cards.update(card, |c| {
            if from == Zone::BattleZone && to != Zone::BattleZone {
                c.reset_combat_state();
            }
            c.zone = to;
            c.created_turn = turn;
        });

        let record = MoveRecord {
            card,
            owner,
            from,
            to,
            turn,
            timestamp: self.clock.tick(),
        };
        self.history.push_back(record.clone());
        record
    }

    // === Pending Actions ===

    /// Push a main action that is waiting on responses.
    pub fn push_action(&mut self, kind: GameActionKind, player: PlayerId, card: Option<InstanceId>) -> GameAction {
        let action = GameAction {
            id: self.next_action_id,
            kind,
            player,
            card,
            timestamp: self.clock.tick(),
        };
        self.next_action_id += 1;
        self.action_stack.push_back(action.clone());
        action
    }

    pub fn pop_action(&mut self) -> Option<GameAction> {
        self.action_stack.pop_back()
    }

    // === Queries ===

    /// Cards a player owns across all zones.
    #[must_use]
    pub fn total_card_count(&self, player: PlayerId) -> usize {
        self.players[player].zones.total_card_count()
    }

    /// Cards in one of a player's zones, in zone order.
    pub fn cards_in(&self, player: PlayerId, zone: Zone) -> impl Iterator<Item = &CardInstance> {
        self.players[player]
            .zones
            .get(zone)
            .iter()
            .filter_map(|id| self.cards.get(*id))
    }

    /// Record the end of the match and drop any action still waiting on
    /// responses.
    pub fn finish(&mut self, result: GameResult) {
        self.interrupts.clear();
        self.is_game_over = true;
        self.winner = Some(result.winner);
        self.outcome = Some(result);
    }
}
