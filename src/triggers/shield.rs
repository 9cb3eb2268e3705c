//! Shield breaks and the shield-trigger chain.
//!
//! Breaking a shield reveals the card at that index. If the card's
//! template carries the trigger marker, an event is queued for its owner
//! to answer; otherwise the card goes to the graveyard. Several breaks
//! from one combat form a chain that resolves strictly in break order.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::cards::CardArena;
use crate::core::{InstanceId, MatchClock, PlayerId, Timestamp};
use crate::error::{Result, RulesError};
use crate::stack::{Queued, ResponderQueue, ResponseId};
use crate::zones::ZoneCards;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShieldTriggerState {
    #[default]
    Idle,
    /// Waiting for the owner's response.
    Triggered,
    /// Response accepted, effects being applied.
    Resolving,
    Resolved,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShieldTriggerEvent {
    /// Owner of the broken shield; the only player who may respond.
    pub player: PlayerId,
    pub shield_index: usize,
    pub triggered_card: Option<InstanceId>,
    pub state: ShieldTriggerState,
    pub can_respond: bool,
}

impl ShieldTriggerEvent {
    #[must_use]
    pub fn new(player: PlayerId, shield_index: usize, triggered_card: Option<InstanceId>) -> Self {
        Self {
            player,
            shield_index,
            triggered_card,
            state: ShieldTriggerState::Idle,
            can_respond: false,
        }
    }

    /// Arm the event for a response.
    #[must_use]
    pub fn triggered(mut self) -> Self {
        self.state = ShieldTriggerState::Triggered;
        self.can_respond = true;
        self
    }
}

/// What a single broken shield revealed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShieldBreakResult {
    pub player: PlayerId,
    pub shield_index: usize,
    /// `None` for a hit against an empty shield zone.
    pub revealed: Option<InstanceId>,
    /// Set when the revealed card carries the trigger marker.
    pub triggered: Option<InstanceId>,
}

impl ShieldBreakResult {
    /// A hit that found no shield to break.
    #[must_use]
    pub fn direct_hit(player: PlayerId) -> Self {
        Self {
            player,
            shield_index: 0,
            revealed: None,
            triggered: None,
        }
    }
}

impl std::fmt::Display for ShieldBreakResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.revealed, self.triggered) {
            (None, _) => write!(f, "{} takes a direct hit", self.player),
            (Some(card), Some(_)) => write!(
                f,
                "{} shield {} broken: {} triggers",
                self.player, self.shield_index, card
            ),
            (Some(card), None) => write!(f, "{} shield {} broken: {}", self.player, self.shield_index, card),
        }
    }
}

/// How a player answers a shield trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerAction {
    /// Put the revealed creature (or fortress) into play for free.
    PlayTriggeredCard,
    /// Cast the revealed spell for free.
    CastSpell,
    /// Keep the card in hand.
    Pass,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShieldTriggerResponse {
    pub player: PlayerId,
    pub event: ResponseId,
    pub action: TriggerAction,
    pub card: Option<InstanceId>,
    pub timestamp: Timestamp,
}

/// Progress through the current chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainStatus {
    pub length: usize,
    pub resolved: usize,
    pub next: Option<ResponseId>,
}

/// The shield-trigger chain plus its response history and break log.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShieldTriggerStack {
    queue: ResponderQueue<ShieldTriggerEvent>,
    history: Vector<ShieldTriggerResponse>,
    breaks: Vector<ShieldBreakResult>,
}

impl ShieldTriggerStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard the finished chain and start a new one. History is kept.
    pub fn begin_chain(&mut self) {
        self.queue.clear();
    }

    pub fn push_event(&mut self, event: ShieldTriggerEvent, timestamp: Timestamp) -> ResponseId {
        self.queue.push(event, timestamp)
    }

    /// Record a break in the log.
    pub fn record_break(&mut self, result: ShieldBreakResult) {
        self.breaks.push_back(result);
    }

    /// The event waiting for a response, if any.
    #[must_use]
    pub fn next_event(&self) -> Option<&Queued<ShieldTriggerEvent>> {
        self.queue.head()
    }

    #[must_use]
    pub fn has_unresolved(&self) -> bool {
        self.queue.pending() > 0
    }

    /// True while some pending event is still waiting for its response.
    #[must_use]
    pub fn can_interrupt(&self) -> bool {
        self.queue
            .iter()
            .skip(self.queue.cursor())
            .any(|e| e.payload.state == ShieldTriggerState::Triggered)
    }

    #[must_use]
    pub fn chain(&self) -> ChainStatus {
        ChainStatus {
            length: self.queue.len(),
            resolved: self.queue.cursor(),
            next: self.queue.head().map(|e| e.id),
        }
    }

    #[must_use]
    pub fn get(&self, id: ResponseId) -> Option<&Queued<ShieldTriggerEvent>> {
        self.queue.get(id)
    }

    fn require_head(&self, id: ResponseId) -> Result<&Queued<ShieldTriggerEvent>> {
        let head = self.queue.head().ok_or(RulesError::NoTriggerPending)?;
        if head.id != id {
            return Err(RulesError::TriggerNotFound(id));
        }
        Ok(head)
    }

    /// Mark the head event as resolving.
    ///
    /// Only the head of the chain accepts a response.
    pub fn begin_resolution(&mut self, id: ResponseId) -> Result<()> {
        self.require_head(id)?;
        if let Some(entry) = self.queue.get_mut(id) {
            entry.payload.state = ShieldTriggerState::Resolving;
        }
        Ok(())
    }

    /// Resolve the head event with `response` and move to the next one.
    pub fn resolve_event(&mut self, response: ShieldTriggerResponse) -> Result<Queued<ShieldTriggerEvent>> {
        self.require_head(response.event)?;
        let entry = self
            .queue
            .get_mut(response.event)
            .ok_or(RulesError::TriggerNotFound(response.event))?;
        entry.payload.state = ShieldTriggerState::Resolved;
        entry.payload.can_respond = false;
        let resolved = entry.clone();

        self.queue.advance();
        self.history.push_back(response);
        Ok(resolved)
    }

    /// Resolve the head event with a pass, e.g. when its owner timed out.
    pub fn auto_pass(&mut self, timestamp: Timestamp) -> Result<Queued<ShieldTriggerEvent>> {
        let head = self.queue.head().ok_or(RulesError::NoTriggerPending)?;
        let response = ShieldTriggerResponse {
            player: head.payload.player,
            event: head.id,
            action: TriggerAction::Pass,
            card: head.payload.triggered_card,
            timestamp,
        };
        self.resolve_event(response)
    }

    /// Every response given so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<ShieldTriggerResponse> {
        &self.history
    }

    /// Human-readable break log.
    pub fn break_log(&self) -> impl Iterator<Item = String> + '_ {
        self.breaks.iter().map(ToString::to_string)
    }
}

/// Reveal the shield at `index` and classify it.
pub fn check_shield_break(
    shield_zone: &ZoneCards,
    index: usize,
    defending: PlayerId,
    cards: &CardArena,
) -> Result<ShieldBreakResult> {
    let card = *shield_zone.get(index).ok_or(RulesError::InvalidZoneIndex {
        index,
        len: shield_zone.len(),
    })?;
    let instance = cards.require(card)?;

    Ok(ShieldBreakResult {
        player: defending,
        shield_index: index,
        revealed: Some(card),
        triggered: instance.can_shield_trigger.then_some(card),
    })
}

/// Break several shields at once.
///
/// Indices are processed in ascending shield order; the stack is reset to
/// a fresh chain holding one triggered event per eligible reveal. Nothing
/// is pushed if any index is invalid.
pub fn batch_shield_break(
    shield_zone: &ZoneCards,
    indices: &[usize],
    defending: PlayerId,
    cards: &CardArena,
    stack: &mut ShieldTriggerStack,
    clock: &mut MatchClock,
) -> Result<Vec<ShieldBreakResult>> {
    let mut ordered = indices.to_vec();
    ordered.sort_unstable();
    ordered.dedup();

    let results = ordered
        .iter()
        .map(|&index| check_shield_break(shield_zone, index, defending, cards))
        .collect::<Result<Vec<_>>>()?;

    stack.begin_chain();
    for result in &results {
        stack.record_break(result.clone());
        if let Some(card) = result.triggered {
            let event = ShieldTriggerEvent::new(defending, result.shield_index, Some(card)).triggered();
            stack.push_event(event, clock.tick());
        }
    }

    Ok(results)
}
