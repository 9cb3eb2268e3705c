//! Interrupt stack.
//!
//! While a main action is pending on a shield-trigger chain, the defending
//! player may stack interrupt layers on it. Layers unwind last-in
//! first-out before the main action completes.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{GameAction, GameActionKind, InstanceId, PlayerId, Timestamp};
use crate::error::{Result, RulesError};
use crate::stack::{Queued, ResponderQueue, ResponseId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterruptLayer {
    pub player: PlayerId,
    pub action: GameActionKind,
    pub card: Option<InstanceId>,
}

/// Outcome of unwinding the stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterruptResolution {
    pub main_action: Option<GameAction>,
    /// Newest layer first.
    pub layers: Vec<Queued<InterruptLayer>>,
    /// True when the main action was gated behind at least one layer.
    pub main_action_executes: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterruptStack {
    main_action: Option<GameAction>,
    layers: ResponderQueue<InterruptLayer>,
    is_resolving: bool,
    log: Vector<String>,
}

impl InterruptStack {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold `action` pending until the stack is resolved.
    pub fn begin(&mut self, action: GameAction) {
        self.main_action = Some(action);
    }

    #[must_use]
    pub fn main_action(&self) -> Option<&GameAction> {
        self.main_action.as_ref()
    }

    #[must_use]
    pub fn is_resolving(&self) -> bool {
        self.is_resolving
    }

    /// Layers waiting to unwind, oldest first.
    pub fn layers(&self) -> impl Iterator<Item = &Queued<InterruptLayer>> {
        self.layers.iter()
    }

    /// Add a layer on top of the pending main action.
    ///
    /// Only `defending` may interrupt, and only while `trigger_window` is
    /// open (some shield-trigger event is awaiting its response).
    pub fn add_interrupt(
        &mut self,
        layer: InterruptLayer,
        defending: PlayerId,
        trigger_window: bool,
        timestamp: Timestamp,
    ) -> Result<ResponseId> {
        if layer.player != defending {
            return Err(RulesError::NotDefendingPlayer(layer.player));
        }
        if !trigger_window || self.main_action.is_none() {
            return Err(RulesError::NoTriggerPending);
        }

        self.log.push_back(format!(
            "{} {}: {} interrupts with {}",
            timestamp,
            self.layers.len() + 1,
            layer.player,
            layer.action
        ));
        Ok(self.layers.push(layer, timestamp))
    }

    /// Unwind every layer, newest first, and release the main action.
    pub fn resolve(&mut self) -> InterruptResolution {
        self.is_resolving = true;
        let layers = self.layers.drain_lifo();
        for layer in &layers {
            self.log
                .push_back(format!("resolve {} ({})", layer.id, layer.payload.action));
        }
        let main_action = self.main_action.take();
        if let Some(action) = &main_action {
            self.log.push_back(format!("resolve main action {}", action.kind));
        }
        self.is_resolving = false;

        InterruptResolution {
            main_action_executes: !layers.is_empty(),
            main_action,
            layers,
        }
    }

    /// Drop the pending action and all layers.
    pub fn clear(&mut self) {
        self.main_action = None;
        self.layers.clear();
        self.is_resolving = false;
    }

    /// Resolution log, oldest line first.
    pub fn log(&self) -> impl Iterator<Item = &String> {
        self.log.iter()
    }
}

/// Whether an action of `kind` opens a response window.
#[must_use]
pub fn is_interruptible(kind: GameActionKind) -> bool {
    kind.is_interruptible()
}
