//! Generic responder queue.
//!
//! Both the shield-trigger chain and the interrupt stack are "things the
//! defending player may respond to, stamped and ordered". `ResponderQueue`
//! holds the entries in insertion order with a cursor over the first
//! unresolved one. The trigger chain consumes it FIFO through `head` and
//! `advance`; the interrupt stack unwinds it LIFO through `drain_lifo`.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::Timestamp;

/// Identifier of a queued entry, unique within its queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResponseId(pub u32);

impl ResponseId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ResponseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Response({})", self.0)
    }
}

/// An entry with its id and the tick it was queued at.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Queued<T> {
    pub id: ResponseId,
    pub timestamp: Timestamp,
    pub payload: T,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponderQueue<T: Clone> {
    entries: Vector<Queued<T>>,
    /// Index of the first unresolved entry.
    cursor: usize,
    next_id: u32,
}

impl<T: Clone> Default for ResponderQueue<T> {
    fn default() -> Self {
        Self {
            entries: Vector::new(),
            cursor: 0,
            next_id: 0,
        }
    }
}

impl<T: Clone> ResponderQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry and return its id.
    pub fn push(&mut self, payload: T, timestamp: Timestamp) -> ResponseId {
        let id = ResponseId::new(self.next_id);
        self.next_id += 1;
        self.entries.push_back(Queued { id, timestamp, payload });
        id
    }

    /// First unresolved entry.
    #[must_use]
    pub fn head(&self) -> Option<&Queued<T>> {
        self.entries.get(self.cursor)
    }

    /// Move the cursor past the head. Returns false when nothing is pending.
    pub fn advance(&mut self) -> bool {
        if self.cursor < self.entries.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Entries not yet passed by the cursor.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.entries.len() - self.cursor
    }

    #[must_use]
    pub fn get(&self, id: ResponseId) -> Option<&Queued<T>> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: ResponseId) -> Option<&mut Queued<T>> {
        self.entries.iter_mut().find(|e| e.id == id)
    }

    /// All entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Queued<T>> {
        self.entries.iter()
    }

    /// Remove every entry, newest first.
    pub fn drain_lifo(&mut self) -> Vec<Queued<T>> {
        let mut drained = Vec::with_capacity(self.entries.len());
        while let Some(entry) = self.entries.pop_back() {
            drained.push(entry);
        }
        self.cursor = 0;
        drained
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop all entries. Ids keep counting up.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}
