use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::GameEvent;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventDiff {
    pub events: Vec<GameEvent>,
}

impl EventDiff {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Buffers gameplay events until the next tick flushes them.
///
/// Events are append-only: nothing advances or removes them, the whole buffer is
/// handed over on [`EventStore::consume_diff`].
#[derive(Debug, Default)]
pub struct EventStore {
    events: Mutex<Vec<GameEvent>>,
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<GameEvent>> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queues an event for the next diff. Events without an id are ignored.
    pub fn add(&self, event: GameEvent) {
        if event.event_id.is_empty() {
            return;
        }
        self.lock().push(event);
    }

    /// Drains the buffer in insertion order.
    pub fn consume_diff(&self) -> EventDiff {
        let events = std::mem::take(&mut *self.lock());
        EventDiff { events }
    }

    /// Clones the buffered events without draining them.
    pub fn pending(&self) -> Vec<GameEvent> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
