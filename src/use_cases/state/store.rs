// Lock-guarded entity table with dirty/removed tracking for per-tick diffs.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Entities that can live in an [`EntityStore`].
pub trait Kinematic: Clone {
    fn entity_id(&self) -> &str;

    /// Advances the entity by `dt_seconds` of explicit Euler integration.
    fn integrate(&mut self, dt_seconds: f64);
}

/// Changes accumulated since the previous [`EntityStore::consume_diff`].
#[derive(Debug, Clone, PartialEq)]
pub struct EntityDiff<T> {
    pub updated: Vec<T>,
    pub removed: Vec<String>,
}

impl<T> Default for EntityDiff<T> {
    fn default() -> Self {
        Self {
            updated: Vec::new(),
            removed: Vec::new(),
        }
    }
}

impl<T> EntityDiff<T> {
    pub fn is_empty(&self) -> bool {
        self.updated.is_empty() && self.removed.is_empty()
    }
}

#[derive(Debug)]
struct Table<T> {
    states: BTreeMap<String, T>,
    dirty: BTreeSet<String>,
    removed: BTreeSet<String>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            states: BTreeMap::new(),
            dirty: BTreeSet::new(),
            removed: BTreeSet::new(),
        }
    }
}

/// Authoritative entity map.
///
/// Every value crossing the store boundary is cloned, so callers never alias the
/// stored state. Ordered maps keep diffs and snapshots in ascending id order.
#[derive(Debug)]
pub struct EntityStore<T> {
    table: RwLock<Table<T>>,
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self {
            table: RwLock::new(Table::default()),
        }
    }
}

impl<T: Kinematic> EntityStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic elsewhere must not wedge the tick loop, so poisoning is ignored.
    fn read(&self) -> RwLockReadGuard<'_, Table<T>> {
        self.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Table<T>> {
        self.table.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inserts or replaces the entity and flags it for the next diff.
    ///
    /// Entities without an id are ignored.
    pub fn upsert(&self, state: T) {
        if state.entity_id().is_empty() {
            return;
        }
        let id = state.entity_id().to_string();

        let mut table = self.write();
        table.removed.remove(&id);
        table.dirty.insert(id.clone());
        table.states.insert(id, state);
    }

    /// Deletes the entity and queues its id as removed. Idempotent.
    pub fn remove(&self, id: &str) {
        if id.is_empty() {
            return;
        }

        let mut table = self.write();
        table.states.remove(id);
        table.dirty.remove(id);
        table.removed.insert(id.to_string());
    }

    pub fn get(&self, id: &str) -> Option<T> {
        if id.is_empty() {
            return None;
        }
        self.read().states.get(id).cloned()
    }

    /// Integrates every entity and marks it dirty, even when nothing moved, so the
    /// broadcast surface stays consistent tick over tick.
    pub fn advance(&self, dt_seconds: f64) {
        if dt_seconds.is_nan() || dt_seconds <= 0.0 {
            return;
        }

        let mut table = self.write();
        let Table { states, dirty, .. } = &mut *table;
        for (id, state) in states.iter_mut() {
            state.integrate(dt_seconds);
            dirty.insert(id.clone());
        }
    }

    /// Returns and clears the pending changes.
    ///
    /// Called once per tick, every change is reported exactly once.
    pub fn consume_diff(&self) -> EntityDiff<T> {
        let mut table = self.write();
        let dirty = std::mem::take(&mut table.dirty);
        let removed = std::mem::take(&mut table.removed);

        let updated = dirty
            .iter()
            .filter_map(|id| table.states.get(id).cloned())
            .collect();

        EntityDiff {
            updated,
            removed: removed.into_iter().collect(),
        }
    }

    /// Clones every live entity without touching dirty tracking.
    pub fn snapshot(&self) -> Vec<T> {
        self.read().states.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.read().states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().states.is_empty()
    }
}
