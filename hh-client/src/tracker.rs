//! Per-row in-flight tracking for mutations
//!
//! Each list (items, ingredient rows) keeps one `InFlight` map. A row is
//! `Pending` while its request is outstanding, which is the only state that
//! disables its control. On completion the row returns to `Idle` (entry
//! removed) or `Error`.
//!
//! Beginning a row that is already pending is allowed: two rapid toggles of
//! the same row are not serialized, and the first completion re-enables the
//! control even if the second request is still outstanding.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RowState {
    #[default]
    Idle,
    Pending,
    /// Last mutation of this row failed; the control is usable again
    Error,
}

#[derive(Debug, Clone)]
pub struct InFlight<K> {
    rows: HashMap<K, RowState>,
}

impl<K> Default for InFlight<K> {
    fn default() -> Self {
        Self {
            rows: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Copy> InFlight<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self, id: K) {
        self.rows.insert(id, RowState::Pending);
    }

    /// Mark the row's request as completed
    pub fn finish(&mut self, id: K, succeeded: bool) {
        if succeeded {
            self.rows.remove(&id);
        } else {
            self.rows.insert(id, RowState::Error);
        }
    }

    pub fn state(&self, id: K) -> RowState {
        self.rows.get(&id).copied().unwrap_or_default()
    }

    pub fn is_pending(&self, id: K) -> bool {
        self.state(id) == RowState::Pending
    }

    pub fn pending_count(&self) -> usize {
        self.rows
            .values()
            .filter(|state| **state == RowState::Pending)
            .count()
    }
}
