//! Ordered queue of conversion entries.
//!
//! [`QueueStore`] preserves insertion order. Removal never reorders the
//! remaining entries and every id-addressed operation is a silent no-op
//! when the id is absent.

use crate::catalog;
use crate::entry::{ConversionStatus, Entry, EntryPatch};
use crate::types::EntryId;

#[derive(Debug, Default, Clone)]
pub struct QueueStore {
    entries: Vec<Entry>,
}

impl QueueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append entries to the end of the queue, preserving argument order.
    ///
    /// Entries whose id is already queued are skipped. Returns the number
    /// actually appended.
    pub fn append(&mut self, entries: impl IntoIterator<Item = Entry>) -> usize {
        let mut appended = 0;
        for entry in entries {
            if self.contains(entry.id) {
                continue;
            }
            self.entries.push(entry);
            appended += 1;
        }
        appended
    }

    /// Remove the entry with `id`. Returns the removed entry, if any.
    pub fn remove_by_id(&mut self, id: EntryId) -> Option<Entry> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(idx))
    }

    /// Apply a partial update to the entry with `id`.
    ///
    /// - `target_format` is applied only while the entry is IDLE and only
    ///   if the value is a catalog option for the entry's category.
    /// - `state` is applied only along a permitted transition
    ///   (see [`EntryState::can_transition_to`](crate::entry::EntryState::can_transition_to)).
    ///
    /// Returns `true` if any field changed.
    pub fn update_by_id(&mut self, id: EntryId, patch: EntryPatch) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.id == id) else {
            return false;
        };

        let mut changed = false;

        if let Some(target) = patch.target_format {
            if entry.status() == ConversionStatus::Idle
                && catalog::is_valid_target(entry.category, &target)
            {
                entry.target_format = target;
                changed = true;
            }
        }

        if let Some(state) = patch.state {
            if entry.state.can_transition_to(&state) {
                entry.state = state;
                changed = true;
            }
        }

        changed
    }

    /// Remove every entry matching `predicate`. Returns the count removed.
    pub fn remove_where(&mut self, mut predicate: impl FnMut(&Entry) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !predicate(e));
        before - self.entries.len()
    }

    /// Remove all COMPLETED entries regardless of position.
    pub fn clear_completed(&mut self) -> usize {
        self.remove_where(|e| e.status() == ConversionStatus::Completed)
    }

    /// Snapshot of the current entries in queue order.
    ///
    /// The returned vector is owned; later mutations of the store are not
    /// reflected in it.
    pub fn all(&self) -> Vec<Entry> {
        self.entries.clone()
    }

    /// Snapshot of IDLE entries in queue order.
    pub fn idle(&self) -> Vec<Entry> {
        self.entries
            .iter()
            .filter(|e| e.status() == ConversionStatus::Idle)
            .cloned()
            .collect()
    }

    pub fn get(&self, id: EntryId) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EntryId) -> bool {
        self.get(id).is_some()
    }

    pub fn idle_count(&self) -> usize {
        self.count_with(ConversionStatus::Idle)
    }

    pub fn count_with(&self, status: ConversionStatus) -> usize {
        self.entries.iter().filter(|e| e.status() == status).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
