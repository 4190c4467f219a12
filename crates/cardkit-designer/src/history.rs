//! Snapshot-based undo/redo over the canvas document.
//!
//! Linear history: a new checkpoint after an undo discards the redo
//! branch. The stack is bounded; eviction drops the oldest entry and
//! shifts the cursor so the entry it points at stays the same document
//! state.

use tracing::debug;

use cardkit_core::constants::HISTORY_CAPACITY;

use crate::document::CanvasDocument;

/// Bounded stack of immutable document snapshots plus a cursor.
///
/// Invariant: `cursor` is in `[-1, entries.len() - 1]`; -1 only while
/// empty.
#[derive(Debug, Clone)]
pub struct HistoryStack {
    entries: Vec<CanvasDocument>,
    cursor: isize,
    capacity: usize,
}

impl HistoryStack {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            cursor: -1,
            capacity: capacity.max(1),
        }
    }

    /// Records a deep snapshot of the document after a structurally
    /// completed mutation. Truncates the redo branch, appends, then
    /// enforces the capacity bound from the front.
    pub fn checkpoint(&mut self, document: &CanvasDocument) {
        self.entries.truncate((self.cursor + 1) as usize);
        self.entries.push(document.clone());
        self.cursor = self.entries.len() as isize - 1;

        while self.entries.len() > self.capacity {
            self.entries.remove(0);
            // The cursor keeps pointing at the same snapshot.
            self.cursor -= 1;
        }
        debug!(len = self.entries.len(), cursor = self.cursor, "checkpoint");
    }

    /// Steps back one snapshot. No-op at (or before) the first recorded
    /// state.
    pub fn undo(&mut self) -> Option<CanvasDocument> {
        if self.cursor <= 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor as usize].clone())
    }

    /// Steps forward one snapshot. No-op at the newest state.
    pub fn redo(&mut self) -> Option<CanvasDocument> {
        if self.cursor >= self.entries.len() as isize - 1 {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor as usize].clone())
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len() as isize - 1
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops all snapshots, e.g. when a different project is loaded.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = -1;
    }
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new()
    }
}
