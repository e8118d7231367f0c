//! Bounded undo/redo history over full-state snapshots

use std::collections::HashMap;

use crate::models::Playlist;

/// Deep copy of everything an edit can touch: tree plus both overlay maps.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub playlist: Playlist,
    pub custom_names: HashMap<String, String>,
    pub epg_mappings: HashMap<i64, String>,
}

const HISTORY_LIMIT: usize = 30;

/// Linear history: a stack of snapshots addressed by a cursor. Recording
/// discards any redoable future; the stack never exceeds 30 entries.
#[derive(Debug, Default)]
pub struct HistoryManager {
    stack: Vec<Snapshot>,
    cursor: usize,
}

impl HistoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, state: Snapshot) {
        if !self.stack.is_empty() {
            self.stack.truncate(self.cursor + 1);
        }
        self.stack.push(state);
        if self.stack.len() > HISTORY_LIMIT {
            self.stack.remove(0);
        }
        self.cursor = self.stack.len() - 1;
    }

    pub fn undo(&mut self) -> Option<&Snapshot> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.stack.get(self.cursor)
    }

    pub fn redo(&mut self) -> Option<&Snapshot> {
        if self.cursor + 1 >= self.stack.len() {
            return None;
        }
        self.cursor += 1;
        self.stack.get(self.cursor)
    }

    /// Replace the whole stack with a single entry. Used after a full reload
    /// from the remote store: prior history is meaningless across reloads.
    pub fn reset(&mut self, state: Snapshot) {
        self.stack = vec![state];
        self.cursor = 0;
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.stack.len()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod tests;
