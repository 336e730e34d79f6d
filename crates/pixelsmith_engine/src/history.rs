//! Bounded undo/redo history of full canvas snapshots
//!
//! The stack always holds the current committed state at `cursor`. Forward
//! edits push a new state (dropping any redo branch), time travel only moves
//! the cursor. The oldest states are evicted once more than `limit` undo
//! steps are stored.

/// Default number of undo steps kept
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Clone, Debug)]
struct HistoryEntry<T> {
    description: String,
    state: T,
}

/// Trait for types that support undo/redo operations
pub trait UndoState {
    /// Get description of the next undo operation
    fn undo_description(&self) -> Option<String>;

    /// Check if undo is available
    fn can_undo(&self) -> bool;

    /// Perform undo operation, returns false when there was nothing to undo
    fn undo(&mut self) -> crate::Result<bool>;

    /// Get description of the next redo operation
    fn redo_description(&self) -> Option<String>;

    /// Check if redo is available
    fn can_redo(&self) -> bool;

    /// Perform redo operation, returns false when there was nothing to redo
    fn redo(&mut self) -> crate::Result<bool>;
}

#[derive(Clone, Debug)]
pub struct HistoryStack<T> {
    entries: Vec<HistoryEntry<T>>,
    cursor: usize,
    limit: usize,
}

impl<T: Clone + PartialEq> HistoryStack<T> {
    pub fn new(initial: T) -> Self {
        Self::with_limit(initial, DEFAULT_HISTORY_LIMIT)
    }

    pub fn with_limit(initial: T, limit: usize) -> Self {
        Self {
            entries: vec![HistoryEntry {
                description: String::new(),
                state: initial,
            }],
            cursor: 0,
            limit: limit.max(1),
        }
    }

    /// Forgets every entry and starts over from `initial`
    pub fn reset(&mut self, initial: T) {
        self.entries.clear();
        self.entries.push(HistoryEntry {
            description: String::new(),
            state: initial,
        });
        self.cursor = 0;
    }

    pub fn current(&self) -> &T {
        &self.entries[self.cursor].state
    }

    /// Records `state` as the new current state.
    ///
    /// Returns false and records nothing when `state` equals the current one.
    pub fn push(&mut self, description: impl Into<String>, state: T) -> bool {
        if *self.current() == state {
            return false;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(HistoryEntry {
            description: description.into(),
            state,
        });
        let overflow = self.entries.len().saturating_sub(self.limit + 1);
        if overflow > 0 {
            self.entries.drain(0..overflow);
        }
        self.cursor = self.entries.len() - 1;
        true
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Steps back and returns the state to restore
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor].state)
    }

    /// Steps forward and returns the state to restore
    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor].state)
    }

    pub fn undo_description(&self) -> Option<String> {
        if self.can_undo() {
            Some(self.entries[self.cursor].description.clone())
        } else {
            None
        }
    }

    pub fn redo_description(&self) -> Option<String> {
        self.entries.get(self.cursor + 1).map(|e| e.description.clone())
    }

    pub fn undo_len(&self) -> usize {
        self.cursor
    }

    pub fn redo_len(&self) -> usize {
        self.entries.len() - 1 - self.cursor
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of stored states, the current one included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
