//! Undo/Redo for the editor session
//!
//! Undo and redo only move the history cursor and restore the snapshot found
//! there; they never record a new entry. Undo at the oldest state and redo at
//! the newest are silent no-ops.

use crate::{Result, history::UndoState};

use super::EditorSession;

impl UndoState for EditorSession {
    fn undo_description(&self) -> Option<String> {
        self.history.undo_description()
    }

    fn can_undo(&self) -> bool {
        self.history.can_undo() || self.stroke.is_some_and(|s| s.changed)
    }

    fn undo(&mut self) -> Result<bool> {
        self.settle_gestures();
        let Some(snapshot) = self.history.undo().cloned() else {
            return Ok(false);
        };
        self.restore_snapshot_internal(snapshot);
        Ok(true)
    }

    fn redo_description(&self) -> Option<String> {
        self.history.redo_description()
    }

    fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn redo(&mut self) -> Result<bool> {
        self.settle_gestures();
        let Some(snapshot) = self.history.redo().cloned() else {
            return Ok(false);
        };
        self.restore_snapshot_internal(snapshot);
        Ok(true)
    }
}
