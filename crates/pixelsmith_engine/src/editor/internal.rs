//! Internal plumbing for the editor session
//!
//! History commits, snapshot restore and observer notification. These never
//! create history entries on their own except through `commit`.

use crate::{EngineError, PixelBuffer, mode::ComponentMode};

use super::{CanvasSnapshot, ContentChange, EditorSession};

impl EditorSession {
    pub(crate) fn snapshot(&self) -> CanvasSnapshot {
        CanvasSnapshot {
            buffer: self.buffer.clone(),
            layer: self.layer.clone(),
        }
    }

    /// Records the current canvas as a new history entry.
    ///
    /// Returns false if nothing changed since the last entry.
    pub(crate) fn commit(&mut self, description: impl Into<String>) -> bool {
        let description = description.into();
        let snapshot = self.snapshot();
        let pushed = self.history.push(description.as_str(), snapshot);
        if pushed {
            log::debug!("history: {description} ({} undo steps)", self.history.undo_len());
        }
        pushed
    }

    /// Puts a history state back onto the canvas without recording anything
    pub(crate) fn restore_snapshot_internal(&mut self, snapshot: CanvasSnapshot) {
        let old_size = self.buffer.size();
        self.buffer = snapshot.buffer;
        self.layer = snapshot.layer;
        if self.buffer.size() != old_size {
            self.notify(ContentChange::Resized(self.buffer.size()));
        }
        self.notify(ContentChange::History);
    }

    /// Replaces the whole canvas, dropping all placed components
    pub(crate) fn replace_canvas_internal(&mut self, buffer: PixelBuffer) {
        let old_size = self.buffer.size();
        self.layer.clear();
        self.buffer = buffer;
        if self.buffer.size() != old_size {
            self.notify(ContentChange::Resized(self.buffer.size()));
        }
        self.notify(ContentChange::Cleared);
    }

    pub(crate) fn notify(&mut self, change: ContentChange) {
        self.revision += 1;
        for observer in &mut self.observers {
            observer.content_changed(change);
        }
    }

    /// Surfaces an error from a pointer-driven path
    pub(crate) fn report(&mut self, err: &EngineError) {
        log::warn!("{err}");
        let message = err.to_string();
        for observer in &mut self.observers {
            observer.user_message(&message);
        }
    }

    /// Completes a component mode that was left.
    ///
    /// A lifted component is put back where it came from.
    pub(crate) fn finish_component_mode(&mut self, mode: ComponentMode) {
        if let ComponentMode::Moving(gesture) = mode {
            let origin = gesture.origin();
            match self.layer.drop_at(&mut self.buffer, gesture.component, origin) {
                Ok(_) => self.notify(ContentChange::Components),
                Err(err) => self.report(&err),
            }
        }
    }

    /// Brings all in-flight gestures to rest before a one-shot command.
    ///
    /// Strokes are committed, a moving component returns to its origin, a
    /// resize drag is cancelled.
    pub(crate) fn settle_gestures(&mut self) {
        self.end_stroke();
        if matches!(self.modes.component_mode(), ComponentMode::Moving(_)) {
            let mode = self.modes.exit_component_mode();
            self.finish_component_mode(mode);
        }
        self.resize.cancel();
        self.reference_lines.end_drag();
    }
}
