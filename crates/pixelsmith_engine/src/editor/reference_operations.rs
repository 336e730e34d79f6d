use crate::{
    Position,
    reference_lines::{ReferenceHandle, ReferenceLineRender},
};

use super::{ContentChange, EditorSession};

impl EditorSession {
    /// Stores the baseline row verbatim, out-of-range values included
    pub fn set_baseline(&mut self, y: i32) {
        if self.reference_lines.set_baseline(y) {
            self.reference_lines_changed();
        }
    }

    /// Stores the vertical guide column verbatim, out-of-range values included
    pub fn set_vertical(&mut self, x: i32) {
        if self.reference_lines.set_vertical(x) {
            self.reference_lines_changed();
        }
    }

    pub fn set_reference_lines_visible(&mut self, visible: bool) {
        self.reference_lines.set_visible(visible);
        self.notify(ContentChange::ReferenceLines);
    }

    pub fn reference_line_render(&self) -> ReferenceLineRender {
        self.reference_lines.render(self.dimensions())
    }

    pub fn reference_handle_at(&self, pos: Position) -> Option<ReferenceHandle> {
        self.reference_lines.handle_at(pos, self.dimensions())
    }

    /// Starts dragging a guide. Returns false for a hidden guide.
    pub fn begin_reference_drag(&mut self, handle: ReferenceHandle) -> bool {
        self.reference_lines.begin_drag(handle)
    }

    pub fn drag_reference(&mut self, pos: Position) {
        if self.reference_lines.drag_to(pos) {
            self.reference_lines_changed();
        }
    }

    pub fn end_reference_drag(&mut self) {
        self.reference_lines.end_drag();
    }

    fn reference_lines_changed(&mut self) {
        self.persist_reference_lines();
        if self.reference_lines.is_visible() {
            self.notify(ContentChange::ReferenceLines);
        }
    }

    /// Writes the guide positions into the font being edited, if any
    pub(crate) fn persist_reference_lines(&mut self) {
        let Some(ctx) = &self.font_edit else {
            return;
        };
        match self.library.fonts.get_mut(&ctx.font) {
            Some(font) => font.reference_lines = Some(self.reference_lines.positions()),
            None => log::warn!("font '{}' vanished while editing, guides not stored", ctx.font),
        }
    }
}
