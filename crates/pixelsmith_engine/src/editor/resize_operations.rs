use crate::{
    Result, Size,
    render::cell_size,
    resize::{ResizeAnchor, ResizeOutcome, ScreenPoint, validate_dimensions},
};

use super::{ContentChange, EditorSession};

impl EditorSession {
    /// Resizes to `width × height`, keeping content at the top-left.
    ///
    /// Sizes outside `[1, 480]` are rejected and the canvas keeps its size.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<()> {
        self.resize_from(ResizeAnchor::BottomRight, width, height)
    }

    /// Resizes as if the `anchor` handle had been dragged to the new size
    pub fn resize_from(&mut self, anchor: ResizeAnchor, width: i32, height: i32) -> Result<()> {
        let size = validate_dimensions(width, height)?;
        self.settle_gestures();
        self.apply_resize(anchor, size);
        Ok(())
    }

    /// Applies a complete drag of `dx, dy` screen pixels on one handle.
    ///
    /// Returns the resulting canvas size.
    pub fn drag_resize(&mut self, anchor: ResizeAnchor, dx: f64, dy: f64) -> Size {
        self.begin_resize(anchor, ScreenPoint::new(0.0, 0.0));
        self.update_resize(ScreenPoint::new(dx, dy));
        self.end_resize();
        self.dimensions()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Gesture
    // ═══════════════════════════════════════════════════════════════════════

    pub fn begin_resize(&mut self, anchor: ResizeAnchor, pointer: ScreenPoint) {
        self.settle_gestures();
        let pixel_size = cell_size(self.width(), self.height()) as f64;
        self.resize.begin(anchor, self.dimensions(), pointer, pixel_size);
    }

    /// Returns the live preview size while dragging
    pub fn update_resize(&mut self, pointer: ScreenPoint) -> Option<Size> {
        self.resize.update(pointer)
    }

    pub fn resize_preview(&self) -> Option<Size> {
        self.resize.preview()
    }

    /// Releases the handle. Returns true if the canvas changed size.
    pub fn end_resize(&mut self) -> bool {
        match self.resize.finish() {
            ResizeOutcome::Committed { anchor, to, .. } => self.apply_resize(anchor, to),
            ResizeOutcome::Unchanged | ResizeOutcome::Cancelled => false,
        }
    }

    pub fn cancel_resize(&mut self) {
        self.resize.cancel();
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Remap
    // ═══════════════════════════════════════════════════════════════════════

    /// Remaps pixels, components and guides to `new_size` and records one edit
    pub(crate) fn apply_resize(&mut self, anchor: ResizeAnchor, new_size: Size) -> bool {
        let old_size = self.dimensions();
        if old_size == new_size {
            return false;
        }
        let offset = anchor.content_offset(old_size, new_size);
        self.buffer = self.buffer.resized(new_size.width, new_size.height, offset);

        let removed = self.layer.translate(offset, new_size);
        if !removed.is_empty() {
            log::info!("resize to {new_size} removed {} components outside the canvas", removed.len());
        }

        if self.reference_lines.translate(offset, old_size, new_size) {
            self.persist_reference_lines();
            self.notify(ContentChange::ReferenceLines);
        }

        self.last_resize_anchor = Some(anchor);
        self.notify(ContentChange::Resized(new_size));
        self.commit(format!("Resize to {new_size}"));
        true
    }
}
