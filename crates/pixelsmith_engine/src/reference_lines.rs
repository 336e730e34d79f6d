//! Baseline and vertical guide lines used for glyph alignment
//!
//! Stored positions are never clamped: a guide may sit outside the canvas,
//! which is a valid persisted state meaning "out of frame". Only the render
//! projection clamps the line to the nearest edge and marks it as dimmed.

use serde::{Deserialize, Serialize};

use crate::{Position, Size};

/// Opacity for a guide that lies inside the canvas
pub const LINE_OPACITY: f32 = 0.8;

/// Opacity for a guide drawn clamped at the edge
pub const DIMMED_LINE_OPACITY: f32 = 0.4;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuideLine {
    pub position: i32,
    #[serde(default)]
    pub visible: bool,
    #[serde(skip)]
    pub dragging: bool,
}

impl GuideLine {
    pub fn new(position: i32) -> Self {
        Self {
            position,
            visible: false,
            dragging: false,
        }
    }
}

/// The persisted part of the guides, stored per font
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceLinePositions {
    pub baseline: i32,
    pub vertical: i32,
}

impl Default for ReferenceLinePositions {
    fn default() -> Self {
        Self { baseline: 10, vertical: 2 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferenceHandle {
    Baseline,
    Vertical,
    /// Crossing point of both guides, drags both at once
    Intersection,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineRender {
    /// Row (baseline) or column (vertical), clamped into the canvas
    pub position: i32,
    pub dimmed: bool,
}

impl LineRender {
    pub fn opacity(&self) -> f32 {
        if self.dimmed {
            DIMMED_LINE_OPACITY
        } else {
            LINE_OPACITY
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReferenceLineRender {
    pub baseline: Option<LineRender>,
    pub vertical: Option<LineRender>,
    pub intersection: Option<Position>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceLines {
    pub baseline: GuideLine,
    pub vertical: GuideLine,
}

impl Default for ReferenceLines {
    fn default() -> Self {
        Self::new(12, 8)
    }
}

fn clamp_to(value: i32, dimension: i32) -> (i32, bool) {
    let max = (dimension - 1).max(0);
    let clamped = value.clamp(0, max);
    (clamped, clamped != value)
}

impl ReferenceLines {
    pub fn new(baseline_y: i32, vertical_x: i32) -> Self {
        Self {
            baseline: GuideLine::new(baseline_y),
            vertical: GuideLine::new(vertical_x),
        }
    }

    pub fn positions(&self) -> ReferenceLinePositions {
        ReferenceLinePositions {
            baseline: self.baseline.position,
            vertical: self.vertical.position,
        }
    }

    /// Loads stored positions, keeping visibility
    pub fn load_positions(&mut self, positions: ReferenceLinePositions) {
        self.baseline.position = positions.baseline;
        self.vertical.position = positions.vertical;
    }

    /// Stores `y` verbatim. Returns true if the value changed.
    pub fn set_baseline(&mut self, y: i32) -> bool {
        let changed = self.baseline.position != y;
        self.baseline.position = y;
        changed
    }

    /// Stores `x` verbatim. Returns true if the value changed.
    pub fn set_vertical(&mut self, x: i32) -> bool {
        let changed = self.vertical.position != x;
        self.vertical.position = x;
        changed
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.baseline.visible = visible;
        self.vertical.visible = visible;
        if !visible {
            self.end_drag();
        }
    }

    pub fn is_visible(&self) -> bool {
        self.baseline.visible || self.vertical.visible
    }

    pub fn both_visible(&self) -> bool {
        self.baseline.visible && self.vertical.visible
    }

    pub fn is_dragging(&self) -> bool {
        self.baseline.dragging || self.vertical.dragging
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Dragging
    // ═══════════════════════════════════════════════════════════════════════

    /// Which handle sits under the cell `pos`, using the clamped render positions
    pub fn handle_at(&self, pos: Position, canvas: Size) -> Option<ReferenceHandle> {
        let render = self.render(canvas);
        if render.intersection == Some(pos) {
            return Some(ReferenceHandle::Intersection);
        }
        if render.baseline.is_some_and(|l| l.position == pos.y) {
            return Some(ReferenceHandle::Baseline);
        }
        if render.vertical.is_some_and(|l| l.position == pos.x) {
            return Some(ReferenceHandle::Vertical);
        }
        None
    }

    /// Returns false if the handle is not visible
    pub fn begin_drag(&mut self, handle: ReferenceHandle) -> bool {
        match handle {
            ReferenceHandle::Baseline if self.baseline.visible => self.baseline.dragging = true,
            ReferenceHandle::Vertical if self.vertical.visible => self.vertical.dragging = true,
            ReferenceHandle::Intersection if self.both_visible() => {
                self.baseline.dragging = true;
                self.vertical.dragging = true;
            }
            _ => return false,
        }
        true
    }

    /// Moves the dragged guides to the cell under the pointer
    pub fn drag_to(&mut self, pos: Position) -> bool {
        let mut changed = false;
        if self.baseline.dragging {
            changed |= self.set_baseline(pos.y);
        }
        if self.vertical.dragging {
            changed |= self.set_vertical(pos.x);
        }
        changed
    }

    pub fn end_drag(&mut self) {
        self.baseline.dragging = false;
        self.vertical.dragging = false;
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Resize
    // ═══════════════════════════════════════════════════════════════════════

    /// Follows the content after a canvas resize.
    ///
    /// Only visible guides move. A guide that was inside the old canvas is
    /// translated and snapped into the new one; a guide that was already out
    /// of frame is only translated, so its out-of-range value survives.
    pub fn translate(&mut self, offset: Position, old: Size, new: Size) -> bool {
        let mut changed = false;
        if self.baseline.visible {
            let y = self.baseline.position;
            let moved = y + offset.y;
            let next = if (0..old.height).contains(&y) { clamp_to(moved, new.height).0 } else { moved };
            changed |= self.set_baseline(next);
        }
        if self.vertical.visible {
            let x = self.vertical.position;
            let moved = x + offset.x;
            let next = if (0..old.width).contains(&x) { clamp_to(moved, new.width).0 } else { moved };
            changed |= self.set_vertical(next);
        }
        changed
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Render projection
    // ═══════════════════════════════════════════════════════════════════════

    pub fn render(&self, canvas: Size) -> ReferenceLineRender {
        let baseline = self.baseline.visible.then(|| {
            let (position, dimmed) = clamp_to(self.baseline.position, canvas.height);
            LineRender { position, dimmed }
        });
        let vertical = self.vertical.visible.then(|| {
            let (position, dimmed) = clamp_to(self.vertical.position, canvas.width);
            LineRender { position, dimmed }
        });
        let intersection = match (baseline, vertical) {
            (Some(b), Some(v)) => Some(Position::new(v.position, b.position)),
            _ => None,
        };
        ReferenceLineRender {
            baseline,
            vertical,
            intersection,
        }
    }
}
