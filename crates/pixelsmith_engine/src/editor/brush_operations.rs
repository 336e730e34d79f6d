use crate::{
    Color, Position,
    brushes::{apply_brush, bresenham_line, flood_fill},
    mode::ComponentMode,
    render::brush_footprint,
};

use super::{ContentChange, EditorSession, Stroke, StrokeKind};

impl EditorSession {
    // ═══════════════════════════════════════════════════════════════════════
    // One-shot commands
    // ═══════════════════════════════════════════════════════════════════════

    /// Paints the brush at `(x, y)` with the current color as one edit
    pub fn draw_at(&mut self, x: i32, y: i32) -> bool {
        self.settle_gestures();
        self.begin_stroke(StrokeKind::Draw, Position::new(x, y));
        self.end_stroke()
    }

    /// Erases the brush footprint at `(x, y)` as one edit
    pub fn erase_at(&mut self, x: i32, y: i32) -> bool {
        self.settle_gestures();
        self.begin_stroke(StrokeKind::Erase, Position::new(x, y));
        self.end_stroke()
    }

    /// Flood fills from `(x, y)` with the current color.
    ///
    /// Filling a region that already has the color changes nothing and
    /// records nothing.
    pub fn fill_at(&mut self, x: i32, y: i32) -> bool {
        self.settle_gestures();
        let color = self.color;
        if !flood_fill(&mut self.buffer, Position::new(x, y), color) {
            return false;
        }
        self.notify(ContentChange::Pixels);
        self.commit("Fill");
        true
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Strokes
    // ═══════════════════════════════════════════════════════════════════════

    pub(crate) fn begin_stroke(&mut self, kind: StrokeKind, pos: Position) {
        self.end_stroke();
        let changed = self.paint_segment(kind, pos, pos);
        self.stroke = Some(Stroke { kind, last: pos, changed });
    }

    /// Connects the previous pointer sample to `pos` so fast drags leave no gaps
    pub(crate) fn continue_stroke(&mut self, pos: Position) {
        let Some(stroke) = self.stroke else {
            return;
        };
        if stroke.last == pos {
            return;
        }
        let changed = self.paint_segment(stroke.kind, stroke.last, pos);
        self.stroke = Some(Stroke {
            kind: stroke.kind,
            last: pos,
            changed: stroke.changed || changed,
        });
    }

    /// Finishes the active stroke and records it. Returns true if anything was painted.
    pub(crate) fn end_stroke(&mut self) -> bool {
        let Some(stroke) = self.stroke.take() else {
            return false;
        };
        if stroke.changed {
            self.commit(stroke.kind.description());
        }
        stroke.changed
    }

    fn paint_segment(&mut self, kind: StrokeKind, from: Position, to: Position) -> bool {
        let points = if from == to { vec![to] } else { bresenham_line(from, to).into_iter().skip(1).collect() };
        let mut changed = false;
        match kind {
            StrokeKind::Draw | StrokeKind::Erase => {
                let color = if kind == StrokeKind::Draw { self.color } else { Color::BACKGROUND };
                for p in points {
                    changed |= apply_brush(&mut self.buffer, p, &self.brush, color);
                }
            }
            StrokeKind::Stamp => {
                // stamps are destructive; no background is tracked for them
                if let ComponentMode::BrushStamping { template } = self.modes.component_mode() {
                    for p in points {
                        changed |= template.stamp_onto(&mut self.buffer, p);
                    }
                }
            }
        }
        if changed {
            self.notify(ContentChange::Pixels);
        }
        changed
    }

    /// Cells the brush would paint at the hovered cell
    pub fn brush_footprint(&self) -> Vec<Position> {
        match self.hover {
            Some(center) => brush_footprint(&self.brush, center, self.dimensions()),
            None => Vec::new(),
        }
    }
}
