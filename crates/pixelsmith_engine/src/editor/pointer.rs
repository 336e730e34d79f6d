//! Pointer event routing
//!
//! Positions are canvas cells, already snapped by the front end. An active
//! component mode gets the events before the base tool. Errors are reported
//! through the observers, never returned.

use crate::{
    Position,
    mode::{ComponentMode, PointerRoute, Tool},
};

use super::{EditorSession, StrokeKind};

impl EditorSession {
    pub fn pointer_down(&mut self, pos: Position) {
        self.hover = Some(pos);
        match self.modes.route() {
            PointerRoute::Placing | PointerRoute::Moving => {}
            PointerRoute::BrushStamping => self.begin_stroke(StrokeKind::Stamp, pos),
            PointerRoute::Tool(tool) => match tool {
                Tool::Draw => self.begin_stroke(StrokeKind::Draw, pos),
                Tool::Erase => self.begin_stroke(StrokeKind::Erase, pos),
                Tool::Fill => {
                    self.fill_at(pos.x, pos.y);
                }
                Tool::Move => {
                    if let Some(id) = self.hit_test(pos) {
                        if let Err(err) = self.begin_move(id, pos) {
                            self.report(&err);
                        }
                    }
                }
                Tool::Type => self.type_click(pos),
                Tool::None => {}
            },
        }
    }

    pub fn pointer_move(&mut self, pos: Position) {
        self.hover = Some(pos);
        if self.reference_lines.is_dragging() {
            self.drag_reference(pos);
            return;
        }
        match self.modes.route() {
            PointerRoute::Placing => {
                if let ComponentMode::Placing { hover, .. } = self.modes.component_mode_mut() {
                    *hover = Some(pos);
                }
            }
            PointerRoute::Moving => self.update_move(pos),
            PointerRoute::BrushStamping | PointerRoute::Tool(_) => self.continue_stroke(pos),
        }
    }

    pub fn pointer_up(&mut self, pos: Position) {
        if self.reference_lines.is_dragging() {
            self.end_reference_drag();
            return;
        }
        self.continue_stroke(pos);
        self.end_stroke();
        if self.modes.route() == PointerRoute::Moving {
            if let Err(err) = self.commit_move(pos) {
                self.report(&err);
            }
        }
    }

    pub fn pointer_click(&mut self, pos: Position) {
        if self.modes.route() == PointerRoute::Placing {
            if let Err(err) = self.commit_placement(pos) {
                self.report(&err);
            }
        }
    }

    /// Pointer left the canvas: strokes end, previews vanish, a resize drag is cancelled
    pub fn pointer_leave(&mut self) {
        self.hover = None;
        self.end_stroke();
        self.resize.cancel();
        self.reference_lines.end_drag();
        match self.modes.component_mode_mut() {
            ComponentMode::Placing { hover, .. } => *hover = None,
            ComponentMode::Moving(gesture) => gesture.hover = None,
            _ => {}
        }
    }
}
