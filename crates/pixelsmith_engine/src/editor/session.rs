//! Editor Session
//!
//! The single owner of all editing state: the pixel buffer, the placed
//! component layer, the undo history, the guide lines and the active modes.
//! Front ends hold one `EditorSession`, feed it pointer events or one-shot
//! commands, and render from its read-only projections.
//!
//! ## Error reporting
//!
//! One-shot commands (`place_component`, `resize`, `save_character`, ...)
//! return a [`crate::Result`]. Pointer events have nobody to hand an error
//! to, so they turn errors into a `user_message` for every observer and a
//! `log::warn!` record. Neither path changes state on failure.
//!
//! ## History
//!
//! Every committed edit records one full [`CanvasSnapshot`]. A drawing stroke
//! is one edit from pointer down to pointer up; resize, fill, clear and every
//! component operation are one edit each. An edit that changed nothing
//! records nothing.

use serde::{Deserialize, Serialize};

use crate::{
    Color, PixelBuffer, Position, Size,
    brushes::{Brush, BrushShape},
    components::ComponentLayer,
    history::HistoryStack,
    library::Library,
    mode::{ComponentMode, ModeController, Tool},
    reference_lines::ReferenceLines,
    render::{RenderCell, render_cells},
    resize::{ResizeAnchor, ResizeEngine},
    settings::EditorSettings,
};

use super::EditorObserver;

/// The undoable part of the session
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasSnapshot {
    pub buffer: PixelBuffer,
    pub layer: ComponentLayer,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StrokeKind {
    Draw,
    Erase,
    Stamp,
}

impl StrokeKind {
    pub(crate) fn description(self) -> &'static str {
        match self {
            StrokeKind::Draw => "Draw",
            StrokeKind::Erase => "Erase",
            StrokeKind::Stamp => "Stamp component",
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Stroke {
    pub kind: StrokeKind,
    pub last: Position,
    pub changed: bool,
}

/// The font character currently loaded on the canvas
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FontEditContext {
    pub font: String,
    pub character: char,
    /// Previous glyph of the same font, shown as an onion skin
    pub ghost: Option<Vec<Vec<Color>>>,
}

pub struct EditorSession {
    // ═══════════════════════════════════════════════════════════════════════
    // Canvas
    // ═══════════════════════════════════════════════════════════════════════
    pub(crate) buffer: PixelBuffer,
    pub(crate) layer: ComponentLayer,
    pub(crate) history: HistoryStack<CanvasSnapshot>,

    // ═══════════════════════════════════════════════════════════════════════
    // Overlays & gestures
    // ═══════════════════════════════════════════════════════════════════════
    pub(crate) reference_lines: ReferenceLines,
    pub(crate) modes: ModeController,
    pub(crate) resize: ResizeEngine,
    /// Handle used by the most recent resize, drives font height re-fitting
    pub(crate) last_resize_anchor: Option<ResizeAnchor>,
    pub(crate) stroke: Option<Stroke>,
    pub(crate) hover: Option<Position>,

    // ═══════════════════════════════════════════════════════════════════════
    // Tool settings
    // ═══════════════════════════════════════════════════════════════════════
    pub(crate) brush: Brush,
    pub(crate) color: Color,

    // ═══════════════════════════════════════════════════════════════════════
    // Library & fonts
    // ═══════════════════════════════════════════════════════════════════════
    pub(crate) library: Library,
    pub(crate) font_edit: Option<FontEditContext>,
    pub(crate) selected_font: Option<String>,
    pub(crate) pending_text: String,

    pub(crate) settings: EditorSettings,
    pub(crate) observers: Vec<Box<dyn EditorObserver>>,
    pub(crate) revision: u64,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    // ═══════════════════════════════════════════════════════════════════════
    // Constructors
    // ═══════════════════════════════════════════════════════════════════════

    /// A blank 14×14 canvas with default settings
    pub fn new() -> Self {
        Self::with_settings(EditorSettings::default())
    }

    pub fn with_settings(settings: EditorSettings) -> Self {
        Self::with_library(settings, Library::default())
    }

    pub fn with_library(settings: EditorSettings, library: Library) -> Self {
        let settings = settings.normalized();
        let buffer = PixelBuffer::new(settings.canvas_width, settings.canvas_height);
        let snapshot = CanvasSnapshot {
            buffer: buffer.clone(),
            layer: ComponentLayer::default(),
        };
        Self {
            buffer,
            layer: ComponentLayer::default(),
            history: HistoryStack::with_limit(snapshot, settings.history_limit),
            reference_lines: ReferenceLines::default(),
            modes: ModeController::default(),
            resize: ResizeEngine::default(),
            last_resize_anchor: None,
            stroke: None,
            hover: None,
            brush: settings.brush(),
            color: settings.color,
            library,
            font_edit: None,
            selected_font: None,
            pending_text: String::new(),
            settings,
            observers: Vec::new(),
            revision: 0,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Getters
    // ═══════════════════════════════════════════════════════════════════════

    pub fn width(&self) -> i32 {
        self.buffer.width()
    }

    pub fn height(&self) -> i32 {
        self.buffer.height()
    }

    pub fn dimensions(&self) -> Size {
        self.buffer.size()
    }

    /// The raw base buffer, without placed components overlaid
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn components(&self) -> &ComponentLayer {
        &self.layer
    }

    /// The canvas as every consumer must read it: base buffer plus placed components
    pub fn composite(&self) -> Vec<Color> {
        self.layer.composite(&self.buffer)
    }

    /// Composited color of one cell, background outside the canvas
    pub fn composite_at(&self, x: i32, y: i32) -> Color {
        if !self.buffer.is_inside(x, y) {
            return Color::BACKGROUND;
        }
        self.layer.composite_at(&self.buffer, Position::new(x, y))
    }

    /// `(x, y, color)` of every composited cell for a grid renderer
    pub fn render_cells(&self) -> Vec<RenderCell> {
        render_cells(self.dimensions(), &self.composite())
    }

    pub fn reference_lines(&self) -> &ReferenceLines {
        &self.reference_lines
    }

    pub fn tool(&self) -> Tool {
        self.modes.tool()
    }

    pub fn component_mode(&self) -> &ComponentMode {
        self.modes.component_mode()
    }

    pub fn text_cursor(&self) -> Option<Position> {
        self.modes.text_cursor()
    }

    pub fn brush(&self) -> Brush {
        self.brush
    }

    pub fn current_color(&self) -> Color {
        self.color
    }

    pub fn library(&self) -> &Library {
        &self.library
    }

    /// Direct access for loading and bulk management of stored items
    pub fn library_mut(&mut self) -> &mut Library {
        &mut self.library
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn font_edit(&self) -> Option<&FontEditContext> {
        self.font_edit.as_ref()
    }

    pub fn hover(&self) -> Option<Position> {
        self.hover
    }

    pub fn is_stroke_active(&self) -> bool {
        self.stroke.is_some()
    }

    /// Increases with every content change, for pull-based consumers
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn undo_stack_len(&self) -> usize {
        self.history.undo_len()
    }

    pub fn redo_stack_len(&self) -> usize {
        self.history.redo_len()
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Basic setters
    // ═══════════════════════════════════════════════════════════════════════

    /// Selects a base tool, leaving any component mode first
    pub fn set_tool(&mut self, tool: Tool) {
        self.end_stroke();
        let exited = self.modes.select_tool(tool);
        self.finish_component_mode(exited);
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_brush(&mut self, size: u32, shape: BrushShape) {
        self.brush = Brush::new(size, shape);
    }

    pub fn add_observer(&mut self, observer: Box<dyn EditorObserver>) {
        self.observers.push(observer);
    }
}
