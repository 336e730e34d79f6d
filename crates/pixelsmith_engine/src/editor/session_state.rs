//! Session state for the editor
//!
//! Contains all data needed to restore an editing session:
//! - Canvas pixels and placed components with their background patches
//! - Guide positions and visibility
//! - Tool, brush and color
//! - The font character being edited
//!
//! The undo history is not part of it; a restored session starts with a
//! fresh history.

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Color, Result,
    brushes::Brush,
    mode::Tool,
    reference_lines::{ReferenceLinePositions, ReferenceLines},
};

use super::{CanvasSnapshot, ContentChange, EditorSession, FontEditContext};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontEditTarget {
    pub font: String,
    pub character: char,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Version for future compatibility
    #[serde(default = "default_version")]
    pub version: u32,

    pub canvas: CanvasSnapshot,

    #[serde(default)]
    pub reference_lines: ReferenceLines,

    #[serde(default)]
    pub tool: Tool,

    #[serde(default)]
    pub brush: Brush,

    #[serde(default = "default_color")]
    pub color: Color,

    #[serde(default)]
    pub font_edit: Option<FontEditTarget>,
}

fn default_version() -> u32 {
    1
}

fn default_color() -> Color {
    Color::WHITE
}

impl SessionState {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }
}

impl EditorSession {
    pub fn session_state(&self) -> SessionState {
        SessionState {
            version: default_version(),
            canvas: self.snapshot(),
            reference_lines: self.reference_lines,
            tool: self.modes.tool(),
            brush: self.brush,
            color: self.color,
            font_edit: self.font_edit.as_ref().map(|ctx| FontEditTarget {
                font: ctx.font.clone(),
                character: ctx.character,
            }),
        }
    }

    /// Restores a saved session. The undo history starts over from it.
    pub fn restore_session(&mut self, state: SessionState) {
        self.settle_gestures();
        self.set_tool(state.tool);
        let mut canvas = state.canvas;
        canvas.layer.collect_orphans();
        self.history.reset(canvas.clone());
        self.restore_snapshot_internal(canvas);
        self.brush = Brush::new(state.brush.size, state.brush.shape);
        self.color = state.color;

        self.font_edit = state.font_edit.and_then(|target| match self.library.fonts.get(&target.font) {
            Some(font) => Some(FontEditContext {
                ghost: font.previous_character(target.character).and_then(|prev| font.glyph(prev).cloned()),
                font: target.font,
                character: target.character,
            }),
            None => {
                log::warn!("session refers to missing font '{}', font editing not restored", target.font);
                None
            }
        });
        self.reference_lines = state.reference_lines;
        self.reference_lines.end_drag();
        self.notify(ContentChange::ReferenceLines);
    }

    pub fn font_reference_lines(&self, font: &str) -> Option<ReferenceLinePositions> {
        self.library.fonts.get(font).and_then(|f| f.reference_lines)
    }
}
