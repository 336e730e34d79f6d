use crate::{EngineError, PixelBuffer, Position, Result, TemplateKind, library::Font, mode::Tool};

use super::{ContentChange, EditorSession};

/// Draws `text` glyph by glyph starting at `origin`. Returns the pen position
/// after the last glyph and whether any cell changed.
fn stamp_text(buffer: &mut PixelBuffer, font: &Font, text: &str, origin: Position, spacing: i32, space_width: i32) -> (Position, bool) {
    let mut pen = origin;
    let mut changed = false;
    for ch in text.chars() {
        match font.glyph(ch) {
            Some(rows) => {
                for (y, row) in rows.iter().enumerate() {
                    for (x, color) in row.iter().enumerate() {
                        if !color.is_background() {
                            changed |= buffer.set(pen.x + x as i32, pen.y + y as i32, *color);
                        }
                    }
                }
                let width = rows.first().map(|r| r.len()).unwrap_or(0) as i32;
                pen.x += width + spacing;
            }
            None if ch == ' ' => pen.x += space_width + spacing,
            None => log::debug!("font '{}' has no glyph for {ch:?}, skipped", font.name),
        }
    }
    (pen, changed)
}

impl EditorSession {
    pub fn selected_font(&self) -> Option<&str> {
        self.selected_font.as_deref()
    }

    pub fn select_font(&mut self, name: Option<&str>) -> Result<()> {
        if let Some(name) = name {
            self.library.font(name)?;
        }
        self.selected_font = name.map(str::to_string);
        Ok(())
    }

    pub fn pending_text(&self) -> &str {
        &self.pending_text
    }

    /// Text the next click in `Type` mode will stamp
    pub fn set_pending_text(&mut self, text: impl Into<String>) {
        self.pending_text = text.into();
    }

    /// Stamps `text` in `font_name` with its top-left corner at `(x, y)` as one edit.
    ///
    /// Returns the pen position after the last glyph.
    pub fn type_text(&mut self, font_name: &str, text: &str, x: i32, y: i32) -> Result<Position> {
        self.settle_gestures();
        let (spacing, space_width) = (self.settings.letter_spacing, self.settings.space_width);
        let Some(font) = self.library.fonts.get(font_name) else {
            return Err(EngineError::missing(TemplateKind::Font, font_name));
        };
        let (pen, changed) = stamp_text(&mut self.buffer, font, text, Position::new(x, y), spacing, space_width);
        if changed {
            self.notify(ContentChange::Pixels);
            self.commit("Type text");
        }
        Ok(pen)
    }

    /// Types one character of the selected font at the text cursor and advances it
    pub fn type_char(&mut self, ch: char) -> Result<()> {
        let Some(cursor) = self.modes.text_cursor() else {
            return Err(EngineError::generic("Click on the canvas to place the text cursor first"));
        };
        let Some(font_name) = self.selected_font.clone() else {
            return Err(EngineError::generic("No font selected"));
        };
        let pen = self.type_text(&font_name, &ch.to_string(), cursor.x, cursor.y)?;
        self.modes.set_text_cursor(Some(pen));
        Ok(())
    }

    /// A click in `Type` mode: stamps pending text, or places the text cursor
    pub(crate) fn type_click(&mut self, pos: Position) {
        if self.modes.tool() != Tool::Type {
            return;
        }
        let text = self.pending_text.clone();
        match (&self.selected_font, text.is_empty()) {
            (Some(font), false) => {
                let font = font.clone();
                match self.type_text(&font, &text, pos.x, pos.y) {
                    Ok(pen) => self.modes.set_text_cursor(Some(pen)),
                    Err(err) => self.report(&err),
                }
            }
            _ => self.modes.set_text_cursor(Some(pos)),
        }
    }
}
