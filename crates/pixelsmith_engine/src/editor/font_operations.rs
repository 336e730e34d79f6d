//! Font and character editing
//!
//! A character is edited on the ordinary canvas. Entering font-edit mode
//! loads the stored glyph (or a blank canvas of the font's height), shows the
//! font's guides and remembers the previous glyph as an onion skin. Saving
//! stores the composited canvas as rows; glyph width is individual, the
//! height is shared by every glyph of the font.

use crate::{
    Color, EngineError, PixelBuffer, Result, TemplateKind,
    render::{RenderCell, ghost_cells},
    resize::validate_dimensions,
};

use super::{ContentChange, EditorSession, FontEditContext};

impl EditorSession {
    /// Creates an empty font with the configured default guide positions
    pub fn create_font(&mut self, name: &str) -> Result<()> {
        let positions = self.settings.font_reference_lines;
        let font = self.library.create_font(name.trim())?;
        font.reference_lines = Some(positions);
        log::info!("created font '{}'", name.trim());
        Ok(())
    }

    pub fn delete_font(&mut self, name: &str) -> Result<()> {
        if self.font_edit.as_ref().is_some_and(|ctx| ctx.font == name) {
            self.exit_font_edit();
        }
        if self.selected_font.as_deref() == Some(name) {
            self.selected_font = None;
        }
        self.library.remove_font(name)?;
        Ok(())
    }

    /// Loads `character` of `font` onto the canvas for editing.
    ///
    /// The current tool is left alone.
    pub fn enter_font_edit(&mut self, font_name: &str, character: char) -> Result<()> {
        let font = self.library.font(font_name)?;
        let glyph = font.glyph(character).cloned();
        let ghost = font.previous_character(character).and_then(|prev| font.glyph(prev).cloned());
        let stored_lines = font.reference_lines;
        let font_height = font.height();

        self.settle_gestures();
        let buffer = match &glyph {
            Some(rows) => {
                let width = rows.first().map(|r| r.len()).unwrap_or(0) as i32;
                PixelBuffer::from_rows(rows, width.max(1), (rows.len() as i32).max(1))
            }
            None => PixelBuffer::new(self.width(), font_height.unwrap_or(self.height()).max(1)),
        };
        self.replace_canvas_internal(buffer);
        self.commit(format!("Edit character '{character}'"));

        self.font_edit = Some(FontEditContext {
            font: font_name.to_string(),
            character,
            ghost,
        });
        self.reference_lines.load_positions(stored_lines.unwrap_or(self.settings.font_reference_lines));
        self.reference_lines.set_visible(true);
        if stored_lines.is_none() {
            self.persist_reference_lines();
        }
        self.notify(ContentChange::ReferenceLines);
        log::debug!("editing '{character}' of font '{font_name}'");
        Ok(())
    }

    pub fn exit_font_edit(&mut self) {
        if self.font_edit.take().is_some() {
            self.reference_lines.set_visible(false);
            self.notify(ContentChange::ReferenceLines);
        }
    }

    /// The composited canvas as `height × width` rows
    pub fn character_rows(&self) -> Vec<Vec<Color>> {
        let width = self.width().max(1) as usize;
        self.composite().chunks(width).map(|row| row.to_vec()).collect()
    }

    /// Stores the canvas as the character being edited.
    ///
    /// Every other glyph of the font is re-fitted to the new height using the
    /// handle of the last resize (bottom-right when there was none).
    pub fn save_character(&mut self) -> Result<()> {
        let ctx = self.font_edit.as_ref().ok_or(EngineError::NotInFontEditMode)?;
        let (font_name, character) = (ctx.font.clone(), ctx.character);
        let rows = self.character_rows();
        if rows.iter().flatten().all(Color::is_background) {
            return Err(EngineError::EmptyCanvasSave);
        }
        let height = self.height();
        let anchor = self.last_resize_anchor.unwrap_or_default();
        let positions = self.reference_lines.positions();

        let font = self.library.font_mut(&font_name)?;
        font.characters.insert(character, rows);
        let refitted = font.fit_height(height, |old, new| anchor.content_offset(old, new));
        font.reference_lines = Some(positions);
        log::info!("saved '{character}' to font '{font_name}', {refitted} glyphs re-fitted to height {height}");
        Ok(())
    }

    /// Resizes to `width × height` and loads glyph rows, as one edit
    pub fn load_character(&mut self, rows: &[Vec<Color>], width: i32, height: i32) -> Result<()> {
        validate_dimensions(width, height)?;
        self.settle_gestures();
        self.replace_canvas_internal(PixelBuffer::from_rows(rows, width, height));
        self.commit("Load character");
        Ok(())
    }

    pub fn delete_character(&mut self, font_name: &str, character: char) -> Result<()> {
        let font = self.library.font_mut(font_name)?;
        font.characters
            .remove(&character)
            .map(|_| ())
            .ok_or_else(|| EngineError::missing(TemplateKind::Character, character.to_string()))
    }

    /// Onion-skin cells of the previous glyph while editing a character
    pub fn ghost_cells(&self) -> Vec<RenderCell> {
        match self.font_edit.as_ref().and_then(|ctx| ctx.ghost.as_ref()) {
            Some(rows) => ghost_cells(rows, self.dimensions()),
            None => Vec::new(),
        }
    }
}
