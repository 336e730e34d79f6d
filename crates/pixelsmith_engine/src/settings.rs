use std::{fs, io::Write, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Color, Result,
    brushes::{Brush, BrushShape, MAX_BRUSH_SIZE},
    history::DEFAULT_HISTORY_LIMIT,
    pixel_buffer::{MAX_DIMENSION, MIN_DIMENSION},
    reference_lines::ReferenceLinePositions,
};

/// Editor defaults persisted as `settings.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub canvas_width: i32,
    pub canvas_height: i32,
    pub history_limit: usize,
    pub brush_size: u32,
    pub brush_shape: BrushShape,
    pub color: Color,
    /// Extra columns between typed glyphs
    pub letter_spacing: i32,
    /// Advance for a space the font has no glyph for
    pub space_width: i32,
    /// Guide positions for a font that has none stored yet
    pub font_reference_lines: ReferenceLinePositions,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            canvas_width: 14,
            canvas_height: 14,
            history_limit: DEFAULT_HISTORY_LIMIT,
            brush_size: 1,
            brush_shape: BrushShape::Square,
            color: Color::WHITE,
            letter_spacing: 0,
            space_width: 8,
            font_reference_lines: ReferenceLinePositions::default(),
        }
    }
}

impl EditorSettings {
    pub const FILE_NAME: &'static str = "settings.toml";

    /// Loads settings, falling back to defaults for a missing or broken file
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(txt) => match toml::from_str::<EditorSettings>(&txt) {
                Ok(settings) => return settings.normalized(),
                Err(err) => log::error!("Error parsing settings file {}: {}", path.display(), err),
            },
            Err(err) => log::error!("Error reading settings file: {}", err),
        }
        Self::default()
    }

    pub fn store(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }
        let text = toml::to_string_pretty(self)?;
        let mut file = fs::File::create(path)?;
        file.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Pulls out-of-range values back into what the editor accepts
    pub fn normalized(mut self) -> Self {
        self.canvas_width = self.canvas_width.clamp(MIN_DIMENSION, MAX_DIMENSION);
        self.canvas_height = self.canvas_height.clamp(MIN_DIMENSION, MAX_DIMENSION);
        self.history_limit = self.history_limit.max(1);
        self.brush_size = self.brush_size.clamp(1, MAX_BRUSH_SIZE);
        self.space_width = self.space_width.max(0);
        self
    }

    pub fn brush(&self) -> Brush {
        Brush::new(self.brush_size, self.brush_shape)
    }
}
