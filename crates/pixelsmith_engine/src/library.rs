//! Saved components, compositions and fonts
//!
//! The library is plain data. Where it lives is decided by a [`LibraryStore`]:
//! a JSON file on disk for the command line front end, memory for tests.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    Color, EngineError, PixelBuffer, Position, Result, Size, TemplateKind, components::Component, reference_lines::ReferenceLinePositions,
};

/// A bitmap font: glyphs of individual width and a shared height
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Font {
    pub name: String,
    /// Glyph rows, `height × width`
    #[serde(default)]
    pub characters: BTreeMap<char, Vec<Vec<Color>>>,
    #[serde(default)]
    pub reference_lines: Option<ReferenceLinePositions>,
    pub created_at: DateTime<Utc>,
}

impl Font {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            characters: BTreeMap::new(),
            reference_lines: None,
            created_at: Utc::now(),
        }
    }

    pub fn glyph(&self, ch: char) -> Option<&Vec<Vec<Color>>> {
        self.characters.get(&ch)
    }

    pub fn glyph_size(&self, ch: char) -> Option<Size> {
        self.glyph(ch).map(|rows| glyph_size(rows))
    }

    /// The shared glyph height, taken from any stored glyph
    pub fn height(&self) -> Option<i32> {
        self.characters.values().next().map(|rows| rows.len() as i32)
    }

    /// The closest stored character before `ch`
    pub fn previous_character(&self, ch: char) -> Option<char> {
        self.characters.range(..ch).next_back().map(|(c, _)| *c)
    }

    /// Re-fits every glyph to `height` rows.
    ///
    /// `offset_for` maps a glyph's old size to the row offset its content is
    /// moved by, the same mapping a canvas resize uses.
    pub fn fit_height(&mut self, height: i32, offset_for: impl Fn(Size, Size) -> Position) -> usize {
        let mut changed = 0;
        for rows in self.characters.values_mut() {
            let old = glyph_size(rows);
            if old.height == height {
                continue;
            }
            let new = Size::new(old.width, height);
            let offset = offset_for(old, new);
            let buffer = PixelBuffer::from_rows(rows, old.width, old.height).resized(new.width, new.height, offset.with_x(0));
            *rows = buffer.to_rows();
            changed += 1;
        }
        changed
    }
}

fn glyph_size(rows: &[Vec<Color>]) -> Size {
    Size::new(rows.first().map(|r| r.len()).unwrap_or(0) as i32, rows.len() as i32)
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    #[serde(default)]
    pub components: BTreeMap<String, Component>,
    #[serde(default)]
    pub compositions: BTreeMap<String, Component>,
    #[serde(default)]
    pub fonts: BTreeMap<String, Font>,
}

fn check_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(EngineError::EmptyName);
    }
    Ok(())
}

fn insert_named<T>(map: &mut BTreeMap<String, T>, kind: TemplateKind, name: &str, value: T, overwrite: bool) -> Result<bool> {
    check_name(name)?;
    if map.contains_key(name) && !overwrite {
        return Err(EngineError::duplicate(kind, name));
    }
    Ok(map.insert(name.to_string(), value).is_some())
}

impl Library {
    pub fn component(&self, name: &str) -> Result<&Component> {
        self.components.get(name).ok_or_else(|| EngineError::missing(TemplateKind::Component, name))
    }

    /// Stores a component. Returns true if an existing one was replaced.
    pub fn insert_component(&mut self, component: Component, overwrite: bool) -> Result<bool> {
        let name = component.name.clone();
        insert_named(&mut self.components, TemplateKind::Component, &name, component, overwrite)
    }

    pub fn remove_component(&mut self, name: &str) -> Result<Component> {
        self.components.remove(name).ok_or_else(|| EngineError::missing(TemplateKind::Component, name))
    }

    pub fn composition(&self, name: &str) -> Result<&Component> {
        self.compositions.get(name).ok_or_else(|| EngineError::missing(TemplateKind::Composition, name))
    }

    pub fn insert_composition(&mut self, composition: Component, overwrite: bool) -> Result<bool> {
        let name = composition.name.clone();
        insert_named(&mut self.compositions, TemplateKind::Composition, &name, composition, overwrite)
    }

    pub fn remove_composition(&mut self, name: &str) -> Result<Component> {
        self.compositions.remove(name).ok_or_else(|| EngineError::missing(TemplateKind::Composition, name))
    }

    pub fn font(&self, name: &str) -> Result<&Font> {
        self.fonts.get(name).ok_or_else(|| EngineError::missing(TemplateKind::Font, name))
    }

    pub fn font_mut(&mut self, name: &str) -> Result<&mut Font> {
        self.fonts.get_mut(name).ok_or_else(|| EngineError::missing(TemplateKind::Font, name))
    }

    pub fn create_font(&mut self, name: &str) -> Result<&mut Font> {
        check_name(name)?;
        if self.fonts.contains_key(name) {
            return Err(EngineError::duplicate(TemplateKind::Font, name));
        }
        Ok(self.fonts.entry(name.to_string()).or_insert_with(|| Font::new(name)))
    }

    pub fn remove_font(&mut self, name: &str) -> Result<Font> {
        self.fonts.remove(name).ok_or_else(|| EngineError::missing(TemplateKind::Font, name))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Storage
// ═══════════════════════════════════════════════════════════════════════════

/// Backing store for the library
pub trait LibraryStore {
    fn load(&self) -> Result<Library>;

    fn store(&mut self, library: &Library) -> Result<()>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    library: Library,
}

impl MemoryStore {
    pub fn new(library: Library) -> Self {
        Self { library }
    }
}

impl LibraryStore for MemoryStore {
    fn load(&self) -> Result<Library> {
        Ok(self.library.clone())
    }

    fn store(&mut self, library: &Library) -> Result<()> {
        self.library = library.clone();
        Ok(())
    }
}

/// Library kept as one pretty-printed JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub const FILE_NAME: &'static str = "library.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LibraryStore for JsonFileStore {
    /// A missing file is an empty library
    fn load(&self) -> Result<Library> {
        if !self.path.exists() {
            log::info!("no library at {}, starting empty", self.path.display());
            return Ok(Library::default());
        }
        let text = fs::read_to_string(&self.path)?;
        let library: Library = serde_json::from_str(&text)?;
        log::info!(
            "loaded library {} ({} components, {} compositions, {} fonts)",
            self.path.display(),
            library.components.len(),
            library.compositions.len(),
            library.fonts.len()
        );
        Ok(library)
    }

    fn store(&mut self, library: &Library) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(library)?;
        let temp_path = self.path.with_extension("json.tmp");
        if let Err(err) = fs::write(&temp_path, text).and_then(|_| fs::rename(&temp_path, &self.path)) {
            log::error!("Error writing library {}: {}", self.path.display(), err);
            let _ = fs::remove_file(&temp_path);
            return Err(err.into());
        }
        log::info!("stored library {}", self.path.display());
        Ok(())
    }
}
