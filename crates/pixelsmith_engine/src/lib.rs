//! Pixel grid engine for sprite and bitmap-font editing
//!
//! The [`EditorSession`] owns everything: a [`PixelBuffer`], a layer of
//! placed components, a bounded undo history, two guide lines for glyph
//! alignment and the active tool / component mode. Front ends drive it with
//! pointer events or one-shot commands and paint the cells it projects.

mod color;
mod error;
mod position;

pub mod brushes;
pub mod components;
pub mod editor;
pub mod history;
pub mod library;
pub mod mode;
pub mod pixel_buffer;
pub mod reference_lines;
pub mod render;
pub mod resize;
pub mod settings;

pub use color::Color;
pub use error::{EngineError, Result, TemplateKind};
pub use position::{Position, Size};

pub use brushes::{Brush, BrushShape};
pub use components::{Component, ComponentId, ComponentLayer, PlacedComponent};
pub use editor::{CanvasSnapshot, ContentChange, EditorObserver, EditorSession, FontEditContext, SessionState};
pub use history::{HistoryStack, UndoState};
pub use library::{Font, JsonFileStore, Library, LibraryStore, MemoryStore};
pub use mode::{ComponentMode, Tool};
pub use pixel_buffer::PixelBuffer;
pub use reference_lines::{ReferenceHandle, ReferenceLinePositions, ReferenceLines};
pub use resize::{ResizeAnchor, ScreenPoint};
pub use settings::EditorSettings;
