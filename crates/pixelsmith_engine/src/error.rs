//! Unified error types for pixelsmith_engine

use thiserror::Error;

/// Main error type for pixelsmith_engine operations
///
/// Every variant is recoverable. Editing operations reject the request and
/// leave the session untouched, so callers can surface the message and carry on.
#[derive(Debug, Error)]
pub enum EngineError {
    // === I/O Errors ===
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse settings: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("Failed to write settings: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // === Canvas Errors ===
    #[error("Component does not fit at {x}, {y} ({width}x{height}). Try placing it elsewhere.")]
    OutOfBoundsPlacement { x: i32, y: i32, width: i32, height: i32 },

    #[error("Cannot save an empty canvas.")]
    EmptyCanvasSave,

    #[error("Canvas dimensions must be between 1 and 480 pixels (got {width}x{height}).")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("Pixel data length mismatch: expected {expected}, got {actual}")]
    DataLengthMismatch { expected: usize, actual: usize },

    #[error("Invalid hex color: {value}")]
    InvalidHexColor { value: String },

    // === Library Errors ===
    #[error("{kind} '{name}' not found")]
    MissingTemplate { kind: TemplateKind, name: String },

    #[error("{kind} '{name}' already exists")]
    DuplicateName { kind: TemplateKind, name: String },

    #[error("Name must not be empty")]
    EmptyName,

    #[error("No placed component with id {id}")]
    UnknownComponent { id: u64 },

    #[error("Not editing a font character")]
    NotInFontEditMode,

    // === Generic ===
    #[error("{0}")]
    Generic(String),
}

/// What kind of stored object an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
    Component,
    Composition,
    Font,
    Character,
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateKind::Component => write!(f, "Component"),
            TemplateKind::Composition => write!(f, "Composition"),
            TemplateKind::Font => write!(f, "Font"),
            TemplateKind::Character => write!(f, "Character"),
        }
    }
}

/// Result type alias for pixelsmith_engine operations
pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    /// Create a generic error from any displayable message
    pub fn generic(msg: impl Into<String>) -> Self {
        EngineError::Generic(msg.into())
    }

    pub fn missing(kind: TemplateKind, name: impl Into<String>) -> Self {
        EngineError::MissingTemplate { kind, name: name.into() }
    }

    pub fn duplicate(kind: TemplateKind, name: impl Into<String>) -> Self {
        EngineError::DuplicateName { kind, name: name.into() }
    }

    /// True for errors that come from storage rather than from an editing request
    pub fn is_storage_error(&self) -> bool {
        matches!(
            self,
            EngineError::Io(_) | EngineError::Json(_) | EngineError::TomlDeserialize(_) | EngineError::TomlSerialize(_)
        )
    }
}

impl From<String> for EngineError {
    fn from(msg: String) -> Self {
        EngineError::Generic(msg)
    }
}

impl From<&str> for EngineError {
    fn from(msg: &str) -> Self {
        EngineError::Generic(msg.to_string())
    }
}
