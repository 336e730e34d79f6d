use std::path::PathBuf;

use once_cell::sync::Lazy;
use pixelsmith_engine::{EditorSettings, JsonFileStore};

// =============================================================================
// Project directory constants
// =============================================================================

const PROJECT_QUALIFIER: &str = "com";
const PROJECT_ORGANIZATION: &str = "GitHub";
const PROJECT_APPLICATION: &str = "pixelsmith";

/// Lazily initialized project directories (computed once on first access)
pub(crate) static PROJECT_DIRS: Lazy<Option<directories::ProjectDirs>> =
    Lazy::new(|| directories::ProjectDirs::from(PROJECT_QUALIFIER, PROJECT_ORGANIZATION, PROJECT_APPLICATION));

pub fn config_dir() -> Option<PathBuf> {
    PROJECT_DIRS.as_ref().map(|p| p.config_dir().to_path_buf())
}

pub fn data_dir() -> Option<PathBuf> {
    PROJECT_DIRS.as_ref().map(|p| p.data_dir().to_path_buf())
}

pub fn settings_file() -> Option<PathBuf> {
    config_dir().map(|d| d.join(EditorSettings::FILE_NAME))
}

pub fn library_file() -> Option<PathBuf> {
    data_dir().map(|d| d.join(JsonFileStore::FILE_NAME))
}

/// The log directory, created on demand
pub fn log_dir() -> Option<PathBuf> {
    let dir = config_dir()?;
    if !dir.exists() {
        std::fs::create_dir_all(&dir).ok()?;
    }
    Some(dir)
}
