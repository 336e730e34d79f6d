//! Session persistence tests
//!
//! Tests for saving and restoring an editing session and for the library
//! stores.

use std::path::PathBuf;

use pixelsmith_engine::{
    BrushShape, Color, EditorSession, EditorSettings, JsonFileStore, Library, LibraryStore, MemoryStore, Position, ReferenceLinePositions,
    SessionState, Size, Tool, UndoState,
};
use pretty_assertions::assert_eq;

use crate::helpers::{create_red_session, solid_component};

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pixelsmith_test_{}_{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

fn edited_session() -> EditorSession {
    let mut session = create_red_session();
    session.set_brush(3, BrushShape::Circle);
    session.draw_at(4, 4);
    session.place_template(&solid_component("block", 2, 2, Color::GREEN), Position::new(9, 9)).unwrap();
    session.set_reference_lines_visible(true);
    session.set_baseline(-2);
    session.set_tool(Tool::Erase);
    session
}

#[test]
fn test_session_state_json_round_trip() {
    let session = edited_session();
    let state = session.session_state();

    let json = state.to_json().unwrap();
    let loaded = SessionState::from_json(&json).unwrap();

    assert_eq!(loaded, state);
}

#[test]
fn test_restore_session() {
    let source = edited_session();
    let state = source.session_state();

    let mut session = EditorSession::new();
    session.draw_at(0, 0);
    session.restore_session(state);

    assert_eq!(session.composite(), source.composite());
    assert_eq!(session.components().len(), 1);
    assert_eq!(session.tool(), Tool::Erase);
    assert_eq!(session.brush(), source.brush());
    assert_eq!(session.current_color(), Color::RED);
    assert_eq!(session.reference_lines().positions().baseline, -2);
    assert!(session.reference_lines().is_visible());
}

#[test]
fn test_restore_starts_fresh_history() {
    let mut session = EditorSession::new();
    session.draw_at(0, 0);
    session.draw_at(1, 0);

    session.restore_session(edited_session().session_state());

    assert_eq!(session.undo_stack_len(), 0);
    assert!(!session.undo().unwrap());
}

#[test]
fn test_restored_component_can_be_removed() {
    let source = edited_session();
    let id = source.components().placed()[0].id;
    let mut session = EditorSession::new();
    session.restore_session(source.session_state());

    session.remove_component(id).unwrap();

    assert_eq!(session.composite_at(9, 9), Color::BACKGROUND);
    assert_eq!(session.composite_at(4, 4), Color::RED);
}

#[test]
fn test_missing_fields_use_defaults() {
    let json = r##"{ "canvas": { "buffer": { "width": 2, "height": 1, "pixels": ["#000000", "#ff0000"] }, "layer": { "placed": [], "patches": {}, "next_id": 0 } } }"##;
    let state = SessionState::from_json(json).unwrap();

    assert_eq!(state.version, 1);
    assert_eq!(state.tool, Tool::None);
    assert_eq!(state.color, Color::WHITE);
    assert_eq!(state.canvas.buffer.size(), Size::new(2, 1));
    assert_eq!(state.canvas.buffer.get(1, 0), Some(Color::RED));
}

#[test]
fn test_corrupt_buffer_rejected() {
    let json = r##"{ "canvas": { "buffer": { "width": 2, "height": 2, "pixels": ["#000000"] }, "layer": { "placed": [], "patches": {}, "next_id": 0 } } }"##;
    assert!(SessionState::from_json(json).is_err());
}

#[test]
fn test_session_file_round_trip() {
    let dir = temp_dir("session");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("session.json");
    let state = edited_session().session_state();

    state.save(&path).unwrap();
    let loaded = SessionState::load(&path).unwrap();

    assert_eq!(loaded, state);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_font_edit_restored_when_font_exists() {
    let mut source = create_red_session();
    source.create_font("mono").unwrap();
    source.enter_font_edit("mono", 'B').unwrap();
    let state = source.session_state();

    let mut with_font = EditorSession::with_library(EditorSettings::default(), source.library().clone());
    with_font.restore_session(state.clone());
    assert_eq!(with_font.font_edit().map(|ctx| ctx.character), Some('B'));

    let mut without_font = EditorSession::new();
    without_font.restore_session(state);
    assert!(without_font.font_edit().is_none());
}

#[test]
fn test_json_file_store_round_trip() {
    let dir = temp_dir("library");
    let mut store = JsonFileStore::new(dir.join(JsonFileStore::FILE_NAME));
    assert_eq!(store.load().unwrap(), Library::default());

    let mut session = create_red_session();
    session.draw_at(2, 2);
    session.save_as_component("dot", false).unwrap();
    session.create_font("mono").unwrap();
    store.store(session.library()).unwrap();

    let loaded = store.load().unwrap();
    assert_eq!(&loaded, session.library());
    assert_eq!(loaded.font("mono").unwrap().reference_lines, Some(ReferenceLinePositions::default()));
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_memory_store() {
    let mut store = MemoryStore::default();
    let mut library = Library::default();
    library.insert_component(solid_component("dot", 1, 1, Color::RED), false).unwrap();

    store.store(&library).unwrap();

    assert_eq!(store.load().unwrap(), library);
}
