//! Undo/redo tests
//!
//! Tests that every mutating operation records exactly one history entry and
//! that time travel restores full canvas state without recording anything.

use pixelsmith_engine::{Color, Position, UndoState};
use pretty_assertions::assert_eq;

use crate::helpers::{create_red_session, create_session, solid_component};

#[test]
fn test_undo_stack_initially_empty() {
    let session = create_session(14, 14);
    assert_eq!(session.undo_stack_len(), 0);
    assert_eq!(session.redo_stack_len(), 0);
}

#[test]
fn test_undo_at_start_is_silent_noop() {
    let mut session = create_session(14, 14);
    assert!(!session.undo().unwrap());
    assert!(!session.redo().unwrap());
}

#[test]
fn test_undo_moves_to_redo_stack() {
    let mut session = create_red_session();
    session.draw_at(1, 1);

    assert!(session.undo().unwrap());

    assert_eq!(session.undo_stack_len(), 0);
    assert_eq!(session.redo_stack_len(), 1);
    assert!(session.buffer().is_blank());
}

#[test]
fn test_new_operation_clears_redo_stack() {
    let mut session = create_red_session();
    session.draw_at(1, 1);
    session.draw_at(2, 2);
    session.undo().unwrap();

    session.draw_at(3, 3);

    assert_eq!(session.redo_stack_len(), 0);
    assert!(!session.redo().unwrap());
    assert_eq!(session.buffer().get(2, 2), Some(Color::BACKGROUND));
}

#[test]
fn test_round_trip_restores_every_state() {
    let mut session = create_red_session();
    let mut states = vec![(session.dimensions(), session.composite())];

    session.draw_at(2, 2);
    states.push((session.dimensions(), session.composite()));
    session.set_color(Color::GREEN);
    session.fill_at(10, 10);
    states.push((session.dimensions(), session.composite()));
    session.place_template(&solid_component("block", 3, 3, Color::BLUE), Position::new(4, 4)).unwrap();
    states.push((session.dimensions(), session.composite()));
    session.resize(20, 10).unwrap();
    states.push((session.dimensions(), session.composite()));
    session.erase_at(5, 5);
    states.push((session.dimensions(), session.composite()));
    session.clear();
    states.push((session.dimensions(), session.composite()));

    let n = states.len() - 1;
    for i in (0..n).rev() {
        assert!(session.undo().unwrap());
        assert_eq!((session.dimensions(), session.composite()), states[i], "after undo to state {i}");
    }
    assert!(!session.undo().unwrap());

    for i in 1..=n {
        assert!(session.redo().unwrap());
        assert_eq!((session.dimensions(), session.composite()), states[i], "after redo to state {i}");
    }
    assert!(!session.redo().unwrap());
}

#[test]
fn test_undo_does_not_record() {
    let mut session = create_red_session();
    for i in 0..5 {
        session.draw_at(i, 0);
    }
    for _ in 0..3 {
        session.undo().unwrap();
    }
    assert_eq!(session.undo_stack_len(), 2);
    assert_eq!(session.redo_stack_len(), 3);
}

#[test]
fn test_history_is_bounded_to_50_steps() {
    let mut session = create_red_session();
    for i in 0..60 {
        session.draw_at(i % 14, i / 14);
    }
    assert_eq!(session.undo_stack_len(), 50);

    let mut undone = 0;
    while session.undo().unwrap() {
        undone += 1;
    }
    assert_eq!(undone, 50);
    // the ten oldest draws can no longer be undone
    assert_eq!(session.buffer().get(9, 0), Some(Color::RED));
    assert_eq!(session.buffer().get(10, 0), Some(Color::BACKGROUND));
}

#[test]
fn test_undo_description() {
    let mut session = create_red_session();
    session.fill_at(0, 0);
    assert_eq!(session.undo_description().as_deref(), Some("Fill"));
    session.undo().unwrap();
    assert_eq!(session.redo_description().as_deref(), Some("Fill"));
}

#[test]
fn test_undo_placement_removes_component() {
    let mut session = create_red_session();
    session.place_template(&solid_component("block", 2, 2, Color::BLUE), Position::new(1, 1)).unwrap();
    assert_eq!(session.components().len(), 1);

    session.undo().unwrap();

    assert!(session.components().is_empty());
    assert!(session.composite().iter().all(Color::is_background));
}
