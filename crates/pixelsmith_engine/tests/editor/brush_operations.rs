//! Brush, erase and fill tests

use pixelsmith_engine::{BrushShape, Color, ContentChange, Position, UndoState};

use crate::helpers::{create_session, observe, painted_cells};

#[test]
fn test_circle_brush_size_3_covers_plus() {
    let mut session = create_session(20, 20);
    session.set_color(Color::RED);
    session.set_brush(3, BrushShape::Circle);

    session.draw_at(5, 5);

    let mut cells = painted_cells(&session);
    cells.sort();
    let mut expected = vec![
        Position::new(5, 4),
        Position::new(4, 5),
        Position::new(5, 5),
        Position::new(6, 5),
        Position::new(5, 6),
    ];
    expected.sort();
    assert_eq!(cells, expected);
}

#[test]
fn test_square_brush_size_3_covers_block() {
    let mut session = create_session(20, 20);
    session.set_color(Color::RED);
    session.set_brush(3, BrushShape::Square);

    session.draw_at(5, 5);

    assert_eq!(painted_cells(&session).len(), 9);
}

#[test]
fn test_brush_clips_at_edge() {
    let mut session = create_session(10, 10);
    session.set_color(Color::RED);
    session.set_brush(3, BrushShape::Square);

    session.draw_at(0, 0);

    assert_eq!(painted_cells(&session).len(), 4);
    assert_eq!(session.buffer().len(), 100);
}

#[test]
fn test_erase_restores_background() {
    let mut session = create_session(10, 10);
    session.set_color(Color::RED);
    session.draw_at(3, 3);
    assert!(session.erase_at(3, 3));
    assert!(painted_cells(&session).is_empty());
    assert!(!session.erase_at(3, 3), "erasing background changes nothing");
}

#[test]
fn test_fill_is_idempotent() {
    let mut session = create_session(8, 8);
    session.set_color(Color::RED);

    assert!(session.fill_at(0, 0));
    let after_first = session.composite();
    let undo_len = session.undo_stack_len();

    assert!(!session.fill_at(4, 4));
    assert_eq!(session.composite(), after_first);
    assert_eq!(session.undo_stack_len(), undo_len);
}

#[test]
fn test_fill_is_four_connected() {
    let mut session = create_session(5, 5);
    session.set_color(Color::WHITE);
    // diagonal wall from (0,0) to (4,4)
    for i in 0..5 {
        session.draw_at(i, i);
    }
    session.set_color(Color::RED);
    session.fill_at(4, 0);

    let buffer = session.buffer();
    assert_eq!(buffer.get(4, 0), Some(Color::RED));
    assert_eq!(buffer.get(1, 0), Some(Color::RED));
    assert_eq!(buffer.get(0, 1), Some(Color::BACKGROUND), "fill must not leak through diagonal gaps");
    assert_eq!(buffer.get(2, 2), Some(Color::WHITE));
}

#[test]
fn test_fill_large_canvas_terminates() {
    let mut session = create_session(480, 480);
    session.set_color(Color::BLUE);
    assert!(session.fill_at(240, 240));
    assert!(session.composite().iter().all(|c| *c == Color::BLUE));
}

#[test]
fn test_fill_outside_canvas_is_noop() {
    let mut session = create_session(5, 5);
    assert!(!session.fill_at(-1, 2));
    assert!(!session.can_undo());
}

#[test]
fn test_brush_operations_notify_observers() {
    let mut session = create_session(6, 6);
    let observer = observe(&mut session);
    session.set_color(Color::RED);

    session.draw_at(1, 1);
    session.fill_at(4, 4);

    let changes = observer.changes.borrow();
    assert_eq!(changes.iter().filter(|c| **c == ContentChange::Pixels).count(), 2);
    assert!(session.revision() >= 2);
}

#[test]
fn test_clipped_draw_outside_canvas_does_not_notify() {
    let mut session = create_session(6, 6);
    let observer = observe(&mut session);
    session.set_color(Color::RED);

    assert!(!session.draw_at(50, 50));
    assert!(observer.changes.borrow().is_empty());
}

#[test]
fn test_brush_footprint_follows_hover() {
    let mut session = create_session(14, 14);
    session.set_brush(3, BrushShape::Square);
    assert!(session.brush_footprint().is_empty());

    session.pointer_move(Position::new(0, 0));
    assert_eq!(session.brush_footprint().len(), 4);

    session.pointer_move(Position::new(6, 6));
    assert_eq!(session.brush_footprint().len(), 9);
    // Preview only
    assert!(session.buffer().is_blank());
}

#[test]
fn test_render_cells_cover_canvas() {
    let mut session = create_session(3, 2);
    session.set_color(Color::RED);
    session.draw_at(2, 1);

    let cells = session.render_cells();

    assert_eq!(cells.len(), 6);
    assert_eq!(cells[5].position, Position::new(2, 1));
    assert_eq!(cells[5].color, Color::RED);
    assert!(cells[..5].iter().all(|c| c.color.is_background()));
}
