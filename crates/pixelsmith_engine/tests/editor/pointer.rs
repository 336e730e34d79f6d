//! Pointer routing tests
//!
//! Tests that pointer events reach the active component mode before the base
//! tool and that every gesture records exactly one history entry.

use pixelsmith_engine::{Color, ComponentMode, Position, Tool, UndoState};
use pretty_assertions::assert_eq;

use crate::helpers::{create_red_session, observe, painted_cells, solid_component};

fn add_i_font(session: &mut pixelsmith_engine::EditorSession) {
    let font = session.library_mut().create_font("mono").unwrap();
    font.characters.insert('I', vec![vec![Color::RED], vec![Color::RED]]);
}

#[test]
fn test_drag_stroke_is_one_edit() {
    let mut session = create_red_session();
    session.set_tool(Tool::Draw);

    session.pointer_down(Position::new(1, 1));
    assert!(session.is_stroke_active());
    session.pointer_move(Position::new(5, 1));
    session.pointer_up(Position::new(5, 1));

    assert!(!session.is_stroke_active());
    assert_eq!(session.undo_stack_len(), 1);
    assert_eq!(painted_cells(&session), (1..=5).map(|x| Position::new(x, 1)).collect::<Vec<_>>());
    assert_eq!(session.undo_description().as_deref(), Some("Draw"));
}

#[test]
fn test_fast_drag_leaves_no_gaps() {
    let mut session = create_red_session();
    session.set_tool(Tool::Draw);

    session.pointer_down(Position::new(0, 0));
    session.pointer_move(Position::new(6, 3));
    session.pointer_up(Position::new(6, 3));

    let cells = painted_cells(&session);
    for x in 0..=6 {
        assert!(cells.iter().any(|p| p.x == x), "column {x} has no painted cell");
    }
}

#[test]
fn test_erase_stroke() {
    let mut session = create_red_session();
    session.set_tool(Tool::Fill);
    session.pointer_down(Position::new(0, 0));
    session.pointer_up(Position::new(0, 0));
    session.set_tool(Tool::Erase);

    session.pointer_down(Position::new(0, 4));
    session.pointer_move(Position::new(13, 4));
    session.pointer_up(Position::new(13, 4));

    assert_eq!(painted_cells(&session).len(), 14 * 13);
    assert_eq!(session.undo_stack_len(), 2);
}

#[test]
fn test_pointer_leave_ends_stroke() {
    let mut session = create_red_session();
    session.set_tool(Tool::Draw);
    session.pointer_down(Position::new(2, 2));

    session.pointer_leave();

    assert!(!session.is_stroke_active());
    assert_eq!(session.hover(), None);
    assert_eq!(session.undo_stack_len(), 1);
}

#[test]
fn test_no_tool_does_nothing() {
    let mut session = create_red_session();
    session.pointer_down(Position::new(2, 2));
    session.pointer_move(Position::new(3, 3));
    session.pointer_up(Position::new(3, 3));
    assert!(session.buffer().is_blank());
    assert_eq!(session.undo_stack_len(), 0);
}

#[test]
fn test_move_tool_drags_component() {
    let mut session = create_red_session();
    let id = session.place_template(&solid_component("block", 2, 2, Color::GREEN), Position::new(2, 2)).unwrap();
    session.set_tool(Tool::Move);

    session.pointer_down(Position::new(3, 3));
    assert!(matches!(session.component_mode(), ComponentMode::Moving(_)));
    session.pointer_move(Position::new(6, 6));
    session.pointer_up(Position::new(6, 6));

    assert!(session.component_mode().is_idle());
    assert_eq!(session.components().get(id).unwrap().position, Position::new(5, 5));
    assert_eq!(session.composite_at(5, 5), Color::GREEN);
    assert_eq!(session.composite_at(2, 2), Color::BACKGROUND);
    assert_eq!(session.undo_stack_len(), 2);
}

#[test]
fn test_move_out_of_bounds_reverts_and_reports() {
    let mut session = create_red_session();
    let id = session.place_template(&solid_component("block", 2, 2, Color::GREEN), Position::new(2, 2)).unwrap();
    session.set_tool(Tool::Move);
    let observer = observe(&mut session);

    session.pointer_down(Position::new(2, 2));
    session.pointer_move(Position::new(13, 13));
    session.pointer_up(Position::new(13, 13));

    assert_eq!(session.components().get(id).unwrap().position, Position::new(2, 2));
    assert_eq!(session.composite_at(2, 2), Color::GREEN);
    assert_eq!(observer.messages.borrow().len(), 1);
    assert_eq!(session.undo_stack_len(), 1);
}

#[test]
fn test_switching_tool_mid_move_puts_component_back() {
    let mut session = create_red_session();
    let id = session.place_template(&solid_component("block", 2, 2, Color::GREEN), Position::new(2, 2)).unwrap();
    session.set_tool(Tool::Move);
    session.pointer_down(Position::new(2, 2));
    session.pointer_move(Position::new(8, 8));

    session.set_tool(Tool::Draw);

    assert!(session.component_mode().is_idle());
    assert_eq!(session.components().get(id).unwrap().position, Position::new(2, 2));
    assert_eq!(session.composite_at(3, 3), Color::GREEN);
}

#[test]
fn test_brush_stamping_stroke_is_one_edit() {
    let mut session = create_red_session();
    session.library_mut().insert_component(solid_component("dot", 1, 1, Color::BLUE), false).unwrap();
    session.set_tool(Tool::Draw);
    session.enter_brush_stamping("dot").unwrap();

    session.pointer_down(Position::new(0, 0));
    session.pointer_move(Position::new(4, 0));
    session.pointer_up(Position::new(4, 0));

    assert_eq!(painted_cells(&session).len(), 5);
    assert_eq!(session.composite_at(2, 0), Color::BLUE);
    // Stamps become plain pixels
    assert!(session.components().is_empty());
    assert_eq!(session.undo_stack_len(), 1);
    assert_eq!(session.undo_description().as_deref(), Some("Stamp component"));
}

#[test]
fn test_component_mode_takes_priority_over_tool() {
    let mut session = create_red_session();
    session.library_mut().insert_component(solid_component("dot", 1, 1, Color::BLUE), false).unwrap();
    session.set_tool(Tool::Draw);
    session.enter_placing("dot").unwrap();

    session.pointer_down(Position::new(4, 4));
    session.pointer_up(Position::new(4, 4));
    assert!(session.buffer().is_blank());

    session.pointer_click(Position::new(4, 4));
    assert_eq!(session.composite_at(4, 4), Color::BLUE);
    assert_eq!(session.components().len(), 1);
    assert!(session.component_mode().is_idle());
}

#[test]
fn test_set_tool_exits_component_mode() {
    let mut session = create_red_session();
    session.library_mut().insert_component(solid_component("dot", 1, 1, Color::BLUE), false).unwrap();
    session.enter_placing("dot").unwrap();
    assert!(!session.component_mode().is_idle());

    session.set_tool(Tool::Erase);

    assert!(session.component_mode().is_idle());
    assert_eq!(session.tool(), Tool::Erase);
}

#[test]
fn test_placement_preview_follows_pointer() {
    let mut session = create_red_session();
    session.library_mut().insert_component(solid_component("block", 2, 2, Color::BLUE), false).unwrap();
    session.enter_placing("block").unwrap();

    session.pointer_move(Position::new(12, 12));
    assert_eq!(session.stamp_preview().len(), 4);

    // Clipped at the canvas edge
    session.pointer_move(Position::new(13, 13));
    assert_eq!(session.stamp_preview().len(), 1);

    session.pointer_leave();
    assert!(session.stamp_preview().is_empty());
}

#[test]
fn test_type_click_stamps_pending_text() {
    let mut session = create_red_session();
    add_i_font(&mut session);
    session.select_font(Some("mono")).unwrap();
    session.set_pending_text("II");
    session.set_tool(Tool::Type);

    session.pointer_down(Position::new(1, 1));

    assert_eq!(painted_cells(&session).len(), 4);
    assert_eq!(session.text_cursor(), Some(Position::new(3, 1)));
    assert_eq!(session.undo_stack_len(), 1);
}

#[test]
fn test_type_click_without_text_places_cursor() {
    let mut session = create_red_session();
    add_i_font(&mut session);
    session.select_font(Some("mono")).unwrap();
    session.set_tool(Tool::Type);

    session.pointer_down(Position::new(5, 5));
    assert_eq!(session.text_cursor(), Some(Position::new(5, 5)));
    assert!(session.buffer().is_blank());

    session.type_char('I').unwrap();
    assert_eq!(session.composite_at(5, 6), Color::RED);
    assert_eq!(session.text_cursor(), Some(Position::new(6, 5)));

    session.set_tool(Tool::Draw);
    assert_eq!(session.text_cursor(), None);
}
