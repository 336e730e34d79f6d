//! Guide line tests
//!
//! Stored positions are kept verbatim; only the render projection clamps.

use pixelsmith_engine::{
    ContentChange, Position, ReferenceHandle, ReferenceLinePositions, ResizeAnchor,
    reference_lines::{DIMMED_LINE_OPACITY, LINE_OPACITY},
};
use pretty_assertions::assert_eq;

use crate::helpers::{create_red_session, observe};

#[test]
fn test_guides_hidden_by_default() {
    let session = create_red_session();
    let render = session.reference_line_render();
    assert_eq!(render.baseline, None);
    assert_eq!(render.vertical, None);
    assert_eq!(render.intersection, None);
}

#[test]
fn test_out_of_range_baseline_stored_verbatim() {
    let mut session = create_red_session();
    session.set_reference_lines_visible(true);

    session.set_baseline(-3);

    assert_eq!(session.reference_lines().positions().baseline, -3);
    let baseline = session.reference_line_render().baseline.unwrap();
    assert_eq!(baseline.position, 0);
    assert!(baseline.dimmed);
    assert_eq!(baseline.opacity(), DIMMED_LINE_OPACITY);
}

#[test]
fn test_in_range_guide_not_dimmed() {
    let mut session = create_red_session();
    session.set_reference_lines_visible(true);
    session.set_vertical(20);
    session.set_baseline(5);

    let render = session.reference_line_render();
    assert_eq!(render.baseline.unwrap().position, 5);
    assert_eq!(render.baseline.unwrap().opacity(), LINE_OPACITY);
    assert_eq!(render.vertical.unwrap().position, 13);
    assert!(render.vertical.unwrap().dimmed);
    assert_eq!(render.intersection, Some(Position::new(13, 5)));
}

#[test]
fn test_guides_are_not_history() {
    let mut session = create_red_session();
    session.set_reference_lines_visible(true);
    session.set_baseline(3);
    session.set_vertical(4);
    assert_eq!(session.undo_stack_len(), 0);
}

#[test]
fn test_resize_translates_visible_guides() {
    let mut session = create_red_session();
    session.set_reference_lines_visible(true);
    session.set_baseline(12);
    session.set_vertical(8);

    session.resize_from(ResizeAnchor::TopLeft, 16, 16).unwrap();

    assert_eq!(session.reference_lines().positions(), ReferenceLinePositions { baseline: 14, vertical: 10 });
}

#[test]
fn test_resize_clamps_guides_that_were_in_frame() {
    let mut session = create_red_session();
    session.set_reference_lines_visible(true);
    session.set_baseline(12);
    session.set_vertical(8);

    session.resize_from(ResizeAnchor::BottomRight, 5, 5).unwrap();

    assert_eq!(session.reference_lines().positions(), ReferenceLinePositions { baseline: 4, vertical: 4 });
}

#[test]
fn test_resize_only_translates_out_of_frame_guide() {
    let mut session = create_red_session();
    session.set_reference_lines_visible(true);
    session.set_baseline(-3);

    session.resize_from(ResizeAnchor::TopLeft, 14, 16).unwrap();
    assert_eq!(session.reference_lines().positions().baseline, -1);

    session.resize_from(ResizeAnchor::BottomRight, 14, 10).unwrap();
    assert_eq!(session.reference_lines().positions().baseline, -1);
}

#[test]
fn test_hidden_guides_do_not_follow_resize() {
    let mut session = create_red_session();
    let before = session.reference_lines().positions();

    session.resize_from(ResizeAnchor::TopLeft, 20, 20).unwrap();

    assert_eq!(session.reference_lines().positions(), before);
}

#[test]
fn test_intersection_drag_moves_both() {
    let mut session = create_red_session();
    session.set_reference_lines_visible(true);
    session.set_baseline(10);
    session.set_vertical(2);

    let handle = session.reference_handle_at(Position::new(2, 10));
    assert_eq!(handle, Some(ReferenceHandle::Intersection));
    assert!(session.begin_reference_drag(ReferenceHandle::Intersection));

    session.pointer_move(Position::new(6, 4));
    session.pointer_up(Position::new(6, 4));

    assert_eq!(session.reference_lines().positions(), ReferenceLinePositions { baseline: 4, vertical: 6 });
    assert!(!session.reference_lines().is_dragging());
    // Dragging a guide never paints
    assert!(session.buffer().is_blank());
}

#[test]
fn test_single_guide_drag() {
    let mut session = create_red_session();
    session.set_reference_lines_visible(true);
    session.set_baseline(10);
    session.set_vertical(2);

    assert_eq!(session.reference_handle_at(Position::new(7, 10)), Some(ReferenceHandle::Baseline));
    assert_eq!(session.reference_handle_at(Position::new(2, 3)), Some(ReferenceHandle::Vertical));
    assert_eq!(session.reference_handle_at(Position::new(7, 3)), None);

    assert!(session.begin_reference_drag(ReferenceHandle::Baseline));
    session.drag_reference(Position::new(0, 7));
    session.end_reference_drag();

    assert_eq!(session.reference_lines().positions(), ReferenceLinePositions { baseline: 7, vertical: 2 });
}

#[test]
fn test_hidden_guides_cannot_be_dragged() {
    let mut session = create_red_session();
    assert!(!session.begin_reference_drag(ReferenceHandle::Baseline));
    assert!(!session.reference_lines().is_dragging());
}

#[test]
fn test_guide_changes_persist_into_edited_font() {
    let mut session = create_red_session();
    session.create_font("mono").unwrap();
    session.enter_font_edit("mono", 'A').unwrap();

    session.set_baseline(-3);
    session.set_vertical(5);

    assert_eq!(
        session.font_reference_lines("mono"),
        Some(ReferenceLinePositions { baseline: -3, vertical: 5 })
    );
}

#[test]
fn test_visible_guide_change_notifies() {
    let mut session = create_red_session();
    session.set_reference_lines_visible(true);
    let observer = observe(&mut session);

    session.set_baseline(4);
    session.set_baseline(4);

    let changes = observer.changes.borrow();
    assert_eq!(changes.iter().filter(|c| **c == ContentChange::ReferenceLines).count(), 1);
}
