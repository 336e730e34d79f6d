//! Shared test helpers for editor tests

#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc};

use pixelsmith_engine::{Color, Component, ContentChange, EditorObserver, EditorSession, EditorSettings, Position};

/// Session with a blank `width × height` canvas
pub fn create_session(width: i32, height: i32) -> EditorSession {
    EditorSession::with_settings(EditorSettings {
        canvas_width: width,
        canvas_height: height,
        ..Default::default()
    })
}

/// Session with the default 14×14 canvas drawing in red
pub fn create_red_session() -> EditorSession {
    let mut session = EditorSession::new();
    session.set_color(Color::RED);
    session
}

/// Fills the rectangle cell by cell as one draw per cell
pub fn draw_rect(session: &mut EditorSession, x: i32, y: i32, w: i32, h: i32) {
    for yy in y..y + h {
        for xx in x..x + w {
            session.draw_at(xx, yy);
        }
    }
}

/// Positions of all non-background cells of the composited canvas
pub fn painted_cells(session: &EditorSession) -> Vec<Position> {
    let width = session.width();
    session
        .composite()
        .iter()
        .enumerate()
        .filter(|(_, c)| !c.is_background())
        .map(|(i, _)| Position::new(i as i32 % width, i as i32 / width))
        .collect()
}

pub fn solid_component(name: &str, width: i32, height: i32, color: Color) -> Component {
    Component::new(name, width, height, vec![color; (width * height) as usize]).unwrap()
}

/// Observer recording everything it is told
#[derive(Clone, Default)]
pub struct RecordingObserver {
    pub changes: Rc<RefCell<Vec<ContentChange>>>,
    pub messages: Rc<RefCell<Vec<String>>>,
}

impl EditorObserver for RecordingObserver {
    fn content_changed(&mut self, change: ContentChange) {
        self.changes.borrow_mut().push(change);
    }

    fn user_message(&mut self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

/// Attaches a recording observer and returns a handle to what it records
pub fn observe(session: &mut EditorSession) -> RecordingObserver {
    let observer = RecordingObserver::default();
    session.add_observer(Box::new(observer.clone()));
    observer
}
