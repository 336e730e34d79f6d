//! Text rendering of canvases for terminals and test fixtures

use pixelsmith_engine::{Color, Component, EditorSession};

const BACKGROUND: char = '.';
const PAINTED: char = '#';
const BASELINE: char = '-';
const VERTICAL: char = '|';
const INTERSECTION: char = '+';

fn cell_char(color: Color) -> char {
    if color.is_background() { BACKGROUND } else { PAINTED }
}

/// The composited canvas, one line per row. Visible guides are drawn over
/// background cells only.
pub fn render_session(session: &EditorSession) -> String {
    let width = session.width().max(1) as usize;
    let guides = session.reference_line_render();
    let mut result = String::with_capacity((width + 1) * session.height() as usize);

    for (y, row) in session.composite().chunks(width).enumerate() {
        let y = y as i32;
        for (x, color) in row.iter().enumerate() {
            let x = x as i32;
            let on_baseline = guides.baseline.is_some_and(|l| l.position == y);
            let on_vertical = guides.vertical.is_some_and(|l| l.position == x);
            let ch = match (color.is_background(), on_baseline, on_vertical) {
                (false, _, _) => PAINTED,
                (true, true, true) => INTERSECTION,
                (true, true, false) => BASELINE,
                (true, false, true) => VERTICAL,
                (true, false, false) => BACKGROUND,
            };
            result.push(ch);
        }
        result.push('\n');
    }
    result
}

pub fn render_component(component: &Component) -> String {
    let mut result = String::new();
    for y in 0..component.height {
        for x in 0..component.width {
            result.push(cell_char(component.pixel(x, y)));
        }
        result.push('\n');
    }
    result
}
