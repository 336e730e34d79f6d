//! Pure render projection of the canvas
//!
//! Nothing here reads back from a UI. A front end paints the cells it gets
//! from these functions and nothing else.

use crate::{Color, Position, Size, brushes::Brush, components::Component};

/// Largest on-screen edge the canvas is fitted into
pub const CANVAS_VIEW_SIZE: i32 = 400;
pub const MIN_CELL_SIZE: i32 = 8;
pub const MAX_CELL_SIZE: i32 = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderCell {
    pub position: Position,
    pub color: Color,
}

/// On-screen size of one cell for a `width × height` canvas
pub fn cell_size(width: i32, height: i32) -> i32 {
    let width = width.max(1);
    let height = height.max(1);
    (CANVAS_VIEW_SIZE / width).min(CANVAS_VIEW_SIZE / height).clamp(MIN_CELL_SIZE, MAX_CELL_SIZE)
}

/// Enumerates `(x, y, color)` for flat row-major data
pub fn render_cells(size: Size, data: &[Color]) -> Vec<RenderCell> {
    let width = size.width.max(1);
    data.iter()
        .take(size.area())
        .enumerate()
        .map(|(i, color)| RenderCell {
            position: Position::new(i as i32 % width, i as i32 / width),
            color: *color,
        })
        .collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreviewTint {
    /// Light tint over the full rectangle of a stamp
    Footprint,
    /// Strong tint over the stamp's non-background pixels
    Design,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PreviewCell {
    pub position: Position,
    pub tint: PreviewTint,
}

/// Two-tone preview of `component` at `at`, clipped to the canvas
pub fn stamp_preview(component: &Component, at: Position, canvas: Size) -> Vec<PreviewCell> {
    let mut cells = Vec::with_capacity(component.size().area());
    for y in 0..component.height {
        for x in 0..component.width {
            let position = at + Position::new(x, y);
            if !canvas.contains(position) {
                continue;
            }
            let tint = if component.pixel(x, y).is_background() {
                PreviewTint::Footprint
            } else {
                PreviewTint::Design
            };
            cells.push(PreviewCell { position, tint });
        }
    }
    cells
}

/// Cells the brush would touch at `center`, clipped to the canvas
pub fn brush_footprint(brush: &Brush, center: Position, canvas: Size) -> Vec<Position> {
    brush.points(center).into_iter().filter(|p| canvas.contains(*p)).collect()
}

/// Non-background cells of a glyph given as rows
pub fn ghost_cells(rows: &[Vec<Color>], canvas: Size) -> Vec<RenderCell> {
    let mut cells = Vec::new();
    for (y, row) in rows.iter().enumerate() {
        for (x, color) in row.iter().enumerate() {
            let position = Position::new(x as i32, y as i32);
            if !color.is_background() && canvas.contains(position) {
                cells.push(RenderCell { position, color: *color });
            }
        }
    }
    cells
}
