//! Brush rasterization and flood fill
//!
//! Contains the pure algorithms behind the drawing tools:
//! - Square and circle brush footprints
//! - Bresenham lines (to connect pointer samples of a stroke)
//! - Flood fill (4-connected, explicit stack)

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{Color, PixelBuffer, Position};

/// Largest brush size offered to the user
pub const MAX_BRUSH_SIZE: u32 = 32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrushShape {
    #[default]
    Square,
    Circle,
}

impl std::str::FromStr for BrushShape {
    type Err = crate::EngineError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "square" => Ok(BrushShape::Square),
            "circle" => Ok(BrushShape::Circle),
            _ => Err(crate::EngineError::generic(format!("Unknown brush shape: {s}"))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brush {
    pub size: u32,
    pub shape: BrushShape,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            size: 1,
            shape: BrushShape::Square,
        }
    }
}

impl Brush {
    pub fn new(size: u32, shape: BrushShape) -> Self {
        Self {
            size: size.clamp(1, MAX_BRUSH_SIZE),
            shape,
        }
    }

    pub fn radius(&self) -> i32 {
        (self.size / 2) as i32
    }

    /// Offsets relative to the brush center
    pub fn offsets(&self) -> Vec<Position> {
        let r = self.radius();
        let mut result = Vec::new();
        for dy in -r..=r {
            for dx in -r..=r {
                if self.shape == BrushShape::Square || dx * dx + dy * dy <= r * r {
                    result.push(Position::new(dx, dy));
                }
            }
        }
        result
    }

    /// Cells covered when centered at `center`, unclipped
    pub fn points(&self, center: Position) -> Vec<Position> {
        self.offsets().into_iter().map(|o| center + o).collect()
    }
}

/// Paints the brush footprint. Cells outside the buffer are skipped.
///
/// Returns true if any cell changed.
pub fn apply_brush(buffer: &mut PixelBuffer, center: Position, brush: &Brush, color: Color) -> bool {
    let mut changed = false;
    for p in brush.points(center) {
        changed |= buffer.set(p.x, p.y, color);
    }
    changed
}

// ═══════════════════════════════════════════════════════════════════════════
// Bresenham Line Algorithm
// ═══════════════════════════════════════════════════════════════════════════

/// Bresenham's line algorithm - returns points along the line, both ends included
pub fn bresenham_line(from: Position, to: Position) -> Vec<Position> {
    let mut points = Vec::new();

    let dx = (to.x - from.x).abs();
    let dy = -(to.y - from.y).abs();
    let sx = if from.x < to.x { 1 } else { -1 };
    let sy = if from.y < to.y { 1 } else { -1 };
    let mut err = dx + dy;

    let mut x = from.x;
    let mut y = from.y;

    loop {
        points.push(Position::new(x, y));
        if x == to.x && y == to.y {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }

    points
}

// ═══════════════════════════════════════════════════════════════════════════
// Flood Fill
// ═══════════════════════════════════════════════════════════════════════════

/// 4-connected flood fill, returns all points connected to `start` that share its value.
///
/// Uses an explicit stack so canvases up to 480×480 never recurse.
pub fn flood_fill_points<T, F>(start: Position, width: i32, height: i32, get_pixel: F) -> HashSet<Position>
where
    T: PartialEq,
    F: Fn(i32, i32) -> T,
{
    let mut result = HashSet::new();

    if start.x < 0 || start.x >= width || start.y < 0 || start.y >= height {
        return result;
    }

    let target_value = get_pixel(start.x, start.y);

    let mut stack = vec![start];
    result.insert(start);

    while let Some(p) = stack.pop() {
        for (dx, dy) in [(-1, 0), (1, 0), (0, -1), (0, 1)] {
            let n = Position::new(p.x + dx, p.y + dy);
            if n.x < 0 || n.x >= width || n.y < 0 || n.y >= height {
                continue;
            }
            if result.contains(&n) {
                continue;
            }
            if get_pixel(n.x, n.y) == target_value {
                result.insert(n);
                stack.push(n);
            }
        }
    }

    result
}

/// Fills the region around `start` with `color`.
///
/// A no-op (returning false) when the start cell is outside the buffer or
/// already has `color`.
pub fn flood_fill(buffer: &mut PixelBuffer, start: Position, color: Color) -> bool {
    match buffer.get(start.x, start.y) {
        Some(target) if target != color => {}
        _ => return false,
    }
    let points = flood_fill_points(start, buffer.width(), buffer.height(), |x, y| buffer.color_at(x, y));
    for p in &points {
        buffer.set(p.x, p.y, color);
    }
    !points.is_empty()
}
