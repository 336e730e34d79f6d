//! The authoritative pixel grid of the canvas.
//!
//! `PixelBuffer` is a row-major array of [`Color`] values where index
//! `y * width + x` addresses cell `(x, y)`. The length always equals
//! `width * height`; deserialization enforces this as well.
//!
//! Out-of-bounds writes are silently ignored so brush and stamp code can clip
//! at the canvas edge without special cases.

use serde::{Deserialize, Serialize};

use crate::{Color, EngineError, Position, Result, Size};

/// Largest width or height a canvas may have
pub const MAX_DIMENSION: i32 = 480;

/// Smallest width or height a user may request
pub const MIN_DIMENSION: i32 = 1;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BufferData", into = "BufferData")]
pub struct PixelBuffer {
    width: i32,
    height: i32,
    pixels: Vec<Color>,
}

#[derive(Serialize, Deserialize)]
struct BufferData {
    width: i32,
    height: i32,
    pixels: Vec<Color>,
}

impl TryFrom<BufferData> for PixelBuffer {
    type Error = EngineError;

    fn try_from(data: BufferData) -> Result<Self> {
        PixelBuffer::from_flat(data.width, data.height, data.pixels)
    }
}

impl From<PixelBuffer> for BufferData {
    fn from(buffer: PixelBuffer) -> Self {
        BufferData {
            width: buffer.width,
            height: buffer.height,
            pixels: buffer.pixels,
        }
    }
}

impl Default for PixelBuffer {
    fn default() -> Self {
        PixelBuffer::new(0, 0)
    }
}

impl PixelBuffer {
    /// Creates a background-filled buffer. Dimensions are clamped into `[0, 480]`.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.clamp(0, MAX_DIMENSION);
        let height = height.clamp(0, MAX_DIMENSION);
        Self {
            width,
            height,
            pixels: vec![Color::BACKGROUND; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn is_inside(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_inside(x, y) {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Background for cells outside the buffer
    pub fn color_at(&self, x: i32, y: i32) -> Color {
        self.get(x, y).unwrap_or(Color::BACKGROUND)
    }

    /// Writes a cell. Returns true if the stored color actually changed.
    pub fn set(&mut self, x: i32, y: i32, color: Color) -> bool {
        match self.index(x, y) {
            Some(i) if self.pixels[i] != color => {
                self.pixels[i] = color;
                true
            }
            _ => false,
        }
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    pub fn clear(&mut self) {
        self.fill(Color::BACKGROUND);
    }

    /// True when every cell is background
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(Color::is_background)
    }

    /// Produces a new `new_width × new_height` buffer where the old cell `(x, y)`
    /// lands on `(x + offset.x, y + offset.y)`. Cells that fall outside are
    /// cropped, cells that receive nothing stay background.
    pub fn resized(&self, new_width: i32, new_height: i32, offset: Position) -> PixelBuffer {
        let mut result = PixelBuffer::new(new_width, new_height);

        let src_x0 = 0.max(-offset.x);
        let src_x1 = self.width.min(result.width - offset.x);
        let src_y0 = 0.max(-offset.y);
        let src_y1 = self.height.min(result.height - offset.y);
        if src_x0 >= src_x1 || src_y0 >= src_y1 {
            return result;
        }

        let run = (src_x1 - src_x0) as usize;
        for y in src_y0..src_y1 {
            let src = (y * self.width + src_x0) as usize;
            let dst = ((y + offset.y) * result.width + src_x0 + offset.x) as usize;
            result.pixels[dst..dst + run].copy_from_slice(&self.pixels[src..src + run]);
        }
        result
    }

    /// Smallest rectangle holding every non-background cell
    pub fn content_bounds(&self) -> Option<(Position, Size)> {
        let mut min = Position::new(i32::MAX, i32::MAX);
        let mut max = Position::new(i32::MIN, i32::MIN);
        for (i, color) in self.pixels.iter().enumerate() {
            if color.is_background() {
                continue;
            }
            let x = i as i32 % self.width;
            let y = i as i32 / self.width;
            min = Position::new(min.x.min(x), min.y.min(y));
            max = Position::new(max.x.max(x), max.y.max(y));
        }
        if min.x > max.x {
            return None;
        }
        Some((min, Size::new(max.x - min.x + 1, max.y - min.y + 1)))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Serialization contract
    // ═══════════════════════════════════════════════════════════════════════

    pub fn to_flat(&self) -> Vec<Color> {
        self.pixels.clone()
    }

    pub fn from_flat(width: i32, height: i32, pixels: Vec<Color>) -> Result<Self> {
        if !(0..=MAX_DIMENSION).contains(&width) || !(0..=MAX_DIMENSION).contains(&height) {
            return Err(EngineError::InvalidDimensions { width, height });
        }
        let expected = (width * height) as usize;
        if pixels.len() != expected {
            return Err(EngineError::DataLengthMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    /// Replaces the content keeping the current dimensions
    pub fn load_flat(&mut self, pixels: &[Color]) -> Result<()> {
        if pixels.len() != self.pixels.len() {
            return Err(EngineError::DataLengthMismatch {
                expected: self.pixels.len(),
                actual: pixels.len(),
            });
        }
        self.pixels.copy_from_slice(pixels);
        Ok(())
    }

    /// `height × width` rows, the layout font glyphs are stored in
    pub fn to_rows(&self) -> Vec<Vec<Color>> {
        if self.width == 0 {
            return vec![Vec::new(); self.height as usize];
        }
        self.pixels.chunks(self.width as usize).map(|row| row.to_vec()).collect()
    }

    /// Builds a buffer from rows. Ragged or oversized input is cut to
    /// `width × height`, missing cells become background.
    pub fn from_rows(rows: &[Vec<Color>], width: i32, height: i32) -> Self {
        let mut result = PixelBuffer::new(width, height);
        for (y, row) in rows.iter().enumerate().take(result.height as usize) {
            for (x, color) in row.iter().enumerate().take(result.width as usize) {
                result.set(x as i32, y as i32, *color);
            }
        }
        result
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Region access
    // ═══════════════════════════════════════════════════════════════════════

    /// Copies a rectangle. Cells outside the buffer read as background.
    pub fn copy_region(&self, pos: Position, size: Size) -> Vec<Color> {
        let mut result = Vec::with_capacity(size.area());
        for y in pos.y..pos.y + size.height {
            for x in pos.x..pos.x + size.width {
                result.push(self.color_at(x, y));
            }
        }
        result
    }

    /// Writes a rectangle verbatim, background included
    pub fn write_region(&mut self, pos: Position, size: Size, data: &[Color]) -> bool {
        let mut changed = false;
        for (i, color) in data.iter().enumerate().take(size.area()) {
            let x = pos.x + (i as i32 % size.width);
            let y = pos.y + (i as i32 / size.width);
            changed |= self.set(x, y, *color);
        }
        changed
    }

    /// Writes only the non-background cells of a rectangle
    pub fn overlay_region(&mut self, pos: Position, size: Size, data: &[Color]) -> bool {
        let mut changed = false;
        for (i, color) in data.iter().enumerate().take(size.area()) {
            if color.is_background() {
                continue;
            }
            let x = pos.x + (i as i32 % size.width);
            let y = pos.y + (i as i32 / size.width);
            changed |= self.set(x, y, *color);
        }
        changed
    }
}
