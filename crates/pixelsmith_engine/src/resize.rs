//! Canvas resize gestures and the anchor to content-offset mapping
//!
//! A resize is always driven by one of the four corner handles. The handle
//! that is dragged is the `ResizeAnchor`; the opposite corner stays where it
//! is, together with the content next to it. Per axis this means:
//!
//! | Handle side | Offset applied to old content |
//! |-------------|-------------------------------|
//! | left        | `new_width - old_width`       |
//! | right       | `0`                           |
//! | top         | `new_height - old_height`     |
//! | bottom      | `0`                           |
//!
//! Growing from the top-left handle therefore pushes old content towards the
//! bottom-right of the new buffer, shrinking from it crops the top-left part.

use serde::{Deserialize, Serialize};

use crate::{
    EngineError, Position, Result, Size,
    pixel_buffer::{MAX_DIMENSION, MIN_DIMENSION},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeAnchor {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl ResizeAnchor {
    pub fn is_left(self) -> bool {
        matches!(self, ResizeAnchor::TopLeft | ResizeAnchor::BottomLeft)
    }

    pub fn is_top(self) -> bool {
        matches!(self, ResizeAnchor::TopLeft | ResizeAnchor::TopRight)
    }

    /// New dimensions after dragging this handle by a number of cells
    pub fn apply_delta(self, start: Size, delta_cols: i32, delta_rows: i32) -> Size {
        let width = if self.is_left() { start.width - delta_cols } else { start.width + delta_cols };
        let height = if self.is_top() { start.height - delta_rows } else { start.height + delta_rows };
        Size::new(clamp_dimension(width), clamp_dimension(height))
    }

    /// Translation applied to every old cell when resizing from `old` to `new`
    pub fn content_offset(self, old: Size, new: Size) -> Position {
        Position::new(
            if self.is_left() { new.width - old.width } else { 0 },
            if self.is_top() { new.height - old.height } else { 0 },
        )
    }
}

impl std::str::FromStr for ResizeAnchor {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "tl" | "topleft" => Ok(ResizeAnchor::TopLeft),
            "tr" | "topright" => Ok(ResizeAnchor::TopRight),
            "bl" | "bottomleft" => Ok(ResizeAnchor::BottomLeft),
            "br" | "bottomright" => Ok(ResizeAnchor::BottomRight),
            _ => Err(EngineError::generic(format!("Unknown resize anchor: {s}"))),
        }
    }
}

pub fn clamp_dimension(value: i32) -> i32 {
    value.clamp(MIN_DIMENSION, MAX_DIMENSION)
}

/// Rejects sizes outside `[1, 480]` on either axis
pub fn validate_dimensions(width: i32, height: i32) -> Result<Size> {
    let valid = MIN_DIMENSION..=MAX_DIMENSION;
    if valid.contains(&width) && valid.contains(&height) {
        Ok(Size::new(width, height))
    } else {
        Err(EngineError::InvalidDimensions { width, height })
    }
}

/// Whole cells covered by a pointer movement of `delta` screen pixels
pub fn delta_in_cells(delta: f64, pixel_size: f64) -> i32 {
    if pixel_size <= 0.0 {
        return 0;
    }
    (delta / pixel_size).round() as i32
}

/// Pointer position in screen pixels
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Gesture state machine
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Clone, Debug, PartialEq)]
pub struct ResizeGesture {
    pub anchor: ResizeAnchor,
    pub start_size: Size,
    pub start_pointer: ScreenPoint,
    pub current_pointer: ScreenPoint,
    /// Cell size at gesture start; the canvas does not rescale mid-drag
    pub pixel_size: f64,
}

impl ResizeGesture {
    pub fn target_size(&self) -> Size {
        let cols = delta_in_cells(self.current_pointer.x - self.start_pointer.x, self.pixel_size);
        let rows = delta_in_cells(self.current_pointer.y - self.start_pointer.y, self.pixel_size);
        self.anchor.apply_delta(self.start_size, cols, rows)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum ResizeState {
    #[default]
    Idle,
    Dragging(ResizeGesture),
}

/// Result of ending a gesture
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResizeOutcome {
    /// New dimensions differ from the start, the caller must remap content
    Committed { anchor: ResizeAnchor, from: Size, to: Size },
    /// Released without changing the size
    Unchanged,
    /// No gesture was active or it was aborted
    Cancelled,
}

#[derive(Clone, Debug, Default)]
pub struct ResizeEngine {
    state: ResizeState,
}

impl ResizeEngine {
    pub fn state(&self) -> &ResizeState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, ResizeState::Dragging(_))
    }

    pub fn begin(&mut self, anchor: ResizeAnchor, start_size: Size, pointer: ScreenPoint, pixel_size: f64) {
        log::debug!("resize gesture started at {anchor:?} from {start_size}");
        self.state = ResizeState::Dragging(ResizeGesture {
            anchor,
            start_size,
            start_pointer: pointer,
            current_pointer: pointer,
            pixel_size,
        });
    }

    /// Updates the pointer and returns the live preview size
    pub fn update(&mut self, pointer: ScreenPoint) -> Option<Size> {
        match &mut self.state {
            ResizeState::Dragging(gesture) => {
                gesture.current_pointer = pointer;
                Some(gesture.target_size())
            }
            ResizeState::Idle => None,
        }
    }

    pub fn preview(&self) -> Option<Size> {
        match &self.state {
            ResizeState::Dragging(gesture) => Some(gesture.target_size()),
            ResizeState::Idle => None,
        }
    }

    pub fn finish(&mut self) -> ResizeOutcome {
        match std::mem::take(&mut self.state) {
            ResizeState::Dragging(gesture) => {
                let to = gesture.target_size();
                if to == gesture.start_size {
                    ResizeOutcome::Unchanged
                } else {
                    ResizeOutcome::Committed {
                        anchor: gesture.anchor,
                        from: gesture.start_size,
                        to,
                    }
                }
            }
            ResizeState::Idle => ResizeOutcome::Cancelled,
        }
    }

    pub fn cancel(&mut self) -> ResizeOutcome {
        if self.is_dragging() {
            log::debug!("resize gesture cancelled");
        }
        self.state = ResizeState::Idle;
        ResizeOutcome::Cancelled
    }
}
