//! Editor session module structure
//!
//! Split into multiple files by category:
//! - `session.rs` - Struct definition, constructors, getters, basic setters
//! - `observer.rs` - Content-change notification
//! - `pointer.rs` - Pointer event routing
//! - `brush_operations.rs` - Draw, erase, fill and stroke handling
//! - `resize_operations.rs` - Explicit and gesture-driven canvas resize
//! - `component_operations.rs` - Library save/load, place, move, stamp, remove
//! - `reference_operations.rs` - Baseline and vertical guides
//! - `font_operations.rs` - Font and character editing
//! - `type_operations.rs` - Typing text with a font
//! - `session_state.rs` - Serializable session snapshot
//! - `undo.rs` - Undo/redo system
//! - `internal.rs` - History commit, snapshot restore and notification plumbing

mod observer;
mod session;
mod session_state;

mod brush_operations;
mod component_operations;
mod font_operations;
mod internal;
mod pointer;
mod reference_operations;
mod resize_operations;
mod type_operations;
mod undo;

pub use observer::*;
pub use session::*;
pub use session_state::*;
