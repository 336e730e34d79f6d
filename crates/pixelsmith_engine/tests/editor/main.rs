//! Editor session tests, grouped by area

mod helpers;

mod brush_operations;
mod pointer;
mod reference_lines;
mod session_state;
mod undo;
