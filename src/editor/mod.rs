//! Rope-backed document buffer.
//!
//! Provides the single editable text buffer with cursor, selection and
//! undo history, designed for integration into the TEA architecture.

mod buffer;

pub use buffer::{Cursor, Direction, EditorBuffer};
