//! Modal dialog state.
//!
//! Each dialog is a small state machine driven by `update`; rendering lives
//! in `ui::overlays`. A dialog never touches the buffer itself: it only
//! reports what the user chose, or that they cancelled.

mod color_picker;
mod file_dialog;
mod input;
mod prompt;

pub use color_picker::{ColorPicker, PALETTE_COLUMNS};
pub use file_dialog::{
    DEFAULT_EXTENSION, DirEntry, FILE_FILTERS, FileDialog, FileDialogMode, FileDialogOutcome,
    FileFilter,
};
pub use input::{InputEdit, LineInput};
pub use prompt::{Prompt, PromptKind};
