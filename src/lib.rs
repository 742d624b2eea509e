// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditorBuffer)
    clippy::module_name_repetitions
)]

//! # TexEdit
//!
//! A terminal text editor with a menu bar and dialogs.
//!
//! TexEdit edits one plain-text document at a time:
//! - Open and Save through a file dialog
//! - Cut, Copy, Paste, Select All, Undo and Redo
//! - Find (highlights every match) and Replace (all matches at once)
//! - A font and color for the whole buffer
//! - An About dialog with an image icon
//!
//! ## Architecture
//!
//! TexEdit uses The Elm Architecture (TEA) pattern:
//! - **Model**: Application state
//! - **Message**: Events and actions
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`command`]: Command table and menus
//! - [`editor`]: Text buffer with cursor, selection and history
//! - [`search`]: Find and Replace scans
//! - [`dialog`]: Prompt, file and color dialogs
//! - [`format`]: Font and color styling
//! - [`ui`]: Terminal UI components
//! - [`config`]: Startup flags
//! - [`icon`]: About icon loading

pub mod app;
pub mod command;
pub mod config;
pub mod dialog;
pub mod editor;
pub mod error;
pub mod format;
pub mod icon;
pub mod search;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::EditorBuffer;
    pub use crate::error::EditorError;
    pub use crate::search::SearchOptions;
}
