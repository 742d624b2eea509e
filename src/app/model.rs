use std::ops::Range;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use ratatui_image::protocol::StatefulProtocol;

use crate::command::MenuState;
use crate::dialog::{ColorPicker, FileDialog, Prompt};
use crate::editor::EditorBuffer;
use crate::error::EditorError;
use crate::format::StyleState;
use crate::search::SearchOptions;

/// Application name shown in the window title.
pub const APP_NAME: &str = "TexEdit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// What a submitted prompt feeds into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptPurpose {
    Find,
    ReplaceSearch,
    ReplaceWith { search: String },
    FontFamily,
    FontSize { family: String },
}

/// The modal layer on top of the buffer. At most one is open at a time.
#[derive(Debug, Clone)]
pub enum Modal {
    Menu(MenuState),
    Prompt {
        prompt: Prompt,
        purpose: PromptPurpose,
    },
    FileDialog(FileDialog),
    ColorPicker(ColorPicker),
    About,
}

/// The complete application state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// The single document being edited
    pub buffer: EditorBuffer,
    /// Path of the last successful Open or Save
    pub file_path: Option<PathBuf>,
    /// Window title, pushed to the terminal whenever it changes
    pub title: String,
    /// Char ranges marked by the last Find
    pub highlights: Vec<Range<usize>>,
    /// Global font and foreground color
    pub style: StyleState,
    /// Matching policy for Find and Replace
    pub search_options: SearchOptions,
    /// In-process clipboard register used by Paste
    pub clipboard: Option<String>,
    /// Text waiting to be pushed to the system clipboard
    pub(super) clipboard_export: Option<String>,
    /// Enter was pressed in an already open file dialog
    pub(super) file_dialog_submitted: bool,
    pub modal: Option<Modal>,
    /// First visible buffer line
    pub scroll_offset: usize,
    /// First visible display column
    pub h_scroll: usize,
    pub width: u16,
    pub height: u16,
    toast: Option<Toast>,
    /// Whether the app should quit
    pub should_quit: bool,
    /// Set after the first Exit with unsaved changes; a second Exit proceeds
    pub quit_confirmed: bool,
    /// Directory file dialogs start in when no file is open
    pub start_dir: PathBuf,
    /// Icon shown in the About dialog
    pub about_icon: Option<StatefulProtocol>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("file_path", &self.file_path)
            .field("title", &self.title)
            .field("dirty", &self.buffer.is_dirty())
            .field("highlights", &self.highlights.len())
            .field("modal", &self.modal)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create an empty, untitled model for a terminal of the given size.
    pub fn new(terminal_size: (u16, u16)) -> Self {
        Self {
            width: terminal_size.0,
            height: terminal_size.1,
            start_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_search_options(mut self, options: SearchOptions) -> Self {
        self.search_options = options;
        self
    }

    #[must_use]
    pub fn with_about_icon(mut self, icon: Option<StatefulProtocol>) -> Self {
        self.about_icon = icon;
        self
    }

    /// Replace the buffer with the contents of `path`.
    ///
    /// On failure the buffer, path and title are left as they were.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Read`] if the file cannot be read as UTF-8 text.
    pub fn open_file(&mut self, path: &Path) -> Result<(), EditorError> {
        let text = std::fs::read_to_string(path).map_err(|source| EditorError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.buffer = EditorBuffer::from_text(&text);
        self.highlights.clear();
        self.scroll_offset = 0;
        self.h_scroll = 0;
        self.set_file_path(path);
        tracing::info!(path = %path.display(), chars = self.buffer.char_count(), "opened file");
        Ok(())
    }

    /// Write the buffer to `path`, overwriting it.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Write`] if the file cannot be written.
    pub fn save_file(&mut self, path: &Path) -> Result<(), EditorError> {
        std::fs::write(path, self.buffer.text()).map_err(|source| EditorError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        self.buffer.mark_clean();
        self.set_file_path(path);
        tracing::info!(path = %path.display(), "saved file");
        Ok(())
    }

    fn set_file_path(&mut self, path: &Path) {
        self.title = format!("{APP_NAME} - {}", path.display());
        self.file_path = Some(path.to_path_buf());
    }

    /// Directory a new file dialog should list.
    pub fn dialog_dir(&self) -> PathBuf {
        self.file_path
            .as_deref()
            .and_then(Path::parent)
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| self.start_dir.clone(), Path::to_path_buf)
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(4),
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }

    /// Rows available to the text area: the menu bar, status bar and any
    /// toast take one row each.
    pub fn text_rows(&self) -> usize {
        let chrome = 2 + u16::from(self.toast.is_some());
        usize::from(self.height.saturating_sub(chrome))
    }

    /// Scroll so the cursor cell is on screen.
    pub(super) fn ensure_cursor_visible(&mut self) {
        let cursor = self.buffer.cursor();
        let rows = self.text_rows();
        if cursor.line < self.scroll_offset || rows == 0 {
            self.scroll_offset = cursor.line;
        } else if cursor.line >= self.scroll_offset + rows {
            self.scroll_offset = cursor.line + 1 - rows;
        }

        let line = self.buffer.line_at(cursor.line).unwrap_or_default();
        let x = crate::ui::display_width(line.get(..cursor.col).unwrap_or(&line));
        let cols = usize::from(self.width).max(1);
        if x < self.h_scroll {
            self.h_scroll = x;
        } else if x >= self.h_scroll + cols {
            self.h_scroll = x + 1 - cols;
        }
    }

    /// Bookkeeping after any buffer mutation: old highlights no longer
    /// point at the text they matched.
    pub(super) fn after_edit(&mut self) {
        self.highlights.clear();
        self.ensure_cursor_visible();
    }

    /// Highlight ranges as a count, for the status bar.
    pub const fn match_count(&self) -> usize {
        self.highlights.len()
    }
}

// Implement Default for Model to allow std::mem::take
impl Default for Model {
    fn default() -> Self {
        Self {
            buffer: EditorBuffer::empty(),
            file_path: None,
            title: APP_NAME.to_string(),
            highlights: Vec::new(),
            style: StyleState::default(),
            search_options: SearchOptions::default(),
            clipboard: None,
            clipboard_export: None,
            file_dialog_submitted: false,
            modal: None,
            scroll_offset: 0,
            h_scroll: 0,
            width: 80,
            height: 24,
            toast: None,
            should_quit: false,
            quit_confirmed: false,
            start_dir: PathBuf::from("."),
            about_icon: None,
        }
    }
}
