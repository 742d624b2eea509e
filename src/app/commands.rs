//! Handlers registered in the command table.
//!
//! Each handler only changes state. Anything that touches the outside world
//! (reading or writing files, the system clipboard) is left for
//! `App::handle_message_side_effects`.

use crate::app::{Modal, Model, PromptPurpose, ToastLevel};
use crate::command::CommandId;
use crate::dialog::{ColorPicker, FileDialog, FileDialogMode, Prompt};
use crate::error::EditorError;

impl Model {
    /// Whether running `id` now would do anything. Menus dim the rest.
    pub fn command_enabled(&self, id: CommandId) -> bool {
        match id {
            CommandId::Undo => self.buffer.can_undo(),
            CommandId::Redo => self.buffer.can_redo(),
            CommandId::Cut | CommandId::Copy => self.buffer.has_selection(),
            CommandId::Paste => self.clipboard.is_some(),
            _ => true,
        }
    }

    pub(crate) fn begin_open(&mut self) {
        self.open_file_dialog(FileDialogMode::Open);
    }

    pub(crate) fn begin_save(&mut self) {
        self.open_file_dialog(FileDialogMode::Save);
    }

    fn open_file_dialog(&mut self, mode: FileDialogMode) {
        let dir = self.dialog_dir();
        match FileDialog::new(mode, &dir) {
            Ok(mut dialog) => {
                if mode == FileDialogMode::Save
                    && let Some(name) = self.file_path.as_deref().and_then(|p| p.file_name())
                {
                    dialog.input.set(&name.to_string_lossy());
                }
                self.modal = Some(Modal::FileDialog(dialog));
            }
            Err(source) => {
                let err = EditorError::ListDir { path: dir, source };
                tracing::warn!(%err, "file dialog unavailable");
                self.show_toast(ToastLevel::Error, err.to_string());
            }
        }
    }

    pub(crate) fn request_exit(&mut self) {
        if self.buffer.is_dirty() && !self.quit_confirmed {
            self.show_toast(
                ToastLevel::Warning,
                "Unsaved changes! Press Ctrl+Q again to exit, or Ctrl+S to save",
            );
            self.quit_confirmed = true;
        } else {
            self.should_quit = true;
        }
    }

    pub(crate) fn undo(&mut self) {
        if self.buffer.undo() {
            self.after_edit();
        } else {
            self.show_toast(ToastLevel::Info, "Nothing to undo");
        }
    }

    pub(crate) fn redo(&mut self) {
        if self.buffer.redo() {
            self.after_edit();
        } else {
            self.show_toast(ToastLevel::Info, "Nothing to redo");
        }
    }

    pub(crate) fn cut(&mut self) {
        let Some(text) = self.buffer.selected_text() else {
            return;
        };
        self.buffer.delete_selection();
        self.store_clipboard(text);
        self.after_edit();
    }

    pub(crate) fn copy(&mut self) {
        if let Some(text) = self.buffer.selected_text() {
            self.store_clipboard(text);
        }
    }

    fn store_clipboard(&mut self, text: String) {
        self.clipboard_export = Some(text.clone());
        self.clipboard = Some(text);
    }

    pub(crate) fn paste(&mut self) {
        let Some(text) = self.clipboard.clone() else {
            return;
        };
        self.buffer.insert_str(&text);
        self.after_edit();
    }

    pub(crate) fn select_all(&mut self) {
        self.buffer.select_all();
        self.ensure_cursor_visible();
    }

    pub(crate) fn begin_find(&mut self) {
        self.modal = Some(Modal::Prompt {
            prompt: Prompt::text("Find", "Enter text to find:"),
            purpose: PromptPurpose::Find,
        });
    }

    pub(crate) fn begin_replace(&mut self) {
        self.modal = Some(Modal::Prompt {
            prompt: Prompt::text("Replace", "Enter text to find:"),
            purpose: PromptPurpose::ReplaceSearch,
        });
    }

    pub(crate) fn begin_font(&mut self) {
        let current = self.style.font.family.clone();
        self.modal = Some(Modal::Prompt {
            prompt: Prompt::text("Font", "Enter font family:").with_value(&current),
            purpose: PromptPurpose::FontFamily,
        });
    }

    pub(crate) fn begin_color(&mut self) {
        self.modal = Some(Modal::ColorPicker(ColorPicker::new(self.style.color)));
    }

    pub(crate) fn show_about(&mut self) {
        self.modal = Some(Modal::About);
    }
}
