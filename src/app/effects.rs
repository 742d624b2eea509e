use std::io::{Write, stdout};

use base64::Engine;
use crossterm::queue;
use crossterm::terminal::SetTitle;

use crate::app::{App, Modal, Model, ToastLevel};
use crate::dialog::{FileDialogMode, FileDialogOutcome};
use crate::format::{FontSpec, font_family_installed, osc50_sequence};

impl App {
    pub(super) fn handle_message_side_effects(model: &mut Model) {
        if std::mem::take(&mut model.file_dialog_submitted) {
            Self::submit_file_dialog(model);
        }
        if let Some(text) = model.clipboard_export.take() {
            Self::export_clipboard(model, &text);
        }
    }

    fn submit_file_dialog(model: &mut Model) {
        let (outcome, mode) = match model.modal.as_mut() {
            Some(Modal::FileDialog(dialog)) => (dialog.activate(), dialog.mode),
            _ => return,
        };
        let FileDialogOutcome::Chosen(path) = outcome else {
            return;
        };
        model.modal = None;
        let (result, verb) = match mode {
            FileDialogMode::Open => (model.open_file(&path), "Opened"),
            FileDialogMode::Save => (model.save_file(&path), "Saved"),
        };
        match result {
            Ok(()) => {
                let name = path
                    .file_name()
                    .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().to_string());
                model.show_toast(ToastLevel::Info, format!("{verb} {name}"));
            }
            Err(err) => {
                tracing::warn!(%err, "file operation failed");
                model.show_toast(ToastLevel::Error, err.to_string());
            }
        }
    }

    fn export_clipboard(model: &mut Model, text: &str) {
        if let Err(err) = copy_to_clipboard(text) {
            tracing::warn!(%err, "system clipboard unavailable");
            model.show_toast(ToastLevel::Warning, format!("Copy failed: {err}"));
        }
    }
}

/// Pushes title and font changes to the terminal.
///
/// Remembers what it last sent so each change is written once.
#[derive(Debug, Default)]
pub(super) struct TerminalSync {
    title: Option<String>,
    font: FontSpec,
}

impl TerminalSync {
    /// Write any pending changes. Returns `true` if the model changed and
    /// needs a redraw.
    pub(super) fn sync(&mut self, model: &mut Model, out: &mut impl Write) -> std::io::Result<bool> {
        let mut changed = false;
        if self.title.as_deref() != Some(model.title.as_str()) {
            queue!(out, SetTitle(&model.title))?;
            self.title = Some(model.title.clone());
        }
        if model.style.font != self.font {
            self.font = model.style.font.clone();
            out.write_all(osc50_sequence(&self.font).as_bytes())?;
            if !font_family_installed(&self.font.family) {
                tracing::warn!(family = %self.font.family, "font family not installed");
                model.show_toast(
                    ToastLevel::Warning,
                    format!(
                        "Font \"{}\" is not installed; the terminal may keep its own font",
                        self.font.family
                    ),
                );
                changed = true;
            }
        }
        out.flush()?;
        Ok(changed)
    }
}

fn copy_to_clipboard(text: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    {
        if copy_to_pbcopy(text).is_ok() {
            return Ok(());
        }
    }
    copy_to_clipboard_osc52(text)
}

#[cfg(target_os = "macos")]
fn copy_to_pbcopy(text: &str) -> std::io::Result<()> {
    use std::process::{Command, Stdio};

    let mut child = Command::new("pbcopy").stdin(Stdio::piped()).spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other("pbcopy failed"))
    }
}

fn copy_to_clipboard_osc52(text: &str) -> std::io::Result<()> {
    let osc = osc52_sequence(text);
    let mut out = stdout();
    out.write_all(osc.as_bytes())?;
    out.flush()
}

fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}
