use crate::app::{Modal, Model, PromptPurpose, ToastLevel};
use crate::command::{self, CommandId, MENUS, MenuState};
use crate::dialog::{InputEdit, Prompt};
use crate::editor::{Direction, EditorBuffer};
use crate::format::FontSpec;
use crate::search;

/// All possible events and actions in the application.
///
/// These represent user input, system events, and internal actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// Run a command from the command table
    Command(CommandId),

    // Editing
    /// Insert a character at the cursor, replacing any selection
    InsertChar(char),
    /// Split the line at the cursor (Enter)
    InsertNewline,
    /// Delete the selection or the character before the cursor
    DeleteBack,
    /// Delete the selection or the character at the cursor
    DeleteForward,
    /// Insert text delivered by a terminal paste
    PasteText(String),

    // Cursor movement; `true` extends the selection
    MoveCursor(Direction, bool),
    MoveHome(bool),
    MoveEnd(bool),
    MoveWordLeft(bool),
    MoveWordRight(bool),
    MoveToStart(bool),
    MoveToEnd(bool),
    /// Move to (line, byte column), e.g. from a mouse click
    MoveTo(usize, usize, bool),
    PageUp,
    PageDown,
    /// Scroll the view up by n lines without moving the cursor
    ScrollUp(usize),
    /// Scroll the view down by n lines without moving the cursor
    ScrollDown(usize),

    // Menus
    /// Open a top-level menu by index
    OpenMenu(usize),
    /// Run the item at this row of the open menu
    MenuSelect(usize),

    // Modal dialogs
    /// Arrow keys inside the open modal
    ModalMove(Direction),
    /// Edit the modal's text field
    ModalEdit(InputEdit),
    /// Cycle the modal's secondary option (file type filter)
    ModalToggle,
    /// Enter
    ModalSubmit,
    /// Esc
    ModalCancel,

    // Window
    /// Terminal resized
    Resize(u16, u16),
    /// Redraw screen
    Redraw,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// File and clipboard I/O are left to `App::handle_message_side_effects`.
pub fn update(mut model: Model, msg: Message) -> Model {
    model.file_dialog_submitted = false;
    // A pending exit confirmation only survives menu navigation and repeated Exit.
    if !matches!(
        msg,
        Message::Command(CommandId::Exit)
            | Message::OpenMenu(_)
            | Message::MenuSelect(_)
            | Message::ModalMove(_)
            | Message::ModalSubmit
            | Message::ModalCancel
            | Message::Resize(..)
            | Message::Redraw
    ) {
        model.quit_confirmed = false;
    }

    match msg {
        Message::Command(id) => {
            model.modal = None;
            command::dispatch(&mut model, id);
        }

        Message::InsertChar(ch) => {
            model.buffer.insert_char(ch);
            model.after_edit();
        }
        Message::InsertNewline => {
            model.buffer.split_line();
            model.after_edit();
        }
        Message::DeleteBack => {
            if model.buffer.delete_back() {
                model.after_edit();
            }
        }
        Message::DeleteForward => {
            if model.buffer.delete_forward() {
                model.after_edit();
            }
        }
        Message::PasteText(text) => {
            let text = text.replace("\r\n", "\n").replace('\r', "\n");
            model.buffer.insert_str(&text);
            model.after_edit();
        }

        Message::MoveCursor(direction, extend) => {
            move_with(&mut model, extend, |buf| buf.move_cursor(direction));
        }
        Message::MoveHome(extend) => move_with(&mut model, extend, |buf| buf.move_home()),
        Message::MoveEnd(extend) => move_with(&mut model, extend, |buf| buf.move_end()),
        Message::MoveWordLeft(extend) => {
            move_with(&mut model, extend, |buf| buf.move_word_left());
        }
        Message::MoveWordRight(extend) => {
            move_with(&mut model, extend, |buf| buf.move_word_right());
        }
        Message::MoveToStart(extend) => {
            move_with(&mut model, extend, |buf| buf.move_to_start());
        }
        Message::MoveToEnd(extend) => move_with(&mut model, extend, |buf| buf.move_to_end()),
        Message::MoveTo(line, col, extend) => {
            move_with(&mut model, extend, |buf| buf.move_to(line, col));
        }
        Message::PageUp => {
            let rows = model.text_rows().max(1);
            move_with(&mut model, false, |buf| {
                for _ in 0..rows {
                    buf.move_cursor(Direction::Up);
                }
            });
        }
        Message::PageDown => {
            let rows = model.text_rows().max(1);
            move_with(&mut model, false, |buf| {
                for _ in 0..rows {
                    buf.move_cursor(Direction::Down);
                }
            });
        }
        Message::ScrollUp(n) => {
            model.scroll_offset = model.scroll_offset.saturating_sub(n);
        }
        Message::ScrollDown(n) => {
            let max = model.buffer.line_count().saturating_sub(1);
            model.scroll_offset = (model.scroll_offset + n).min(max);
        }

        Message::OpenMenu(index) => {
            if index < MENUS.len() {
                model.modal = Some(Modal::Menu(MenuState::open(index)));
            }
        }
        Message::MenuSelect(item) => {
            if let Some(Modal::Menu(mut state)) = model.modal.take()
                && state.select(item)
                && let Some(id) = state.current()
            {
                command::dispatch(&mut model, id);
            }
        }

        Message::ModalMove(direction) => modal_move(&mut model, direction),
        Message::ModalEdit(edit) => match model.modal.as_mut() {
            Some(Modal::Prompt { prompt, .. }) => prompt.apply(edit),
            Some(Modal::FileDialog(dialog)) => dialog.edit_input(edit),
            Some(Modal::ColorPicker(picker)) => picker.edit_hex(edit),
            Some(Modal::Menu(_) | Modal::About) | None => {}
        },
        Message::ModalToggle => {
            if let Some(Modal::FileDialog(dialog)) = model.modal.as_mut() {
                dialog.toggle_filter();
            }
        }
        Message::ModalSubmit => modal_submit(&mut model),
        Message::ModalCancel => {
            model.modal = None;
        }

        // Window
        Message::Resize(width, height) => {
            model.width = width;
            model.height = height;
            model.ensure_cursor_visible();
        }
        Message::Redraw => {}
    }
    model
}

fn move_with(model: &mut Model, extend: bool, movement: impl FnOnce(&mut EditorBuffer)) {
    model.buffer.set_selecting(extend);
    movement(&mut model.buffer);
    model.ensure_cursor_visible();
}

fn modal_move(model: &mut Model, direction: Direction) {
    match model.modal.as_mut() {
        Some(Modal::Menu(state)) => match direction {
            Direction::Up => state.cycle_item(false),
            Direction::Down => state.cycle_item(true),
            Direction::Left => state.cycle_menu(false),
            Direction::Right => state.cycle_menu(true),
        },
        Some(Modal::FileDialog(dialog)) => match direction {
            Direction::Up => dialog.move_selection(-1),
            Direction::Down => dialog.move_selection(1),
            Direction::Left | Direction::Right => {}
        },
        Some(Modal::ColorPicker(picker)) => picker.move_selection(direction),
        Some(Modal::Prompt { .. } | Modal::About) | None => {}
    }
}

fn modal_submit(model: &mut Model) {
    match model.modal.take() {
        Some(Modal::Menu(state)) => {
            if let Some(id) = state.current() {
                command::dispatch(model, id);
            }
        }
        Some(Modal::Prompt { prompt, purpose }) => submit_prompt(model, &prompt, purpose),
        Some(Modal::ColorPicker(mut picker)) => {
            if let Some(color) = picker.submit() {
                tracing::debug!(color = %color, "text color changed");
                model.style.color = Some(color);
            } else {
                model.modal = Some(Modal::ColorPicker(picker));
            }
        }
        // Choosing a file needs disk I/O; the effects layer handles it.
        Some(modal @ Modal::FileDialog(_)) => {
            model.modal = Some(modal);
            model.file_dialog_submitted = true;
        }
        Some(Modal::About) | None => {}
    }
}

fn submit_prompt(model: &mut Model, prompt: &Prompt, purpose: PromptPurpose) {
    let value = prompt.value().to_string();
    match purpose {
        PromptPurpose::Find => {
            if value.is_empty() {
                return;
            }
            find(model, &value);
        }
        PromptPurpose::ReplaceSearch => {
            if value.is_empty() {
                model.show_toast(ToastLevel::Info, "Nothing to replace: search text is empty");
                return;
            }
            model.modal = Some(Modal::Prompt {
                prompt: Prompt::text("Replace", "Enter replacement text:"),
                purpose: PromptPurpose::ReplaceWith { search: value },
            });
        }
        PromptPurpose::ReplaceWith { search } => replace(model, &search, &value),
        PromptPurpose::FontFamily => {
            let family = value.trim().to_string();
            if family.is_empty() {
                return;
            }
            let size = model.style.font.size.to_string();
            model.modal = Some(Modal::Prompt {
                prompt: Prompt::integer("Font Size", "Enter font size:").with_value(&size),
                purpose: PromptPurpose::FontSize { family },
            });
        }
        PromptPurpose::FontSize { family } => match prompt.integer_value() {
            Some(size) => {
                tracing::debug!(%family, size, "font changed");
                model.style.font = FontSpec { family, size };
            }
            None => model.show_toast(
                ToastLevel::Warning,
                "Font size must be a positive whole number",
            ),
        },
    }
}

/// Highlight every occurrence of `needle`, replacing earlier highlights.
fn find(model: &mut Model, needle: &str) {
    let text = model.buffer.text();
    model.highlights = search::find_all(&text, needle, model.search_options);
    tracing::debug!(matches = model.highlights.len(), "find");
    if let Some(first) = model.highlights.first() {
        let (line, _) = model.buffer.char_to_line_col(first.start);
        let rows = model.text_rows().max(1);
        if line < model.scroll_offset || line >= model.scroll_offset + rows {
            model.scroll_offset = line.saturating_sub(rows / 2);
        }
    }
}

/// Replace every occurrence of `needle` as a single undoable edit.
fn replace(model: &mut Model, needle: &str, replacement: &str) {
    let text = model.buffer.text();
    let result = search::replace_all(&text, needle, replacement, model.search_options);
    tracing::debug!(count = result.count, "replace");
    if result.count == 0 {
        model.show_toast(ToastLevel::Info, format!("No occurrences of \"{needle}\""));
        return;
    }
    model.buffer.replace_all_text(&result.text);
    model.after_edit();
    let noun = if result.count == 1 {
        "occurrence"
    } else {
        "occurrences"
    };
    model.show_toast(
        ToastLevel::Info,
        format!("Replaced {} {noun}", result.count),
    );
}
