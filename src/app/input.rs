use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::app::{App, Message, Modal, Model};
use crate::command::{CommandId, menu_for_accelerator};
use crate::dialog::InputEdit;
use crate::editor::Direction;

impl App {
    pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(*key, model),
            Event::Mouse(mouse) => Self::handle_mouse(*mouse, model),
            Event::Paste(text) if model.modal.is_none() => Some(Message::PasteText(text.clone())),
            Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        match &model.modal {
            Some(Modal::About) => Some(Message::ModalCancel),
            Some(Modal::Menu(_)) => menu_key(key),
            Some(Modal::Prompt { .. }) => match key.code {
                KeyCode::Esc => Some(Message::ModalCancel),
                KeyCode::Enter => Some(Message::ModalSubmit),
                _ => input_edit(key).map(Message::ModalEdit),
            },
            Some(Modal::FileDialog(_)) => match key.code {
                KeyCode::Esc => Some(Message::ModalCancel),
                KeyCode::Enter => Some(Message::ModalSubmit),
                KeyCode::Tab => Some(Message::ModalToggle),
                KeyCode::Up => Some(Message::ModalMove(Direction::Up)),
                KeyCode::Down => Some(Message::ModalMove(Direction::Down)),
                _ => input_edit(key).map(Message::ModalEdit),
            },
            Some(Modal::ColorPicker(_)) => match key.code {
                KeyCode::Esc => Some(Message::ModalCancel),
                KeyCode::Enter => Some(Message::ModalSubmit),
                KeyCode::Up => Some(Message::ModalMove(Direction::Up)),
                KeyCode::Down => Some(Message::ModalMove(Direction::Down)),
                KeyCode::Left => Some(Message::ModalMove(Direction::Left)),
                KeyCode::Right => Some(Message::ModalMove(Direction::Right)),
                _ => input_edit(key).map(Message::ModalEdit),
            },
            None => editor_key(key),
        }
    }

    pub(super) fn handle_mouse(mouse: MouseEvent, model: &Model) -> Option<Message> {
        let screen = Rect::new(0, 0, model.width, model.height);

        if let Some(Modal::Menu(state)) = &model.modal {
            if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
                return None;
            }
            let popup = crate::ui::dropdown_rect(*state, screen);
            if point_in_rect(mouse.column, mouse.row, popup) {
                let row = mouse.row.saturating_sub(popup.y);
                if row == 0 || row + 1 >= popup.height {
                    return None;
                }
                return Some(Message::MenuSelect(usize::from(row - 1)));
            }
            if mouse.row == 0
                && let Some(menu) = crate::ui::menu_at_column(mouse.column)
                && menu != state.menu
            {
                return Some(Message::OpenMenu(menu));
            }
            return Some(Message::ModalCancel);
        }
        if model.modal.is_some() {
            return None;
        }

        let text_area = text_area(model);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if mouse.row < crate::ui::MENU_BAR_HEIGHT {
                    return crate::ui::menu_at_column(mouse.column).map(Message::OpenMenu);
                }
                if !point_in_rect(mouse.column, mouse.row, text_area) {
                    return None;
                }
                let (line, col) = position_at(model, text_area, mouse.column, mouse.row)?;
                Some(Message::MoveTo(line, col, false))
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                let (line, col) = position_at(model, text_area, mouse.column, mouse.row)?;
                Some(Message::MoveTo(line, col, true))
            }
            MouseEventKind::ScrollDown => Some(Message::ScrollDown(3)),
            MouseEventKind::ScrollUp => Some(Message::ScrollUp(3)),
            _ => None,
        }
    }
}

fn menu_key(key: KeyEvent) -> Option<Message> {
    match key.code {
        KeyCode::Esc | KeyCode::F(10) => Some(Message::ModalCancel),
        KeyCode::Enter => Some(Message::ModalSubmit),
        KeyCode::Up => Some(Message::ModalMove(Direction::Up)),
        KeyCode::Down => Some(Message::ModalMove(Direction::Down)),
        KeyCode::Left => Some(Message::ModalMove(Direction::Left)),
        KeyCode::Right => Some(Message::ModalMove(Direction::Right)),
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::ALT) => {
            menu_for_accelerator(c).map(Message::OpenMenu)
        }
        _ => None,
    }
}

fn input_edit(key: KeyEvent) -> Option<InputEdit> {
    match key.code {
        KeyCode::Char(c)
            if !key.modifiers.contains(KeyModifiers::CONTROL)
                && !key.modifiers.contains(KeyModifiers::ALT) =>
        {
            Some(InputEdit::Insert(c))
        }
        KeyCode::Backspace => Some(InputEdit::Backspace),
        KeyCode::Delete => Some(InputEdit::Delete),
        KeyCode::Left => Some(InputEdit::Left),
        KeyCode::Right => Some(InputEdit::Right),
        KeyCode::Home => Some(InputEdit::Home),
        KeyCode::End => Some(InputEdit::End),
        _ => None,
    }
}

fn editor_key(key: KeyEvent) -> Option<Message> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    if ctrl && let KeyCode::Char(c) = key.code {
        let id = match c.to_ascii_lowercase() {
            'o' => CommandId::Open,
            's' => CommandId::Save,
            'q' => CommandId::Exit,
            'x' => CommandId::Cut,
            'c' => CommandId::Copy,
            'v' => CommandId::Paste,
            'a' => CommandId::SelectAll,
            'f' => CommandId::Find,
            'h' => CommandId::Replace,
            'z' => CommandId::Undo,
            'y' => CommandId::Redo,
            _ => return None,
        };
        return Some(Message::Command(id));
    }
    if alt && let KeyCode::Char(c) = key.code {
        return menu_for_accelerator(c).map(Message::OpenMenu);
    }

    match key.code {
        KeyCode::F(1) => Some(Message::Command(CommandId::About)),
        KeyCode::F(10) => Some(Message::OpenMenu(0)),

        // Navigation
        KeyCode::Left if ctrl => Some(Message::MoveWordLeft(shift)),
        KeyCode::Right if ctrl => Some(Message::MoveWordRight(shift)),
        KeyCode::Up => Some(Message::MoveCursor(Direction::Up, shift)),
        KeyCode::Down => Some(Message::MoveCursor(Direction::Down, shift)),
        KeyCode::Left => Some(Message::MoveCursor(Direction::Left, shift)),
        KeyCode::Right => Some(Message::MoveCursor(Direction::Right, shift)),
        KeyCode::Home if ctrl => Some(Message::MoveToStart(shift)),
        KeyCode::End if ctrl => Some(Message::MoveToEnd(shift)),
        KeyCode::Home => Some(Message::MoveHome(shift)),
        KeyCode::End => Some(Message::MoveEnd(shift)),
        KeyCode::PageUp => Some(Message::PageUp),
        KeyCode::PageDown => Some(Message::PageDown),

        // Editing
        KeyCode::Enter => Some(Message::InsertNewline),
        KeyCode::Backspace => Some(Message::DeleteBack),
        KeyCode::Delete => Some(Message::DeleteForward),
        KeyCode::Tab => Some(Message::InsertChar('\t')),
        KeyCode::Char(c) => Some(Message::InsertChar(c)),

        _ => None,
    }
}

/// Screen area of the text, matching the layout drawn by `ui::render`.
fn text_area(model: &Model) -> Rect {
    let footer_rows = 1 + u16::from(model.active_toast().is_some());
    Rect {
        x: 0,
        y: crate::ui::MENU_BAR_HEIGHT,
        width: model.width,
        height: model
            .height
            .saturating_sub(crate::ui::MENU_BAR_HEIGHT + footer_rows),
    }
}

fn point_in_rect(col: u16, row: u16, rect: Rect) -> bool {
    col >= rect.x && col < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

/// Buffer (line, byte column) under a screen cell; rows outside the text
/// area clamp to its edges.
fn position_at(model: &Model, area: Rect, column: u16, row: u16) -> Option<(usize, usize)> {
    if area.height == 0 {
        return None;
    }
    let row = row.clamp(area.y, area.y + area.height - 1);
    let line = (model.scroll_offset + usize::from(row - area.y))
        .min(model.buffer.line_count().saturating_sub(1));
    let text = model.buffer.line_at(line).unwrap_or_default();
    let x = model.h_scroll + usize::from(column.saturating_sub(area.x));
    Some((line, crate::ui::byte_col_at(&text, x)))
}
