use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, ToastLevel};

use super::render::display_width;

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let filename = model
        .file_path
        .as_deref()
        .and_then(|p| p.file_name())
        .map_or_else(|| "untitled".to_string(), |s| s.to_string_lossy().to_string());
    let modified = if model.buffer.is_dirty() {
        " [modified]"
    } else {
        ""
    };

    let cursor = model.buffer.cursor();
    let line = model.buffer.line_at(cursor.line).unwrap_or_default();
    let col = line.get(..cursor.col).map_or(0, display_width) + 1;
    let color = model
        .style
        .color
        .map_or_else(|| "default".to_string(), |c| c.to_hex());
    let matches = match model.match_count() {
        0 => String::new(),
        1 => "  1 match".to_string(),
        n => format!("  {n} matches"),
    };

    let status = format!(
        " {filename}{modified}  Ln {}, Col {col}  {}  {color}{matches}  F10:menu",
        cursor.line + 1,
        model.style.font,
    );

    let status_bar =
        Paragraph::new(status).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
