use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};
use ratatui_image::{Resize, StatefulImage};

use crate::app::Model;
use crate::command::{MENUS, MenuItem, MenuState};
use crate::dialog::{ColorPicker, FileDialog, LineInput, PALETTE_COLUMNS, Prompt};
use crate::format::PALETTE;

use super::render::{MENU_BAR_HEIGHT, menu_title_x};

const POPUP_STYLE: Style = Style::new().bg(Color::Black).fg(Color::White);
const DIM: Color = Color::Indexed(245);

/// Area of the open drop-down, borders included. Item `i` is drawn on
/// row `y + 1 + i`.
pub fn dropdown_rect(state: MenuState, area: Rect) -> Rect {
    let items = MENUS[state.menu].items;
    let inner_width = items.iter().map(|item| item_width(*item)).max().unwrap_or(0);
    let width = u16::try_from(inner_width + 2).unwrap_or(u16::MAX);
    let height = u16::try_from(items.len() + 2).unwrap_or(u16::MAX);
    let x = area.x + menu_title_x(state.menu);
    let y = area.y + MENU_BAR_HEIGHT;
    Rect::new(x, y, width, height).intersection(area)
}

fn item_width(item: MenuItem) -> usize {
    match item {
        MenuItem::Command(id) => {
            let shortcut = id.spec().shortcut.map_or(0, |s| s.len() + 3);
            id.label().len() + shortcut + 2
        }
        MenuItem::Separator => 0,
    }
}

pub fn render_dropdown(model: &Model, state: MenuState, frame: &mut Frame, area: Rect) {
    let popup = dropdown_rect(state, area);
    let inner_width = usize::from(popup.width.saturating_sub(2));

    let lines: Vec<Line> = state
        .items()
        .iter()
        .enumerate()
        .map(|(idx, item)| match item {
            MenuItem::Command(id) => {
                let label = format!(" {}", id.label());
                let shortcut = id.spec().shortcut.map_or_else(String::new, |s| format!("{s} "));
                let gap = inner_width.saturating_sub(label.len() + shortcut.len());
                let text = format!("{label}{}{shortcut}", " ".repeat(gap));
                let style = if model.command_enabled(*id) {
                    POPUP_STYLE
                } else {
                    POPUP_STYLE.fg(DIM)
                };
                if idx == state.item {
                    Line::styled(text, style.reversed())
                } else {
                    Line::styled(text, style)
                }
            }
            MenuItem::Separator => Line::styled("\u{2500}".repeat(inner_width), Style::default().fg(DIM)),
        })
        .collect();

    let block = Block::default().borders(Borders::ALL).style(POPUP_STYLE);
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

/// Input text with a block cursor at the edit position.
fn input_line(input: &LineInput) -> Line<'static> {
    let mut chars = input.text().chars();
    let before: String = chars.by_ref().take(input.cursor()).collect();
    let at = chars.next().map_or_else(|| " ".to_string(), String::from);
    let after: String = chars.collect();
    Line::from(vec![
        Span::raw(before),
        Span::styled(at, Style::default().bg(Color::White).fg(Color::Black)),
        Span::raw(after),
    ])
}

pub fn render_prompt(prompt: &Prompt, frame: &mut Frame, area: Rect) {
    let popup = centered_popup_rect(area.width.saturating_sub(16).clamp(30, 60), 7, area);
    let lines = vec![
        Line::raw(prompt.label.clone()),
        input_line(&prompt.input),
        Line::styled("Enter: OK \u{2502} Esc: Cancel", Style::default().fg(DIM)),
    ];
    let block = Block::default()
        .title(prompt.title.clone())
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(POPUP_STYLE);
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn render_file_dialog(dialog: &FileDialog, frame: &mut Frame, area: Rect) {
    let popup_width = area.width.saturating_sub(10).clamp(40, 80);
    let popup_height = area.height.saturating_sub(4).clamp(10, 24);
    let popup = centered_popup_rect(popup_width, popup_height, area);

    let block = Block::default()
        .title(dialog.title())
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(POPUP_STYLE);
    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    // Rows: Look in, list..., File name, Files of type, error.
    let list_height = inner.height.saturating_sub(4);
    let look_in = Line::from(vec![
        Span::styled("Look in: ", Style::default().fg(Color::Yellow)),
        Span::raw(dialog.dir().display().to_string()),
    ]);
    frame.render_widget(Paragraph::new(look_in), Rect { height: 1, ..inner });

    let rows = usize::from(list_height);
    let first = dialog.selected().saturating_sub(rows.saturating_sub(1));
    let list: Vec<Line> = dialog
        .entries()
        .iter()
        .enumerate()
        .skip(first)
        .take(rows)
        .map(|(idx, entry)| {
            let name = if entry.is_dir {
                format!("{}/", entry.name)
            } else {
                entry.name.clone()
            };
            let style = if entry.is_dir {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            if idx == dialog.selected() {
                Line::styled(name, style.reversed())
            } else {
                Line::styled(name, style)
            }
        })
        .collect();
    let list_area = Rect {
        y: inner.y + 1,
        height: list_height,
        ..inner
    };
    frame.render_widget(Paragraph::new(list), list_area);

    let mut name_line = input_line(&dialog.input);
    name_line.spans.insert(0, Span::styled("File name: ", Style::default().fg(Color::Yellow)));
    let footer = vec![
        name_line,
        Line::from(vec![
            Span::styled("Files of type: ", Style::default().fg(Color::Yellow)),
            Span::raw(dialog.filter().label),
            Span::styled("  (Tab to change)", Style::default().fg(DIM)),
        ]),
        dialog.error.as_ref().map_or_else(
            || Line::styled("Enter: choose \u{2502} Esc: cancel", Style::default().fg(DIM)),
            |err| Line::styled(err.clone(), Style::default().fg(Color::Red)),
        ),
    ];
    let footer_area = Rect {
        y: list_area.y + list_height,
        height: inner.height.saturating_sub(list_height + 1),
        ..inner
    };
    frame.render_widget(Paragraph::new(footer), footer_area);
}

pub fn render_color_picker(picker: &ColorPicker, frame: &mut Frame, area: Rect) {
    const SWATCH: usize = 10;
    let grid_rows = PALETTE.len().div_ceil(PALETTE_COLUMNS);
    let width = u16::try_from(SWATCH * PALETTE_COLUMNS + 4).unwrap_or(u16::MAX);
    let height = u16::try_from(grid_rows + 7).unwrap_or(u16::MAX);
    let popup = centered_popup_rect(width, height, area);

    let mut lines: Vec<Line> = PALETTE
        .chunks(PALETTE_COLUMNS)
        .enumerate()
        .map(|(row, chunk)| {
            let spans: Vec<Span> = chunk
                .iter()
                .enumerate()
                .map(|(col, (name, color))| {
                    let idx = row * PALETTE_COLUMNS + col;
                    let style = Style::default().fg(color.to_ratatui());
                    let text = format!("\u{25a0} {name:<w$}", w = SWATCH - 2);
                    if idx == picker.selected() {
                        Span::styled(text, style.reversed())
                    } else {
                        Span::styled(text, style)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    lines.push(Line::raw(""));
    let mut hex_line = input_line(&picker.hex);
    hex_line.spans.insert(0, Span::styled("Hex: ", Style::default().fg(Color::Yellow)));
    lines.push(hex_line);
    lines.push(picker.error.as_ref().map_or_else(
        || Line::styled("Arrows pick \u{2502} Enter applies", Style::default().fg(DIM)),
        |err| Line::styled(err.clone(), Style::default().fg(Color::Red)),
    ));

    let block = Block::default()
        .title("Color")
        .borders(Borders::ALL)
        .padding(Padding::horizontal(1))
        .style(POPUP_STYLE);
    frame.render_widget(Clear, popup);
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

pub fn render_about(model: &mut Model, frame: &mut Frame, area: Rect) {
    let icon_rows: u16 = if model.about_icon.is_some() { 6 } else { 0 };
    let popup = centered_popup_rect(44, 9 + icon_rows, area);

    let block = Block::default()
        .title("About")
        .borders(Borders::ALL)
        .padding(Padding::uniform(1))
        .style(POPUP_STYLE);
    let inner = block.inner(popup);
    frame.render_widget(Clear, popup);
    frame.render_widget(block, popup);

    if let Some(protocol) = model.about_icon.as_mut() {
        let icon_area = Rect::new(
            inner.x + inner.width.saturating_sub(icon_rows * 2) / 2,
            inner.y,
            (icon_rows * 2).min(inner.width),
            icon_rows.min(inner.height),
        );
        let icon = StatefulImage::default().resize(Resize::Scale(Some(
            image::imageops::FilterType::CatmullRom,
        )));
        frame.render_stateful_widget(icon, icon_area, protocol);
    }

    let text = vec![
        Line::styled(
            format!("{} v{}", crate::app::APP_NAME, env!("CARGO_PKG_VERSION")),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw("A simple terminal text editor."),
        Line::raw(""),
        Line::styled("Press any key to close", Style::default().fg(DIM)),
    ];
    let text_area = Rect {
        y: inner.y + icon_rows,
        height: inner.height.saturating_sub(icon_rows),
        ..inner
    };
    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center),
        text_area,
    );
}

fn centered_popup_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w) / 2);
    let y = area.y + (area.height.saturating_sub(h) / 2);
    Rect::new(x, y, w, h)
}
