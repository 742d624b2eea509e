use std::ops::Range;

use ratatui::prelude::*;
use ratatui::widgets::{Clear, Paragraph};
use unicode_width::UnicodeWidthChar;

use crate::app::{Modal, Model};
use crate::command::MENUS;

use super::{TAB_WIDTH, overlays, status};

/// Rows taken by the menu bar.
pub const MENU_BAR_HEIGHT: u16 = 1;

/// Display width of one char in the text area.
fn char_width(ch: char) -> usize {
    if ch == '\t' {
        TAB_WIDTH
    } else {
        ch.width().unwrap_or(0)
    }
}

/// Display width of a string in the text area.
pub fn display_width(text: &str) -> usize {
    text.chars().map(char_width).sum()
}

/// Byte column of the char drawn at display column `x`, clamped to the line end.
pub fn byte_col_at(line: &str, x: usize) -> usize {
    let mut width = 0;
    for (idx, ch) in line.char_indices() {
        let w = char_width(ch);
        if width + w > x {
            return idx;
        }
        width += w;
    }
    line.len()
}

/// Column where a menu title starts in the menu bar.
pub fn menu_title_x(menu: usize) -> u16 {
    MENUS
        .iter()
        .take(menu)
        .map(|m| m.title.len() + 2)
        .sum::<usize>()
        .try_into()
        .unwrap_or(u16::MAX)
}

/// Index of the menu title under column `col`.
pub fn menu_at_column(col: u16) -> Option<usize> {
    (0..MENUS.len()).find(|&idx| {
        let start = menu_title_x(idx);
        let width = u16::try_from(MENUS[idx].title.len() + 2).unwrap_or(u16::MAX);
        col >= start && col < start.saturating_add(width)
    })
}

/// Render the complete UI.
pub fn render(model: &mut Model, frame: &mut Frame) {
    let area = frame.area();

    let toast_active = model.active_toast().is_some();
    let footer_rows = 1 + u16::from(toast_active);
    let menu_area = Rect {
        height: MENU_BAR_HEIGHT.min(area.height),
        ..area
    };
    let text_area = Rect {
        y: area.y + MENU_BAR_HEIGHT,
        height: area.height.saturating_sub(MENU_BAR_HEIGHT + footer_rows),
        ..area
    };
    let toast_area = Rect {
        y: area.y + area.height.saturating_sub(footer_rows),
        height: 1,
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: 1,
        ..area
    };

    render_menu_bar(model, frame, menu_area);
    render_text(model, frame, text_area);
    if toast_active {
        status::render_toast_bar(model, frame, toast_area);
    }
    status::render_status_bar(model, frame, status_area);

    match &model.modal {
        Some(Modal::Menu(state)) => overlays::render_dropdown(model, *state, frame, area),
        Some(Modal::Prompt { prompt, .. }) => overlays::render_prompt(prompt, frame, area),
        Some(Modal::FileDialog(dialog)) => overlays::render_file_dialog(dialog, frame, area),
        Some(Modal::ColorPicker(picker)) => overlays::render_color_picker(picker, frame, area),
        Some(Modal::About) | None => {}
    }
    // The icon protocol is resized in place while drawing.
    if matches!(model.modal, Some(Modal::About)) {
        overlays::render_about(model, frame, area);
    }
}

fn render_menu_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let bar_style = Style::default().bg(Color::Gray).fg(Color::Black);
    let open_menu = match &model.modal {
        Some(Modal::Menu(state)) => Some(state.menu),
        _ => None,
    };

    let mut spans: Vec<Span> = MENUS
        .iter()
        .enumerate()
        .map(|(idx, menu)| {
            let style = if open_menu == Some(idx) {
                bar_style.reversed()
            } else {
                bar_style
            };
            Span::styled(format!(" {} ", menu.title), style)
        })
        .collect();

    let used: usize = MENUS.iter().map(|m| m.title.len() + 2).sum();
    let free = usize::from(area.width).saturating_sub(used);
    let title = &model.title;
    let title_width = display_width(title);
    if free > title_width + 1 {
        spans.push(Span::styled(
            format!("{:>free$}", format!("{title} ")),
            bar_style,
        ));
    }

    let bar = Paragraph::new(Line::from(spans)).style(bar_style);
    frame.render_widget(bar, area);
}

fn render_text(model: &Model, frame: &mut Frame, area: Rect) {
    let buf = &model.buffer;
    let base = model
        .style
        .color
        .map_or_else(Style::default, |color| Style::default().fg(color.to_ratatui()));
    let highlight = base.bg(Color::Yellow).fg(Color::Black);
    let cursor_style = Style::default().bg(Color::White).fg(Color::Black);
    let show_cursor = model.modal.is_none();

    let selection = buf.selection_range();
    let cursor = buf.cursor();
    let visible_height = usize::from(area.height);
    let start = model.scroll_offset;
    let end = (start + visible_height).min(buf.line_count());
    let first_col = model.h_scroll;
    let last_col = first_col + usize::from(area.width);

    let mut content: Vec<Line> = Vec::with_capacity(end.saturating_sub(start));
    for line_idx in start..end {
        let line_text = buf.line_at(line_idx).unwrap_or_default();
        let line_start = buf.line_start_char(line_idx);
        let mut row = RowBuilder::default();
        let mut x = 0;
        let mut char_idx = line_start;

        for (byte_idx, ch) in line_text.char_indices() {
            let width = char_width(ch);
            let mut style = base;
            if in_ranges(&model.highlights, char_idx) {
                style = highlight;
            }
            if selection.as_ref().is_some_and(|r| r.contains(&char_idx)) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            if show_cursor && line_idx == cursor.line && byte_idx == cursor.col {
                style = cursor_style;
            }
            if x >= first_col && x + width <= last_col {
                if ch == '\t' {
                    row.push(&" ".repeat(TAB_WIDTH), style);
                } else {
                    row.push_char(ch, style);
                }
            }
            x += width;
            char_idx += 1;
        }

        let at_line_end = cursor.col >= line_text.len();
        if show_cursor && line_idx == cursor.line && at_line_end && x >= first_col && x < last_col
        {
            row.push(" ", cursor_style);
        }
        content.push(row.finish());
    }

    let doc = Paragraph::new(content).style(base);
    frame.render_widget(Clear, area);
    frame.render_widget(doc, area);
}

/// Whether `idx` falls inside one of the sorted, disjoint `ranges`.
fn in_ranges(ranges: &[Range<usize>], idx: usize) -> bool {
    let next = ranges.partition_point(|r| r.end <= idx);
    ranges.get(next).is_some_and(|r| r.start <= idx)
}

/// Collects styled cells into spans, merging runs that share a style.
#[derive(Default)]
struct RowBuilder {
    spans: Vec<Span<'static>>,
    text: String,
    style: Style,
}

impl RowBuilder {
    fn push_char(&mut self, ch: char, style: Style) {
        if style != self.style && !self.text.is_empty() {
            self.flush();
        }
        self.style = style;
        self.text.push(ch);
    }

    fn push(&mut self, text: &str, style: Style) {
        for ch in text.chars() {
            self.push_char(ch, style);
        }
    }

    fn flush(&mut self) {
        let text = std::mem::take(&mut self.text);
        self.spans.push(Span::styled(text, self.style));
    }

    fn finish(mut self) -> Line<'static> {
        if !self.text.is_empty() {
            self.flush();
        }
        Line::from(self.spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_width_expands_tabs_and_wide_chars() {
        assert_eq!(display_width("ab"), 2);
        assert_eq!(display_width("\tx"), TAB_WIDTH + 1);
        assert_eq!(display_width("日本"), 4);
    }

    #[test]
    fn test_byte_col_at_maps_display_columns() {
        assert_eq!(byte_col_at("héllo", 2), 3);
        assert_eq!(byte_col_at("\tab", 2), 0);
        assert_eq!(byte_col_at("\tab", 4), 1);
        assert_eq!(byte_col_at("ab", 10), 2);
    }

    #[test]
    fn test_in_ranges() {
        let ranges = vec![1..3, 5..6];
        let hits: Vec<usize> = (0..7).filter(|&i| in_ranges(&ranges, i)).collect();
        assert_eq!(hits, vec![1, 2, 5]);
    }

    #[test]
    fn test_menu_titles_are_hit_by_column() {
        assert_eq!(menu_title_x(0), 0);
        assert_eq!(menu_title_x(1), 6);
        assert_eq!(menu_at_column(0), Some(0));
        assert_eq!(menu_at_column(5), Some(0));
        assert_eq!(menu_at_column(6), Some(1));
        assert_eq!(menu_at_column(200), None);
    }
}
