use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::style::Color;

use super::*;
use crate::app::{Message, Model, update};
use crate::command::CommandId;
use crate::dialog::InputEdit;
use crate::editor::EditorBuffer;
use crate::format::TextColor;

fn create_test_terminal() -> Terminal<TestBackend> {
    let backend = TestBackend::new(80, 24);
    Terminal::new(backend).unwrap()
}

fn model_with_text(text: &str) -> Model {
    let mut model = Model::new((80, 24));
    model.buffer = EditorBuffer::from_text(text);
    model
}

fn draw(model: &mut Model) -> Buffer {
    let mut terminal = create_test_terminal();
    terminal.draw(|frame| render(model, frame)).unwrap();
    terminal.backend().buffer().clone()
}

fn row_text(buffer: &Buffer, y: u16) -> String {
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol())
        .collect()
}

fn screen_text(buffer: &Buffer) -> String {
    (0..buffer.area.height)
        .map(|y| row_text(buffer, y))
        .collect::<Vec<_>>()
        .join("\n")
}

fn type_into_modal(model: Model, text: &str) -> Model {
    text.chars().fold(model, |model, c| {
        update(model, Message::ModalEdit(InputEdit::Insert(c)))
    })
}

#[test]
fn test_menu_bar_lists_menus_and_title() {
    let mut model = model_with_text("");
    let buffer = draw(&mut model);
    let bar = row_text(&buffer, 0);
    assert!(bar.starts_with(" File  Edit  Format  Help "), "menu bar: {bar:?}");
    assert!(bar.trim_end().ends_with("TexEdit"), "menu bar: {bar:?}");
}

#[test]
fn test_text_and_status_bar_render() {
    let mut model = model_with_text("first line\nsecond");
    let buffer = draw(&mut model);
    assert!(row_text(&buffer, 1).starts_with("first line"));
    assert!(row_text(&buffer, 2).starts_with("second"));

    let status = row_text(&buffer, 23);
    assert!(status.contains("untitled"), "status: {status:?}");
    assert!(status.contains("Ln 1, Col 1"), "status: {status:?}");
    assert!(status.contains("monospace 12pt"), "status: {status:?}");
}

#[test]
fn test_dirty_buffer_is_flagged_in_status() {
    let model = model_with_text("");
    let mut model = update(model, Message::InsertChar('x'));
    let buffer = draw(&mut model);
    assert!(row_text(&buffer, 23).contains("[modified]"));
}

#[test]
fn test_find_highlights_every_match() {
    let model = model_with_text("The cat sat on the mat.");
    let model = update(model, Message::Command(CommandId::Find));
    let model = type_into_modal(model, "at");
    let mut model = update(model, Message::ModalSubmit);

    let buffer = draw(&mut model);
    let highlighted: Vec<u16> = (0..30)
        .filter(|&x| buffer[(x, 1)].bg == Color::Yellow)
        .collect();
    assert_eq!(highlighted, vec![5, 6, 9, 10, 20, 21]);
    assert!(row_text(&buffer, 23).contains("3 matches"));
}

#[test]
fn test_text_color_applies_to_buffer_cells() {
    let mut model = model_with_text("abc");
    model.style.color = Some(TextColor::new(0xff, 0, 0));
    model.buffer.move_end();
    let buffer = draw(&mut model);
    for x in 0..3 {
        assert_eq!(buffer[(x, 1)].fg, Color::Rgb(0xff, 0, 0));
    }
}

#[test]
fn test_cursor_cell_is_inverted() {
    let mut model = model_with_text("abc");
    let buffer = draw(&mut model);
    assert_eq!(buffer[(0, 1)].bg, Color::White);
    assert_eq!(buffer[(1, 1)].bg, Color::Reset);
}

#[test]
fn test_tabs_expand_in_text_area() {
    let mut model = model_with_text("\tx");
    let buffer = draw(&mut model);
    assert_eq!(buffer[(TAB_WIDTH as u16, 1)].symbol(), "x");
}

#[test]
fn test_open_menu_shows_items_and_shortcuts() {
    let model = model_with_text("");
    let mut model = update(model, Message::OpenMenu(0));
    let buffer = draw(&mut model);
    let text = screen_text(&buffer);
    assert!(text.contains("Open..."));
    assert!(text.contains("Ctrl+O"));
    assert!(text.contains("Exit"));
}

#[test]
fn test_prompt_overlay_shows_label_and_input() {
    let model = model_with_text("");
    let model = update(model, Message::Command(CommandId::Replace));
    let mut model = type_into_modal(model, "needle");
    let buffer = draw(&mut model);
    let text = screen_text(&buffer);
    assert!(text.contains("Replace"));
    assert!(text.contains("Enter text to find:"));
    assert!(text.contains("needle"));
}

#[test]
fn test_toast_row_sits_above_status_bar() {
    let model = model_with_text("");
    let mut model = update(model, Message::Command(CommandId::Undo));
    let buffer = draw(&mut model);
    assert!(row_text(&buffer, 22).contains("Nothing to undo"));
}

#[test]
fn test_color_picker_lists_palette() {
    let model = model_with_text("");
    let mut model = update(model, Message::Command(CommandId::Color));
    let buffer = draw(&mut model);
    let text = screen_text(&buffer);
    assert!(text.contains("Color"));
    assert!(text.contains("red"));
    assert!(text.contains("Hex:"));
}

#[test]
fn test_file_dialog_lists_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("notes.txt"), "hi").unwrap();
    let mut model = model_with_text("");
    model.start_dir = dir.path().to_path_buf();
    let mut model = update(model, Message::Command(CommandId::Open));
    let buffer = draw(&mut model);
    let text = screen_text(&buffer);
    assert!(text.contains("Look in:"));
    assert!(text.contains("notes.txt"));
    assert!(text.contains("Text Files"));
}

#[test]
fn test_about_dialog_shows_name_and_version() {
    let model = model_with_text("");
    let mut model = update(model, Message::Command(CommandId::About));
    let buffer = draw(&mut model);
    let text = screen_text(&buffer);
    assert!(text.contains(&format!("TexEdit v{}", env!("CARGO_PKG_VERSION"))));
    assert!(text.contains("Press any key to close"));
}

#[test]
fn test_about_dialog_renders_icon() {
    use image::{DynamicImage, RgbImage};
    use ratatui_image::picker::Picker;

    let picker = Picker::halfblocks();
    let icon = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, image::Rgb([200, 30, 30])));
    let model = model_with_text("").with_about_icon(Some(picker.new_resize_protocol(icon)));
    let mut model = update(model, Message::Command(CommandId::About));
    let buffer = draw(&mut model);
    let reddish = |color: Color| matches!(color, Color::Rgb(r, g, _) if r > 150 && g < 80);
    let colored = buffer
        .content()
        .iter()
        .any(|cell| reddish(cell.fg) || reddish(cell.bg));
    assert!(colored, "icon pixels should reach the buffer");
}

#[test]
fn test_edit_menu_dims_unavailable_commands() {
    let edit_menu = 1;
    let mut model = update(model_with_text("abc"), Message::OpenMenu(edit_menu));
    let buffer = draw(&mut model);
    let Some(crate::app::Modal::Menu(state)) = model.modal else {
        panic!("expected an open menu");
    };
    let popup = dropdown_rect(state, buffer.area);
    let x = popup.x + 2;
    let undo_row = popup.y + 1;
    let redo_row = popup.y + 2;
    let select_all_row = popup.y + 8;
    assert!(row_text(&buffer, undo_row).contains("Undo"));
    assert_eq!(buffer[(x, undo_row)].fg, Color::Indexed(245));
    assert_eq!(buffer[(x, redo_row)].fg, Color::Indexed(245));
    assert!(row_text(&buffer, select_all_row).contains("Select All"));
    assert_eq!(buffer[(x, select_all_row)].fg, Color::White);

    let model = update(model, Message::ModalCancel);
    let model = update(model, Message::InsertChar('x'));
    let mut model = update(model, Message::OpenMenu(edit_menu));
    let buffer = draw(&mut model);
    assert_eq!(buffer[(x, undo_row)].fg, Color::White);
    assert_eq!(buffer[(x, redo_row)].fg, Color::Indexed(245));
}
