use crate::editor::Direction;
use crate::format::{PALETTE, TextColor};

use super::input::{InputEdit, LineInput};

/// Swatches per row in the palette grid.
pub const PALETTE_COLUMNS: usize = 4;

/// Palette grid plus a free-form hex field.
#[derive(Debug, Clone, Default)]
pub struct ColorPicker {
    selected: usize,
    pub hex: LineInput,
    pub error: Option<String>,
}

impl ColorPicker {
    /// Start with `current` highlighted when it is a palette color.
    pub fn new(current: Option<TextColor>) -> Self {
        let selected = current
            .and_then(|color| PALETTE.iter().position(|(_, c)| *c == color))
            .unwrap_or(0);
        Self {
            selected,
            ..Self::default()
        }
    }

    pub const fn selected(&self) -> usize {
        self.selected
    }

    pub const fn highlighted(&self) -> TextColor {
        PALETTE[self.selected].1
    }

    /// Move the highlight within the grid, stopping at the edges.
    pub fn move_selection(&mut self, direction: Direction) {
        let row = self.selected / PALETTE_COLUMNS;
        let col = self.selected % PALETTE_COLUMNS;
        let rows = PALETTE.len().div_ceil(PALETTE_COLUMNS);
        let (row, col) = match direction {
            Direction::Up => (row.saturating_sub(1), col),
            Direction::Down => ((row + 1).min(rows - 1), col),
            Direction::Left => (row, col.saturating_sub(1)),
            Direction::Right => (row, (col + 1).min(PALETTE_COLUMNS - 1)),
        };
        self.selected = (row * PALETTE_COLUMNS + col).min(PALETTE.len() - 1);
        self.error = None;
    }

    pub fn edit_hex(&mut self, edit: InputEdit) {
        self.hex.apply(edit);
        self.error = None;
    }

    /// The chosen color: the hex field when filled, else the highlighted swatch.
    ///
    /// An unparsable hex field records an error and yields `None`.
    pub fn submit(&mut self) -> Option<TextColor> {
        if self.hex.is_empty() {
            return Some(self.highlighted());
        }
        match self.hex.text().parse::<TextColor>() {
            Ok(color) => Some(color),
            Err(err) => {
                self.error = Some(err.to_string());
                None
            }
        }
    }
}
