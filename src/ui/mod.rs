//! Terminal UI components.
//!
//! Screen layout, top to bottom: menu bar, text area, optional toast row,
//! status bar. Menus and dialogs are drawn as overlays on top.

mod overlays;
mod render;
mod status;

pub use overlays::dropdown_rect;
pub use render::{MENU_BAR_HEIGHT, byte_col_at, display_width, menu_at_column, menu_title_x, render};

/// Cells a tab occupies in the text area.
pub const TAB_WIDTH: usize = 4;

#[cfg(test)]
mod tests;
