//! Global display style for the buffer.
//!
//! One font and one foreground color apply to the whole buffer; every
//! change replaces the previous value.

mod color;
mod font;

pub use color::{PALETTE, ParseColorError, TextColor};
pub use font::{FontSpec, font_family_installed, osc50_sequence};

/// Style state applied to every cell of the buffer pane.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleState {
    pub font: FontSpec,
    /// `None` keeps the terminal's default foreground.
    pub color: Option<TextColor>,
}
