use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;

/// An RGB foreground color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Colors offered by the color picker, in display order.
pub const PALETTE: [(&str, TextColor); 16] = [
    ("black", TextColor::new(0x00, 0x00, 0x00)),
    ("maroon", TextColor::new(0x80, 0x00, 0x00)),
    ("green", TextColor::new(0x00, 0x80, 0x00)),
    ("olive", TextColor::new(0x80, 0x80, 0x00)),
    ("navy", TextColor::new(0x00, 0x00, 0x80)),
    ("purple", TextColor::new(0x80, 0x00, 0x80)),
    ("teal", TextColor::new(0x00, 0x80, 0x80)),
    ("silver", TextColor::new(0xc0, 0xc0, 0xc0)),
    ("gray", TextColor::new(0x80, 0x80, 0x80)),
    ("red", TextColor::new(0xff, 0x00, 0x00)),
    ("lime", TextColor::new(0x00, 0xff, 0x00)),
    ("yellow", TextColor::new(0xff, 0xff, 0x00)),
    ("blue", TextColor::new(0x00, 0x00, 0xff)),
    ("fuchsia", TextColor::new(0xff, 0x00, 0xff)),
    ("aqua", TextColor::new(0x00, 0xff, 0xff)),
    ("white", TextColor::new(0xff, 0xff, 0xff)),
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized color {0:?} (use #rrggbb, #rgb or a color name)")]
pub struct ParseColorError(String);

impl TextColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form, lowercase.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub const fn to_ratatui(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl fmt::Display for TextColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for TextColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ParseColorError(s.to_string()));
        }
        PALETTE
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(trimmed))
            .map(|(_, color)| *color)
            .ok_or_else(|| ParseColorError(s.to_string()))
    }
}

fn parse_hex(hex: &str) -> Option<TextColor> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => Some(TextColor::new(
            u8::from_str_radix(&hex[0..2], 16).ok()?,
            u8::from_str_radix(&hex[2..4], 16).ok()?,
            u8::from_str_radix(&hex[4..6], 16).ok()?,
        )),
        3 => {
            let mut parts = hex
                .chars()
                .map(|c| c.to_digit(16).and_then(|d| u8::try_from(d * 17).ok()));
            Some(TextColor::new(parts.next()??, parts.next()??, parts.next()??))
        }
        _ => None,
    }
}
