use std::fmt;
use std::str::FromStr;

use embedded_graphics::pixelcolor::Rgb888;
use serde::{Deserialize, Serialize};

/// An RGB fill color, written in configuration files as a name
/// (`"white"`) or `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

const NAMED: [(&str, Color); 8] = [
    ("black", Color::BLACK),
    ("white", Color::WHITE),
    ("red", Color::new(255, 0, 0)),
    ("green", Color::new(0, 255, 0)),
    ("blue", Color::new(0, 0, 255)),
    ("yellow", Color::new(255, 255, 0)),
    ("cyan", Color::new(0, 255, 255)),
    ("magenta", Color::new(255, 0, 255)),
];

impl Color {
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);
    /// Pure white.
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Build a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to the rasterizer's pixel type.
    #[must_use]
    pub const fn to_rgb888(self) -> Rgb888 {
        Rgb888::new(self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(format!("expected #rrggbb, got '{s}'"));
            }
            let channel = |i: usize| {
                u8::from_str_radix(&hex[i..i + 2], 16)
                    .map_err(|e| format!("bad color '{s}': {e}"))
            };
            return Ok(Self::new(channel(0)?, channel(2)?, channel(4)?));
        }
        NAMED
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(s))
            .map(|&(_, color)| color)
            .ok_or_else(|| format!("unknown color '{s}'"))
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((name, _)) = NAMED.iter().find(|(_, c)| c == self) {
            return f.write_str(name);
        }
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_and_hex() {
        assert_eq!("White".parse::<Color>().unwrap(), Color::WHITE);
        assert_eq!(
            "#ff8000".parse::<Color>().unwrap(),
            Color::new(255, 128, 0)
        );
        assert!("#ff80".parse::<Color>().is_err());
        assert!("mauve".parse::<Color>().is_err());
    }

    #[test]
    fn display_prefers_names() {
        assert_eq!(Color::BLACK.to_string(), "black");
        assert_eq!(Color::new(1, 2, 3).to_string(), "#010203");
    }
}
