//! Strict `#RRGGBB` colors and perceptual luminance.

use std::fmt;

/// A validated 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse six hex digits with an optional leading `#`.
    ///
    /// Anything else is rejected so that config values can never smuggle
    /// extra declarations into generated style text.
    pub fn parse(input: &str) -> Result<Self, String> {
        let trimmed = input.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(format!("invalid hex color `{input}` (expected #RRGGBB)"));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| format!("invalid hex color `{input}`"))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Weighted brightness in `[0, 1]`.
    pub fn luminance(self) -> f64 {
        (0.299 * f64::from(self.r) + 0.587 * f64::from(self.g) + 0.114 * f64::from(self.b)) / 255.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Luminance of a hex color string, or `None` when it does not parse.
pub fn luminance(input: &str) -> Option<f64> {
    HexColor::parse(input).ok().map(HexColor::luminance)
}
