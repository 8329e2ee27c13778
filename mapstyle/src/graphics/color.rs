//! ARGB colors

use crate::error::ParseValueError;
use std::fmt;
use std::str::FromStr;

/// A non-premultiplied ARGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const TRANSPARENT: Color = Color::argb(0, 0, 0, 0);
    pub const BLACK: Color = Color::argb(255, 0, 0, 0);
    pub const WHITE: Color = Color::argb(255, 255, 255, 255);

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::argb(255, r, g, b)
    }

    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }

    pub(crate) fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

/// Parses `#RRGGBB` (opaque) or `#AARRGGBB`.
impl FromStr for Color {
    type Err = ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseValueError::new("color", s);
        let hex = s.strip_prefix('#').ok_or_else(err)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| err())?;
        let [a, r, g, b] = value.to_be_bytes();
        match hex.len() {
            6 => Ok(Color::argb(255, r, g, b)),
            8 => Ok(Color::argb(a, r, g, b)),
            _ => Err(err()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{:02X}{:02X}{:02X}{:02X}",
            self.a, self.r, self.g, self.b
        )
    }
}
