//! RGBA color values and the default avatar palette

use crate::error::{Result, invalid_argument};

/// An 8-bit-per-channel RGBA color
///
/// Alpha is a raw channel value. Builders that write pixel data directly
/// (score shadow, long shadow) store it verbatim; compositing interprets it
/// as source-over coverage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    /// Red channel
    pub red: u8,
    /// Green channel
    pub green: u8,
    /// Blue channel
    pub blue: u8,
    /// Alpha channel
    pub alpha: u8,
}

/// Default fill palette, shared by the square and triangle styles
pub const DEFAULT_COLORS: [Color; 10] = [
    Color::rgb(0x6e, 0x1e, 0x78),
    Color::rgb(0x82, 0xbe, 0x00),
    Color::rgb(0xa1, 0x00, 0x6b),
    Color::rgb(0x00, 0x9a, 0xa6),
    Color::rgb(0xcd, 0x00, 0x37),
    Color::rgb(0x00, 0x88, 0xce),
    Color::rgb(0xe0, 0x52, 0x06),
    Color::rgb(0xd5, 0x2b, 0x1e),
    Color::rgb(0xff, 0xb6, 0x12),
    Color::rgb(0xd2, 0xe1, 0x00),
];

impl Color {
    /// Fully opaque color from RGB channels
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha: 255,
        }
    }

    /// Color from all four channels
    pub const fn rgba(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Fully transparent black
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    /// Parse a `#rrggbb` or `#rrggbbaa` hex string
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the string is not a 6- or 8-digit hex
    /// color with a leading `#`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').ok_or_else(|| {
            invalid_argument("color", &hex, &"hex colors must start with '#'")
        })?;

        let channel = |range: std::ops::Range<usize>| -> Result<u8> {
            digits
                .get(range)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .ok_or_else(|| invalid_argument("color", &hex, &"invalid hex digits"))
        };

        match digits.len() {
            6 => Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Self::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(invalid_argument(
                "color",
                &hex,
                &"expected 6 or 8 hex digits",
            )),
        }
    }

    /// Euclidean distance between two colors in RGB space
    pub fn distance(self, other: Self) -> f64 {
        let dr = f64::from(self.red) - f64::from(other.red);
        let dg = f64::from(self.green) - f64::from(other.green);
        let db = f64::from(self.blue) - f64::from(other.blue);
        (dr * dr + dg * dg + db * db).sqrt()
    }

    /// Per-channel bitwise complement, used for contrast strokes
    pub const fn complementary(self) -> Self {
        Self {
            red: !self.red,
            green: !self.green,
            blue: !self.blue,
            alpha: self.alpha,
        }
    }

    /// Channels as an `image` crate pixel
    pub const fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.red, self.green, self.blue, self.alpha])
    }
}
