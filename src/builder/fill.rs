//! Solid and palette-driven background fills

use crate::builder::ImageBuilder;
use crate::color::{Color, DEFAULT_COLORS};
use crate::error::{Result, invalid_argument};
use crate::random::SeededRandom;
use crate::render::Canvas;

/// Paints the whole buffer with one fixed color
pub struct FillStyle {
    color: Color,
}

impl FillStyle {
    /// Fill with the given color
    pub fn new(color: Color) -> Self {
        Self { color }
    }
}

impl ImageBuilder for FillStyle {
    fn render(&self, _random: &mut SeededRandom, width: u32, height: u32) -> Result<Canvas> {
        let mut canvas = Canvas::new(width, height);
        canvas.fill_rect(0, 0, i64::from(width), i64::from(height), self.color);
        Ok(canvas)
    }
}

/// Paints the whole buffer with one palette entry chosen per synthesis run
///
/// Consumes exactly one random draw regardless of palette size.
pub struct RandomFillStyle {
    palette: Vec<Color>,
}

impl RandomFillStyle {
    /// Fill with a color drawn from the given palette
    pub fn new(palette: Vec<Color>) -> Self {
        Self { palette }
    }
}

impl Default for RandomFillStyle {
    fn default() -> Self {
        Self::new(DEFAULT_COLORS.to_vec())
    }
}

impl ImageBuilder for RandomFillStyle {
    fn render(&self, random: &mut SeededRandom, width: u32, height: u32) -> Result<Canvas> {
        let index = random.next_index(self.palette.len()).map_err(|_| {
            invalid_argument("palette", &0, &"random fill requires at least one color")
        })?;
        let mut canvas = Canvas::new(width, height);
        canvas.fill_rect(0, 0, i64::from(width), i64::from(height), self.palette[index]);
        Ok(canvas)
    }
}
