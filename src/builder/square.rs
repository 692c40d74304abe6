//! Two-tone square avatar with a random inner checker pattern

use crate::builder::ImageBuilder;
use crate::color::{Color, DEFAULT_COLORS};
use crate::error::{Result, invalid_argument};
use crate::random::SeededRandom;
use crate::render::Canvas;

/// Framed square avatar with coin-flip cells on a `precision × precision` grid
///
/// One palette draw picks the frame color; the next palette entry is the
/// inner background. Each grid cell then flips a coin and is painted in the
/// frame color when it comes up heads.
pub struct Square {
    precision: u32,
    palette: Vec<Color>,
}

impl Square {
    /// Square avatar with the given grid precision and palette
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `precision` is zero or the palette is
    /// empty.
    pub fn new(precision: u32, palette: Vec<Color>) -> Result<Self> {
        if precision == 0 {
            return Err(invalid_argument(
                "precision",
                &precision,
                &"square avatar requires at least one cell per side",
            ));
        }
        if palette.is_empty() {
            return Err(invalid_argument(
                "palette",
                &0,
                &"square avatar requires at least one color",
            ));
        }
        Ok(Self { precision, palette })
    }

    /// Square avatar with the given precision and the default palette
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `precision` is zero.
    pub fn with_default_palette(precision: u32) -> Result<Self> {
        Self::new(precision, DEFAULT_COLORS.to_vec())
    }
}

impl ImageBuilder for Square {
    fn render(&self, random: &mut SeededRandom, width: u32, height: u32) -> Result<Canvas> {
        let size = width.min(height);
        let ox = i64::from((width - size) / 2);
        let oy = i64::from((height - size) / 2);

        let index = random.next_index(self.palette.len())?;
        let fill = self.palette[index];
        let background = self.palette[(index + 1) % self.palette.len()];

        let margin = i64::from(size / (self.precision * 5));
        let inner = i64::from(size) - 2 * margin;

        let mut canvas = Canvas::new(width, height);
        canvas.fill_rect(ox, oy, i64::from(size), i64::from(size), fill);
        canvas.fill_rect(ox + margin, oy + margin, inner, inner, background);

        let mult = inner as f64 / f64::from(self.precision);
        let cell = mult.ceil() as i64;
        for y in 0..self.precision {
            for x in 0..self.precision {
                if random.next_double() < 0.5 {
                    canvas.fill_rect(
                        ox + margin + (f64::from(x) * mult).floor() as i64,
                        oy + margin + (f64::from(y) * mult).floor() as i64,
                        cell,
                        cell,
                        fill,
                    );
                }
            }
        }
        Ok(canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_precision_is_rejected() {
        assert!(Square::with_default_palette(0).is_err());
    }

    #[test]
    fn empty_palette_is_rejected() {
        assert!(Square::new(3, Vec::new()).is_err());
    }

    #[test]
    fn pixels_only_use_the_two_chosen_colors() {
        let square = Square::with_default_palette(3).unwrap();
        let mut probe = SeededRandom::from_seed(7);
        let index = probe.next_index(DEFAULT_COLORS.len()).unwrap();
        let fill = DEFAULT_COLORS[index];
        let background = DEFAULT_COLORS[(index + 1) % DEFAULT_COLORS.len()];

        let mut random = SeededRandom::from_seed(7);
        let canvas = square.render(&mut random, 60, 60).unwrap();
        for y in 0..60 {
            for x in 0..60 {
                let pixel = canvas.pixel(x, y);
                assert!(pixel == fill || pixel == background, "({x},{y}) = {pixel:?}");
            }
        }
    }

    #[test]
    fn output_is_centered_when_wide() {
        let square = Square::with_default_palette(3).unwrap();
        let mut random = SeededRandom::from_seed(1);
        let canvas = square.render(&mut random, 100, 40).unwrap();
        // 40x40 square centered at x in [30, 70)
        assert_eq!(canvas.pixel(0, 20).alpha, 0);
        assert_eq!(canvas.pixel(99, 20).alpha, 0);
        assert_eq!(canvas.pixel(50, 20).alpha, 255);
    }
}
