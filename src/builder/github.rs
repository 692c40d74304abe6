//! Horizontally mirrored sprite avatar in a random color

use crate::builder::ImageBuilder;
use crate::color::Color;
use crate::error::{Result, invalid_argument};
use crate::random::SeededRandom;
use crate::render::Canvas;

/// Mirror-symmetric block sprite on a `(2·precision − 1)`-wide grid
///
/// Three random draws pick the sprite color; each left-half cell then flips
/// a coin and, on heads, paints both the cell and its horizontal mirror.
pub struct Github {
    precision: u32,
}

impl Github {
    /// Sprite avatar with the given half-grid precision
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `precision` is zero.
    pub fn new(precision: u32) -> Result<Self> {
        if precision == 0 {
            return Err(invalid_argument(
                "precision",
                &precision,
                &"sprite avatar requires at least one column",
            ));
        }
        Ok(Self { precision })
    }
}

impl ImageBuilder for Github {
    fn render(&self, random: &mut SeededRandom, width: u32, height: u32) -> Result<Canvas> {
        let size = width.min(height);
        let ox = i64::from((width - size) / 2);
        let oy = i64::from((height - size) / 2);

        let red = random.next_int(256)? as u8;
        let green = random.next_int(256)? as u8;
        let blue = random.next_int(256)? as u8;
        let color = Color::rgb(red, green, blue);

        let mult = f64::from(size) / f64::from(self.precision * 2 - 1);
        let cell = mult.ceil() as i64;

        let mut canvas = Canvas::new(width, height);
        for x in 0..self.precision {
            for y in 0..self.precision * 2 {
                if random.next_double() < 0.5 {
                    let cy = oy + (f64::from(y) * mult).floor() as i64;
                    canvas.fill_rect(ox + (f64::from(x) * mult).floor() as i64, cy, cell, cell, color);
                    canvas.fill_rect(
                        ox + (f64::from(size) - f64::from(x + 1) * mult).floor() as i64,
                        cy,
                        cell,
                        cell,
                        color,
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
        assert!(Github::new(0).is_err());
    }

    #[test]
    fn output_is_mirror_symmetric() {
        let sprite = Github::new(4).unwrap();
        let mut random = SeededRandom::from_seed(33);
        let size = 70u32;
        let canvas = sprite.render(&mut random, size, size).unwrap();
        for y in 0..size {
            for x in 0..size {
                assert_eq!(
                    canvas.pixel(x, y),
                    canvas.pixel(size - 1 - x, y),
                    "asymmetry at ({x},{y})"
                );
            }
        }
    }

    #[test]
    fn single_color_is_used() {
        let sprite = Github::new(3).unwrap();
        let mut probe = SeededRandom::from_seed(12);
        let expected = Color::rgb(
            probe.next_int(256).unwrap() as u8,
            probe.next_int(256).unwrap() as u8,
            probe.next_int(256).unwrap() as u8,
        );

        let mut random = SeededRandom::from_seed(12);
        let canvas = sprite.render(&mut random, 30, 30).unwrap();
        let mut painted = 0u32;
        for y in 0..30 {
            for x in 0..30 {
                let pixel = canvas.pixel(x, y);
                if pixel.alpha > 0 {
                    assert_eq!(pixel, expected);
                    painted += 1;
                }
            }
        }
        assert!(painted > 0);
    }
}
