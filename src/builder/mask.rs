//! Clip-mask builders: inscribed ellipse and rounded rectangle

use crate::builder::ImageBuilder;
use crate::error::Result;
use crate::random::SeededRandom;
use crate::render::{Affine, Canvas, Path};

/// Default rounded-rect corner radius in pixels
const DEFAULT_CORNER_RADIUS: f64 = 10.0;

/// Clips the child to the ellipse inscribed in its bounding box
pub struct CircleMask {
    child: Box<dyn ImageBuilder>,
}

impl CircleMask {
    /// Mask the child with an inscribed ellipse
    pub fn new(child: Box<dyn ImageBuilder>) -> Self {
        Self { child }
    }
}

impl ImageBuilder for CircleMask {
    fn render(&self, random: &mut SeededRandom, width: u32, height: u32) -> Result<Canvas> {
        let image = self.child.render(random, width, height)?;
        let w = f64::from(width);
        let h = f64::from(height);
        let mask = Path::ellipse(w / 2.0, h / 2.0, w / 2.0, h / 2.0)
            .fill_mask(width, height, Affine::IDENTITY);
        let mut canvas = Canvas::new(width, height);
        canvas.draw_image_masked(&image, &mask);
        Ok(canvas)
    }
}

/// Clips the child to a rounded rectangle with a uniform corner radius
pub struct RoundedRectMask {
    child: Box<dyn ImageBuilder>,
    radius: f64,
}

impl RoundedRectMask {
    /// Mask the child with the given corner radius
    pub fn new(child: Box<dyn ImageBuilder>, radius: f64) -> Self {
        Self { child, radius }
    }

    /// Mask the child with the default corner radius
    pub fn with_default_radius(child: Box<dyn ImageBuilder>) -> Self {
        Self::new(child, DEFAULT_CORNER_RADIUS)
    }
}

impl ImageBuilder for RoundedRectMask {
    fn render(&self, random: &mut SeededRandom, width: u32, height: u32) -> Result<Canvas> {
        let image = self.child.render(random, width, height)?;
        let mask = Path::rounded_rect(f64::from(width), f64::from(height), self.radius)
            .fill_mask(width, height, Affine::IDENTITY);
        let mut canvas = Canvas::new(width, height);
        canvas.draw_image_masked(&image, &mask);
        Ok(canvas)
    }
}
