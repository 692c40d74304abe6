//! Shadow effects: native drop shadow, half-image score, diagonal long shadow

use crate::builder::ImageBuilder;
use crate::color::Color;
use crate::error::Result;
use crate::random::SeededRandom;
use crate::render::blur::drop_shadow;
use crate::render::Canvas;

/// Drop-shadow parameters
#[derive(Clone, Copy, Debug)]
pub struct ShadowSpec {
    /// Blur radius in pixels
    pub blur: u32,
    /// Shadow color; alpha scales the silhouette
    pub color: Color,
    /// Horizontal shadow offset
    pub offset_x: i64,
    /// Vertical shadow offset
    pub offset_y: i64,
}

impl Default for ShadowSpec {
    fn default() -> Self {
        Self {
            blur: 10,
            color: Color::rgb(0, 0, 0),
            offset_x: 0,
            offset_y: 0,
        }
    }
}

/// Adds a blurred drop shadow behind the child
pub struct Shadow {
    child: Box<dyn ImageBuilder>,
    spec: ShadowSpec,
}

impl Shadow {
    /// Shadow the child with the given parameters
    pub fn new(child: Box<dyn ImageBuilder>, spec: ShadowSpec) -> Self {
        Self { child, spec }
    }
}

impl ImageBuilder for Shadow {
    fn render(&self, random: &mut SeededRandom, width: u32, height: u32) -> Result<Canvas> {
        let image = self.child.render(random, width, height)?;
        Ok(drop_shadow(
            &image,
            self.spec.blur,
            self.spec.color,
            self.spec.offset_x,
            self.spec.offset_y,
        ))
    }
}

/// Tints the top half of the child with a raw-channel overlay
///
/// The overlay layer's pixels hold the configured channel values verbatim
/// (no blending inside the layer); the layer is then composited over the
/// child, shading exactly the rows with `y < height/2`.
pub struct ScoreShadow {
    child: Box<dyn ImageBuilder>,
    color: Color,
}

impl ScoreShadow {
    /// Score-shadow the child with the given overlay color
    pub fn new(child: Box<dyn ImageBuilder>, color: Color) -> Self {
        Self { child, color }
    }

    /// Score-shadow with the default subtle dark overlay
    pub fn with_default_color(child: Box<dyn ImageBuilder>) -> Self {
        Self::new(child, Color::rgba(0, 0, 0, 24))
    }
}

impl ImageBuilder for ScoreShadow {
    fn render(&self, random: &mut SeededRandom, width: u32, height: u32) -> Result<Canvas> {
        let image = self.child.render(random, width, height)?;

        let mut overlay = Canvas::new(width, height);
        for y in 0..height.div_ceil(2) {
            for x in 0..width {
                overlay.set_pixel(x, y, self.color);
            }
        }

        let mut canvas = Canvas::new(width, height);
        canvas.draw_image(&image, 0, 0);
        canvas.draw_image(&overlay, 0, 0);
        Ok(canvas)
    }
}

/// Adds a diagonal long shadow trailing down-right from opaque content
///
/// A pixel is in shade when walking up-left one step at a time reaches a
/// pixel with non-zero alpha before leaving the buffer. That walk is
/// O(min(x, y)) per pixel, making the whole pass worst-case
/// O(width · height · (width + height)); acceptable at avatar sizes, and a
/// known cost of the effect.
pub struct LongShadow {
    child: Box<dyn ImageBuilder>,
    color: Color,
}

impl LongShadow {
    /// Long-shadow the child with the given base color
    pub fn new(child: Box<dyn ImageBuilder>, color: Color) -> Self {
        Self { child, color }
    }

    /// Long-shadow with the default translucent black
    pub fn with_default_color(child: Box<dyn ImageBuilder>) -> Self {
        Self::new(child, Color::rgba(0, 0, 0, 64))
    }

    fn shadow_layer(&self, image: &Canvas, width: u32, height: u32) -> Canvas {
        let mut layer = Canvas::new(width, height);
        let base = f64::from(self.color.alpha);
        let step = base / f64::from(width + height);

        for y in 0..height {
            for x in 0..width {
                if in_shade(image, x, y) {
                    let alpha = base - f64::from(x + y) * step;
                    layer.set_pixel(
                        x,
                        y,
                        Color::rgba(
                            self.color.red,
                            self.color.green,
                            self.color.blue,
                            alpha.max(0.0) as u8,
                        ),
                    );
                }
            }
        }
        layer
    }
}

/// Walk diagonally up-left until leaving the buffer or hitting opaque content
fn in_shade(image: &Canvas, x: u32, y: u32) -> bool {
    let mut tx = i64::from(x);
    let mut ty = i64::from(y);
    loop {
        tx -= 1;
        ty -= 1;
        if tx < 0 || ty < 0 {
            return false;
        }
        if image.alpha_at(tx as u32, ty as u32) > 0 {
            return true;
        }
    }
}

impl ImageBuilder for LongShadow {
    fn render(&self, random: &mut SeededRandom, width: u32, height: u32) -> Result<Canvas> {
        let image = self.child.render(random, width, height)?;
        let layer = self.shadow_layer(&image, width, height);

        let mut canvas = Canvas::new(width, height);
        canvas.draw_image(&layer, 0, 0);
        canvas.draw_image(&image, 0, 0);
        Ok(canvas)
    }
}
