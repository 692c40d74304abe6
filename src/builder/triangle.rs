//! Stacked corner-triangle avatar with drop shadows

use crate::builder::ImageBuilder;
use crate::color::{Color, DEFAULT_COLORS};
use crate::error::{Result, invalid_argument};
use crate::random::SeededRandom;
use crate::render::blur::drop_shadow;
use crate::render::{Affine, Canvas, Path};

const SHADOW_COLOR: Color = Color::rgba(0, 0, 0, 191);

/// Layered right triangles shrinking toward the corners
///
/// Starting from a random corner, triangles of decreasing leg length are
/// stacked while cycling through the four corners, each with its own drop
/// shadow. `precision` controls how many layers fit before the legs shrink
/// to zero.
pub struct Triangle {
    precision: u32,
    palette: Vec<Color>,
}

impl Triangle {
    /// Triangle avatar with the given layer precision and palette
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
                &"triangle avatar requires at least one layer",
            ));
        }
        if palette.is_empty() {
            return Err(invalid_argument(
                "palette",
                &0,
                &"triangle avatar requires at least one color",
            ));
        }
        Ok(Self { precision, palette })
    }

    /// Triangle avatar with the given precision and the default palette
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `precision` is zero.
    pub fn with_default_palette(precision: u32) -> Result<Self> {
        Self::new(precision, DEFAULT_COLORS.to_vec())
    }
}

/// Right triangle anchored in one of the four corners, legs of length `p`
fn corner_triangle(corner: u64, size: f64, p: f64) -> Path {
    let mut path = Path::new();
    match corner % 4 {
        0 => path.move_to(0.0, 0.0).line_to(p, 0.0).line_to(0.0, p),
        1 => path
            .move_to(size, 0.0)
            .line_to(size, p)
            .line_to(size - p, 0.0),
        2 => path
            .move_to(size, size)
            .line_to(size - p, size)
            .line_to(size, size - p),
        _ => path
            .move_to(0.0, size)
            .line_to(0.0, size - p)
            .line_to(p, size),
    };
    path.close();
    path
}

impl ImageBuilder for Triangle {
    fn render(&self, random: &mut SeededRandom, width: u32, height: u32) -> Result<Canvas> {
        let size = width.min(height);
        let ox = i64::from((width - size) / 2);
        let oy = i64::from((height - size) / 2);

        let index = random.next_index(self.palette.len())?;
        let fill = self.palette[index];
        let start = random.next_int(4)?;
        let layers = start + u64::from(self.precision);
        let leg_step = f64::from(size) / layers as f64;
        let blur = (size / 20).max(1);

        let mut canvas = Canvas::new(width, height);
        let mut p = f64::from(size);
        let mut corner = start;
        while p > 0.0 {
            let path = corner_triangle(corner, f64::from(size), p);

            let mut layer = Canvas::new(size, size);
            layer.fill_path(&path, Affine::IDENTITY, fill);
            let shadowed = drop_shadow(&layer, blur, SHADOW_COLOR, 0, 0);
            canvas.draw_image(&shadowed, ox, oy);

            // Random shrink in [leg_step/2, leg_step), clamped so the loop
            // always terminates even at tiny sizes
            let step = (random.next_double() % (leg_step / 2.0) + leg_step / 2.0)
                .floor()
                .max(1.0);
            p -= step;
            corner += 1;
        }
        Ok(canvas)
    }
}
