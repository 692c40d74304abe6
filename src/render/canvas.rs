//! Pixel buffer with source-over compositing, clipping, and PNG encoding

use crate::color::Color;
use crate::error::{AvatarError, Result};
use crate::render::path::{Affine, Mask, Path};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage, imageops};

/// A W×H RGBA pixel buffer, the target of every builder in the tree
///
/// All drawing operations composite with source-over semantics except the
/// raw pixel accessors, which replace channel data verbatim.
#[derive(Clone, Debug)]
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    /// Create a transparent canvas of the given size
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    /// Canvas width in pixels
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Canvas height in pixels
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Backing pixel data
    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Fill an axis-aligned rectangle, clipped to the canvas bounds
    pub fn fill_rect(&mut self, x: i64, y: i64, w: i64, h: i64, color: Color) {
        if w <= 0 || h <= 0 {
            return;
        }
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + w).min(i64::from(self.width()));
        let y1 = (y + h).min(i64::from(self.height()));
        let src = color.to_rgba();
        for py in y0..y1 {
            for px in x0..x1 {
                blend(self.pixels.get_pixel_mut(px as u32, py as u32), src);
            }
        }
    }

    /// Composite another canvas onto this one at an offset
    pub fn draw_image(&mut self, src: &Canvas, dx: i64, dy: i64) {
        self.blit(src.image(), dx, dy);
    }

    /// Composite decoded pixel data scaled to a target size
    ///
    /// Scaling uses a fixed triangle filter so the result is a pure function
    /// of the source pixels.
    pub fn draw_image_scaled(&mut self, src: &RgbaImage, dx: i64, dy: i64, dw: u32, dh: u32) {
        if dw == 0 || dh == 0 {
            return;
        }
        if src.width() == dw && src.height() == dh {
            self.blit(src, dx, dy);
        } else {
            let scaled = imageops::resize(src, dw, dh, imageops::FilterType::Triangle);
            self.blit(&scaled, dx, dy);
        }
    }

    /// Composite another canvas through a clip mask
    ///
    /// Pixels outside the mask are left untouched.
    pub fn draw_image_masked(&mut self, src: &Canvas, mask: &Mask) {
        let w = self.width().min(src.width());
        let h = self.height().min(src.height());
        for y in 0..h {
            for x in 0..w {
                if mask.covered(x, y) {
                    blend(self.pixels.get_pixel_mut(x, y), *src.image().get_pixel(x, y));
                }
            }
        }
    }

    /// Fill a path under an affine transform with even-odd coverage
    pub fn fill_path(&mut self, path: &Path, transform: Affine, color: Color) {
        let mask = path.fill_mask(self.width(), self.height(), transform);
        let src = color.to_rgba();
        for y in 0..self.height() {
            for x in 0..self.width() {
                if mask.covered(x, y) {
                    blend(self.pixels.get_pixel_mut(x, y), src);
                }
            }
        }
    }

    /// Stroke a path outline under an affine transform with 1-pixel lines
    pub fn stroke_path(&mut self, path: &Path, transform: Affine, color: Color) {
        for contour in path.flatten(transform) {
            for pair in contour.windows(2) {
                if let [a, b] = pair {
                    self.draw_line(*a, *b, color);
                }
            }
        }
    }

    /// Alpha channel at a pixel, zero outside the canvas
    pub fn alpha_at(&self, x: u32, y: u32) -> u8 {
        if x < self.width() && y < self.height() {
            self.pixels.get_pixel(x, y)[3]
        } else {
            0
        }
    }

    /// Replace a pixel's raw channel data, ignoring out-of-bounds writes
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width() && y < self.height() {
            self.pixels.put_pixel(x, y, color.to_rgba());
        }
    }

    /// Raw channel data at a pixel, transparent black outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        if x < self.width() && y < self.height() {
            let p = self.pixels.get_pixel(x, y);
            Color::rgba(p[0], p[1], p[2], p[3])
        } else {
            Color::TRANSPARENT
        }
    }

    /// Encode the buffer as PNG bytes
    ///
    /// # Errors
    ///
    /// Returns `Encode` if the PNG encoder rejects the buffer.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        PngEncoder::new(&mut out)
            .write_image(
                self.pixels.as_raw(),
                self.width(),
                self.height(),
                ExtendedColorType::Rgba8,
            )
            .map_err(|source| AvatarError::Encode { source })?;
        Ok(out)
    }

    fn blit(&mut self, src: &RgbaImage, dx: i64, dy: i64) {
        for (sx, sy, &px) in src.enumerate_pixels() {
            let tx = dx + i64::from(sx);
            let ty = dy + i64::from(sy);
            if tx >= 0 && ty >= 0 && tx < i64::from(self.width()) && ty < i64::from(self.height())
            {
                blend(self.pixels.get_pixel_mut(tx as u32, ty as u32), px);
            }
        }
    }

    fn draw_line(&mut self, a: crate::render::Point, b: crate::render::Point, color: Color) {
        // Bresenham over rounded endpoints; sufficient for contrast outlines
        let mut x0 = a.x.round() as i64;
        let mut y0 = a.y.round() as i64;
        let x1 = b.x.round() as i64;
        let y1 = b.y.round() as i64;
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let src = color.to_rgba();
        loop {
            if x0 >= 0 && y0 >= 0 && x0 < i64::from(self.width()) && y0 < i64::from(self.height())
            {
                blend(self.pixels.get_pixel_mut(x0 as u32, y0 as u32), src);
            }
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

/// Source-over blend with straight (non-premultiplied) alpha
fn blend(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let sa = u32::from(src[3]);
    if sa == 0 {
        return;
    }
    if sa == 255 {
        *dst = src;
        return;
    }
    let inv = 255 - sa;
    let da = (u32::from(dst[3]) * inv + 127) / 255;
    let out_a = sa + da;
    if out_a == 0 {
        *dst = Rgba([0, 0, 0, 0]);
        return;
    }
    for c in 0..3 {
        let sc = u32::from(src[c]);
        let dc = u32::from(dst[c]);
        dst[c] = ((sc * sa + dc * da + out_a / 2) / out_a) as u8;
    }
    dst[3] = out_a as u8;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_canvas_is_transparent() {
        let c = Canvas::new(4, 4);
        assert_eq!(c.pixel(0, 0), Color::TRANSPARENT);
        assert_eq!(c.width(), 4);
        assert_eq!(c.height(), 4);
    }

    #[test]
    fn opaque_fill_replaces_pixels() {
        let mut c = Canvas::new(4, 4);
        c.fill_rect(1, 1, 2, 2, Color::rgb(10, 20, 30));
        assert_eq!(c.pixel(1, 1), Color::rgb(10, 20, 30));
        assert_eq!(c.pixel(0, 0), Color::TRANSPARENT);
        assert_eq!(c.pixel(3, 3), Color::TRANSPARENT);
    }

    #[test]
    fn fill_clips_to_bounds() {
        let mut c = Canvas::new(2, 2);
        c.fill_rect(-5, -5, 100, 100, Color::rgb(1, 2, 3));
        assert_eq!(c.pixel(1, 1), Color::rgb(1, 2, 3));
    }

    #[test]
    fn draw_image_composites_at_offset() {
        let mut base = Canvas::new(4, 4);
        let mut top = Canvas::new(2, 2);
        top.fill_rect(0, 0, 2, 2, Color::rgb(200, 0, 0));
        base.draw_image(&top, 2, 2);
        assert_eq!(base.pixel(2, 2), Color::rgb(200, 0, 0));
        assert_eq!(base.pixel(1, 1), Color::TRANSPARENT);
    }

    #[test]
    fn semitransparent_blend_over_opaque_keeps_full_alpha() {
        let mut c = Canvas::new(1, 1);
        c.fill_rect(0, 0, 1, 1, Color::rgb(0, 0, 0));
        c.fill_rect(0, 0, 1, 1, Color::rgba(255, 255, 255, 128));
        let p = c.pixel(0, 0);
        assert_eq!(p.alpha, 255);
        assert!(p.red > 120 && p.red < 136);
    }

    #[test]
    fn png_round_trips_through_image_crate() {
        let mut c = Canvas::new(3, 5);
        c.fill_rect(0, 0, 3, 5, Color::rgb(9, 9, 9));
        let bytes = c.encode_png().unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 3);
        assert_eq!(decoded.height(), 5);
    }
}
