//! Fixed-point separable gaussian blur and drop-shadow synthesis
//!
//! The kernel is quantized to Q16 integer weights so the blur is bit-exact
//! across platforms.

use crate::color::Color;
use crate::render::Canvas;

/// Synthesize a drop shadow behind a source canvas
///
/// The shadow is the source's alpha silhouette tinted with `color`, blurred
/// by `blur`, and offset by `(offset_x, offset_y)`; the source is composited
/// on top. The result has the same dimensions as the source.
pub fn drop_shadow(src: &Canvas, blur: u32, color: Color, offset_x: i64, offset_y: i64) -> Canvas {
    let width = src.width();
    let height = src.height();

    let mut silhouette = Canvas::new(width, height);
    for y in 0..height {
        for x in 0..width {
            let a = src.alpha_at(x, y);
            if a > 0 {
                let shade = (u32::from(a) * u32::from(color.alpha) + 127) / 255;
                silhouette.set_pixel(
                    x,
                    y,
                    Color::rgba(color.red, color.green, color.blue, shade as u8),
                );
            }
        }
    }

    let blurred = blur_canvas(&silhouette, blur);

    let mut out = Canvas::new(width, height);
    out.draw_image(&blurred, offset_x, offset_y);
    out.draw_image(src, 0, 0);
    out
}

/// Gaussian-blur a canvas with the given radius
pub fn blur_canvas(src: &Canvas, radius: u32) -> Canvas {
    if radius == 0 || src.width() == 0 || src.height() == 0 {
        return src.clone();
    }
    let kernel = gaussian_kernel_q16(radius);
    let horizontal = pass(src, &kernel, true);
    pass(&horizontal, &kernel, false)
}

/// Build a normalized gaussian kernel quantized to Q16 weights
fn gaussian_kernel_q16(radius: u32) -> Vec<u32> {
    let r = radius as i32;
    let sigma = f64::from(radius).max(1.0) / 2.0;
    let denom = 2.0 * sigma * sigma;

    let mut weights_f = Vec::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    for i in -r..=r {
        let x = f64::from(i);
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }

    let mut weights = Vec::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }

    // Fold quantization error into the center tap so weights sum to 1.0
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        weights[mid] = (i64::from(weights[mid]) + delta).clamp(0, 65536) as u32;
    }

    weights
}

fn pass(src: &Canvas, kernel: &[u32], horizontal: bool) -> Canvas {
    let w = src.width();
    let h = src.height();
    let radius = (kernel.len() / 2) as i64;
    let mut out = Canvas::new(w, h);

    for y in 0..h {
        for x in 0..w {
            let mut acc = [0u64; 4];
            for (ki, &kw) in kernel.iter().enumerate() {
                let offset = ki as i64 - radius;
                let (sx, sy) = if horizontal {
                    ((i64::from(x) + offset).clamp(0, i64::from(w) - 1), i64::from(y))
                } else {
                    (i64::from(x), (i64::from(y) + offset).clamp(0, i64::from(h) - 1))
                };
                let p = src.pixel(sx as u32, sy as u32);
                acc[0] += u64::from(kw) * u64::from(p.red);
                acc[1] += u64::from(kw) * u64::from(p.green);
                acc[2] += u64::from(kw) * u64::from(p.blue);
                acc[3] += u64::from(kw) * u64::from(p.alpha);
            }
            out.set_pixel(
                x,
                y,
                Color::rgba(
                    q16_to_u8(acc[0]),
                    q16_to_u8(acc[1]),
                    q16_to_u8(acc[2]),
                    q16_to_u8(acc[3]),
                ),
            );
        }
    }
    out
}

fn q16_to_u8(acc: u64) -> u8 {
    ((acc + (1 << 15)) >> 16).min(255) as u8
}
