//! 9-block identicon renderer
//!
//! Decodes one 32-bit code drawn from the random source into patch shapes,
//! invert flags, rotation phases, and a fill color, then renders a 3×3
//! quilt of polygonal patches. The patch tables are the classic
//! nine-block set; their values, order, and flags are load-bearing for
//! reproducible output and must not be reordered.

use crate::builder::ImageBuilder;
use crate::color::Color;
use crate::error::Result;
use crate::random::SeededRandom;
use crate::render::{Affine, Canvas, Path};

/// Patch indices eligible for the middle cell
const CENTER_PATCH_TYPES: [usize; 4] = [0, 4, 8, 15];
/// Patch vertices live on a 5×5 grid
const PATCH_GRIDS: i32 = 5;
/// Reference patch edge length; cells scale relative to this
const DEFAULT_PATCH_SIZE: f64 = 20.0;
/// Patch renders identically under 180° rotation
const PATCH_SYMMETRIC: u8 = 1;
/// Patch is drawn with fill and background swapped
const PATCH_INVERTED: u8 = 2;
/// Sentinel starting a new subpath in a vertex list
const PATCH_MOVETO: i32 = -1;

/// The 16 patch shapes as vertex indices into the 5×5 grid
const PATCH_TYPES: [&[i32]; 16] = [
    &[0, 4, 24, 20],
    &[0, 4, 20],
    &[2, 24, 20],
    &[0, 2, 20, 22],
    &[2, 14, 22, 10],
    &[0, 14, 24, 22],
    &[2, 24, 22, 13, 11, 22, 20],
    &[0, 14, 22],
    &[6, 8, 18, 16],
    &[4, 20, 10, 12, 2],
    &[0, 2, 12, 10],
    &[10, 14, 22],
    &[20, 12, 24],
    &[10, 2, 12],
    &[0, 2, 10],
    &[0, 4, 24, 20],
];

/// Symmetry and inversion flags, parallel to `PATCH_TYPES`
const PATCH_FLAGS: [u8; 16] = [
    PATCH_SYMMETRIC,
    0,
    0,
    0,
    PATCH_SYMMETRIC,
    0,
    0,
    0,
    PATCH_SYMMETRIC,
    0,
    0,
    0,
    0,
    0,
    0,
    PATCH_SYMMETRIC + PATCH_INVERTED,
];

/// Fill colors closer than this to the background get a contrast stroke
const STROKE_DISTANCE_THRESHOLD: f64 = 32.0;

/// Quilt parameters decoded from the lower 32 bits of the identicon code
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct QuiltCode {
    middle_type: usize,
    middle_invert: bool,
    corner_type: usize,
    corner_invert: bool,
    corner_turn: u32,
    side_type: usize,
    side_invert: bool,
    side_turn: u32,
    fill: Color,
}

impl QuiltCode {
    fn decode(code: u32) -> Self {
        let blue = (((code >> 16) & 0x1f) << 3) as u8;
        let green = (((code >> 21) & 0x1f) << 3) as u8;
        let red = (((code >> 27) & 0x1f) << 3) as u8;
        Self {
            middle_type: CENTER_PATCH_TYPES[(code & 0x3) as usize],
            middle_invert: (code >> 2) & 0x1 != 0,
            corner_type: ((code >> 3) & 0x0f) as usize,
            corner_invert: (code >> 7) & 0x1 != 0,
            corner_turn: (code >> 8) & 0x3,
            side_type: ((code >> 10) & 0x0f) as usize,
            side_invert: (code >> 14) & 0x1 != 0,
            side_turn: (code >> 15) & 0x3,
            fill: Color::rgb(red, green, blue),
        }
    }
}

/// Nine-block identicon image builder
pub struct Identicon {
    patch_size: f64,
    background: Color,
}

impl Identicon {
    /// Identicon with the given reference patch size and background
    pub fn new(patch_size: f64, background: Color) -> Self {
        Self {
            patch_size,
            background,
        }
    }

    fn render_quilt(&self, canvas: &mut Canvas, code: u32, size: u32, ox: f64, oy: f64) {
        let quilt = QuiltCode::decode(code);

        let stroke = (quilt.fill.distance(self.background) < STROKE_DISTANCE_THRESHOLD)
            .then(|| quilt.fill.complementary());

        canvas.fill_rect(
            ox.floor() as i64,
            oy.floor() as i64,
            i64::from(size),
            i64::from(size),
            self.background,
        );

        let block = (f64::from(size) / 3.0).ceil();
        let block2 = block * 2.0;

        // middle patch
        self.draw_patch(
            canvas,
            ox + block,
            oy + block,
            block,
            quilt.middle_type,
            0,
            quilt.middle_invert,
            quilt.fill,
            stroke,
        );

        // side patches, starting from top and moving clockwise
        let mut turn = quilt.side_turn;
        for (px, py) in [(block, 0.0), (block2, block), (block, block2), (0.0, block)] {
            self.draw_patch(
                canvas,
                ox + px,
                oy + py,
                block,
                quilt.side_type,
                turn,
                quilt.side_invert,
                quilt.fill,
                stroke,
            );
            turn += 1;
        }

        // corner patches, starting from top left and moving clockwise
        let mut turn = quilt.corner_turn;
        for (px, py) in [(0.0, 0.0), (block2, 0.0), (block2, block2), (0.0, block2)] {
            self.draw_patch(
                canvas,
                ox + px,
                oy + py,
                block,
                quilt.corner_type,
                turn,
                quilt.corner_invert,
                quilt.fill,
                stroke,
            );
            turn += 1;
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_patch(
        &self,
        canvas: &mut Canvas,
        x: f64,
        y: f64,
        size: f64,
        patch: usize,
        turn: u32,
        invert: bool,
        fill: Color,
        stroke: Option<Color>,
    ) {
        let patch = patch % PATCH_TYPES.len();
        let turn = turn % 4;
        let invert = invert != (PATCH_FLAGS[patch] & PATCH_INVERTED != 0);

        let scale = size / self.patch_size;
        let offset = size / 2.0;

        // cell background
        let back = if invert { fill } else { self.background };
        canvas.fill_rect(
            x.floor() as i64,
            y.floor() as i64,
            size as i64,
            size as i64,
            back,
        );

        let transform = Affine::translate(x + offset, y + offset)
            * Affine::scale(scale, scale)
            * Affine::rotate(f64::from(turn) * std::f64::consts::FRAC_PI_2);
        let path = self.patch_path(patch);

        if let Some(stroke) = stroke {
            canvas.stroke_path(&path, transform, stroke);
        }

        let foreground = if invert { self.background } else { fill };
        canvas.fill_path(&path, transform, foreground);
    }

    /// Patch polygon in patch-local coordinates centered on the origin
    fn patch_path(&self, patch: usize) -> Path {
        let patch_offset = self.patch_size / 2.0;
        let patch_scale = self.patch_size / 4.0;

        let mut path = Path::new();
        let mut move_next = true;
        for &v in PATCH_TYPES[patch % PATCH_TYPES.len()] {
            if v == PATCH_MOVETO {
                move_next = true;
                continue;
            }
            let vx = f64::from(v % PATCH_GRIDS) * patch_scale - patch_offset;
            let vy = f64::from(v / PATCH_GRIDS) * patch_scale - patch_offset;
            if move_next {
                path.move_to(vx, vy);
                move_next = false;
            } else {
                path.line_to(vx, vy);
            }
        }
        path
    }
}

impl Default for Identicon {
    fn default() -> Self {
        Self::new(DEFAULT_PATCH_SIZE, Color::rgb(255, 255, 255))
    }
}

impl ImageBuilder for Identicon {
    fn render(&self, random: &mut SeededRandom, width: u32, height: u32) -> Result<Canvas> {
        let size = width.min(height);
        let mut canvas = Canvas::new(width, height);

        let ox = f64::from(width - size) / 2.0;
        let oy = f64::from(height - size) / 2.0;

        let code = random.next_int(1 << 32)? as u32;
        self.render_quilt(&mut canvas, code, size, ox, oy);

        Ok(canvas)
    }
}
