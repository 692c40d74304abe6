//! Vector paths, affine transforms, and scanline rasterization
//!
//! Coverage is binary, evaluated at pixel centers with an even-odd rule.
//! Aliased edges are accepted: the pipeline's contract is reproducibility,
//! not anti-aliased output.

use std::ops::Mul;

/// Number of line segments used to flatten one quadratic curve
const QUAD_SEGMENTS: u32 = 16;

/// Number of line segments used to approximate a full ellipse
const ELLIPSE_SEGMENTS: u32 = 64;

/// A 2D point in canvas coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Construct a point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// 2D affine transform in canvas-style `[a, b, c, d, e, f]` form
///
/// Maps `(x, y)` to `(a·x + c·y + e, b·x + d·y + f)`. Multiplication applies
/// the right-hand transform first: `(A * B)(p) = A(B(p))`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine {
    coeffs: [f64; 6],
}

impl Affine {
    /// The identity transform
    pub const IDENTITY: Self = Self {
        coeffs: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    /// Translation by `(tx, ty)`
    pub const fn translate(tx: f64, ty: f64) -> Self {
        Self {
            coeffs: [1.0, 0.0, 0.0, 1.0, tx, ty],
        }
    }

    /// Scaling about the origin
    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self {
            coeffs: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    /// Rotation about the origin by `radians`
    pub fn rotate(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            coeffs: [cos, sin, -sin, cos, 0.0, 0.0],
        }
    }

    /// Apply the transform to a point
    pub fn apply(&self, p: Point) -> Point {
        let [a, b, c, d, e, f] = self.coeffs;
        Point::new(a * p.x + c * p.y + e, b * p.x + d * p.y + f)
    }
}

impl Mul for Affine {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let [a1, b1, c1, d1, e1, f1] = self.coeffs;
        let [a2, b2, c2, d2, e2, f2] = rhs.coeffs;
        Self {
            coeffs: [
                a1 * a2 + c1 * b2,
                b1 * a2 + d1 * b2,
                a1 * c2 + c1 * d2,
                b1 * c2 + d1 * d2,
                a1 * e2 + c1 * f2 + e1,
                b1 * e2 + d1 * f2 + f1,
            ],
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum PathEl {
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    Close,
}

/// A sequence of move/line/quadratic-curve path elements
#[derive(Clone, Debug, Default)]
pub struct Path {
    elements: Vec<PathEl>,
}

impl Path {
    /// Create an empty path
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new contour at `(x, y)`
    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.elements.push(PathEl::MoveTo(Point::new(x, y)));
        self
    }

    /// Line segment to `(x, y)`
    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.elements.push(PathEl::LineTo(Point::new(x, y)));
        self
    }

    /// Quadratic curve through control point `(cx, cy)` to `(x, y)`
    pub fn quad_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) -> &mut Self {
        self.elements
            .push(PathEl::QuadTo(Point::new(cx, cy), Point::new(x, y)));
        self
    }

    /// Close the current contour back to its starting point
    pub fn close(&mut self) -> &mut Self {
        self.elements.push(PathEl::Close);
        self
    }

    /// Full ellipse centered at `(cx, cy)` with radii `(rx, ry)`
    pub fn ellipse(cx: f64, cy: f64, rx: f64, ry: f64) -> Self {
        let mut path = Self::new();
        for i in 0..=ELLIPSE_SEGMENTS {
            let angle = f64::from(i) / f64::from(ELLIPSE_SEGMENTS) * std::f64::consts::TAU;
            let x = cx + rx * angle.cos();
            let y = cy + ry * angle.sin();
            if i == 0 {
                path.move_to(x, y);
            } else {
                path.line_to(x, y);
            }
        }
        path.close();
        path
    }

    /// Rounded rectangle covering `(0, 0)..(w, h)` with uniform corner radius
    pub fn rounded_rect(w: f64, h: f64, radius: f64) -> Self {
        let r = radius.min(w / 2.0).min(h / 2.0);
        let mut path = Self::new();
        path.move_to(r, 0.0)
            .line_to(w - r, 0.0)
            .quad_to(w, 0.0, w, r)
            .line_to(w, h - r)
            .quad_to(w, h, w - r, h)
            .line_to(r, h)
            .quad_to(0.0, h, 0.0, h - r)
            .line_to(0.0, r)
            .quad_to(0.0, 0.0, r, 0.0)
            .close();
        path
    }

    /// Flatten the path to polylines under a transform
    pub fn flatten(&self, transform: Affine) -> Vec<Vec<Point>> {
        let mut contours: Vec<Vec<Point>> = Vec::new();
        let mut current: Vec<Point> = Vec::new();
        for el in &self.elements {
            match *el {
                PathEl::MoveTo(p) => {
                    if current.len() > 1 {
                        contours.push(std::mem::take(&mut current));
                    } else {
                        current.clear();
                    }
                    current.push(transform.apply(p));
                }
                PathEl::LineTo(p) => current.push(transform.apply(p)),
                PathEl::QuadTo(ctrl, end) => {
                    if let Some(&start) = current.last() {
                        let c = transform.apply(ctrl);
                        let e = transform.apply(end);
                        for i in 1..=QUAD_SEGMENTS {
                            let t = f64::from(i) / f64::from(QUAD_SEGMENTS);
                            let mt = 1.0 - t;
                            current.push(Point::new(
                                mt * mt * start.x + 2.0 * mt * t * c.x + t * t * e.x,
                                mt * mt * start.y + 2.0 * mt * t * c.y + t * t * e.y,
                            ));
                        }
                    }
                }
                PathEl::Close => {
                    if let Some(&first) = current.first() {
                        current.push(first);
                    }
                }
            }
        }
        if current.len() > 1 {
            contours.push(current);
        }
        contours
    }

    /// Rasterize the path to a binary coverage mask
    ///
    /// Contours are implicitly closed; coverage uses the even-odd rule
    /// evaluated at pixel centers.
    pub fn fill_mask(&self, width: u32, height: u32, transform: Affine) -> Mask {
        let mut mask = Mask::new(width, height);
        let contours = self.flatten(transform);

        let mut edges: Vec<(Point, Point)> = Vec::new();
        for contour in &contours {
            for pair in contour.windows(2) {
                if let [a, b] = pair {
                    edges.push((*a, *b));
                }
            }
            if let (Some(&last), Some(&first)) = (contour.last(), contour.first()) {
                if last != first {
                    edges.push((last, first));
                }
            }
        }

        let mut crossings: Vec<f64> = Vec::new();
        for y in 0..height {
            let yc = f64::from(y) + 0.5;
            crossings.clear();
            for &(a, b) in &edges {
                let (lo, hi) = if a.y <= b.y { (a, b) } else { (b, a) };
                if lo.y <= yc && yc < hi.y {
                    let t = (yc - lo.y) / (hi.y - lo.y);
                    crossings.push(lo.x + t * (hi.x - lo.x));
                }
            }
            crossings.sort_by(|p, q| p.partial_cmp(q).unwrap_or(std::cmp::Ordering::Equal));
            for span in crossings.chunks_exact(2) {
                if let [xa, xb] = span {
                    let start = (xa - 0.5).ceil().max(0.0) as i64;
                    let end = ((xb - 0.5).ceil() as i64).min(i64::from(width));
                    for x in start..end {
                        mask.set(x as u32, y);
                    }
                }
            }
        }
        mask
    }
}

/// Binary per-pixel coverage used for clipping
#[derive(Clone, Debug)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// Create an empty (uncovered) mask
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; width as usize * height as usize],
        }
    }

    /// Mark a pixel as covered
    pub fn set(&mut self, x: u32, y: u32) {
        if x < self.width && y < self.height {
            self.bits[y as usize * self.width as usize + x as usize] = true;
        }
    }

    /// Whether a pixel is inside the clip region
    pub fn covered(&self, x: u32, y: u32) -> bool {
        x < self.width
            && y < self.height
            && self.bits[y as usize * self.width as usize + x as usize]
    }
}
