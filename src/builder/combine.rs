//! Structural combinators: overlay, random selection, margins, and tiling

use crate::builder::ImageBuilder;
use crate::error::{Result, invalid_argument};
use crate::random::SeededRandom;
use crate::render::Canvas;

/// Renders each child into the same buffer, later children over earlier ones
pub struct Compose {
    children: Vec<Box<dyn ImageBuilder>>,
}

impl Compose {
    /// Compose children back-to-front
    pub fn new(children: Vec<Box<dyn ImageBuilder>>) -> Self {
        Self { children }
    }
}

impl ImageBuilder for Compose {
    fn render(&self, random: &mut SeededRandom, width: u32, height: u32) -> Result<Canvas> {
        let mut canvas = Canvas::new(width, height);
        for child in &self.children {
            let image = child.render(random, width, height)?;
            canvas.draw_image(&image, 0, 0);
        }
        Ok(canvas)
    }
}

/// Draws one random index and renders only that child
pub struct RandomChoice {
    children: Vec<Box<dyn ImageBuilder>>,
}

impl RandomChoice {
    /// Choose among the given children per synthesis run
    pub fn new(children: Vec<Box<dyn ImageBuilder>>) -> Self {
        Self { children }
    }
}

impl ImageBuilder for RandomChoice {
    fn render(&self, random: &mut SeededRandom, width: u32, height: u32) -> Result<Canvas> {
        let index = random.next_index(self.children.len()).map_err(|_| {
            invalid_argument("children", &0, &"random choice requires at least one child")
        })?;
        let mut canvas = Canvas::new(width, height);
        let image = self.children[index].render(random, width, height)?;
        canvas.draw_image(&image, 0, 0);
        Ok(canvas)
    }
}

/// Renders the child at a reduced interior size and offsets it
pub struct Margin {
    child: Box<dyn ImageBuilder>,
    top: u32,
    bottom: u32,
    left: u32,
    right: u32,
}

impl Margin {
    /// Margin with independent edge sizes in pixels
    pub fn new(child: Box<dyn ImageBuilder>, top: u32, bottom: u32, left: u32, right: u32) -> Self {
        Self {
            child,
            top,
            bottom,
            left,
            right,
        }
    }

    /// Margin with the same size on all four edges
    pub fn uniform(child: Box<dyn ImageBuilder>, margin: u32) -> Self {
        Self::new(child, margin, margin, margin, margin)
    }
}

impl ImageBuilder for Margin {
    fn render(&self, random: &mut SeededRandom, width: u32, height: u32) -> Result<Canvas> {
        let inner_width = width.checked_sub(self.left + self.right).ok_or_else(|| {
            invalid_argument(
                "margin",
                &(self.left + self.right),
                &format!("horizontal margins exceed width {width}"),
            )
        })?;
        let inner_height = height.checked_sub(self.top + self.bottom).ok_or_else(|| {
            invalid_argument(
                "margin",
                &(self.top + self.bottom),
                &format!("vertical margins exceed height {height}"),
            )
        })?;

        let image = self.child.render(random, inner_width, inner_height)?;
        let mut canvas = Canvas::new(width, height);
        canvas.draw_image(&image, i64::from(self.left), i64::from(self.top));
        Ok(canvas)
    }
}

/// Tiles one child across a grid of equal cells
///
/// Cells render in row-major order and keep drawing from the shared random
/// stream, so every cell differs while the whole grid stays a pure function
/// of the identifier.
pub struct Grid {
    child: Box<dyn ImageBuilder>,
    grid_x: u32,
    grid_y: u32,
}

impl Grid {
    /// Tile `grid_x` × `grid_y` cells of the child
    pub fn new(child: Box<dyn ImageBuilder>, grid_x: u32, grid_y: u32) -> Self {
        Self {
            child,
            grid_x,
            grid_y,
        }
    }
}

impl ImageBuilder for Grid {
    fn render(&self, random: &mut SeededRandom, width: u32, height: u32) -> Result<Canvas> {
        if self.grid_x == 0 || self.grid_y == 0 {
            return Err(invalid_argument(
                "grid",
                &format!("{}x{}", self.grid_x, self.grid_y),
                &"grid dimensions must be greater than zero",
            ));
        }

        let cell_width = width.div_ceil(self.grid_x);
        let cell_height = height.div_ceil(self.grid_y);

        let mut canvas = Canvas::new(width, height);
        for y in 0..self.grid_y {
            for x in 0..self.grid_x {
                let image = self.child.render(random, cell_width, cell_height)?;
                canvas.draw_image(
                    &image,
                    i64::from(x) * i64::from(cell_width),
                    i64::from(y) * i64::from(cell_height),
                );
            }
        }
        Ok(canvas)
    }
}
