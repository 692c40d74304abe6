//! CPU rendering surface: pixel buffers, path rasterization, shadow synthesis

/// Gaussian blur and drop-shadow synthesis
pub mod blur;
/// Pixel buffer with compositing and PNG encoding
pub mod canvas;
/// Vector paths, affine transforms, and scanline rasterization
pub mod path;

pub use canvas::Canvas;
pub use path::{Affine, Mask, Path, Point};
