//! Composable image builders
//!
//! One flat trait, `ImageBuilder`, with concrete variants that each hold
//! only their own configuration plus owned children. A builder tree is
//! constructed once, then rendered per identifier with a shared
//! [`SeededRandom`](crate::random::SeededRandom); draw order follows tree
//! traversal order, which is what makes output reproducible.

use crate::error::Result;
use crate::random::SeededRandom;
use crate::render::Canvas;

/// Combinators: compose, random choice, margin, grid
pub mod combine;
/// Solid and palette fills
pub mod fill;
/// Github-style mirrored pixel pattern
pub mod github;
/// Layered avatars assembled from pre-authored asset parts
pub mod group;
/// 9-block identicon renderer
pub mod identicon;
/// Elliptical and rounded-rectangle clip masks
pub mod mask;
/// Drop, score, and long shadows
pub mod shadow;
/// Nested-square block pattern
pub mod square;
/// Shrinking corner-triangle pattern
pub mod triangle;

pub use combine::{Compose, Grid, Margin, RandomChoice};
pub use fill::{FillStyle, RandomFillStyle};
pub use github::Github;
pub use group::{AssetGroup, EightBitVariant, cat, eight_bit};
pub use identicon::Identicon;
pub use mask::{CircleMask, RoundedRectMask};
pub use shadow::{LongShadow, ScoreShadow, Shadow, ShadowSpec};
pub use square::Square;
pub use triangle::Triangle;

/// An image-producing node in the composition tree
///
/// Implementations must be pure up to the random draws they consume: the
/// returned canvas is exactly `width` × `height` and depends only on the
/// node's configuration and the state of the random source.
pub trait ImageBuilder: Send + Sync {
    /// Produce a pixel buffer of the requested size
    ///
    /// # Errors
    ///
    /// Returns an error if the node's configuration is invalid for the
    /// requested dimensions, an asset cannot be loaded, or a surface
    /// operation fails.
    fn render(&self, random: &mut SeededRandom, width: u32, height: u32) -> Result<Canvas>;
}
