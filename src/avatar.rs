//! Avatar synthesis entry point
//!
//! [`AvatarBuilder`] ties an [`ImageBuilder`] tree, fixed output
//! dimensions, and an optional cache into one `create(id) -> bytes` call.
//! The identifier alone drives every random decision, so the same id
//! always produces the same encoded PNG.

use crate::builder::{
    EightBitVariant, Github, Identicon, ImageBuilder, Square, Triangle, cat, eight_bit,
};
use crate::cache::{Cache, LruCache};
use crate::error::Result;
use crate::random::SeededRandom;
use std::path::Path;

/// Default output edge length in pixels
pub const DEFAULT_SIZE: u32 = 256;

/// Construction options for [`AvatarBuilder`]
pub struct Options {
    /// Cache in front of synthesis; `None` renders every call
    pub cache: Option<Box<dyn Cache>>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            cache: Some(Box::new(LruCache::default())),
        }
    }
}

impl Options {
    /// Options with caching disabled
    pub fn uncached() -> Self {
        Self { cache: None }
    }

    /// Options with the given cache
    pub fn with_cache(cache: Box<dyn Cache>) -> Self {
        Self { cache: Some(cache) }
    }
}

/// Deterministic avatar generator
pub struct AvatarBuilder {
    image_builder: Box<dyn ImageBuilder>,
    width: u32,
    height: u32,
    cache: Option<Box<dyn Cache>>,
}

impl AvatarBuilder {
    /// Avatar builder with the default LRU cache
    pub fn new(image_builder: Box<dyn ImageBuilder>, width: u32, height: u32) -> Self {
        Self::with_options(image_builder, width, height, Options::default())
    }

    /// Avatar builder with explicit options
    pub fn with_options(
        image_builder: Box<dyn ImageBuilder>,
        width: u32,
        height: u32,
        options: Options,
    ) -> Self {
        Self {
            image_builder,
            width,
            height,
            cache: options.cache,
        }
    }

    /// Same builder tree with different output dimensions
    #[must_use]
    pub fn sized(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Same builder tree with a different cache tier
    #[must_use]
    pub fn cached(mut self, cache: Option<Box<dyn Cache>>) -> Self {
        self.cache = cache;
        self
    }

    /// Output width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Output height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Synthesizes the avatar for `id` as encoded PNG bytes
    ///
    /// # Errors
    ///
    /// Propagates builder, encoding, and cache failures.
    pub fn create(&self, id: &str) -> Result<Vec<u8>> {
        match &self.cache {
            Some(cache) => cache.get_or_create(id, &mut || self.create_uncached(id)),
            None => self.create_uncached(id),
        }
    }

    fn create_uncached(&self, id: &str) -> Result<Vec<u8>> {
        let mut random = SeededRandom::from_id(id);
        let canvas = self
            .image_builder
            .render(&mut random, self.width, self.height)?;
        canvas.encode_png()
    }
}

/// Identicon avatar at the default size
pub fn identicon_builder() -> AvatarBuilder {
    AvatarBuilder::new(Box::new(Identicon::default()), DEFAULT_SIZE, DEFAULT_SIZE)
}

/// Square avatar at the default size
///
/// # Errors
///
/// Returns `InvalidArgument` if `precision` is zero.
pub fn square_builder(precision: u32) -> Result<AvatarBuilder> {
    let square = Square::with_default_palette(precision)?;
    Ok(AvatarBuilder::new(Box::new(square), DEFAULT_SIZE, DEFAULT_SIZE))
}

/// Triangle avatar at the default size
///
/// # Errors
///
/// Returns `InvalidArgument` if `precision` is zero.
pub fn triangle_builder(precision: u32) -> Result<AvatarBuilder> {
    let triangle = Triangle::with_default_palette(precision)?;
    Ok(AvatarBuilder::new(Box::new(triangle), DEFAULT_SIZE, DEFAULT_SIZE))
}

/// Mirrored sprite avatar at the default size
///
/// # Errors
///
/// Returns `InvalidArgument` if `precision` is zero.
pub fn github_builder(precision: u32) -> Result<AvatarBuilder> {
    let sprite = Github::new(precision)?;
    Ok(AvatarBuilder::new(Box::new(sprite), DEFAULT_SIZE, DEFAULT_SIZE))
}

/// Layered cat avatar at the default size
///
/// # Errors
///
/// Returns `AssetNotFound` if the asset directory cannot be scanned.
pub fn cat_builder(assets_root: &Path) -> Result<AvatarBuilder> {
    let parts = cat(assets_root)?;
    Ok(AvatarBuilder::new(Box::new(parts), DEFAULT_SIZE, DEFAULT_SIZE))
}

/// Layered 8-bit avatar at the default size
///
/// # Errors
///
/// Returns `AssetNotFound` if the asset directory cannot be scanned.
pub fn eight_bit_builder(assets_root: &Path, variant: EightBitVariant) -> Result<AvatarBuilder> {
    let parts = eight_bit(assets_root, variant)?;
    Ok(AvatarBuilder::new(
        Box::new(parts),
        DEFAULT_SIZE,
        DEFAULT_SIZE,
    ))
}

/// 8-bit avatar over the female part set
///
/// # Errors
///
/// Returns `AssetNotFound` if the asset directory cannot be scanned.
pub fn female_eight_bit_builder(assets_root: &Path) -> Result<AvatarBuilder> {
    eight_bit_builder(assets_root, EightBitVariant::Female)
}

/// 8-bit avatar over the male part set
///
/// # Errors
///
/// Returns `AssetNotFound` if the asset directory cannot be scanned.
pub fn male_eight_bit_builder(assets_root: &Path) -> Result<AvatarBuilder> {
    eight_bit_builder(assets_root, EightBitVariant::Male)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::FillStyle;
    use crate::color::Color;

    #[test]
    fn create_same_id_yields_identical_bytes() {
        let builder = identicon_builder();
        assert_eq!(builder.create("alice").unwrap(), builder.create("alice").unwrap());
    }

    #[test]
    fn uncached_builder_still_deterministic() {
        let builder = AvatarBuilder::with_options(
            Box::new(Identicon::default()),
            64,
            64,
            Options::uncached(),
        );
        assert_eq!(builder.create("bob").unwrap(), builder.create("bob").unwrap());
    }

    #[test]
    fn named_factories_wrap_the_bare_style() {
        let pairs: Vec<(AvatarBuilder, Box<dyn ImageBuilder>)> = vec![
            (
                square_builder(3).unwrap(),
                Box::new(Square::with_default_palette(3).unwrap()),
            ),
            (
                triangle_builder(4).unwrap(),
                Box::new(Triangle::with_default_palette(4).unwrap()),
            ),
            (github_builder(3).unwrap(), Box::new(Github::new(3).unwrap())),
            (identicon_builder(), Box::new(Identicon::default())),
        ];
        for (factory, style) in pairs {
            let direct = AvatarBuilder::new(style, DEFAULT_SIZE, DEFAULT_SIZE);
            assert_eq!(
                factory.create("alice").unwrap(),
                direct.create("alice").unwrap()
            );
        }
    }

    #[test]
    fn output_decodes_to_requested_dimensions() {
        let builder = AvatarBuilder::new(
            Box::new(FillStyle::new(Color::rgb(10, 20, 30))),
            48,
            32,
        );
        let bytes = builder.create("any").unwrap();
        let image = image::load_from_memory(&bytes).unwrap();
        assert_eq!((image.width(), image.height()), (48, 32));
    }
}
