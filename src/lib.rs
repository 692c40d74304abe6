//! Deterministic avatar image synthesis keyed by identifier
//!
//! An opaque identifier string seeds every random decision, so the same id
//! always yields byte-identical PNG output. Avatars are described as trees
//! of composable image builders (fills, patterns, masks, shadows, layered
//! asset parts) and rendered through an optional stack of byte caches.

#![forbid(unsafe_code)]

/// Avatar synthesis orchestration and ready-made style factories
pub mod avatar;
/// Composable image builders and the builder trait
pub mod builder;
/// Byte caches: memory, LRU, folder, and tier composition
pub mod cache;
/// Command-line interface for batch generation
pub mod cli;
/// RGBA colors and the default palette
pub mod color;
/// Error taxonomy shared across the crate
pub mod error;
/// Identifier-seeded random source
pub mod random;
/// Pixel canvas, path rasterization, and blur primitives
pub mod render;

pub use avatar::{AvatarBuilder, Options};
pub use builder::ImageBuilder;
pub use cache::Cache;
pub use color::Color;
pub use error::{AvatarError, Result};
pub use random::SeededRandom;
