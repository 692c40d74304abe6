//! Layered avatars assembled from pre-authored asset parts
//!
//! The part table is built eagerly at construction: one directory scan,
//! sorted category and file lists, then no filesystem access until render
//! time loads the chosen parts. Sorting makes the random-draw-to-file
//! mapping independent of filesystem enumeration order.

use crate::builder::ImageBuilder;
use crate::error::{Result, asset_not_found, invalid_argument};
use crate::random::SeededRandom;
use crate::render::Canvas;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Avatar assembled from one randomly chosen outfit of layered parts
///
/// Each outfit is an ordered list of part categories; later categories draw
/// over earlier ones (body first, accessories last).
#[derive(Debug)]
pub struct AssetGroup {
    base: PathBuf,
    parts: BTreeMap<String, Vec<PathBuf>>,
    outfits: Vec<Vec<String>>,
}

impl AssetGroup {
    /// Scan a directory of part categories and build the lookup table
    ///
    /// Immediate subdirectories of `base` are part categories; within each,
    /// files with a (case-insensitive) `.png` extension are the parts.
    ///
    /// # Errors
    ///
    /// Returns `AssetNotFound` if the base directory or one of its
    /// categories cannot be read.
    pub fn scan(base: &Path, outfits: Vec<Vec<String>>) -> Result<Self> {
        let mut parts = BTreeMap::new();

        let mut categories: Vec<PathBuf> = Vec::new();
        let entries = std::fs::read_dir(base)
            .map_err(|e| asset_not_found(base, &format!("cannot read parts directory: {e}")))?;
        for entry in entries {
            let entry =
                entry.map_err(|e| asset_not_found(base, &format!("cannot read entry: {e}")))?;
            let path = entry.path();
            if path.is_dir() {
                categories.push(path);
            }
        }
        categories.sort();

        for dir in categories {
            let name = dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let mut files: Vec<PathBuf> = Vec::new();
            let entries = std::fs::read_dir(&dir)
                .map_err(|e| asset_not_found(&dir, &format!("cannot read category: {e}")))?;
            for entry in entries {
                let entry =
                    entry.map_err(|e| asset_not_found(&dir, &format!("cannot read entry: {e}")))?;
                let path = entry.path();
                let is_png = path
                    .extension()
                    .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case("png"));
                if path.is_file() && is_png {
                    files.push(path);
                }
            }
            files.sort();
            parts.insert(name, files);
        }

        Ok(Self {
            base: base.to_path_buf(),
            parts,
            outfits,
        })
    }

    /// Part categories discovered during the scan
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.parts.keys().map(String::as_str)
    }
}

impl ImageBuilder for AssetGroup {
    fn render(&self, random: &mut SeededRandom, width: u32, height: u32) -> Result<Canvas> {
        let outfit_index = random.next_index(self.outfits.len()).map_err(|_| {
            invalid_argument("outfits", &0, &"asset group requires at least one outfit")
        })?;
        let outfit = &self.outfits[outfit_index];

        let mut canvas = Canvas::new(width, height);
        for category in outfit {
            let files = self.parts.get(category).ok_or_else(|| {
                asset_not_found(
                    self.base.join(category),
                    &"outfit references an unknown part category",
                )
            })?;
            if files.is_empty() {
                return Err(asset_not_found(
                    self.base.join(category),
                    &"part category contains no png files",
                ));
            }
            let file = &files[random.next_index(files.len())?];
            let image = image::open(file)
                .map_err(|e| asset_not_found(file, &format!("cannot decode part image: {e}")))?
                .to_rgba8();
            canvas.draw_image_scaled(&image, 0, 0, width, height);
        }
        Ok(canvas)
    }
}

/// Body variant for the 8-bit asset set
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EightBitVariant {
    /// Parts under the `female` subdirectory
    Female,
    /// Parts under the `male` subdirectory
    Male,
}

impl EightBitVariant {
    fn dir_name(self) -> &'static str {
        match self {
            Self::Female => "female",
            Self::Male => "male",
        }
    }
}

/// 8-bit pixel-art avatar from a layered asset set
///
/// # Errors
///
/// Returns `AssetNotFound` if the variant's parts directory cannot be read.
pub fn eight_bit(assets_root: &Path, variant: EightBitVariant) -> Result<AssetGroup> {
    let outfits = vec![
        ["background", "face", "clothes", "hair", "eye", "mouth"]
            .map(String::from)
            .to_vec(),
    ];
    AssetGroup::scan(&assets_root.join(variant.dir_name()), outfits)
}

/// Cat avatar from a layered asset set
///
/// # Errors
///
/// Returns `AssetNotFound` if the parts directory cannot be read.
pub fn cat(assets_root: &Path) -> Result<AssetGroup> {
    let outfits = vec![
        ["bodies", "furs", "eyes", "mouths"].map(String::from).to_vec(),
        ["bodies", "furs", "eyes", "mouths", "accessories"]
            .map(String::from)
            .to_vec(),
        ["bodies", "furs", "eyes", "mouths", "zzs"]
            .map(String::from)
            .to_vec(),
    ];
    AssetGroup::scan(assets_root, outfits)
}
