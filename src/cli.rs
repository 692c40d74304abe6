//! Command-line interface for batch avatar generation

use crate::avatar::{
    AvatarBuilder, DEFAULT_SIZE, cat_builder, eight_bit_builder, github_builder,
    identicon_builder, square_builder, triangle_builder,
};
use crate::builder::EightBitVariant;
use crate::cache::FolderCache;
use crate::error::{AvatarError, Result, invalid_argument};
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

const DEFAULT_SQUARE_PRECISION: u32 = 3;
const DEFAULT_TRIANGLE_PRECISION: u32 = 4;
const DEFAULT_GITHUB_PRECISION: u32 = 3;

/// Avatar style to render
#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Style {
    /// 9-block identicon quilt
    Identicon,
    /// Two-tone square pattern
    Square,
    /// Stacked corner triangles
    Triangle,
    /// Mirrored block sprite
    Github,
    /// Layered cat from asset parts (requires --assets)
    Cat,
    /// 8-bit female figure from asset parts (requires --assets)
    EightBitFemale,
    /// 8-bit male figure from asset parts (requires --assets)
    EightBitMale,
}

#[derive(Parser)]
#[command(name = "avagen")]
#[command(author, version, about = "Generate deterministic avatar images")]
/// Command-line arguments for the avatar generation tool
pub struct Cli {
    /// Identifiers to render, one avatar per id
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,

    /// Avatar style
    #[arg(short, long, value_enum, default_value_t = Style::Identicon)]
    pub style: Style,

    /// Output edge length in pixels
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    pub size: u32,

    /// Pattern precision; defaults per style
    #[arg(short, long)]
    pub precision: Option<u32>,

    /// Asset directory for part-based styles
    #[arg(short, long)]
    pub assets: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub out: PathBuf,

    /// Persist rendered avatars to this directory between runs
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Render every requested id to `<out>/<id>.png`
    ///
    /// # Errors
    ///
    /// Returns an error if the style needs assets that are missing, a
    /// render fails, or an output file cannot be written.
    pub fn run(&self) -> Result<()> {
        let mut builder = self.build()?.sized(self.size, self.size);
        if let Some(dir) = &self.cache_dir {
            builder = builder.cached(Some(Box::new(FolderCache::new(dir)?)));
        }

        std::fs::create_dir_all(&self.out).map_err(|source| AvatarError::CacheIo {
            path: self.out.clone(),
            operation: "create output directory",
            source,
        })?;

        let progress = (self.should_show_progress() && self.ids.len() > 1)
            .then(|| batch_bar(self.ids.len()));

        for id in &self.ids {
            let bytes = builder.create(id)?;
            let path = self.out.join(format!("{}.png", sanitize(id)));
            std::fs::write(&path, bytes).map_err(|source| AvatarError::CacheIo {
                path: path.clone(),
                operation: "write avatar",
                source,
            })?;
            if let Some(bar) = &progress {
                bar.inc(1);
            }
        }

        if let Some(bar) = progress {
            bar.finish();
        }
        Ok(())
    }

    fn build(&self) -> Result<AvatarBuilder> {
        match self.style {
            Style::Identicon => Ok(identicon_builder()),
            Style::Square => square_builder(self.precision.unwrap_or(DEFAULT_SQUARE_PRECISION)),
            Style::Triangle => {
                triangle_builder(self.precision.unwrap_or(DEFAULT_TRIANGLE_PRECISION))
            }
            Style::Github => github_builder(self.precision.unwrap_or(DEFAULT_GITHUB_PRECISION)),
            Style::Cat => cat_builder(self.assets()?),
            Style::EightBitFemale => eight_bit_builder(self.assets()?, EightBitVariant::Female),
            Style::EightBitMale => eight_bit_builder(self.assets()?, EightBitVariant::Male),
        }
    }

    fn assets(&self) -> Result<&PathBuf> {
        self.assets.as_ref().ok_or_else(|| {
            invalid_argument("assets", &"", &"this style requires an asset directory")
        })
    }
}

fn batch_bar(len: usize) -> ProgressBar {
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] Avatars: [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

/// Map an arbitrary identifier onto a safe filename stem
fn sanitize(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}
