//! Renders the iOS app icon set, either procedurally from a letter glyph or
//! by resampling a source logo.

use anyhow::{Context, Result};
use image::{ImageFormat, RgbImage};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

mod bitmap;
pub mod config;
pub mod font;
pub mod glyph;
pub mod manifest;
pub mod scaler;

pub use config::Config;
pub use font::Font;
pub use glyph::GlyphPainter;
pub use manifest::Contents;
pub use scaler::Scaler;

/// Source logo used by the resize pipeline when nothing else is configured.
pub const DEFAULT_SOURCE: &str = "TicketFloLIVE-iOS/logo.png";

/// Asset catalog both pipelines write into.
pub const DEFAULT_OUT_DIR: &str =
    "TicketFloLIVE-iOS/TicketFloLIVE/Assets.xcassets/AppIcon.appiconset";

/// A single required icon: its pixel dimension and the file it is written to.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct IconSpec {
    pub size: u32,
    pub filename: &'static str,
}

impl IconSpec {
    pub const fn new(size: u32, filename: &'static str) -> Self {
        Self { size, filename }
    }
}

pub const IOS_APP_ICONS: [IconSpec; 16] = [
    IconSpec::new(20, "icon-20x20@1x.png"),
    IconSpec::new(40, "icon-20x20@2x.png"),
    IconSpec::new(60, "icon-20x20@3x.png"),
    IconSpec::new(29, "icon-29x29@1x.png"),
    IconSpec::new(58, "icon-29x29@2x.png"),
    IconSpec::new(87, "icon-29x29@3x.png"),
    IconSpec::new(40, "icon-40x40@1x.png"),
    IconSpec::new(80, "icon-40x40@2x.png"),
    IconSpec::new(120, "icon-40x40@3x.png"),
    IconSpec::new(60, "icon-60x60@1x.png"),
    IconSpec::new(120, "icon-60x60@2x.png"),
    IconSpec::new(180, "icon-60x60@3x.png"),
    IconSpec::new(76, "icon-76x76@1x.png"),
    IconSpec::new(152, "icon-76x76@2x.png"),
    IconSpec::new(167, "icon-83.5x83.5@2x.png"),
    IconSpec::new(1024, "icon-1024x1024@1x.png"),
];

/// Produces the raster for one icon.
pub trait Render {
    fn render(&self, spec: &IconSpec) -> Result<RgbImage>;
}

/// Renders `spec` and saves it as PNG into `out_dir`, replacing any existing
/// file of the same name.
pub fn write_icon<R: Render + ?Sized>(
    renderer: &R,
    out_dir: &Path,
    spec: &IconSpec,
) -> Result<PathBuf> {
    let img = renderer.render(spec)?;
    anyhow::ensure!(
        img.dimensions() == (spec.size, spec.size),
        "{} rendered as {}x{}, expected {}x{}",
        spec.filename,
        img.width(),
        img.height(),
        spec.size,
        spec.size,
    );
    let path = out_dir.join(spec.filename);
    img.save_with_format(&path, ImageFormat::Png)
        .with_context(|| format!("failed to write {}", path.display()))?;
    log::debug!("wrote {} ({}x{})", path.display(), spec.size, spec.size);
    Ok(path)
}

/// Step reported by [`generate_with`] around each icon.
#[derive(Clone, Copy, Debug)]
pub enum Progress<'a> {
    Writing(&'a IconSpec),
    Written(&'a Path),
}

/// Writes every icon in `specs` sequentially. The first failure aborts the
/// run; icons written before it are left in place.
pub fn generate<R: Render + ?Sized>(
    renderer: &R,
    out_dir: &Path,
    specs: &[IconSpec],
) -> Result<Vec<PathBuf>> {
    generate_with(renderer, out_dir, specs, |_| {})
}

pub fn generate_with<R, F>(
    renderer: &R,
    out_dir: &Path,
    specs: &[IconSpec],
    mut progress: F,
) -> Result<Vec<PathBuf>>
where
    R: Render + ?Sized,
    F: FnMut(Progress<'_>),
{
    ensure_out_dir(out_dir)?;
    let mut seen = HashSet::with_capacity(specs.len());
    for spec in specs {
        anyhow::ensure!(seen.insert(spec.filename), "duplicate icon {}", spec.filename);
    }
    let mut written = Vec::with_capacity(specs.len());
    for spec in specs {
        progress(Progress::Writing(spec));
        let path = write_icon(renderer, out_dir, spec)?;
        progress(Progress::Written(&path));
        written.push(path);
    }
    Ok(written)
}

/// The output directory is never created, it has to be part of an existing
/// asset catalog.
pub fn ensure_out_dir(out_dir: &Path) -> Result<()> {
    anyhow::ensure!(
        out_dir.is_dir(),
        "output directory {} does not exist",
        out_dir.display()
    );
    Ok(())
}
