use ab_glyph::FontVec;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Bold sans faces tried in order when no font is configured.
pub const PREFERRED_FONTS: [&str; 5] = [
    "/System/Library/Fonts/Helvetica.ttc",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "/Library/Fonts/Arial Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
];

pub enum Font {
    Outline { font: FontVec, path: PathBuf },
    Bitmap,
}

impl Font {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("failed to read font {}", path.display()))?;
        let font = FontVec::try_from_vec(bytes)
            .with_context(|| format!("failed to parse font {}", path.display()))?;
        Ok(Self::Outline {
            font,
            path: path.to_path_buf(),
        })
    }

    /// Picks the configured font, then the preferred system fonts, and
    /// finally the built-in bitmap face. Never fails.
    pub fn resolve(configured: Option<&Path>) -> Self {
        let preferred = PREFERRED_FONTS.into_iter().map(Path::new);
        Self::resolve_from(configured.into_iter().chain(preferred))
    }

    pub fn resolve_from<'a, I: IntoIterator<Item = &'a Path>>(candidates: I) -> Self {
        for path in candidates {
            match Self::load(path) {
                Ok(font) => {
                    log::debug!("using font {}", path.display());
                    return font;
                }
                Err(err) => log::debug!("{:#}", err),
            }
        }
        log::debug!("no outline font available, using bitmap font");
        Self::Bitmap
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Outline { path, .. } => Some(path),
            Self::Bitmap => None,
        }
    }

    pub fn is_bitmap(&self) -> bool {
        matches!(self, Self::Bitmap)
    }
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Outline { path, .. } => f.debug_tuple("Outline").field(path).finish(),
            Self::Bitmap => f.write_str("Bitmap"),
        }
    }
}

impl std::fmt::Display for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Outline { path, .. } => write!(f, "{}", path.display()),
            Self::Bitmap => write!(f, "built-in bitmap font"),
        }
    }
}
