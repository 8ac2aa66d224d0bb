use crate::{IconSpec, Render, IOS_APP_ICONS};
use anyhow::{Context, Result};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageReader, Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;

/// Holds the normalized source logo and resamples it to icon sizes.
#[derive(Debug)]
pub struct Scaler {
    img: RgbImage,
}

impl Scaler {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let img = ImageReader::open(path)
            .with_context(|| format!("failed to open source image {}", path.display()))?
            .with_guessed_format()?
            .decode()
            .with_context(|| format!("failed to decode source image {}", path.display()))?;
        log::debug!(
            "loaded {} ({}x{} {:?})",
            path.display(),
            img.width(),
            img.height(),
            img.color()
        );
        Ok(Self::new(img))
    }

    /// Normalizes `img` to opaque RGB, flattening any transparency onto white.
    pub fn new(img: DynamicImage) -> Self {
        let (width, height) = img.dimensions();
        if width != height {
            log::warn!(
                "source image is {}x{}, icons will be stretched to a square",
                width,
                height
            );
        }
        let largest = IOS_APP_ICONS.iter().map(|spec| spec.size).max().unwrap_or(0);
        if width.min(height) < largest {
            log::warn!(
                "source image is smaller than {}x{}, large icons will be upscaled",
                largest,
                largest
            );
        }
        let img = if img.color().has_alpha() {
            flatten(&img.to_rgba8())
        } else {
            img.to_rgb8()
        };
        Self { img }
    }

    pub fn image(&self) -> &RgbImage {
        &self.img
    }

    pub fn resize(&self, size: u32) -> RgbImage {
        image::imageops::resize(&self.img, size, size, FilterType::Lanczos3)
    }
}

impl Render for Scaler {
    fn render(&self, spec: &IconSpec) -> Result<RgbImage> {
        Ok(self.resize(spec.size))
    }
}

/// Composites `rgba` over an opaque white backdrop.
pub fn flatten(rgba: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
        Rgb([over_white(r, a), over_white(g, a), over_white(b, a)])
    })
}

fn over_white(c: u8, a: u8) -> u8 {
    let (c, a) = (c as u32, a as u32);
    ((c * a + 255 * (255 - a) + 127) / 255) as u8
}
