//! `Contents.json` for an Xcode `AppIcon.appiconset`.

use crate::IconSpec;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const CONTENTS_JSON: &str = "Contents.json";

#[derive(Clone, Debug, Serialize)]
pub struct Contents {
    pub images: Vec<ImageEntry>,
    pub info: Info,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ImageEntry {
    pub size: String,
    pub idiom: &'static str,
    pub filename: String,
    pub scale: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct Info {
    pub version: u32,
    pub author: &'static str,
}

impl Default for Info {
    fn default() -> Self {
        Self {
            version: 1,
            author: "xcode",
        }
    }
}

impl Contents {
    pub fn new(specs: &[IconSpec]) -> Result<Self> {
        let mut images = Vec::with_capacity(specs.len());
        for spec in specs {
            let (points, scale) = parse_filename(spec)?;
            for &idiom in idioms(&points, scale) {
                images.push(ImageEntry {
                    size: points.clone(),
                    idiom,
                    filename: spec.filename.to_string(),
                    scale: format!("{}x", scale),
                });
            }
        }
        Ok(Self {
            images,
            info: Info::default(),
        })
    }

    pub fn write(&self, out_dir: &Path) -> Result<PathBuf> {
        let path = out_dir.join(CONTENTS_JSON);
        let file =
            File::create(&path).with_context(|| format!("failed to write {}", path.display()))?;
        let mut w = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut w, self)?;
        w.flush()?;
        Ok(path)
    }
}

/// Splits `icon-{pt}x{pt}@{n}x.png` into the point size label and the scale,
/// checking that they agree with the pixel size.
fn parse_filename(spec: &IconSpec) -> Result<(String, u32)> {
    let invalid = || anyhow::anyhow!("unexpected icon filename {}", spec.filename);
    let stem = spec
        .filename
        .strip_prefix("icon-")
        .and_then(|name| name.strip_suffix(".png"))
        .ok_or_else(invalid)?;
    let (points, scale) = stem.split_once('@').ok_or_else(invalid)?;
    let scale: u32 = scale
        .strip_suffix('x')
        .and_then(|scale| scale.parse().ok())
        .ok_or_else(invalid)?;
    let (width, _) = points.split_once('x').ok_or_else(invalid)?;
    let width: f32 = width.parse().map_err(|_| invalid())?;
    anyhow::ensure!(
        (width * scale as f32).round() as u32 == spec.size,
        "{} does not match its size {}",
        spec.filename,
        spec.size
    );
    Ok((points.to_string(), scale))
}

fn idioms(points: &str, scale: u32) -> &'static [&'static str] {
    match (points, scale) {
        ("1024x1024", _) => &["ios-marketing"],
        ("76x76", _) | ("83.5x83.5", _) => &["ipad"],
        ("60x60", _) => &["iphone"],
        ("20x20" | "29x29" | "40x40", 1) => &["ipad"],
        ("20x20" | "29x29" | "40x40", 2) => &["iphone", "ipad"],
        ("20x20" | "29x29" | "40x40", _) => &["iphone"],
        _ => &["universal"],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IOS_APP_ICONS;

    #[test]
    fn table_filenames_parse() {
        for spec in &IOS_APP_ICONS {
            parse_filename(spec).unwrap();
        }
        let (points, scale) = parse_filename(&IconSpec::new(167, "icon-83.5x83.5@2x.png")).unwrap();
        assert_eq!(points, "83.5x83.5");
        assert_eq!(scale, 2);
    }

    #[test]
    fn mismatched_size_is_rejected() {
        assert!(parse_filename(&IconSpec::new(41, "icon-20x20@2x.png")).is_err());
        assert!(parse_filename(&IconSpec::new(20, "logo.png")).is_err());
    }

    #[test]
    fn contents_entries() -> Result<()> {
        let contents = Contents::new(&IOS_APP_ICONS)?;
        // the three @2x of 20/29/40 appear for both iphone and ipad
        assert_eq!(contents.images.len(), IOS_APP_ICONS.len() + 3);
        assert!(contents.images.contains(&ImageEntry {
            size: "1024x1024".into(),
            idiom: "ios-marketing",
            filename: "icon-1024x1024@1x.png".into(),
            scale: "1x".into(),
        }));
        let entries = contents
            .images
            .iter()
            .filter(|image| image.filename == "icon-20x20@2x.png")
            .count();
        assert_eq!(entries, 2);
        Ok(())
    }

    #[test]
    fn write_contents_json() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = Contents::new(&IOS_APP_ICONS)?.write(dir.path())?;
        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        assert_eq!(json["info"]["version"], 1);
        assert_eq!(json["info"]["author"], "xcode");
        assert_eq!(json["images"][0]["filename"], "icon-20x20@1x.png");
        assert_eq!(json["images"][0]["idiom"], "ipad");
        Ok(())
    }
}
