use crate::glyph::{single_uppercase, BRAND_COLOR, DEFAULT_GLYPH};
use crate::{DEFAULT_OUT_DIR, DEFAULT_SOURCE};
use anyhow::{Context, Result};
use image::Rgb;
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "appicon.toml";

/// Settings read from `appicon.toml`. Every field is optional, unset fields
/// fall back to the fixed defaults.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    pub source: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub brand_color: Option<String>,
    pub glyph: Option<String>,
    pub font: Option<PathBuf>,
    #[serde(default)]
    pub manifest: bool,
}

impl Config {
    pub fn parse<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Default::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config = toml::from_str(&contents)
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    pub fn source(&self) -> &Path {
        self.source
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_SOURCE))
    }

    pub fn out_dir(&self) -> &Path {
        self.out_dir
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_OUT_DIR))
    }

    pub fn brand_color(&self) -> Result<Rgb<u8>> {
        match self.brand_color.as_deref() {
            Some(color) => parse_color(color),
            None => Ok(BRAND_COLOR),
        }
    }

    pub fn glyph(&self) -> Result<char> {
        match self.glyph.as_deref() {
            Some(glyph) => parse_glyph(glyph),
            None => Ok(DEFAULT_GLYPH),
        }
    }

    pub fn font(&self) -> Option<&Path> {
        self.font.as_deref()
    }
}

/// Parses `#rrggbb` (the leading `#` is optional).
pub fn parse_color(color: &str) -> Result<Rgb<u8>> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    anyhow::ensure!(
        hex.len() == 6 && hex.is_ascii(),
        "invalid color {:?}, expected #rrggbb",
        color
    );
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .with_context(|| format!("invalid color {:?}, expected #rrggbb", color))
    };
    Ok(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}

/// Accepts one visible character whose uppercase form is also a single
/// character, since the glyph is drawn uppercased.
pub fn parse_glyph(glyph: &str) -> Result<char> {
    let mut chars = glyph.chars();
    let c = match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_whitespace() => c,
        _ => anyhow::bail!("glyph must be a single character, got {:?}", glyph),
    };
    anyhow::ensure!(
        single_uppercase(c).is_some(),
        "glyph {:?} has no single-character uppercase form",
        glyph
    );
    Ok(c)
}
