//! Procedural icons: a single white letter on a solid brand-color square.

use crate::bitmap;
use crate::font::Font;
use crate::{IconSpec, Render};
use ab_glyph::{point, Font as _, FontVec, PxScale};
use anyhow::Result;
use image::{Rgb, RgbImage};

/// `#22c55e`
pub const BRAND_COLOR: Rgb<u8> = Rgb([34, 197, 94]);
pub const DEFAULT_GLYPH: char = 'T';

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Glyph height relative to the canvas edge.
const GLYPH_SCALE: f32 = 0.6;

#[derive(Debug)]
pub struct GlyphPainter {
    color: Rgb<u8>,
    glyph: char,
    font: Font,
}

impl GlyphPainter {
    /// `glyph` is uppercased when its uppercase form is a single character,
    /// otherwise it is drawn as given.
    pub fn new(color: Rgb<u8>, glyph: char, font: Font) -> Self {
        let glyph = single_uppercase(glyph).unwrap_or(glyph);
        Self { color, glyph, font }
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn paint(&self, size: u32) -> RgbImage {
        let mut img = RgbImage::from_pixel(size, size, self.color);
        let px = size as f32 * GLYPH_SCALE;
        match &self.font {
            Font::Outline { font, .. } => draw_outline(&mut img, font, self.glyph, px),
            Font::Bitmap => draw_bitmap(&mut img, self.glyph, px),
        }
        img
    }
}

impl Render for GlyphPainter {
    fn render(&self, spec: &IconSpec) -> Result<RgbImage> {
        Ok(self.paint(spec.size))
    }
}

/// Centers the glyph's ink box on the canvas.
fn draw_outline(img: &mut RgbImage, font: &FontVec, c: char, px: f32) {
    let glyph = font
        .glyph_id(c)
        .with_scale_and_position(PxScale::from(px), point(0.0, 0.0));
    let Some(outlined) = font.outline_glyph(glyph) else {
        log::debug!("font has no outline for {:?}", c);
        return;
    };
    let bounds = outlined.px_bounds();
    let (width, height) = img.dimensions();
    let x0 = ((width as f32 - bounds.width()) / 2.0).round() as i64;
    let y0 = ((height as f32 - bounds.height()) / 2.0).round() as i64;
    outlined.draw(|x, y, coverage| {
        let x = x0 + x as i64;
        let y = y0 + y as i64;
        if x < 0 || y < 0 || x >= width as i64 || y >= height as i64 {
            return;
        }
        let pixel = img.get_pixel_mut(x as u32, y as u32);
        *pixel = blend(*pixel, WHITE, coverage);
    });
}

fn draw_bitmap(img: &mut RgbImage, c: char, px: f32) {
    let rows = bitmap::rows(c);
    let cell = ((px / bitmap::HEIGHT as f32) as u32).max(1);
    let (width, height) = img.dimensions();
    let x0 = width.saturating_sub(bitmap::WIDTH * cell) / 2;
    let y0 = height.saturating_sub(bitmap::HEIGHT * cell) / 2;
    for row in 0..bitmap::HEIGHT {
        for col in 0..bitmap::WIDTH {
            if !bitmap::is_set(&rows, col, row) {
                continue;
            }
            for dy in 0..cell {
                for dx in 0..cell {
                    let x = x0 + col * cell + dx;
                    let y = y0 + row * cell + dy;
                    if x < width && y < height {
                        img.put_pixel(x, y, WHITE);
                    }
                }
            }
        }
    }
}

pub(crate) fn single_uppercase(c: char) -> Option<char> {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => Some(u),
        _ => None,
    }
}

fn blend(bg: Rgb<u8>, fg: Rgb<u8>, coverage: f32) -> Rgb<u8> {
    let coverage = coverage.clamp(0.0, 1.0);
    let mix = |b: u8, f: u8| (b as f32 + (f as f32 - b as f32) * coverage).round() as u8;
    Rgb([mix(bg[0], fg[0]), mix(bg[1], fg[1]), mix(bg[2], fg[2])])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IOS_APP_ICONS;

    fn painter(glyph: char) -> GlyphPainter {
        GlyphPainter::new(BRAND_COLOR, glyph, Font::Bitmap)
    }

    fn has_white(img: &RgbImage, from: u32, to: u32) -> bool {
        (from..to).any(|y| (from..to).any(|x| *img.get_pixel(x, y) == WHITE))
    }

    #[test]
    fn sixty_px_icon() {
        let img = painter('T').paint(60);
        assert_eq!(img.dimensions(), (60, 60));
        assert_eq!(*img.get_pixel(0, 0), BRAND_COLOR);
        assert_eq!(*img.get_pixel(59, 59), BRAND_COLOR);
        assert!(has_white(&img, 20, 40));
    }

    #[test]
    fn every_size_has_a_glyph() {
        let painter = painter('T');
        for spec in &IOS_APP_ICONS {
            let img = painter.render(spec).unwrap();
            assert_eq!(img.dimensions(), (spec.size, spec.size));
            assert_eq!(*img.get_pixel(0, 0), BRAND_COLOR);
            assert!(has_white(&img, 0, spec.size), "{}", spec.filename);
        }
    }

    #[test]
    fn glyph_is_uppercased() {
        let lower = painter('t');
        assert_eq!(lower.glyph(), 'T');
        assert_eq!(lower.paint(120), painter('T').paint(120));
    }

    #[test]
    fn glyph_is_centered() {
        let img = painter('H').paint(120);
        let white: Vec<(u32, u32)> = img
            .enumerate_pixels()
            .filter(|(_, _, p)| **p == WHITE)
            .map(|(x, y, _)| (x, y))
            .collect();
        let min_x = white.iter().map(|p| p.0).min().unwrap();
        let max_x = white.iter().map(|p| p.0).max().unwrap();
        let min_y = white.iter().map(|p| p.1).min().unwrap();
        let max_y = white.iter().map(|p| p.1).max().unwrap();
        assert!((min_x as i32 - (119 - max_x) as i32).abs() <= 1);
        assert!((min_y as i32 - (119 - max_y) as i32).abs() <= 1);
    }

    #[test]
    fn blend_endpoints() {
        assert_eq!(blend(BRAND_COLOR, WHITE, 0.0), BRAND_COLOR);
        assert_eq!(blend(BRAND_COLOR, WHITE, 1.0), WHITE);
        assert_eq!(blend(Rgb([0, 0, 0]), WHITE, 0.5), Rgb([128, 128, 128]));
    }

    #[test]
    fn blend_partial_coverage() {
        assert_eq!(blend(BRAND_COLOR, WHITE, 0.5), Rgb([145, 226, 175]));
        assert_eq!(blend(BRAND_COLOR, WHITE, 0.25), Rgb([89, 212, 134]));
        assert_eq!(blend(BRAND_COLOR, WHITE, 1.5), WHITE);
        assert_eq!(blend(BRAND_COLOR, WHITE, -0.5), BRAND_COLOR);
    }

    #[test]
    fn multi_char_uppercase_is_kept() {
        assert_eq!(painter('ß').glyph(), 'ß');
        assert_eq!(painter('é').glyph(), 'É');
    }

    fn system_font() -> Option<Font> {
        let candidates = crate::font::PREFERRED_FONTS.into_iter().map(std::path::Path::new);
        let font = Font::resolve_from(candidates);
        if font.is_bitmap() {
            eprintln!("no outline font installed, skipping");
            return None;
        }
        Some(font)
    }

    #[test]
    fn outline_sixty_px_icon() {
        let Some(font) = system_font() else {
            return;
        };
        let img = GlyphPainter::new(BRAND_COLOR, 'T', font).paint(60);
        assert_eq!(img.dimensions(), (60, 60));
        for (x, y) in [(0, 0), (59, 0), (0, 59), (59, 59)] {
            assert_eq!(*img.get_pixel(x, y), BRAND_COLOR);
        }
        assert!(has_white(&img, 20, 40));
        // antialiased edges sit between the fill and white
        assert!(img.pixels().any(|p| *p != BRAND_COLOR && *p != WHITE));
    }

    #[test]
    fn outline_every_size() {
        let Some(font) = system_font() else {
            return;
        };
        let painter = GlyphPainter::new(BRAND_COLOR, 'T', font);
        for spec in &IOS_APP_ICONS {
            let img = painter.render(spec).unwrap();
            assert_eq!(img.dimensions(), (spec.size, spec.size));
            assert_eq!(*img.get_pixel(0, 0), BRAND_COLOR, "{}", spec.filename);
            assert!(img.pixels().any(|p| *p != BRAND_COLOR), "{}", spec.filename);
        }
    }

    #[test]
    fn outline_glyph_is_centered() {
        let Some(font) = system_font() else {
            return;
        };
        let img = GlyphPainter::new(BRAND_COLOR, 'H', font).paint(180);
        let ink: Vec<(u32, u32)> = img
            .enumerate_pixels()
            .filter(|(_, _, p)| **p != BRAND_COLOR)
            .map(|(x, y, _)| (x, y))
            .collect();
        let min_x = ink.iter().map(|p| p.0).min().unwrap();
        let max_x = ink.iter().map(|p| p.0).max().unwrap();
        let min_y = ink.iter().map(|p| p.1).min().unwrap();
        let max_y = ink.iter().map(|p| p.1).max().unwrap();
        assert!((min_x as i32 - (179 - max_x) as i32).abs() <= 2);
        assert!((min_y as i32 - (179 - max_y) as i32).abs() <= 2);
    }
}
