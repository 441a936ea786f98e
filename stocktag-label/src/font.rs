//! Font loading with graceful fallback
//!
//! Prefers a system TrueType face (DejaVu/Liberation/Noto search paths).
//! When none is available the built-in 8x8 bitmap font takes over, so a
//! missing font never fails a render.

use ab_glyph::{FontArc, PxScale};
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_text_mut;
use std::path::Path;

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

const REGULAR_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
];

const BOLD_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Bold.ttf",
];

/// Font face selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Regular,
    Bold,
}

/// Loaded fonts for label text
pub struct FontSet {
    regular: Option<FontArc>,
    bold: Option<FontArc>,
}

impl FontSet {
    /// Load system fonts, falling back to the bitmap font where unavailable
    pub fn load() -> Self {
        let regular = load_first(REGULAR_CANDIDATES);
        let bold = load_first(BOLD_CANDIDATES);
        if regular.is_none() {
            tracing::warn!("No TrueType font found, using built-in bitmap font");
        }
        Self { regular, bold }
    }

    fn face(&self, face: Face) -> Option<&FontArc> {
        match face {
            Face::Regular => self.regular.as_ref(),
            // A missing bold face degrades to regular before the bitmap font
            Face::Bold => self.bold.as_ref().or(self.regular.as_ref()),
        }
    }

    /// Draw a single line of black text at (x, y), `px` pixels tall
    pub fn draw_text(&self, canvas: &mut RgbImage, text: &str, x: i32, y: i32, px: f32, face: Face) {
        match self.face(face) {
            Some(font) => {
                draw_text_mut(canvas, BLACK, x, y, PxScale::from(px), font, text);
            }
            None => draw_bitmap_text(canvas, text, x, y, px as u32),
        }
    }
}

fn load_first(candidates: &[&str]) -> Option<FontArc> {
    for path in candidates {
        if !Path::new(path).exists() {
            continue;
        }
        match std::fs::read(path) {
            Ok(bytes) => match FontArc::try_from_vec(bytes) {
                Ok(font) => {
                    tracing::debug!(path = %path, "Loaded label font");
                    return Some(font);
                }
                Err(e) => tracing::warn!(path = %path, error = %e, "Invalid font file"),
            },
            Err(e) => tracing::warn!(path = %path, error = %e, "Failed to read font file"),
        }
    }
    None
}

/// Render text with the 8x8 bitmap font, scaled to roughly `px` pixels tall
fn draw_bitmap_text(canvas: &mut RgbImage, text: &str, x: i32, y: i32, px: u32) {
    let scale = (px / 8).max(1);
    let glyph_w = 8 * scale;
    let (width, height) = canvas.dimensions();

    for (index, ch) in text.chars().enumerate() {
        let glyph = BASIC_FONTS.get(ch).unwrap_or_else(|| {
            // Unmapped characters render as '?'
            BASIC_FONTS.get('?').unwrap_or([0u8; 8])
        });
        let origin_x = x + (index as u32 * glyph_w) as i32;
        for (row, bits) in glyph.iter().enumerate() {
            for col in 0..8u32 {
                if bits & (1 << col) == 0 {
                    continue;
                }
                // Fill a scale x scale block per set bit, clipped to canvas
                for dy in 0..scale {
                    for dx in 0..scale {
                        let px_x = origin_x + (col * scale + dx) as i32;
                        let px_y = y + (row as u32 * scale + dy) as i32;
                        if px_x >= 0 && px_y >= 0 && (px_x as u32) < width && (px_y as u32) < height
                        {
                            canvas.put_pixel(px_x as u32, px_y as u32, BLACK);
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitmap_text_marks_pixels() {
        let mut canvas = RgbImage::from_pixel(200, 40, Rgb([255, 255, 255]));
        draw_bitmap_text(&mut canvas, "ABC", 4, 4, 24);
        assert!(canvas.pixels().any(|p| *p == Rgb([0, 0, 0])));
    }

    #[test]
    fn bitmap_text_clips_at_canvas_edge() {
        let mut canvas = RgbImage::from_pixel(16, 16, Rgb([255, 255, 255]));
        // Way past the right edge; must not panic
        draw_bitmap_text(&mut canvas, "LONG TEXT PAST EDGE", 0, 0, 16);
    }

    #[test]
    fn draw_text_never_fails_without_fonts() {
        let fonts = FontSet {
            regular: None,
            bold: None,
        };
        let mut canvas = RgbImage::from_pixel(120, 40, Rgb([255, 255, 255]));
        fonts.draw_text(&mut canvas, "fallback", 2, 2, 16.0, Face::Bold);
        assert!(canvas.pixels().any(|p| *p == Rgb([0, 0, 0])));
    }
}
