//! Label canvas composition
//!
//! Turns an asset record's display fields into a pixel-accurate canvas at a
//! requested physical size and print resolution. Geometry is fixed: scannable
//! code on the left, text column on the right, human-readable URL at the
//! bottom.

use std::path::Path;

use image::imageops::FilterType;
use image::{Rgb, RgbImage};

use crate::code::encode_qr;
use crate::error::LabelResult;
use crate::font::{Face, FontSet};
use crate::pdf::write_pdf;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Left margin of the code, in pixels
const QR_MARGIN: u32 = 10;
/// Gap between code and text column, in pixels
const TEXT_PADDING: u32 = 20;
/// White frame around the QR, in modules
const QR_BORDER_MODULES: u32 = 2;

const TITLE_SIZE: f32 = 48.0;
const BODY_SIZE: f32 = 28.0;
const SMALL_SIZE: f32 = 24.0;
const LINE_SPACING: u32 = 4;

/// Title character budget before ellipsis truncation
const TITLE_MAX_CHARS: usize = 60;
/// Description character budget
const DESC_MAX_CHARS: usize = 140;
/// Description wrap width in characters
const DESC_WRAP_CHARS: usize = 38;
/// Maximum wrapped description lines
const DESC_MAX_LINES: usize = 3;

const TITLE_PLACEHOLDER: &str = "Untitled Item";
const LOCATION_PLACEHOLDER: &str = "-";

/// Display fields of the record being labelled
///
/// Absent optional fields render as defined placeholders, never as errors.
#[derive(Debug, Clone, Default)]
pub struct LabelContent {
    pub short_id: String,
    pub title: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

/// Renders label canvases at a fixed print resolution
pub struct LabelRenderer {
    dpi: u32,
    fonts: FontSet,
}

impl LabelRenderer {
    /// Create a renderer for the given dots-per-inch resolution
    pub fn new(dpi: u32) -> Self {
        Self {
            dpi,
            fonts: FontSet::load(),
        }
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Compose the label canvas for `content` at `size_mm` physical size
    pub fn render(
        &self,
        content: &LabelContent,
        size_mm: (u32, u32),
        base_url: &str,
    ) -> LabelResult<RgbImage> {
        let (width_mm, height_mm) = size_mm;
        let width_px = mm_to_px(width_mm, self.dpi);
        let height_px = mm_to_px(height_mm, self.dpi);
        let mut canvas = RgbImage::from_pixel(width_px, height_px, WHITE);

        let url = public_url(base_url, &content.short_id);

        // Code density scales with label width
        let module_scale = (width_px / 120).max(2);
        let qr = encode_qr(&url, module_scale, QR_BORDER_MODULES)?;
        let qr_size = height_px.saturating_sub(20).min(width_px / 2).max(1);
        let qr = image::imageops::resize(&qr, qr_size, qr_size, FilterType::Nearest);
        let qr_y = (height_px.saturating_sub(qr_size)) / 2;
        image::imageops::overlay(&mut canvas, &qr, QR_MARGIN as i64, qr_y as i64);

        let text_x = (QR_MARGIN + qr_size + TEXT_PADDING) as i32;

        let title = truncate_with_ellipsis(
            content.title.as_deref().unwrap_or(TITLE_PLACEHOLDER),
            TITLE_MAX_CHARS,
        );
        self.fonts
            .draw_text(&mut canvas, &title, text_x, qr_y as i32, TITLE_SIZE, Face::Bold);

        let meta = format!(
            "#{} \u{2022} Loc: {}",
            content.short_id,
            content.location.as_deref().unwrap_or(LOCATION_PLACEHOLDER)
        );
        self.fonts.draw_text(
            &mut canvas,
            &meta,
            text_x,
            qr_y as i32 + 60,
            BODY_SIZE,
            Face::Regular,
        );

        let desc = truncate_with_ellipsis(
            content.description.as_deref().unwrap_or(""),
            DESC_MAX_CHARS,
        );
        for (line_no, line) in wrap_text(&desc, DESC_WRAP_CHARS)
            .iter()
            .take(DESC_MAX_LINES)
            .enumerate()
        {
            let line_y = qr_y as i32 + 110 + line_no as i32 * (BODY_SIZE as i32 + LINE_SPACING as i32);
            self.fonts
                .draw_text(&mut canvas, line, text_x, line_y, BODY_SIZE, Face::Regular);
        }

        // Human-readable fallback for scanners that fail
        let short_url = strip_scheme(&url);
        self.fonts.draw_text(
            &mut canvas,
            short_url,
            text_x,
            height_px.saturating_sub(40) as i32,
            SMALL_SIZE,
            Face::Regular,
        );

        Ok(canvas)
    }

    /// Compose and persist the label as a single-page PDF at `path`
    pub fn render_to_pdf(
        &self,
        content: &LabelContent,
        size_mm: (u32, u32),
        base_url: &str,
        path: &Path,
    ) -> LabelResult<()> {
        let canvas = self.render(content, size_mm, base_url)?;
        write_pdf(&canvas, size_mm, self.dpi, path)
    }
}

/// Millimeters to pixels at the given resolution
pub fn mm_to_px(mm: u32, dpi: u32) -> u32 {
    (mm as f64 / 25.4 * dpi as f64) as u32
}

/// Public lookup URL for a short identifier
pub fn public_url(base_url: &str, short_id: &str) -> String {
    format!("{}/i/{}", base_url.trim_end_matches('/'), short_id)
}

/// Shorten `text` to at most `max_chars` characters, ending with `…` when cut
pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('\u{2026}');
    out
}

fn strip_scheme(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

/// Greedy word wrap at `width` characters per line
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let candidate_len = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if candidate_len > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mm_conversion_truncates_at_300_dpi() {
        assert_eq!(mm_to_px(50, 300), 590);
        assert_eq!(mm_to_px(30, 300), 354);
    }

    #[test]
    fn public_url_strips_trailing_slash() {
        assert_eq!(
            public_url("http://localhost:3000/", "abc1234"),
            "http://localhost:3000/i/abc1234"
        );
    }

    #[test]
    fn short_title_is_unchanged() {
        assert_eq!(truncate_with_ellipsis("Drill", 60), "Drill");
    }

    #[test]
    fn title_at_budget_is_unchanged() {
        let exact = "x".repeat(60);
        assert_eq!(truncate_with_ellipsis(&exact, 60), exact);
    }

    #[test]
    fn long_title_ends_with_ellipsis() {
        let long = "x".repeat(100);
        let cut = truncate_with_ellipsis(&long, 60);
        assert_eq!(cut.chars().count(), 60);
        assert!(cut.ends_with('\u{2026}'));
    }

    #[test]
    fn wrap_respects_width() {
        let lines = wrap_text("a durable can suitable for indoor and outdoor plants", 20);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| l.chars().count() <= 20));
    }

    #[test]
    fn render_handles_missing_optional_fields() {
        let renderer = LabelRenderer::new(300);
        let content = LabelContent {
            short_id: "abc1234".to_string(),
            title: None,
            location: None,
            description: None,
        };
        let canvas = renderer
            .render(&content, (50, 30), "http://localhost:3000")
            .unwrap();
        assert_eq!(canvas.width(), 590);
        assert_eq!(canvas.height(), 354);
    }

    #[test]
    fn render_covers_every_preset_size() {
        let renderer = LabelRenderer::new(300);
        let content = LabelContent {
            short_id: "abc1234".to_string(),
            title: Some("Test Item".to_string()),
            location: Some("Shelf B3".to_string()),
            description: Some("This is a test description for a label.".to_string()),
        };
        for (w, h) in [(50, 30), (40, 30), (62, 30)] {
            let canvas = renderer
                .render(&content, (w, h), "http://localhost:3000")
                .unwrap();
            assert_eq!(canvas.width(), mm_to_px(w, 300));
            assert_eq!(canvas.height(), mm_to_px(h, 300));
        }
    }
}
