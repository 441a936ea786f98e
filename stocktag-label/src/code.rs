//! Scannable code encoders
//!
//! Rasterizes QR (2D) and Code128 (1D) symbologies into 24-bit `RgbImage`
//! buffers so downstream composition works on a single pixel format.

use image::{Luma, Rgb, RgbImage};
use qrcode::QrCode;

use crate::error::{LabelError, LabelResult};

const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Code128 bar width in pixels
const BAR_WIDTH: u32 = 2;
/// Code128 bar height in pixels
const BAR_HEIGHT: u32 = 80;
/// Code128 quiet zone on each side, in pixels
const QUIET_ZONE: u32 = 10;

/// Encode `text` as a QR code raster image.
///
/// The output is strictly square, black modules on white. `module_scale` is
/// the edge length of one module in pixels; `border_modules` is the white
/// frame width in modules. The module layout is deterministic for identical
/// inputs.
pub fn encode_qr(text: &str, module_scale: u32, border_modules: u32) -> LabelResult<RgbImage> {
    if text.is_empty() {
        return Err(LabelError::Encoding("QR payload is empty".to_string()));
    }

    let code = QrCode::new(text.as_bytes())
        .map_err(|e| LabelError::Encoding(format!("QR capacity exceeded: {e}")))?;

    let module_scale = module_scale.max(1);
    let modules = code
        .render::<Luma<u8>>()
        .quiet_zone(false)
        .module_dimensions(module_scale, module_scale)
        .build();

    // Pad with the requested quiet zone and convert to RGB
    let border = border_modules * module_scale;
    let size = modules.width() + border * 2;
    let mut out = RgbImage::from_pixel(size, size, WHITE);
    for (x, y, pixel) in modules.enumerate_pixels() {
        if pixel.0[0] < 128 {
            out.put_pixel(x + border, y + border, BLACK);
        }
    }

    Ok(out)
}

/// Encode `text` as a Code128 barcode raster image (charset B).
pub fn encode_code128(text: &str) -> LabelResult<RgbImage> {
    if text.is_empty() {
        return Err(LabelError::Encoding("Code128 payload is empty".to_string()));
    }

    // Leading \u{0181} selects Code128 character set B (printable ASCII)
    let payload = format!("\u{0181}{text}");
    let code = barcoders::sym::code128::Code128::new(payload)
        .map_err(|e| LabelError::Encoding(format!("Code128: {e}")))?;
    let bars = code.encode();

    let width = bars.len() as u32 * BAR_WIDTH + QUIET_ZONE * 2;
    let height = BAR_HEIGHT + QUIET_ZONE * 2;
    let mut out = RgbImage::from_pixel(width, height, WHITE);
    for (i, bar) in bars.iter().enumerate() {
        if *bar == 1 {
            let x0 = QUIET_ZONE + i as u32 * BAR_WIDTH;
            for x in x0..x0 + BAR_WIDTH {
                for y in QUIET_ZONE..QUIET_ZONE + BAR_HEIGHT {
                    out.put_pixel(x, y, BLACK);
                }
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qr_is_square() {
        let img = encode_qr("http://example.com", 4, 2).unwrap();
        assert_eq!(img.width(), img.height());
    }

    #[test]
    fn qr_is_deterministic() {
        let a = encode_qr("http://example.com/i/abc1234", 4, 2).unwrap();
        let b = encode_qr("http://example.com/i/abc1234", 4, 2).unwrap();
        assert_eq!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn qr_differs_for_different_payloads() {
        let a = encode_qr("http://example.com/i/abc1234", 4, 2).unwrap();
        let b = encode_qr("http://example.com/i/zzz9999", 4, 2).unwrap();
        assert_ne!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn qr_rejects_empty_payload() {
        assert!(matches!(
            encode_qr("", 4, 2),
            Err(LabelError::Encoding(_))
        ));
    }

    #[test]
    fn qr_rejects_oversized_payload() {
        // Well beyond the ~3KB byte-mode ceiling of version 40
        let huge = "x".repeat(8000);
        assert!(matches!(
            encode_qr(&huge, 4, 2),
            Err(LabelError::Encoding(_))
        ));
    }

    #[test]
    fn code128_renders_bars() {
        let img = encode_code128("ABC-1234").unwrap();
        assert!(img.width() > QUIET_ZONE * 2);
        assert_eq!(img.height(), BAR_HEIGHT + QUIET_ZONE * 2);
        // At least one black column must exist
        assert!(img.pixels().any(|p| *p == Rgb([0, 0, 0])));
    }

    #[test]
    fn code128_rejects_empty_payload() {
        assert!(matches!(
            encode_code128(""),
            Err(LabelError::Encoding(_))
        ));
    }
}
