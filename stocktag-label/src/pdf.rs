//! Single-page PDF emission
//!
//! The composed canvas is embedded as a JPEG XObject scaled to a page whose
//! MediaBox matches the physical label size in points, so the spooler prints
//! at true scale.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

use crate::error::{LabelError, LabelResult};

/// JPEG quality for the embedded canvas
const JPEG_QUALITY: u8 = 85;

const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// Deterministic output filename for a record + size combination
///
/// Repeated renders for the same pair overwrite instead of accumulating.
pub fn label_filename(item_id: &str, size_mm: (u32, u32)) -> String {
    format!("label_{}_{}x{}.pdf", item_id, size_mm.0, size_mm.1)
}

/// Write `image` as a one-page PDF sized `size_mm` at `dpi` to `path`
pub fn write_pdf(image: &RgbImage, size_mm: (u32, u32), dpi: u32, path: &Path) -> LabelResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut jpeg = Vec::new();
    {
        let mut cursor = Cursor::new(&mut jpeg);
        let encoder = JpegEncoder::new_with_quality(&mut cursor, JPEG_QUALITY);
        image
            .write_with_encoder(encoder)
            .map_err(|e| LabelError::Pdf(format!("Failed to encode canvas: {e}")))?;
    }

    let width_pt = size_mm.0 as f32 * POINTS_PER_MM;
    let height_pt = size_mm.1 as f32 * POINTS_PER_MM;

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let image_id = doc.add_object(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => image.width() as i64,
            "Height" => image.height() as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
            "Filter" => "DCTDecode",
        },
        jpeg,
    ));

    // Scale the image XObject over the full page
    let content = Content {
        operations: vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    width_pt.into(),
                    0.into(),
                    0.into(),
                    height_pt.into(),
                    0.into(),
                    0.into(),
                ],
            ),
            Operation::new("Do", vec!["Lbl0".into()]),
            Operation::new("Q", vec![]),
        ],
    };
    let encoded = content
        .encode()
        .map_err(|e| LabelError::Pdf(format!("Failed to encode content stream: {e}")))?;
    let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

    let resources_id = doc.add_object(dictionary! {
        "XObject" => dictionary! { "Lbl0" => image_id },
    });

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "MediaBox" => vec![0.into(), 0.into(), width_pt.into(), height_pt.into()],
        "Contents" => content_id,
        "Resources" => resources_id,
    });

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    doc.save(path)
        .map_err(|e| LabelError::Pdf(format!("Failed to save document: {e}")))?;

    tracing::debug!(path = %path.display(), dpi, "Label PDF written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{LabelContent, LabelRenderer};

    #[test]
    fn filename_is_keyed_by_record_and_size() {
        assert_eq!(
            label_filename("7f9c0f3a", (50, 30)),
            "label_7f9c0f3a_50x30.pdf"
        );
    }

    #[test]
    fn written_file_starts_with_pdf_marker() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = LabelRenderer::new(300);
        let content = LabelContent {
            short_id: "abc1234".to_string(),
            title: Some("Test Item".to_string()),
            location: None,
            description: Some("This is a test description for a label.".to_string()),
        };
        let path = dir.path().join(label_filename("item-1", (50, 30)));
        renderer
            .render_to_pdf(&content, (50, 30), "http://localhost:3000", &path)
            .unwrap();

        assert!(path.exists());
        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn repeated_renders_overwrite_the_same_path() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = LabelRenderer::new(300);
        let content = LabelContent {
            short_id: "abc1234".to_string(),
            title: Some("Test Item".to_string()),
            location: None,
            description: None,
        };
        let path = dir.path().join(label_filename("item-1", (50, 30)));
        renderer
            .render_to_pdf(&content, (50, 30), "http://localhost:3000", &path)
            .unwrap();
        renderer
            .render_to_pdf(&content, (50, 30), "http://localhost:3000", &path)
            .unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
