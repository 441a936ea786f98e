//! # stocktag-label
//!
//! Label rendering library - low-level rendering capabilities only.
//!
//! ## Scope
//!
//! This crate handles HOW to render:
//! - QR and Code128 raster encoding
//! - Canvas composition at physical size / print resolution
//! - TrueType text with a built-in bitmap fallback
//! - Single-page PDF emission
//!
//! Business logic (WHAT to render, WHEN to print) should stay in application
//! code:
//! - Record lookup and print dispatch → stocktag-server
//!
//! ## Example
//!
//! ```ignore
//! use stocktag_label::{LabelContent, LabelRenderer};
//!
//! let renderer = LabelRenderer::new(300);
//! let content = LabelContent {
//!     short_id: "abc1234".into(),
//!     title: Some("Stainless Steel Watering Can".into()),
//!     location: Some("Shelf B3".into()),
//!     description: None,
//! };
//! renderer.render_to_pdf(
//!     &content,
//!     (50, 30),
//!     "https://tags.example.com",
//!     "labels/label_x_50x30.pdf".as_ref(),
//! )?;
//! ```

mod code;
mod compose;
mod error;
mod font;
mod pdf;

// Re-exports
pub use code::{encode_code128, encode_qr};
pub use compose::{mm_to_px, public_url, truncate_with_ellipsis, LabelContent, LabelRenderer};
pub use error::{LabelError, LabelResult};
pub use font::{Face, FontSet};
pub use pdf::{label_filename, write_pdf};
