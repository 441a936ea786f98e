//! Error types for the label library

use thiserror::Error;

/// Label rendering error types
#[derive(Debug, Error)]
pub enum LabelError {
    /// Payload cannot be encoded into the requested symbology
    #[error("Encoding failed: {0}")]
    Encoding(String),

    /// Canvas composition error
    #[error("Render failed: {0}")]
    Render(String),

    /// PDF document assembly error
    #[error("PDF generation failed: {0}")]
    Pdf(String),

    /// IO error while persisting output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for label operations
pub type LabelResult<T> = Result<T, LabelError>;
