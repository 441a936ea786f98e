//! Server-level error type

use thiserror::Error;

/// Errors surfaced while starting or running the server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Startup failed: {0}")]
    Startup(String),

    #[error("{0}")]
    App(#[from] crate::utils::AppError),
}

pub type Result<T> = std::result::Result<T, ServerError>;
