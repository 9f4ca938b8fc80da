//! Error types shared by every entry point.

use std::path::PathBuf;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Selected region is not valid")]
    InvalidSelection,

    #[error("Region selection not confirmed after {attempts} attempts")]
    RetriesExhausted { attempts: usize },

    #[error("Cannot open source file {}", path.display())]
    SourceUnavailable { path: PathBuf },

    #[error("Screen capture failed: {0}")]
    Capture(String),

    #[error("Encoding failed: {0}")]
    Encode(String),

    #[error("User interface error: {0}")]
    Ui(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}
