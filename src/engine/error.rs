//! Error types shared by the engine, renderer and export path

use std::io;
use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, TextcardError>;

#[derive(Error, Debug)]
pub enum TextcardError {
    /// Export attempted with empty or whitespace-only text
    #[error("Please enter some text before downloading!")]
    EmptyText,

    /// Color string is not `#RRGGBB` / `#RGB`
    #[error("Invalid color: {0:?}")]
    InvalidColor(String),

    /// Surface scale must be finite and positive
    #[error("Invalid scale factor: {0}")]
    InvalidScale(f32),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A second export was triggered while one is still running
    #[error("An export is already in progress")]
    ExportInProgress,

    #[error("Image encoding failed: {0}")]
    Encode(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<image::ImageError> for TextcardError {
    fn from(err: image::ImageError) -> Self {
        TextcardError::Encode(err.to_string())
    }
}
