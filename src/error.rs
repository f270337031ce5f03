use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PicplusError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image processing error: {0}")]
    ImageProcessing(#[from] image::ImageError),

    #[error("Walkdir error: {0}")]
    Walkdir(#[from] walkdir::Error),

    #[error("No input files given and nothing was piped on stdin")]
    NoInput,

    #[error("Unknown strategy: {0}\nAvailable strategies: gifsicle, jpegtran, optipng, svgo")]
    UnknownStrategy(String),

    #[error("{0}")]
    OutputSink(String),

    #[error("Failed to create output directory: {0}")]
    DirectoryCreationFailed(PathBuf),

    #[error("Unsupported format for resize: {0}")]
    UnsupportedFormat(String),

    #[error("Compression failed: {0}")]
    CompressionFailed(String),

    #[error("Resize failed: {0}")]
    ResizeFailed(String),

    #[error("Invalid quality value: {0}. Must be between 1 and 100")]
    InvalidQuality(u8),

    #[error("Invalid width: {0}. Must be a positive integer")]
    InvalidWidth(u32),

    #[error("A target --width is required for resize")]
    MissingWidth,

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("File too large: {0} bytes. Maximum allowed: {1} bytes")]
    FileTooLarge(u64, u64),

    #[error("No image files found in input path: {0}")]
    NoImageFilesFound(String),
}

pub type Result<T> = std::result::Result<T, PicplusError>;
