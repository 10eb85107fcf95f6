//! Error types for coraline-io

use thiserror::Error;

/// Errors that can occur while reading or writing image files
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a binary PPM (P6), or its header is malformed
    #[error("invalid PPM data: {0}")]
    InvalidData(String),

    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] coraline_core::CoreError),
}

/// Result type for coraline-io operations
pub type IoResult<T> = Result<T, IoError>;
