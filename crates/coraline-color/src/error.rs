//! Error types for coraline-color

use thiserror::Error;

/// Errors that can occur while building or querying a color model
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] coraline_core::CoreError),

    /// `bins_per_channel` must be at least 1 (and `bins_per_channel^3` must
    /// fit in memory as a histogram).
    #[error("bins_per_channel must be at least 1, got {0}")]
    InvalidBinCount(u32),

    /// The confidence mask's length doesn't match the image's pixel count.
    #[error("confidence mask length {actual} does not match pixel count {expected}")]
    ConfidenceLengthMismatch { expected: usize, actual: usize },
}

/// Result type for coraline-color operations
pub type ColorResult<T> = Result<T, ColorError>;
