//! Error types for coraline-core

use thiserror::Error;

/// Errors that can occur while building or validating the core data model
#[derive(Debug, Error)]
pub enum CoreError {
    /// Width or height is too small to hold the one-pixel inviolate frame
    #[error("invalid geometry: {width}x{height}")]
    InvalidGeometry { width: u32, height: u32 },

    /// Two buffers that are supposed to describe the same grid disagree in size
    #[error("dimension mismatch: expected {expected_w}x{expected_h}, got {actual_w}x{actual_h}")]
    DimensionMismatch {
        expected_w: u32,
        expected_h: u32,
        actual_w: u32,
        actual_h: u32,
    },

    /// A buffer's length does not match `width * height * channels`
    #[error("buffer length mismatch: expected {expected}, got {actual}")]
    BufferLengthMismatch { expected: usize, actual: usize },
}

/// Result type for coraline-core operations
pub type CoreResult<T> = Result<T, CoreError>;
