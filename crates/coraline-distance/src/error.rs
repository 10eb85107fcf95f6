//! Error types for coraline-distance

use thiserror::Error;

/// Errors that can occur while computing a distance field
#[derive(Debug, Error)]
pub enum DistanceError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] coraline_core::CoreError),

    /// A clip point lies outside the image or on the one-pixel frame
    #[error("clip point ({x}, {y}) is not an interior pixel of a {width}x{height} image")]
    InvalidClipPoint { x: u32, y: u32, width: u32, height: u32 },
}

/// Result type for coraline-distance operations
pub type DistanceResult<T> = Result<T, DistanceError>;
