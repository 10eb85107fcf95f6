//! Error types for coraline-geodesic

use thiserror::Error;

/// Errors that can occur while computing a geodesic labelling
#[derive(Debug, Error)]
pub enum GeodesicError {
    /// Core library error, usually a dimension mismatch between inputs
    #[error("core error: {0}")]
    Core(#[from] coraline_core::CoreError),

    /// `probs` must have one entry per pixel
    #[error("probs length {actual} does not match pixel count {expected}")]
    ProbsLengthMismatch { expected: usize, actual: usize },
}

/// Result type for coraline-geodesic operations
pub type GeodesicResult<T> = Result<T, GeodesicError>;
