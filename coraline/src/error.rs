//! Error types for the coraline orchestrator

use thiserror::Error;

/// Errors that can occur while running a segmentation pass
#[derive(Debug, Error)]
pub enum SegmentError {
    /// Core library error, usually a dimension mismatch between inputs
    #[error("core error: {0}")]
    Core(#[from] coraline_core::CoreError),

    /// Band extraction error
    #[error("distance field error: {0}")]
    Distance(#[from] coraline_distance::DistanceError),

    /// Color model error
    #[error("color model error: {0}")]
    Color(#[from] coraline_color::ColorError),

    /// Graph-cut energy error
    #[error("energy error: {0}")]
    Energy(#[from] coraline_energy::EnergyError),

    /// Geodesic labelling error
    #[error("geodesic error: {0}")]
    Geodesic(#[from] coraline_geodesic::GeodesicError),

    /// [`coraline_core::Method::Geodesic`] was selected without supplying
    /// `geodesic_probs` via [`crate::Segmenter::with_geodesic_probs`]
    #[error("geodesic method requires geodesic_probs to be set")]
    MissingGeodesicProbs,
}

/// Result type for coraline orchestration
pub type SegmentResult<T> = Result<T, SegmentError>;
