//! Error types for coraline-energy

use thiserror::Error;

/// Errors that can occur while building or solving the graph-cut energy
#[derive(Debug, Error)]
pub enum EnergyError {
    /// Core library error, usually a dimension mismatch between inputs
    #[error("core error: {0}")]
    Core(#[from] coraline_core::CoreError),

    /// Flow network error raised while building or solving the min-cut
    #[error("graph error: {0}")]
    Graph(#[from] coraline_graph::GraphError),
}

/// Result type for coraline-energy operations
pub type EnergyResult<T> = Result<T, EnergyError>;
