//! Error types for coraline-graph

use thiserror::Error;

/// Errors that can occur while building or solving a flow network
#[derive(Debug, Error)]
pub enum GraphError {
    /// A capacity passed to `add_tweights`/`add_edge` was negative
    #[error("negative capacity {0} passed to flow network (programmer error)")]
    NegativeCapacity(f64),

    /// A capacity became non-finite (NaN or infinite) during construction
    #[error("non-finite capacity reached the flow solver")]
    CapacityOverflow,

    /// A node index was out of range for this graph
    #[error("node index {0} out of range (graph has {1} nodes)")]
    InvalidNode(usize, usize),

    /// `what_segment` was called before `maxflow`
    #[error("what_segment called before maxflow")]
    NotSolved,
}

/// Result type for coraline-graph operations
pub type GraphResult<T> = Result<T, GraphError>;
