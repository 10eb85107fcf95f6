//! coraline-graph - Flow network min-cut solver for Coraline (C2)
//!
//! A generic s-t min-cut solver over a sparse directed graph with two
//! implicit terminals, built once per segmentation and solved with Dinic's
//! blocking-flow algorithm.

mod error;
mod network;

pub use error::{GraphError, GraphResult};
pub use network::{FlowNetwork, Segment};
