//! coraline-geodesic - Two-source geodesic shortest-path labelling for
//! Coraline (C6)
//!
//! An alternative to the graph-cut solver (C5): confident foreground and
//! background pixels compete to claim each band pixel via a Dijkstra-style
//! shortest path through a caller-supplied scalar field.

mod dijkstra;
mod error;

pub use dijkstra::label;
pub use error::{GeodesicError, GeodesicResult};
