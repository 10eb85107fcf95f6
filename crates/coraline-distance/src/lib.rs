//! coraline-distance - Bounded chamfer distance transform for Coraline (C3)
//!
//! Extracts the processing band: a breadth-limited, 8-connected chamfer
//! wave from the input mask's boundary (or from explicit clip points),
//! stopping once a pixel's distance would exceed the configured radius.

mod chamfer;
mod error;

pub use chamfer::{DistanceField, UNREACHED, compute_border, compute_clips};
pub use error::{DistanceError, DistanceResult};
