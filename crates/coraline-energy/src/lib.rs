//! coraline-energy - Grid graph-cut energy construction and min-cut for
//! Coraline (C5)
//!
//! Wires the processing band into a grid flow network with the soft data
//! term of the color model, a signed distance-to-boundary penalty, and an
//! exponential color/depth smoothness term, then reads the min-cut back
//! into a refined mask.

mod error;
mod graphcut;

pub use error::{EnergyError, EnergyResult};
pub use graphcut::cut;
