//! coraline-color - Quantized RGB color model (C4) for Coraline
//!
//! Builds a foreground/background histogram over a quantized RGB cube from
//! the confident pixels surrounding the processing band, and exposes a
//! saturated per-pixel likelihood used as the graph cut's data term.

mod error;
mod histogram;

pub use error::{ColorError, ColorResult};
pub use histogram::ColorModel;
