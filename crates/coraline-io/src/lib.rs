//! coraline-io - PPM image I/O and mask format adapters for Coraline (C8)

mod error;
mod mask;
mod ppm;

pub use error::{IoError, IoResult};
pub use mask::{draw_border, rgb_to_mask};
pub use ppm::{read_ppm, read_ppm_as_depth, write_ppm};
