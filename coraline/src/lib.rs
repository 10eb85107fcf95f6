//! coraline - Interactive mask refinement (C7)
//!
//! Ties the band extractor (C3), color model (C4), and the graph-cut (C5)
//! or geodesic (C6) solver into one pipeline: given a rough foreground mask
//! and the image it was drawn over, refine the mask's boundary to follow
//! the underlying image structure within a bounded radius.
//!
//! ```
//! use coraline::Segmenter;
//! use coraline_core::{Config, Mask, RgbImage};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let image = RgbImage::new(4, 4, vec![128u8; 4 * 4 * 3])?;
//! let mask = Mask::zeros(image.dims());
//! let segmenter = Segmenter::new(Config::default());
//! let refined = segmenter.segment(&image, &mask)?;
//! assert_eq!(refined.dims(), image.dims());
//! # Ok(())
//! # }
//! ```

mod error;
mod orchestrator;

pub use coraline_core::{Config, DepthMap, Label, Mask, Method, Predictor, RgbImage};
pub use error::{SegmentError, SegmentResult};
pub use orchestrator::Segmenter;
