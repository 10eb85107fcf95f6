//! coraline-core - Core data model and grid geometry for Coraline
//!
//! This crate provides the foundational types shared by every Coraline
//! component:
//!
//! - **Grid geometry** (C1) - index arithmetic, 8-neighborhood iteration
//!   with border safety, and chamfer weights.
//! - **Data model** - [`RgbImage`], [`DepthMap`], [`Mask`], and [`Predictor`],
//!   the raw-buffer views every other crate operates on.
//! - **Configuration** - [`Config`], the single immutable value that governs
//!   one segmentation call.

mod config;
mod error;
mod grid;
mod image;

pub use config::{Config, Method};
pub use error::{CoreError, CoreResult};
pub use grid::{
    DIAGONAL_WEIGHT, Dimensions, NEIGHBOR_DELTAS, NEIGHBOR_WEIGHTS, ORTHOGONAL_WEIGHT, is_boundary,
};
pub use image::{DepthMap, Label, Mask, Predictor, RgbImage};
