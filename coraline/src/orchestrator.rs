//! The segmentation pipeline (C7): band extraction, color model, then
//! whichever solver `Config::method` selects.

use coraline_color::ColorModel;
use coraline_core::{Config, DepthMap, Mask, Method, Predictor, RgbImage};

use crate::error::{SegmentError, SegmentResult};

/// Builds up the optional inputs for one [`Segmenter::segment`] call over an
/// immutable [`Config`]. Mirrors the crate's other builder-style option
/// structs: construct with [`Segmenter::new`], chain `with_*` setters, then
/// call `segment`.
///
/// Because ownership of the image and mask stays with the caller and
/// `segment` only borrows them, the same `Segmenter` can be reused across
/// multiple calls (with different images) without reconstruction, and is
/// `Send + Sync` whenever its borrowed inputs are.
#[derive(Debug, Clone, Default)]
pub struct Segmenter<'a> {
    config: Config,
    depth: Option<&'a DepthMap>,
    predictor: Option<&'a Predictor>,
    clip_points: Option<&'a [(u32, u32)]>,
    geodesic_probs: Option<&'a [f64]>,
}

impl<'a> Segmenter<'a> {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            depth: None,
            predictor: None,
            clip_points: None,
            geodesic_probs: None,
        }
    }

    /// Supply a depth channel contributing to the pairwise smoothness term
    /// alongside color (§4.5). Absent by default.
    pub fn with_depth(mut self, depth: &'a DepthMap) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Supply an external predictor that overrides the data term wherever
    /// it has an opinion (§4.5). Absent by default.
    pub fn with_predictor(mut self, predictor: &'a Predictor) -> Self {
        self.predictor = Some(predictor);
        self
    }

    /// Seed the band from explicit clip points instead of the mask's own
    /// boundary (clip mode, §4.3). Border mode (the default) is used when
    /// this is absent.
    pub fn with_clip_points(mut self, clip_points: &'a [(u32, u32)]) -> Self {
        self.clip_points = Some(clip_points);
        self
    }

    /// Supply the per-pixel scalar field the geodesic solver (C6) measures
    /// path cost against. Required when `Config::method` is
    /// [`Method::Geodesic`]; ignored for [`Method::GraphCut`].
    pub fn with_geodesic_probs(mut self, probs: &'a [f64]) -> Self {
        self.geodesic_probs = Some(probs);
        self
    }

    /// Run one segmentation pass: extract the band, build the color model
    /// if `lambda > 0`, then hand the band to the configured solver.
    ///
    /// An empty band (the mask has no boundary to refine, or every clip
    /// point seeded a disk with nothing left to disagree about) is not an
    /// error: the input mask is returned unchanged.
    pub fn segment(&self, image: &RgbImage, mask: &Mask) -> SegmentResult<Mask> {
        mask.require_same_dims(image.dims())?;
        if let Some(depth) = self.depth {
            mask.require_same_dims(depth.dims())?;
        }
        if let Some(pred) = self.predictor {
            mask.require_same_dims(pred.dims())?;
        }

        let radius = self.config.radius();
        let distance = match self.clip_points {
            Some(points) => coraline_distance::compute_clips(image.dims(), points, radius)?,
            None => coraline_distance::compute_border(image.dims(), mask, radius),
        };

        if distance.pixels().is_empty() {
            return Ok(mask.clone());
        }

        match self.config.method() {
            Method::GraphCut => {
                let color_model = self.build_color_model(image, mask, &distance)?;
                let result = coraline_energy::cut(
                    image,
                    self.depth,
                    mask,
                    &distance,
                    color_model.as_ref(),
                    self.predictor,
                    &self.config,
                )?;
                Ok(result)
            }
            Method::Geodesic => {
                let probs = self.geodesic_probs.ok_or(SegmentError::MissingGeodesicProbs)?;
                let result = coraline_geodesic::label(mask, &distance, probs, radius)?;
                Ok(result)
            }
        }
    }

    fn build_color_model(
        &self,
        image: &RgbImage,
        mask: &Mask,
        distance: &coraline_distance::DistanceField,
    ) -> SegmentResult<Option<ColorModel>> {
        if self.config.lambda() <= 0.0 {
            return Ok(None);
        }
        let radius = self.config.radius();
        let confident: Vec<bool> = (0..image.dims().pixel_count())
            .map(|i| distance.is_confident(i, radius))
            .collect();
        let model = ColorModel::build(image, mask, &confident, self.config.bins_per_channel())?;
        Ok(Some(model))
    }
}
