//! Quantized 3D RGB histogram color model (C4).
//!
//! Foreground and background color histograms are accumulated from the
//! confident pixels outside the processing band (those whose chamfer
//! distance reached the radius), then turned into a per-pixel likelihood
//! with a saturated rule: a bin seen almost exclusively on one side of the
//! mask votes that side at full strength, a bin seen on both sides (or
//! neither, often enough) abstains at 0.5/0.5.

use coraline_core::{Label, Mask, RgbImage};

use crate::error::{ColorError, ColorResult};

/// Histogram bins below this count are considered statistically
/// insignificant and do not saturate a pixel's likelihood.
const SATURATION_THRESHOLD: f64 = 50.0;

/// A learned foreground/background color model over a quantized RGB cube.
#[derive(Debug, Clone)]
pub struct ColorModel {
    bins_per_channel: u32,
    fore_hist: Vec<f64>,
    back_hist: Vec<f64>,
}

impl ColorModel {
    /// Accumulate foreground/background histograms from every pixel marked
    /// `confident[i]`, binned by `mask[i]`. Pixels outside the confident set
    /// never vote.
    pub fn build(
        image: &RgbImage,
        mask: &Mask,
        confident: &[bool],
        bins_per_channel: u32,
    ) -> ColorResult<Self> {
        if bins_per_channel == 0 {
            return Err(ColorError::InvalidBinCount(bins_per_channel));
        }
        let pixel_count = image.dims().pixel_count();
        if confident.len() != pixel_count {
            return Err(ColorError::ConfidenceLengthMismatch {
                expected: pixel_count,
                actual: confident.len(),
            });
        }
        mask.require_same_dims(image.dims())?;

        let bins = bins_per_channel as usize;
        let mut fore_hist = vec![0.0f64; bins * bins * bins];
        let mut back_hist = vec![0.0f64; bins * bins * bins];

        let stride = 256 / bins_per_channel;
        for i in 0..pixel_count {
            if !confident[i] {
                continue;
            }
            let bin = quantized_bin(image.pixel(i), stride, bins_per_channel);
            match mask.label(i) {
                Label::Foreground => fore_hist[bin] += 1.0,
                Label::Background => back_hist[bin] += 1.0,
            }
        }

        Ok(Self {
            bins_per_channel,
            fore_hist,
            back_hist,
        })
    }

    /// Foreground/background likelihood for `rgb`, each in `[0.0, 100.0]`.
    /// Defaults to `(0.5, 0.5)` when neither histogram bin is populated
    /// enough to be trusted.
    pub fn likelihood(&self, rgb: [u8; 3]) -> (f64, f64) {
        let stride = 256 / self.bins_per_channel;
        let bin = quantized_bin(rgb, stride, self.bins_per_channel);
        let fore = self.fore_hist[bin];
        let back = self.back_hist[bin];

        if back < SATURATION_THRESHOLD && fore < SATURATION_THRESHOLD {
            (0.5, 0.5)
        } else if back < SATURATION_THRESHOLD {
            (100.0, 0.0)
        } else if fore < SATURATION_THRESHOLD {
            (0.0, 100.0)
        } else {
            (0.5, 0.5)
        }
    }

    pub fn bins_per_channel(&self) -> u32 {
        self.bins_per_channel
    }
}

fn quantized_bin(rgb: [u8; 3], stride: u32, bins_per_channel: u32) -> usize {
    let depth = bins_per_channel as usize;
    let r = (rgb[0] as u32 / stride) as usize;
    let g = (rgb[1] as u32 / stride) as usize;
    let b = (rgb[2] as u32 / stride) as usize;
    r + g * depth + b * depth * depth
}

#[cfg(test)]
mod tests {
    use super::*;
    use coraline_core::Dimensions;

    fn solid_image(dims: Dimensions, rgb: [u8; 3]) -> RgbImage {
        let mut data = Vec::with_capacity(dims.pixel_count() * 3);
        for _ in 0..dims.pixel_count() {
            data.extend_from_slice(&rgb);
        }
        RgbImage::new(dims.width(), dims.height(), data).unwrap()
    }

    #[test]
    fn rejects_zero_bins() {
        let dims = Dimensions::new(4, 4).unwrap();
        let image = solid_image(dims, [0, 0, 0]);
        let mask = Mask::zeros(dims);
        let confident = vec![true; dims.pixel_count()];
        assert!(ColorModel::build(&image, &mask, &confident, 0).is_err());
    }

    #[test]
    fn rejects_mismatched_confidence_length() {
        let dims = Dimensions::new(4, 4).unwrap();
        let image = solid_image(dims, [0, 0, 0]);
        let mask = Mask::zeros(dims);
        assert!(ColorModel::build(&image, &mask, &[true, false], 16).is_err());
    }

    #[test]
    fn unseen_bin_defaults_to_uncertain() {
        let dims = Dimensions::new(4, 4).unwrap();
        let image = solid_image(dims, [10, 10, 10]);
        let mask = Mask::zeros(dims);
        let confident = vec![false; dims.pixel_count()];
        let model = ColorModel::build(&image, &mask, &confident, 16).unwrap();
        assert_eq!(model.likelihood([200, 200, 200]), (0.5, 0.5));
    }

    #[test]
    fn saturated_foreground_bin_votes_foreground() {
        let dims = Dimensions::new(16, 16).unwrap();
        let image = solid_image(dims, [250, 10, 10]);
        let mut raw = vec![0u8; dims.pixel_count()];
        for v in raw.iter_mut() {
            *v = 1;
        }
        let mask = Mask::new(dims.width(), dims.height(), raw).unwrap();
        let confident = vec![true; dims.pixel_count()];
        let model = ColorModel::build(&image, &mask, &confident, 16).unwrap();
        let (fore, back) = model.likelihood([250, 10, 10]);
        assert!(fore > back);
    }

    #[test]
    fn mixed_bin_with_both_sides_saturated_abstains() {
        let dims = Dimensions::new(16, 16).unwrap();
        let image = solid_image(dims, [128, 128, 128]);
        let mut raw = vec![0u8; dims.pixel_count()];
        for (i, v) in raw.iter_mut().enumerate() {
            *v = (i % 2) as u8;
        }
        let mask = Mask::new(dims.width(), dims.height(), raw).unwrap();
        let confident = vec![true; dims.pixel_count()];
        let model = ColorModel::build(&image, &mask, &confident, 16).unwrap();
        assert_eq!(model.likelihood([128, 128, 128]), (0.5, 0.5));
    }
}
