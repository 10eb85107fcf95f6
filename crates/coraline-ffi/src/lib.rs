//! C ABI shim for Coraline (C9): a single `coraline_segment` entry point for
//! scripting callers, grounded in the original `coralinepy.cpp` binding.
//!
//! Unlike the literal source, this shim never writes diagnostic PPMs to the
//! working directory as a side effect of running a segmentation: that
//! behavior was debug scaffolding, not part of the contract, and is out of
//! scope here (§6).

use std::slice;

use coraline::{Config, Mask, RgbImage, Segmenter};
use coraline_core::Dimensions;

/// Refine `mask` in place given `img` (and optionally `depth`), following
/// §6's C ABI signature.
///
/// Returns `0` on success, `-1` if `w`/`h`/`nclips` describe an invalid
/// geometry, or `-2` if the segmentation itself fails (e.g. a clip point
/// outside the image interior).
///
/// # Safety
///
/// - `img` must point to `w * h * 3` readable bytes.
/// - `depth`, if non-null, must point to `w * h` readable bytes.
/// - `mask` must point to `w * h` readable and writable bytes; it is
///   overwritten with the refined labels on success and left untouched on
///   failure.
/// - `clippoints`, if non-null, must point to `nclips * 2` readable `i32`s
///   (interleaved `x, y` pairs).
#[unsafe(no_mangle)]
pub unsafe extern "C" fn coraline_segment(
    img: *const u8,
    depth: *const u8,
    mask: *mut u8,
    w: i32,
    h: i32,
    clippoints: *const i32,
    nclips: i32,
    lambda: f32,
    conservative: f32,
    grow: f32,
    radius: f32,
    depth_weight: f32,
) -> i32 {
    if w <= 0 || h <= 0 || nclips < 0 || img.is_null() || mask.is_null() {
        return -1;
    }
    let Ok(dims) = Dimensions::new(w as u32, h as u32) else {
        return -1;
    };

    let img_slice = unsafe { slice::from_raw_parts(img, dims.pixel_count() * 3) };
    let Ok(image) = RgbImage::new(dims.width(), dims.height(), img_slice.to_vec()) else {
        return -1;
    };

    let depth_map = if depth.is_null() {
        None
    } else {
        let depth_slice = unsafe { slice::from_raw_parts(depth, dims.pixel_count()) };
        match coraline_core::DepthMap::new(dims.width(), dims.height(), depth_slice.to_vec()) {
            Ok(d) => Some(d),
            Err(_) => return -1,
        }
    };

    let mask_slice = unsafe { slice::from_raw_parts(mask, dims.pixel_count()) };
    let Ok(input_mask) = Mask::new(dims.width(), dims.height(), mask_slice.to_vec()) else {
        return -1;
    };

    let clip_points = if clippoints.is_null() || nclips == 0 {
        None
    } else {
        let raw = unsafe { slice::from_raw_parts(clippoints, nclips as usize * 2) };
        Some(
            raw.chunks_exact(2)
                .map(|pair| (pair[0] as u32, pair[1] as u32))
                .collect::<Vec<_>>(),
        )
    };

    let config = Config::new()
        .with_lambda(lambda as f64)
        .with_conservative(conservative as f64)
        .with_grow(grow as f64)
        .with_radius(radius as f64)
        .with_depth_weight(depth_weight as f64);

    let mut segmenter = Segmenter::new(config);
    if let Some(d) = depth_map.as_ref() {
        segmenter = segmenter.with_depth(d);
    }
    if let Some(points) = clip_points.as_deref() {
        segmenter = segmenter.with_clip_points(points);
    }

    let result = match segmenter.segment(&image, &input_mask) {
        Ok(result) => result,
        Err(_) => return -2,
    };

    let out = unsafe { slice::from_raw_parts_mut(mask, dims.pixel_count()) };
    out.copy_from_slice(result.raw());
    0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_nonpositive_dimensions() {
        let img = [0u8; 3];
        let mut mask = [0u8; 1];
        let code = unsafe {
            coraline_segment(
                img.as_ptr(),
                std::ptr::null(),
                mask.as_mut_ptr(),
                0,
                1,
                std::ptr::null(),
                0,
                0.0,
                0.2,
                0.0,
                30.0,
                0.0,
            )
        };
        assert_eq!(code, -1);
    }

    #[test]
    fn round_trips_a_uniform_mask_unchanged() {
        let dims = Dimensions::new(6, 6).unwrap();
        let img = vec![128u8; dims.pixel_count() * 3];
        let mut mask = vec![0u8; dims.pixel_count()];

        let code = unsafe {
            coraline_segment(
                img.as_ptr(),
                std::ptr::null(),
                mask.as_mut_ptr(),
                6,
                6,
                std::ptr::null(),
                0,
                0.0,
                0.2,
                0.0,
                3.0,
                0.0,
            )
        };

        assert_eq!(code, 0);
        assert!(mask.iter().all(|&v| v == 0));
    }

    #[test]
    fn clip_mode_grows_a_disk_around_the_point() {
        let dims = Dimensions::new(20, 20).unwrap();
        let img = vec![10u8; dims.pixel_count() * 3];
        let mut mask = vec![0u8; dims.pixel_count()];
        let clips = [10i32, 10];

        let code = unsafe {
            coraline_segment(
                img.as_ptr(),
                std::ptr::null(),
                mask.as_mut_ptr(),
                20,
                20,
                clips.as_ptr(),
                1,
                0.0,
                0.2,
                0.0,
                4.0,
                0.0,
            )
        };

        assert_eq!(code, 0);
        assert_eq!(mask[dims.index(10, 10)], 1);
    }
}
