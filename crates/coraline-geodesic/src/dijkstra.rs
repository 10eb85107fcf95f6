//! Two-source geodesic shortest-path labelling (C6).
//!
//! Confident foreground and confident background pixels seed a dual
//! shortest-path search through the band: the path cost between adjacent
//! pixels is `chamfer_weight * |probs[a] - probs[b]|`. Each band pixel is
//! relabeled to whichever source reaches it more cheaply.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use coraline_core::{Dimensions, Label, Mask, NEIGHBOR_WEIGHTS, is_boundary};
use coraline_distance::DistanceField;

use crate::error::{GeodesicError, GeodesicResult};

/// Three-valued per-pixel state: 0 = uncertain band pixel, 1 = confident
/// background, 2 = confident foreground.
const BAND: u8 = 0;
const CONFIDENT_BACKGROUND: u8 = 1;
const CONFIDENT_FOREGROUND: u8 = 2;

#[derive(Debug, Clone, Copy)]
struct HeapEntry {
    dist: f64,
    node: usize,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.dist == other.dist
    }
}
impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    // Reversed so `BinaryHeap` (a max-heap) pops the smallest distance first.
    fn cmp(&self, other: &Self) -> Ordering {
        other.dist.partial_cmp(&self.dist).unwrap_or(Ordering::Equal)
    }
}

/// Relabel the band by two-source shortest-path competition (§4.6).
///
/// `probs` is a per-pixel scalar field driving the path cost between
/// neighbors; the caller chooses it explicitly (grayscale intensity, a
/// model posterior, or any other per-pixel signal) rather than it being
/// implicitly derived from the color model.
pub fn label(mask: &Mask, distance: &DistanceField, probs: &[f64], radius: f64) -> GeodesicResult<Mask> {
    let dims = mask.dims();
    mask.require_same_dims(distance.dims())?;
    let pixel_count = dims.pixel_count();
    if probs.len() != pixel_count {
        return Err(GeodesicError::ProbsLengthMismatch {
            expected: pixel_count,
            actual: probs.len(),
        });
    }

    let code = build_code(&dims, mask, distance, radius);

    let mut foregeo = vec![f64::INFINITY; pixel_count];
    let mut backgeo = vec![f64::INFINITY; pixel_count];
    let mut heap = BinaryHeap::new();

    for i in 0..pixel_count {
        if !is_boundary(&dims, &code, i) {
            continue;
        }
        match code[i] {
            CONFIDENT_FOREGROUND => {
                foregeo[i] = 0.0;
                heap.push(HeapEntry { dist: 0.0, node: i });
            }
            CONFIDENT_BACKGROUND => {
                backgeo[i] = 0.0;
                heap.push(HeapEntry { dist: 0.0, node: i });
            }
            _ => {}
        }
    }

    while let Some(HeapEntry { dist, node: i }) = heap.pop() {
        let fd = foregeo[i];
        let bd = backgeo[i];

        if fd < bd {
            if fd < dist {
                continue; // stale entry, a cheaper path already won
            }
            relax(&dims, &code, probs, i, fd, &mut foregeo, &mut backgeo, &mut heap);
        } else {
            if bd < dist {
                continue;
            }
            relax(&dims, &code, probs, i, bd, &mut backgeo, &mut foregeo, &mut heap);
        }
    }

    let mut result = mask.clone();
    for i in 0..pixel_count {
        if code[i] == BAND {
            let label = if foregeo[i] < backgeo[i] { Label::Foreground } else { Label::Background };
            result.set(i, label.to_raw());
        }
    }
    Ok(result)
}

fn build_code(dims: &Dimensions, mask: &Mask, distance: &DistanceField, radius: f64) -> Vec<u8> {
    (0..dims.pixel_count())
        .map(|i| {
            if distance.is_confident(i, radius) {
                match mask.label(i) {
                    Label::Foreground => CONFIDENT_FOREGROUND,
                    Label::Background => CONFIDENT_BACKGROUND,
                }
            } else {
                BAND
            }
        })
        .collect()
}

/// Relax `i`'s eight neighbors for the front identified by `own` (the
/// distance array being grown) against `other` (the rival front). A
/// neighbor only updates if the rival front hasn't already claimed it more
/// cheaply, and only if it's still an undecided band pixel.
#[allow(clippy::too_many_arguments)]
fn relax(
    dims: &Dimensions,
    code: &[u8],
    probs: &[f64],
    i: usize,
    d: f64,
    own: &mut [f64],
    other: &mut [f64],
    heap: &mut BinaryHeap<HeapEntry>,
) {
    for (&n, &w) in dims.neighbors(i).iter().zip(NEIGHBOR_WEIGHTS.iter()) {
        if code[n] != BAND {
            continue;
        }
        let step = (probs[i] - probs[n]).abs();
        let candidate = d + w * step;
        if other[n] < candidate {
            continue;
        }
        if candidate < own[n] {
            own[n] = candidate;
            heap.push(HeapEntry { dist: candidate, node: n });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coraline_core::Dimensions;

    fn split_mask(dims: Dimensions, fg_from_col: u32) -> Mask {
        let mut data = vec![0u8; dims.pixel_count()];
        for y in 0..dims.height() {
            for x in 0..dims.width() {
                if x >= fg_from_col {
                    data[dims.index(x, y)] = 1;
                }
            }
        }
        Mask::new(dims.width(), dims.height(), data).unwrap()
    }

    #[test]
    fn rejects_mismatched_probs_length() {
        let dims = Dimensions::new(5, 5).unwrap();
        let mask = Mask::zeros(dims);
        let distance = coraline_distance::compute_border(dims, &mask, 2.0);
        assert!(label(&mask, &distance, &[0.0; 3], 2.0).is_err());
    }

    #[test]
    fn confident_pixels_never_change() {
        let dims = Dimensions::new(12, 12).unwrap();
        let mask = split_mask(dims, 6);
        let distance = coraline_distance::compute_border(dims, &mask, 3.0);
        let probs = vec![0.0; dims.pixel_count()];
        let result = label(&mask, &distance, &probs, 3.0).unwrap();
        for i in 0..dims.pixel_count() {
            if distance.is_confident(i, 3.0) {
                assert_eq!(result.get(i), mask.get(i));
            }
        }
    }

    #[test]
    fn band_pixels_follow_the_cheaper_front() {
        let dims = Dimensions::new(12, 12).unwrap();
        let mask = split_mask(dims, 6);
        let distance = coraline_distance::compute_border(dims, &mask, 3.0);
        // A ramp along x makes horizontal geodesic cost track horizontal
        // pixel distance, so each band pixel should favor the nearer front.
        let probs: Vec<f64> = (0..dims.pixel_count()).map(|i| dims.coords(i).0 as f64).collect();
        let result = label(&mask, &distance, &probs, 3.0).unwrap();
        for y in 2..10 {
            assert_eq!(result.get(dims.index(3, y)), 0); // close to the confident background front
            assert_eq!(result.get(dims.index(8, y)), 1); // close to the confident foreground front
        }
    }
}
