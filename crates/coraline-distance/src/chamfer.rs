//! Bounded chamfer distance transform (C3): a breadth-limited wave from the
//! mask boundary (or from clip-point seeds), stopping at radius `R`.

use coraline_core::{Dimensions, Mask, NEIGHBOR_WEIGHTS, is_boundary};

use crate::error::{DistanceError, DistanceResult};

/// Sentinel distance for pixels the wave never reached.
pub const UNREACHED: f64 = f64::INFINITY;

/// The output of C3: a per-pixel distance field and the ordered band.
#[derive(Debug, Clone)]
pub struct DistanceField {
    dims: Dimensions,
    distance: Vec<f64>,
    pixels: Vec<usize>,
}

impl DistanceField {
    #[inline]
    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    /// Per-pixel chamfer distance to the seed set; [`UNREACHED`] outside the
    /// band.
    #[inline]
    pub fn distance(&self) -> &[f64] {
        &self.distance
    }

    #[inline]
    pub fn distance_at(&self, i: usize) -> f64 {
        self.distance[i]
    }

    /// The band: pixels visited by the wave, in visitation order.
    #[inline]
    pub fn pixels(&self) -> &[usize] {
        &self.pixels
    }

    /// A pixel is confident once its (possibly clamped) distance reaches
    /// `radius`; only confident pixels feed the color model (§4.4).
    #[inline]
    pub fn is_confident(&self, i: usize, radius: f64) -> bool {
        self.distance[i] >= radius
    }
}

/// Compute the distance field from the input mask's boundary (border mode,
/// the default). An all-background or all-foreground mask has no boundary
/// and yields an empty band.
pub fn compute_border(dims: Dimensions, mask: &Mask, radius: f64) -> DistanceField {
    let mut distance = vec![UNREACHED; dims.pixel_count()];
    let mut stack = Vec::new();

    for i in dims.interior_indices() {
        if is_boundary(&dims, mask.raw(), i) {
            distance[i] = 0.0;
            stack.push(i);
        }
    }

    propagate(&dims, radius, &mut distance, &mut stack);
    clamp_local_maxima(&dims, radius, &mut distance, &stack);

    DistanceField {
        dims,
        distance,
        pixels: stack,
    }
}

/// Compute the distance field seeded at explicit `(x, y)` clip points
/// instead of the mask boundary (clip mode). Duplicate seeds are skipped.
///
/// Seeds at the literal coordinates supplied — the source's `seedClips`
/// reads `clips[i*2+2]` for the y-coordinate where `clips[i*2+1]` was
/// evidently intended; that indexing bug is not reproduced here (see
/// DESIGN.md).
pub fn compute_clips(
    dims: Dimensions,
    clip_points: &[(u32, u32)],
    radius: f64,
) -> DistanceResult<DistanceField> {
    let mut distance = vec![UNREACHED; dims.pixel_count()];
    let mut stack = Vec::new();

    for &(x, y) in clip_points {
        if !dims.is_interior(x, y) {
            return Err(DistanceError::InvalidClipPoint {
                x,
                y,
                width: dims.width(),
                height: dims.height(),
            });
        }
        let i = dims.index(x, y);
        if distance[i] == 0.0 {
            continue; // duplicate seed
        }
        distance[i] = 0.0;
        stack.push(i);
    }

    propagate(&dims, radius, &mut distance, &mut stack);
    clamp_local_maxima(&dims, radius, &mut distance, &stack);

    Ok(DistanceField {
        dims,
        distance,
        pixels: stack,
    })
}

/// Breadth-limited wave: repeatedly relax the most recently enqueued
/// pixels' neighbors until the frontier stops growing. A neighbor is
/// enqueued at most once (the first time it's reached), but its distance
/// keeps getting relaxed by later arrivals processed before it — this is
/// the source's exact algorithm (not a textbook Dijkstra).
fn propagate(dims: &Dimensions, radius: f64, distance: &mut [f64], stack: &mut Vec<usize>) {
    let mut start = 0;
    while start < stack.len() {
        let end = stack.len();
        for idx in start..end {
            let i = stack[idx];
            let d = distance[i];
            for (n, &w) in dims.neighbors(i).iter().zip(NEIGHBOR_WEIGHTS.iter()) {
                let n = *n;
                if !dims.is_interior_index(n) {
                    continue;
                }
                let candidate = d + w;
                if candidate > radius {
                    continue;
                }
                if distance[n] == UNREACHED {
                    stack.push(n);
                }
                if candidate < distance[n] {
                    distance[n] = candidate;
                }
            }
        }
        start = end;
    }
}

/// A visited pixel is a local maximum iff no neighbor's distance exceeds
/// its own (an unvisited, infinite-distance neighbor disqualifies it).
/// Local maxima are clamped to exactly `radius`, pinning confident interior
/// and exterior pixels to the sentinel the band-membership test uses.
fn clamp_local_maxima(dims: &Dimensions, radius: f64, distance: &mut [f64], stack: &[usize]) {
    let maxima: Vec<usize> = stack
        .iter()
        .copied()
        .filter(|&i| {
            let d = distance[i];
            dims.neighbors(i).iter().all(|&n| distance[n] <= d)
        })
        .collect();
    for i in maxima {
        distance[i] = radius;
    }
}
