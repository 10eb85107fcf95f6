//! Grid graph-cut energy construction and min-cut readback (C5).
//!
//! One graph node per band pixel. Terminal (data) costs come from the
//! color model and the signed distance-to-boundary penalty; pairwise
//! (smoothness) costs come from an exponential color/depth gradient, scaled
//! down on diagonal neighbor pairs to keep the weight a per-unit-length
//! quantity. Only four of each pixel's eight neighbors are wired (east,
//! south, south-east, south-west) since edges are undirected and the
//! symmetric pair is picked up from the opposite pixel.

use coraline_color::ColorModel;
use coraline_core::{Config, DepthMap, Dimensions, Label, Mask, Predictor, RgbImage};
use coraline_distance::DistanceField;
use coraline_graph::{FlowNetwork, Segment};

use crate::error::EnergyResult;

/// A terminal capacity pinning a confident pixel hard to its current label,
/// overwhelming any smoothness term that might otherwise flip it.
const CONFIDENT_PIN_WEIGHT: f64 = 100_000.0;

/// Pairwise weight scale for the four wired neighbor directions: east,
/// south, south-east, south-west. Diagonal pairs are scaled by `1/sqrt(2)`
/// to normalize the gradient weight per unit of spatial distance.
const PAIRWISE_OFFSETS: [(i32, i32, f64); 4] = [
    (1, 0, 1.0),
    (0, 1, 1.0),
    (1, 1, std::f64::consts::FRAC_1_SQRT_2),
    (-1, 1, std::f64::consts::FRAC_1_SQRT_2),
];

/// Build the grid graph over the band and return the refined mask.
///
/// `color_model` and `predictor` are optional: a `None` color model behaves
/// as if `lambda` contributed nothing, matching the source's `lambda > 0`
/// guard around the histogram lookup.
#[allow(clippy::too_many_arguments)]
pub fn cut(
    image: &RgbImage,
    depth: Option<&DepthMap>,
    mask: &Mask,
    distance: &DistanceField,
    color_model: Option<&ColorModel>,
    predictor: Option<&Predictor>,
    config: &Config,
) -> EnergyResult<Mask> {
    let dims = image.dims();
    mask.require_same_dims(dims)?;
    mask.require_same_dims(distance.dims())?;
    if let Some(d) = depth {
        mask.require_same_dims(d.dims())?;
    }
    if let Some(p) = predictor {
        mask.require_same_dims(p.dims())?;
    }

    let pixels = distance.pixels();
    let mut graph = FlowNetwork::with_capacity(pixels.len(), pixels.len() * 4);
    for _ in pixels {
        graph.add_node();
    }

    let mut node_of = vec![None; dims.pixel_count()];
    for (k, &i) in pixels.iter().enumerate() {
        node_of[i] = Some(k);
    }

    for (k, &i) in pixels.iter().enumerate() {
        let (wfore, wback) = terminal_weights(image, mask, distance, color_model, predictor, config, i);
        graph.add_tweights(k, wfore.max(0.0), wback.max(0.0))?;
    }

    for (k, &i) in pixels.iter().enumerate() {
        let (x, y) = dims.coords(i);
        for &(dx, dy, scale) in &PAIRWISE_OFFSETS {
            let nx = x as i32 + dx;
            let ny = y as i32 + dy;
            if nx < 0 || ny < 0 || nx as u32 >= dims.width() || ny as u32 >= dims.height() {
                continue;
            }
            let n = dims.index(nx as u32, ny as u32);
            let Some(kn) = node_of[n] else { continue };
            let w = gradient_weight(image, depth, config, i, n) * scale;
            graph.add_edge(k, kn, w, w)?;
        }
    }

    graph.maxflow()?;

    let mut result = mask.clone();
    for (k, &i) in pixels.iter().enumerate() {
        let label = match graph.what_segment(k)? {
            Segment::Source => Label::Foreground,
            Segment::Sink => Label::Background,
        };
        result.set(i, label.to_raw());
    }
    Ok(result)
}

/// Source/sink terminal capacities for band pixel `i` (§4.5).
///
/// A pixel whose chamfer distance saturates at `radius` (a local maximum
/// the band extractor pinned) is hard-locked to its current label. Interior
/// band pixels instead get a soft combination of the color likelihood and a
/// signed distance-to-boundary penalty — unless a predictor is supplied, in
/// which case it replaces both terms entirely for that pixel: `p > 0` sets
/// `(lambda*p, 0.0)`, `p <= 0` sets `(0.0, lambda*-p)`.
fn terminal_weights(
    image: &RgbImage,
    mask: &Mask,
    distance: &DistanceField,
    color_model: Option<&ColorModel>,
    predictor: Option<&Predictor>,
    config: &Config,
    i: usize,
) -> (f64, f64) {
    let radius = config.radius();
    let d = distance.distance_at(i);

    // radius <= 1 collapses the band to pixels sitting exactly on the old
    // boundary (d == 0); `radius - 1` would be <= 0 there and the distance
    // penalty below would divide by zero. Pin those pixels instead of
    // feeding NaN capacities into the flow network.
    if d > radius - 1.0 || radius <= 1.0 {
        return match mask.label(i) {
            Label::Foreground => (CONFIDENT_PIN_WEIGHT, 0.0),
            Label::Background => (0.0, CONFIDENT_PIN_WEIGHT),
        };
    }

    let mut wfore = 0.0;
    let mut wback = 0.0;

    let lambda = config.lambda();
    if lambda > 0.0 {
        if let Some(model) = color_model {
            let (fp, bp) = model.likelihood(image.pixel(i));
            wfore += lambda * fp;
            wback += lambda * bp;
        }
    }

    let signed_distance = match mask.label(i) {
        Label::Foreground => d,
        Label::Background => -d,
    };
    let shifted = signed_distance + config.grow();
    let distance_penalty = config.conservative() * (shifted / (radius - 1.0));
    wfore += distance_penalty;
    wback -= distance_penalty;

    if let Some(pred) = predictor {
        let p = pred.value(i);
        if p > 0.0 {
            wfore = lambda * p;
            wback = 0.0;
        } else {
            wback = lambda * -p;
            wfore = 0.0;
        }
    }

    (wfore, wback)
}

/// Exponential gradient weight between neighboring pixels `a` and `b`
/// (§4.5): `max(epsilon, exp(-(img_weight*color_dist + depth_weight*depth_dist)*25))`.
fn gradient_weight(
    image: &RgbImage,
    depth: Option<&DepthMap>,
    config: &Config,
    a: usize,
    b: usize,
) -> f64 {
    let color_diff = config.img_weight() * image.color_distance(a, b);
    let depth_diff = match depth {
        Some(d) => config.depth_weight() * d.scaled_difference(a, b),
        None => 0.0,
    };
    config.epsilon().max((-(color_diff + depth_diff) * 25.0).exp())
}

#[cfg(test)]
mod tests {
    use super::*;
    use coraline_core::Config;

    fn split_image_and_mask(dims: Dimensions, fg_from_col: u32) -> (RgbImage, Mask) {
        let mut rgb = Vec::with_capacity(dims.pixel_count() * 3);
        let mut labels = vec![0u8; dims.pixel_count()];
        for y in 0..dims.height() {
            for x in 0..dims.width() {
                if x >= fg_from_col {
                    rgb.extend_from_slice(&[240, 240, 240]);
                    labels[dims.index(x, y)] = 1;
                } else {
                    rgb.extend_from_slice(&[10, 10, 10]);
                }
            }
        }
        (
            RgbImage::new(dims.width(), dims.height(), rgb).unwrap(),
            Mask::new(dims.width(), dims.height(), labels).unwrap(),
        )
    }

    #[test]
    fn confident_pixels_keep_their_label() {
        let dims = Dimensions::new(16, 16).unwrap();
        let (image, mask) = split_image_and_mask(dims, 8);
        let distance = coraline_distance::compute_border(dims, &mask, 3.0);
        let config = Config::default().with_radius(3.0).with_lambda(0.0);
        let result = cut(&image, None, &mask, &distance, None, None, &config).unwrap();
        for &i in distance.pixels() {
            if distance.is_confident(i, config.radius()) {
                assert_eq!(result.get(i), mask.get(i));
            }
        }
    }

    #[test]
    fn empty_band_returns_unchanged_mask() {
        let dims = Dimensions::new(10, 10).unwrap();
        let mask = Mask::zeros(dims);
        let image = RgbImage::new(dims.width(), dims.height(), vec![128u8; dims.pixel_count() * 3]).unwrap();
        let distance = coraline_distance::compute_border(dims, &mask, 3.0);
        let config = Config::default();
        let result = cut(&image, None, &mask, &distance, None, None, &config).unwrap();
        assert_eq!(result.raw(), mask.raw());
    }

    #[test]
    fn predictor_override_replaces_color_and_distance_terms() {
        let dims = Dimensions::new(16, 16).unwrap();
        let (image, mask) = split_image_and_mask(dims, 8);
        let distance = coraline_distance::compute_border(dims, &mask, 4.0);
        let config = Config::default().with_radius(4.0).with_lambda(0.5).with_conservative(0.3);

        let i = *distance
            .pixels()
            .iter()
            .find(|&&i| !distance.is_confident(i, config.radius()))
            .unwrap();

        let mut positive = vec![0.0; dims.pixel_count()];
        positive[i] = 0.7;
        let predictor = Predictor::new(dims.width(), dims.height(), positive).unwrap();
        let (wfore, wback) =
            terminal_weights(&image, &mask, &distance, None, Some(&predictor), &config, i);
        assert_eq!(wfore, config.lambda() * 0.7);
        assert_eq!(wback, 0.0);

        let mut negative = vec![0.0; dims.pixel_count()];
        negative[i] = -0.4;
        let predictor = Predictor::new(dims.width(), dims.height(), negative).unwrap();
        let (wfore, wback) =
            terminal_weights(&image, &mask, &distance, None, Some(&predictor), &config, i);
        assert_eq!(wfore, 0.0);
        assert_eq!(wback, config.lambda() * 0.4);
    }

    #[test]
    fn sharp_color_edge_follows_mask_boundary() {
        let dims = Dimensions::new(20, 20).unwrap();
        let (image, mask) = split_image_and_mask(dims, 10);
        let distance = coraline_distance::compute_border(dims, &mask, 4.0);
        let config = Config::default().with_radius(4.0).with_lambda(0.0).with_conservative(0.0);
        let result = cut(&image, None, &mask, &distance, None, None, &config).unwrap();
        // A strong color edge at x=10 should pull the cut back to the mask boundary.
        for y in 2..18 {
            let fg = result.get(dims.index(10, y));
            let bg = result.get(dims.index(9, y));
            assert_eq!(fg, 1);
            assert_eq!(bg, 0);
        }
    }
}
