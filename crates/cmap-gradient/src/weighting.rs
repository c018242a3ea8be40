//! Anchor positions along the gradient.
//!
//! Each anchor gets a weight: the cumulative, normalized distance from the
//! first anchor, measured in a chosen color space. Perceptually large
//! steps therefore occupy a larger share of `[0, 1]`.

use crate::{GradientError, GradientResult, WeightSpace};
use cmap_math::Vec3;
use cmap_space::{ColorSpaceGraph, ColorSpaceType, Illuminant, Observer};
use tracing::warn;

/// Smallest share of the total distance a single segment may occupy.
pub const MIN_SEGMENT_SHARE: f64 = 1e-6;

/// Computes anchor weights.
///
/// With wraparound, segment distances include the closing segment from the
/// last anchor back to the first and every weight lies in `[0, 1)`. Without
/// it, the closing segment is ignored and the last weight is exactly `1.0`.
/// A single anchor always gets `[0.0]`.
///
/// Segments shorter than [`MIN_SEGMENT_SHARE`] of the total (repeated
/// consecutive anchors) are widened to that share, so weights stay strictly
/// increasing. When every segment has zero length (all anchors identical),
/// the weights fall back to even spacing and a warning is logged.
///
/// # Errors
///
/// - [`GradientError::DegenerateGradient`] for an empty anchor list
/// - [`GradientError::Color`] if the weight space is unreachable
///
/// # Example
///
/// ```rust
/// use cmap_gradient::{WeightSpace, determine_weights};
/// use cmap_math::Vec3;
/// use cmap_space::{Illuminant, Observer};
///
/// let anchors = [Vec3::ZERO, Vec3::ONE, Vec3::new(1.0, 0.0, 0.0)];
/// let w = determine_weights(&anchors, WeightSpace::Unweighted, true, Observer::Cie1931, Illuminant::D65)?;
/// assert_eq!(w, vec![0.0, 1.0 / 3.0, 2.0 / 3.0]);
/// # Ok::<(), cmap_gradient::GradientError>(())
/// ```
pub fn determine_weights(
    anchors: &[Vec3],
    weight_space: WeightSpace,
    wraparound: bool,
    observer: Observer,
    illuminant: Illuminant,
) -> GradientResult<Vec<f64>> {
    let n = anchors.len();
    if n == 0 {
        return Err(GradientError::DegenerateGradient("no anchors".into()));
    }
    if n == 1 {
        return Ok(vec![0.0]);
    }

    let space = match weight_space {
        WeightSpace::Unweighted => return Ok(uniform(n, wraparound)),
        WeightSpace::Space(space) => space,
    };

    let graph = ColorSpaceGraph::global();
    let converted = anchors
        .iter()
        .map(|&c| graph.convert(c, ColorSpaceType::Srgb, space, observer, illuminant))
        .collect::<Result<Vec<_>, _>>()?;

    let segments = if wraparound { n } else { n - 1 };
    let mut distances: Vec<f64> = (0..segments)
        .map(|i| converted[i].distance(converted[(i + 1) % n]))
        .collect();
    let raw_total: f64 = distances.iter().sum();

    if !(raw_total > 0.0 && raw_total.is_finite()) {
        warn!(anchors = n, space = %space, total = raw_total, "zero total anchor distance, using even spacing");
        return Ok(uniform(n, wraparound));
    }

    let floor = raw_total * MIN_SEGMENT_SHARE;
    for d in &mut distances {
        *d = d.max(floor);
    }
    let total: f64 = distances.iter().sum();

    let mut weights = Vec::with_capacity(n);
    let mut acc = 0.0;
    for d in &distances[..n - 1] {
        weights.push(acc / total);
        acc += d;
    }
    weights.push(if wraparound { acc / total } else { 1.0 });
    Ok(weights)
}

/// Even spacing: `i/N` with wraparound, `i/(N-1)` without.
fn uniform(n: usize, wraparound: bool) -> Vec<f64> {
    let segments = if wraparound { n } else { n - 1 };
    (0..n).map(|i| i as f64 / segments as f64).collect()
}
