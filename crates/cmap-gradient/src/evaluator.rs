//! Piecewise evaluation of a gradient from its anchors.
//!
//! This is the reference curve the fitter approximates: neighbouring
//! anchors are blended linearly in the mix space and the result is
//! converted back to sRGB.

use crate::{GradientError, GradientResult};
use cmap_math::{Vec3, fract};
use cmap_space::{ColorSpaceGraph, ColorSpaceType, Conversion, Illuminant, Observer, white_point};

/// Anchors prepared for repeated evaluation.
///
/// Anchors are converted into the mix space once; the route back to sRGB is
/// resolved once and reused for every sample.
#[derive(Debug, Clone)]
pub struct Evaluator {
    mixed: Vec<Vec3>,
    weights: Vec<f64>,
    to_srgb: Conversion,
    wraparound: bool,
}

impl Evaluator {
    /// Prepares sRGB `anchors` with their `weights` for blending in `mix_space`.
    ///
    /// # Errors
    ///
    /// - [`GradientError::DegenerateGradient`] if there are no anchors or the
    ///   weight count differs from the anchor count
    /// - [`GradientError::Color`] if the mix space is unreachable
    pub fn new(
        anchors: &[Vec3],
        weights: &[f64],
        mix_space: ColorSpaceType,
        wraparound: bool,
        observer: Observer,
        illuminant: Illuminant,
    ) -> GradientResult<Self> {
        if anchors.is_empty() || anchors.len() != weights.len() {
            return Err(GradientError::DegenerateGradient(format!(
                "{} anchors with {} weights",
                anchors.len(),
                weights.len()
            )));
        }
        let graph = ColorSpaceGraph::global();
        let white = white_point(observer, illuminant);
        let to_mix = graph.conversion(ColorSpaceType::Srgb, mix_space, Some(white))?;
        let to_srgb = graph.conversion(mix_space, ColorSpaceType::Srgb, Some(white))?;
        Ok(Self {
            mixed: anchors.iter().map(|&c| to_mix.apply(c)).collect(),
            weights: weights.to_vec(),
            to_srgb,
            wraparound,
        })
    }

    /// Anchor weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Maps an arbitrary parameter into the evaluation domain.
    ///
    /// Cyclic gradients take the fractional part; open ones clamp to `[0, 1]`.
    #[inline]
    pub fn reduce(&self, t: f64) -> f64 {
        reduce(t, self.wraparound)
    }

    /// Evaluates the gradient at `t`, returning sRGB.
    pub fn evaluate(&self, t: f64) -> Vec3 {
        self.to_srgb.apply(self.evaluate_mixed(t))
    }

    /// Evaluates the gradient at `t`, returning mix-space coordinates.
    pub fn evaluate_mixed(&self, t: f64) -> Vec3 {
        let t = self.reduce(t);
        let n = self.mixed.len();
        // Last anchor whose weight does not exceed t
        let i = self.weights.iter().rposition(|&w| w <= t).unwrap_or(0);

        if i + 1 == n && !self.wraparound {
            return self.mixed[i];
        }
        let lower = self.weights[i];
        let upper = self.weights.get(i + 1).copied().unwrap_or(1.0);
        let span = upper - lower;
        let amount = if span > 0.0 { ((t - lower) / span).clamp(0.0, 1.0) } else { 0.0 };
        self.mixed[i].lerp(self.mixed[(i + 1) % n], amount)
    }
}

/// Fractional part when cyclic, clamp to `[0, 1]` otherwise.
#[inline]
pub(crate) fn reduce(t: f64, wraparound: bool) -> f64 {
    if wraparound { fract(t) } else { t.clamp(0.0, 1.0) }
}
