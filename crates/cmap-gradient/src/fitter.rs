//! Curve fitting: approximating the evaluator with a basis model.
//!
//! The evaluator is sampled at evenly spaced parameters over `[0, 1]` and
//! each sRGB channel is fit independently. Coefficient `k` of the result
//! holds parameter `k` of all three channel fits.

use crate::evaluator::reduce;
use crate::{Evaluator, GradientConfig, GradientResult, ModelKind};
use cmap_math::{Vec3, linspace};
use cmap_optim::LeastSquares;
use serde::Serialize;
use tracing::{debug, warn};

/// Channels whose fit hit the iteration cap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitNonConvergence {
    /// Channel indices (0 = R, 1 = G, 2 = B).
    pub channels: Vec<usize>,
    /// Iteration cap that was reached.
    pub iterations: usize,
}

/// How well a fitted curve matches the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FitQuality {
    /// True when every channel met its tolerance.
    pub converged: bool,
    /// Largest iteration count over the channels.
    pub iterations: usize,
    /// Residual sum of squares over the fit samples, in sRGB.
    pub residual: f64,
    /// Present when some channel stopped at the iteration cap.
    pub non_convergence: Option<FitNonConvergence>,
}

/// A gradient approximated by a basis model.
#[derive(Debug, Clone, Serialize)]
pub struct FittedCurve {
    model: ModelKind,
    degree: usize,
    wraparound: bool,
    coefficients: Vec<Vec3>,
    quality: Option<FitQuality>,
    #[serde(skip)]
    channels: [Vec<f64>; 3],
}

impl PartialEq for FittedCurve {
    fn eq(&self, other: &Self) -> bool {
        self.model == other.model
            && self.degree == other.degree
            && self.wraparound == other.wraparound
            && self.coefficients == other.coefficients
    }
}

impl FittedCurve {
    /// Builds a curve from known coefficients (pasted or imported).
    ///
    /// No fit quality is attached.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cmap_gradient::{FittedCurve, ModelKind};
    /// use cmap_math::Vec3;
    ///
    /// // Linear ramp from black to white
    /// let curve = FittedCurve::new(ModelKind::HornerPolynomial, 2, false, vec![Vec3::ZERO, Vec3::ONE]);
    /// assert_eq!(curve.evaluate(0.5), Vec3::splat(0.5));
    /// ```
    pub fn new(model: ModelKind, degree: usize, wraparound: bool, coefficients: Vec<Vec3>) -> Self {
        let channels = [0, 1, 2].map(|c| coefficients.iter().map(|k| k[c]).collect());
        Self {
            model,
            degree,
            wraparound,
            coefficients,
            quality: None,
            channels,
        }
    }

    /// Basis model.
    pub fn model(&self) -> ModelKind {
        self.model
    }

    /// Configured degree.
    pub fn degree(&self) -> usize {
        self.degree
    }

    /// Whether the parameter is taken modulo 1.
    pub fn wraparound(&self) -> bool {
        self.wraparound
    }

    /// One `(R, G, B)` triple per basis parameter.
    pub fn coefficients(&self) -> &[Vec3] {
        &self.coefficients
    }

    /// Fit diagnostics, `None` for curves built from raw coefficients.
    pub fn quality(&self) -> Option<&FitQuality> {
        self.quality.as_ref()
    }

    /// Evaluates the curve at `t`, returning sRGB.
    pub fn evaluate(&self, t: f64) -> Vec3 {
        let t = reduce(t, self.wraparound);
        let basis = self.model.basis();
        Vec3::new(
            basis.evaluate(t, &self.channels[0]),
            basis.evaluate(t, &self.channels[1]),
            basis.evaluate(t, &self.channels[2]),
        )
    }

    /// Residual sum of squares against `target` over `samples` parameters.
    pub fn residual_against(&self, target: impl Fn(f64) -> Vec3, samples: &[f64]) -> f64 {
        samples
            .iter()
            .map(|&t| (self.evaluate(t) - target(t)).length_squared())
            .sum()
    }
}

/// Fits the evaluator with the model, degree and optimizer of `config`.
///
/// Hitting the iteration cap is not an error: the best iterate is kept,
/// reported in [`FitQuality::non_convergence`] and logged as a warning.
///
/// # Errors
///
/// - [`GradientError::InvalidConfig`](crate::GradientError::InvalidConfig)
///   if `config` fails validation
/// - [`GradientError::Optim`](crate::GradientError::Optim) if the
///   optimizer rejects the problem
pub fn fit_curve(evaluator: &Evaluator, config: &GradientConfig) -> GradientResult<FittedCurve> {
    config.validate()?;

    let basis = config.model.basis();
    let arity = config.coefficient_count();
    let t = linspace(0.0, 1.0, config.sample_count);
    let targets: Vec<Vec3> = t.iter().map(|&ti| evaluator.evaluate(ti)).collect();
    let solver = LeastSquares::new(config.algorithm.loss()).with_max_iterations(config.max_iterations);

    let mut channels: [Vec<f64>; 3] = Default::default();
    let mut iterations = 0;
    let mut stalled = Vec::new();

    for (c, params) in channels.iter_mut().enumerate() {
        let y: Vec<f64> = targets.iter().map(|v| v[c]).collect();
        let x0 = basis.initial_guess(&t, &y, arity);
        let report = solver.minimize(
            |p, out| {
                for (o, (&ti, &yi)) in out.iter_mut().zip(t.iter().zip(&y)) {
                    *o = basis.evaluate(ti, p) - yi;
                }
            },
            t.len(),
            &x0,
        )?;
        iterations = iterations.max(report.iterations);
        if !report.converged {
            stalled.push(c);
        }
        *params = report.params;
    }

    let coefficients = (0..arity)
        .map(|k| Vec3::new(channels[0][k], channels[1][k], channels[2][k]))
        .collect();
    let mut curve = FittedCurve::new(config.model, config.degree, config.wraparound, coefficients);
    let residual: f64 = t
        .iter()
        .zip(&targets)
        .map(|(&ti, &target)| (curve.evaluate(ti) - target).length_squared())
        .sum();

    let non_convergence = (!stalled.is_empty()).then(|| FitNonConvergence {
        channels: stalled,
        iterations: config.max_iterations,
    });
    if let Some(nc) = &non_convergence {
        warn!(model = %config.model, degree = config.degree, channels = ?nc.channels, "fit hit iteration cap");
    }
    debug!(model = %config.model, degree = config.degree, arity, iterations, residual, "fitted curve");

    curve.quality = Some(FitQuality {
        converged: non_convergence.is_none(),
        iterations,
        residual,
        non_convergence,
    });
    Ok(curve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FitAlgorithm, GradientError};
    use cmap_space::{ColorSpaceType, Illuminant, Observer};

    fn ramp(wrap: bool) -> Evaluator {
        let weights = if wrap { vec![0.0, 0.5] } else { vec![0.0, 1.0] };
        Evaluator::new(
            &[Vec3::new(0.1, 0.2, 0.9), Vec3::new(0.8, 0.6, 0.1)],
            &weights,
            ColorSpaceType::Srgb,
            wrap,
            Observer::Cie1931,
            Illuminant::D65,
        )
        .unwrap()
    }

    #[test]
    fn test_linear_ramp_is_exact() {
        let config = GradientConfig {
            degree: 2,
            wraparound: false,
            algorithm: FitAlgorithm::LeastSquares,
            sample_count: 32,
            ..Default::default()
        };
        let curve = fit_curve(&ramp(false), &config).unwrap();
        let quality = curve.quality().unwrap();
        assert!(quality.residual < 1e-12, "residual {}", quality.residual);
        assert!(quality.converged);
        assert_eq!(curve.coefficients().len(), 2);
        assert!(curve.evaluate(0.5).max_abs_diff(Vec3::new(0.45, 0.4, 0.5)) < 1e-6);
    }

    #[test]
    fn test_every_model_fits() {
        let evaluator = ramp(true);
        // Residual of the best constant fit
        let t = linspace(0.0, 1.0, 64);
        let samples: Vec<Vec3> = t.iter().map(|&ti| evaluator.evaluate(ti)).collect();
        let mean = samples.iter().fold(Vec3::ZERO, |acc, &s| acc + s) / samples.len() as f64;
        let baseline: f64 = samples.iter().map(|&s| (s - mean).length_squared()).sum();

        for model in ModelKind::ALL {
            let config = GradientConfig {
                model,
                degree: 4,
                max_iterations: 200,
                sample_count: 64,
                ..Default::default()
            };
            let curve = fit_curve(&evaluator, &config).unwrap();
            assert_eq!(curve.coefficients().len(), config.coefficient_count(), "{model}");
            let quality = curve.quality().unwrap();
            assert!(quality.residual.is_finite(), "{model}: {quality:?}");
            assert!(
                quality.residual < baseline,
                "{model}: residual {} not below constant fit {baseline}",
                quality.residual
            );
        }
    }

    #[test]
    fn test_iteration_cap_reported() {
        let config = GradientConfig {
            model: ModelKind::Gaussian,
            degree: 3,
            max_iterations: 1,
            sample_count: 64,
            ..Default::default()
        };
        let curve = fit_curve(&ramp(true), &config).unwrap();
        let quality = curve.quality().unwrap();
        assert!(!quality.converged);
        let nc = quality.non_convergence.as_ref().unwrap();
        assert_eq!(nc.iterations, 1);
        assert!(!nc.channels.is_empty());
    }

    #[test]
    fn test_invalid_config() {
        let config = GradientConfig {
            degree: 0,
            ..Default::default()
        };
        assert!(matches!(fit_curve(&ramp(true), &config), Err(GradientError::InvalidConfig(_))));
    }

    #[test]
    fn test_wraparound_curve_is_cyclic() {
        let curve = FittedCurve::new(
            ModelKind::Trigonometric,
            4,
            true,
            vec![Vec3::splat(0.5), Vec3::splat(0.5), Vec3::ONE, Vec3::ZERO],
        );
        assert!(curve.evaluate(0.25).max_abs_diff(curve.evaluate(1.25)) < 1e-12);
        assert!(curve.quality().is_none());
    }
}
