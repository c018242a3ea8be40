//! The [`ColorGradient`] aggregate: anchors, configuration and derived state.

use crate::{
    Evaluator, FitQuality, FittedCurve, GradientConfig, GradientError, GradientResult, NearestPoint,
    NearestPointSolver, WeightSpace, determine_weights, fit_curve,
};
use cmap_math::{Vec3, linspace};
use cmap_space::ColorSpaceType;
use tracing::debug;

/// State recomputed from anchors and configuration.
#[derive(Debug, Clone)]
struct Derived {
    weights: Vec<f64>,
    evaluator: Evaluator,
    curve: FittedCurve,
}

impl Derived {
    fn compute(anchors: &[Vec3], config: &GradientConfig) -> GradientResult<Self> {
        config.validate()?;
        let weights = determine_weights(
            anchors,
            config.weight_space,
            config.wraparound,
            config.observer,
            config.illuminant,
        )?;
        let evaluator = Evaluator::new(
            anchors,
            &weights,
            config.mix_space,
            config.wraparound,
            config.observer,
            config.illuminant,
        )?;
        let curve = fit_curve(&evaluator, config)?;
        Ok(Self {
            weights,
            evaluator,
            curve,
        })
    }
}

/// An ordered set of sRGB anchors with its fitted curve.
///
/// Weights, evaluator and fitted coefficients are recomputed synchronously
/// by every mutation. A mutation that fails leaves the gradient untouched.
///
/// # Example
///
/// ```rust
/// use cmap_gradient::{ColorGradient, GradientConfig};
/// use cmap_math::Vec3;
///
/// let mut gradient = ColorGradient::new(
///     "fire",
///     vec![Vec3::new(0.1, 0.0, 0.0), Vec3::new(0.9, 0.3, 0.0), Vec3::new(1.0, 0.9, 0.4)],
///     GradientConfig::default(),
/// )?;
/// gradient.push_anchor(Vec3::ONE)?;
/// assert_eq!(gradient.weights().len(), 4);
/// let color = gradient.evaluate_fit(0.3);
/// # Ok::<(), cmap_gradient::GradientError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ColorGradient {
    name: String,
    anchors: Vec<Vec3>,
    config: GradientConfig,
    derived: Derived,
}

impl ColorGradient {
    /// Creates a gradient and fits it.
    ///
    /// # Errors
    ///
    /// - [`GradientError::DegenerateGradient`] for an empty anchor list
    /// - [`GradientError::InvalidConfig`] if `config` fails validation
    pub fn new(name: impl Into<String>, anchors: Vec<Vec3>, config: GradientConfig) -> GradientResult<Self> {
        let name = name.into();
        let derived = Derived::compute(&anchors, &config)?;
        debug!(name = %name, anchors = anchors.len(), model = %config.model, "created gradient");
        Ok(Self {
            name,
            anchors,
            config,
            derived,
        })
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the gradient. Derived state is unaffected.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Anchor colors (sRGB).
    pub fn anchors(&self) -> &[Vec3] {
        &self.anchors
    }

    /// Fit configuration.
    pub fn config(&self) -> &GradientConfig {
        &self.config
    }

    /// Anchor weights.
    pub fn weights(&self) -> &[f64] {
        &self.derived.weights
    }

    /// Fitted curve.
    pub fn curve(&self) -> &FittedCurve {
        &self.derived.curve
    }

    /// Fitted coefficients, one `(R, G, B)` triple per basis parameter.
    pub fn coefficients(&self) -> &[Vec3] {
        self.derived.curve.coefficients()
    }

    /// Diagnostics of the last fit.
    pub fn quality(&self) -> Option<&FitQuality> {
        self.derived.curve.quality()
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Recomputes derived state for new anchors/config and commits all of it
    /// at once.
    fn commit(&mut self, anchors: Vec<Vec3>, config: GradientConfig) -> GradientResult<()> {
        let derived = Derived::compute(&anchors, &config)?;
        self.anchors = anchors;
        self.config = config;
        self.derived = derived;
        debug!(name = %self.name, anchors = self.anchors.len(), "refitted gradient");
        Ok(())
    }

    fn check_index(&self, index: usize, len: usize) -> GradientResult<()> {
        if index < len {
            Ok(())
        } else {
            Err(GradientError::AnchorIndex { index, len: self.anchors.len() })
        }
    }

    /// Appends an anchor.
    pub fn push_anchor(&mut self, color: Vec3) -> GradientResult<()> {
        let mut anchors = self.anchors.clone();
        anchors.push(color);
        self.commit(anchors, self.config)
    }

    /// Inserts an anchor before `index` (`index == len` appends).
    pub fn insert_anchor(&mut self, index: usize, color: Vec3) -> GradientResult<()> {
        self.check_index(index, self.anchors.len() + 1)?;
        let mut anchors = self.anchors.clone();
        anchors.insert(index, color);
        self.commit(anchors, self.config)
    }

    /// Removes and returns the anchor at `index`.
    ///
    /// # Errors
    ///
    /// [`GradientError::DegenerateGradient`] when only one anchor is left.
    pub fn remove_anchor(&mut self, index: usize) -> GradientResult<Vec3> {
        self.check_index(index, self.anchors.len())?;
        if self.anchors.len() == 1 {
            return Err(GradientError::DegenerateGradient(
                "cannot remove the last anchor".into(),
            ));
        }
        let mut anchors = self.anchors.clone();
        let removed = anchors.remove(index);
        self.commit(anchors, self.config)?;
        Ok(removed)
    }

    /// Recolors the anchor at `index`.
    pub fn set_anchor(&mut self, index: usize, color: Vec3) -> GradientResult<()> {
        self.check_index(index, self.anchors.len())?;
        let mut anchors = self.anchors.clone();
        anchors[index] = color;
        self.commit(anchors, self.config)
    }

    /// Replaces every anchor, e.g. with an imported or extracted palette.
    pub fn replace_anchors(&mut self, anchors: Vec<Vec3>) -> GradientResult<()> {
        self.commit(anchors, self.config)
    }

    /// Changes the fit configuration.
    pub fn set_config(&mut self, config: GradientConfig) -> GradientResult<()> {
        self.commit(self.anchors.clone(), config)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Piecewise reference color at `t` (sRGB).
    pub fn evaluate(&self, t: f64) -> Vec3 {
        self.derived.evaluator.evaluate(t)
    }

    /// Fitted curve color at `t` (sRGB).
    pub fn evaluate_fit(&self, t: f64) -> Vec3 {
        self.derived.curve.evaluate(t)
    }

    /// Parameter of the fitted curve closest to `target` (sRGB), using the
    /// default solver settings.
    pub fn nearest_weight(&self, target: Vec3) -> GradientResult<NearestPoint> {
        NearestPointSolver::default().solve(&self.derived.curve, target)
    }

    /// Reference colors at `count` evenly spaced parameters over `[0, 1]`.
    pub fn sample(&self, count: usize) -> Vec<Vec3> {
        linspace(0.0, 1.0, count).into_iter().map(|t| self.evaluate(t)).collect()
    }

    /// Fitted colors at `count` evenly spaced parameters over `[0, 1]`.
    pub fn sample_fit(&self, count: usize) -> Vec<Vec3> {
        linspace(0.0, 1.0, count).into_iter().map(|t| self.evaluate_fit(t)).collect()
    }

    /// Fits the same anchors once per `(weight space, mix space)` pair.
    ///
    /// The gradient itself is unchanged.
    pub fn color_maps(&self, pairs: &[(WeightSpace, ColorSpaceType)]) -> GradientResult<Vec<FittedCurve>> {
        pairs
            .iter()
            .map(|&(weight_space, mix_space)| {
                let config = GradientConfig {
                    weight_space,
                    mix_space,
                    ..self.config
                };
                Derived::compute(&self.anchors, &config).map(|d| d.curve)
            })
            .collect()
    }
}

/// Resamples a curve into `count` evenly spaced anchors.
///
/// Cyclic curves are sampled at `i / count` so the closing anchor is not
/// duplicated; open curves at `i / (count - 1)`.
pub fn anchors_from_curve(curve: &FittedCurve, count: usize) -> Vec<Vec3> {
    let t = if curve.wraparound() {
        (0..count).map(|i| i as f64 / count as f64).collect()
    } else {
        linspace(0.0, 1.0, count)
    };
    t.into_iter().map(|t| curve.evaluate(t)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModelKind;

    fn rgb() -> ColorGradient {
        ColorGradient::new(
            "rgb",
            vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 1.0)],
            GradientConfig {
                sample_count: 64,
                max_iterations: 200,
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_empty() {
        let err = ColorGradient::new("empty", vec![], GradientConfig::default());
        assert!(matches!(err, Err(GradientError::DegenerateGradient(_))));
    }

    #[test]
    fn test_mutations_refit() {
        let mut g = rgb();
        let before = g.coefficients().to_vec();

        g.push_anchor(Vec3::splat(0.5)).unwrap();
        assert_eq!(g.anchors().len(), 4);
        assert_eq!(g.weights().len(), 4);
        assert_ne!(g.coefficients(), &before[..]);

        g.set_anchor(3, Vec3::new(1.0, 1.0, 0.0)).unwrap();
        assert_eq!(g.anchors()[3], Vec3::new(1.0, 1.0, 0.0));

        assert_eq!(g.remove_anchor(3).unwrap(), Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(g.anchors().len(), 3);

        g.insert_anchor(0, Vec3::ZERO).unwrap();
        assert_eq!(g.anchors()[0], Vec3::ZERO);
        assert_eq!(g.weights()[0], 0.0);
    }

    #[test]
    fn test_failed_mutation_leaves_state() {
        let mut g = rgb();
        let coefficients = g.coefficients().to_vec();

        assert!(matches!(
            g.set_anchor(7, Vec3::ONE),
            Err(GradientError::AnchorIndex { index: 7, len: 3 })
        ));
        assert!(matches!(
            g.set_config(GradientConfig { degree: 0, ..*g.config() }),
            Err(GradientError::InvalidConfig(_))
        ));
        assert!(g.replace_anchors(vec![]).is_err());

        assert_eq!(g.anchors().len(), 3);
        assert_eq!(g.config().degree, 6);
        assert_eq!(g.coefficients(), &coefficients[..]);
    }

    #[test]
    fn test_cannot_remove_last_anchor() {
        let mut g = ColorGradient::new("one", vec![Vec3::ONE], GradientConfig::default()).unwrap();
        assert!(matches!(g.remove_anchor(0), Err(GradientError::DegenerateGradient(_))));
        assert_eq!(g.anchors(), &[Vec3::ONE]);
    }

    #[test]
    fn test_set_config_changes_model() {
        let mut g = rgb();
        g.set_config(GradientConfig {
            model: ModelKind::Trigonometric,
            ..*g.config()
        })
        .unwrap();
        assert_eq!(g.coefficients().len(), 4);
        assert_eq!(g.curve().model(), ModelKind::Trigonometric);
    }

    #[test]
    fn test_color_maps() {
        let g = rgb();
        let maps = g
            .color_maps(&[
                (WeightSpace::Space(ColorSpaceType::Srgb), ColorSpaceType::Srgb),
                (WeightSpace::Unweighted, ColorSpaceType::CieLab),
            ])
            .unwrap();
        assert_eq!(maps.len(), 2);
        assert_ne!(maps[0].coefficients(), maps[1].coefficients());
        assert_eq!(g.config().mix_space, ColorSpaceType::OkLab);
    }

    #[test]
    fn test_anchors_from_curve() {
        let curve = FittedCurve::new(ModelKind::HornerPolynomial, 2, false, vec![Vec3::ZERO, Vec3::ONE]);
        let anchors = anchors_from_curve(&curve, 5);
        assert_eq!(anchors.len(), 5);
        assert_eq!(anchors[4], Vec3::ONE);
        assert_eq!(anchors[2], Vec3::splat(0.5));
    }
}
