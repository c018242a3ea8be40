//! Fit configuration of a gradient.

use crate::{GradientError, GradientResult};
use cmap_optim::Loss;
use cmap_space::{ColorError, ColorSpaceType, Illuminant, Observer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How anchor positions along the gradient are derived.
///
/// Serialized as `"Unweighted"` or the name of a color space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WeightSpace {
    /// Anchors are evenly spaced.
    Unweighted,
    /// Anchors are spaced by Euclidean distance in a color space.
    Space(ColorSpaceType),
}

impl Default for WeightSpace {
    fn default() -> Self {
        Self::Space(ColorSpaceType::OkLab)
    }
}

impl fmt::Display for WeightSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unweighted => f.pad("Unweighted"),
            Self::Space(space) => fmt::Display::fmt(space, f),
        }
    }
}

impl FromStr for WeightSpace {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, ColorError> {
        if s.trim().eq_ignore_ascii_case("unweighted") {
            Ok(Self::Unweighted)
        } else {
            s.parse().map(Self::Space)
        }
    }
}

impl TryFrom<String> for WeightSpace {
    type Error = ColorError;

    fn try_from(s: String) -> Result<Self, ColorError> {
        s.parse()
    }
}

impl From<WeightSpace> for String {
    fn from(w: WeightSpace) -> String {
        w.to_string()
    }
}

/// Basis function family used to approximate the gradient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModelKind {
    /// `c0 + t(c1 + t(c2 + ...))`.
    #[default]
    HornerPolynomial,
    /// `a + b cos(2π(c t + d))`.
    Trigonometric,
    /// Constant plus cosine harmonics with free phases.
    Fourier,
    /// Sum of Gaussian bumps.
    Gaussian,
    /// `Σ cₖ exp(-k t)`.
    Exponential,
    /// Chebyshev polynomials of the first kind on `x = 2t - 1`.
    ChebyshevT,
    /// Chebyshev polynomials of the second kind on `x = 2t - 1`.
    ChebyshevU,
}

impl ModelKind {
    /// Every model kind.
    pub const ALL: [ModelKind; 7] = [
        Self::HornerPolynomial,
        Self::Trigonometric,
        Self::Fourier,
        Self::Gaussian,
        Self::Exponential,
        Self::ChebyshevT,
        Self::ChebyshevU,
    ];

    /// Stable name, identical to the serialized form.
    pub const fn name(self) -> &'static str {
        match self {
            Self::HornerPolynomial => "HornerPolynomial",
            Self::Trigonometric => "Trigonometric",
            Self::Fourier => "Fourier",
            Self::Gaussian => "Gaussian",
            Self::Exponential => "Exponential",
            Self::ChebyshevT => "ChebyshevT",
            Self::ChebyshevU => "ChebyshevU",
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for ModelKind {
    type Err = GradientError;

    fn from_str(s: &str) -> GradientResult<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| GradientError::InvalidConfig(format!("unknown model '{s}'")))
    }
}

/// Optimizer driving the fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FitAlgorithm {
    /// Levenberg–Marquardt trust region with an arctan robust loss.
    #[default]
    TrustRegion,
    /// Same engine with a plain squared loss.
    LeastSquares,
}

impl FitAlgorithm {
    /// Loss the algorithm minimizes.
    pub const fn loss(self) -> Loss {
        match self {
            Self::TrustRegion => Loss::Arctan,
            Self::LeastSquares => Loss::Linear,
        }
    }
}

impl FromStr for FitAlgorithm {
    type Err = GradientError;

    fn from_str(s: &str) -> GradientResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "trustregion" | "trust-region" | "trf" => Ok(Self::TrustRegion),
            "leastsquares" | "least-squares" | "lsq" => Ok(Self::LeastSquares),
            _ => Err(GradientError::InvalidConfig(format!("unknown algorithm '{s}'"))),
        }
    }
}

/// Everything that shapes a gradient besides its anchors.
///
/// # Example
///
/// ```rust
/// use cmap_gradient::{GradientConfig, ModelKind};
///
/// let config = GradientConfig {
///     model: ModelKind::ChebyshevT,
///     degree: 8,
///     ..Default::default()
/// };
/// config.validate().unwrap();
/// assert_eq!(config.coefficient_count(), 8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GradientConfig {
    /// Polynomial order or basis count.
    pub degree: usize,
    /// Space used to measure anchor spacing.
    pub weight_space: WeightSpace,
    /// Space in which neighbouring anchors are blended.
    pub mix_space: ColorSpaceType,
    /// Basis family of the fitted curve.
    pub model: ModelKind,
    /// Whether the last anchor blends back into the first.
    pub wraparound: bool,
    /// Observer for white-point dependent spaces.
    pub observer: Observer,
    /// Illuminant for white-point dependent spaces.
    pub illuminant: Illuminant,
    /// Fit optimizer.
    pub algorithm: FitAlgorithm,
    /// Iteration cap per channel fit.
    pub max_iterations: usize,
    /// Number of evaluator samples the fit is run against.
    pub sample_count: usize,
}

impl Default for GradientConfig {
    fn default() -> Self {
        Self {
            degree: 6,
            weight_space: WeightSpace::default(),
            mix_space: ColorSpaceType::OkLab,
            model: ModelKind::HornerPolynomial,
            wraparound: true,
            observer: Observer::Cie1931,
            illuminant: Illuminant::D65,
            algorithm: FitAlgorithm::TrustRegion,
            max_iterations: 5000,
            sample_count: 256,
        }
    }
}

impl GradientConfig {
    /// Number of coefficients (per channel) the model needs at this degree.
    pub fn coefficient_count(&self) -> usize {
        self.model.basis().arity(self.degree)
    }

    /// Checks the configuration for contradictions.
    ///
    /// # Errors
    ///
    /// [`GradientError::InvalidConfig`] when the degree is zero, fewer than
    /// two samples are requested, the iteration cap is zero, a Fourier
    /// model has degree below 2, or the model has more coefficients than
    /// samples.
    pub fn validate(&self) -> GradientResult<()> {
        let fail = |msg: String| Err(GradientError::InvalidConfig(msg));
        if self.degree < 1 {
            return fail("degree must be at least 1".into());
        }
        if self.sample_count < 2 {
            return fail(format!("sample count {} is below 2", self.sample_count));
        }
        if self.max_iterations == 0 {
            return fail("max iterations must be positive".into());
        }
        if self.model == ModelKind::Fourier && self.degree < 2 {
            return fail(format!("Fourier model needs degree >= 2, got {}", self.degree));
        }
        let count = self.coefficient_count();
        if count > self.sample_count {
            return fail(format!(
                "{} at degree {} has {count} coefficients but only {} samples",
                self.model, self.degree, self.sample_count
            ));
        }
        Ok(())
    }
}
