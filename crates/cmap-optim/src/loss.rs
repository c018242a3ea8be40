//! Robust loss functions for least squares.
//!
//! A loss `ρ(z)` is applied to the squared residual `z = (r / s)²`, where
//! `s` is the soft margin between inliers and outliers. The cost of a
//! residual vector is `½ Σ s² ρ(zᵢ)`.
//!
//! | Loss | ρ(z) | ρ'(z) |
//! |------|------|-------|
//! | Linear | z | 1 |
//! | SoftL1 | 2(√(1+z) − 1) | 1/√(1+z) |
//! | Cauchy | ln(1+z) | 1/(1+z) |
//! | Arctan | atan(z) | 1/(1+z²) |

use serde::{Deserialize, Serialize};

/// Loss applied to squared residuals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Loss {
    /// Plain sum of squares.
    #[default]
    Linear,
    /// Smooth approximation of absolute value.
    SoftL1,
    /// Logarithmic, strongly down-weights outliers.
    Cauchy,
    /// Bounded loss; a single residual can contribute at most π/2.
    Arctan,
}

impl Loss {
    /// `ρ(z)`.
    #[inline]
    pub fn rho(self, z: f64) -> f64 {
        match self {
            Self::Linear => z,
            Self::SoftL1 => 2.0 * ((1.0 + z).sqrt() - 1.0),
            Self::Cauchy => z.ln_1p(),
            Self::Arctan => z.atan(),
        }
    }

    /// `ρ'(z)`, the weight given to a residual.
    #[inline]
    pub fn weight(self, z: f64) -> f64 {
        match self {
            Self::Linear => 1.0,
            Self::SoftL1 => 1.0 / (1.0 + z).sqrt(),
            Self::Cauchy => 1.0 / (1.0 + z),
            Self::Arctan => 1.0 / (1.0 + z * z),
        }
    }

    /// Robust cost `½ Σ s² ρ((r/s)²)`.
    pub fn cost(self, residuals: &[f64], scale: f64) -> f64 {
        let s2 = scale * scale;
        0.5 * s2 * residuals.iter().map(|r| self.rho(r * r / s2)).sum::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Loss; 4] = [Loss::Linear, Loss::SoftL1, Loss::Cauchy, Loss::Arctan];

    #[test]
    fn test_small_residuals_match_linear() {
        for loss in ALL {
            let z = 1e-8;
            assert!((loss.rho(z) - z).abs() < 1e-12, "{loss:?}");
            assert!((loss.weight(z) - 1.0).abs() < 1e-7, "{loss:?}");
        }
    }

    #[test]
    fn test_weight_is_derivative() {
        let h = 1e-6;
        for loss in ALL {
            for z in [0.1, 1.0, 4.0] {
                let numeric = (loss.rho(z + h) - loss.rho(z - h)) / (2.0 * h);
                assert!((numeric - loss.weight(z)).abs() < 1e-6, "{loss:?} at {z}");
            }
        }
    }

    #[test]
    fn test_arctan_bounded() {
        let cost = Loss::Arctan.cost(&[1e6], 1.0);
        assert!(cost <= std::f64::consts::FRAC_PI_4 + 1e-12);
    }
}
