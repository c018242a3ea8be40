//! Mapping a color back to its parameter on a fitted curve.

use crate::{FittedCurve, GradientResult};
use crate::evaluator::reduce;
use cmap_math::Vec3;
use cmap_optim::NelderMead;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// The simplex search stopped at its iteration cap.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolverNonConvergence {
    /// Iteration cap that was reached.
    pub iterations: usize,
}

/// Result of a nearest-point search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NearestPoint {
    /// Best parameter, in `[0, 1)` for cyclic curves and `[0, 1]` otherwise.
    pub t: f64,
    /// Euclidean sRGB distance from the curve at `t` to the target.
    pub distance: f64,
    /// Whether the search met its tolerance.
    pub converged: bool,
    /// Present when the search stopped at its iteration cap.
    pub non_convergence: Option<SolverNonConvergence>,
}

/// Derivative-free search for the curve parameter closest to a color.
///
/// A coarse scan over `seeds` evenly spaced parameters (always including
/// `0.5`) picks the start, then a one-dimensional Nelder–Mead refines it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NearestPointSolver {
    /// Iteration cap of the simplex refinement.
    pub max_iterations: usize,
    /// Tolerance on parameter and distance spread.
    pub tolerance: f64,
    /// Number of coarse-scan parameters.
    pub seeds: usize,
}

impl Default for NearestPointSolver {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            tolerance: 1e-10,
            seeds: 32,
        }
    }
}

impl NearestPointSolver {
    /// Finds the parameter of `curve` closest to `target` (sRGB).
    ///
    /// Always terminates; an exhausted iteration budget is reported in
    /// [`NearestPoint::non_convergence`].
    pub fn solve(&self, curve: &FittedCurve, target: Vec3) -> GradientResult<NearestPoint> {
        let wraparound = curve.wraparound();
        let distance = |t: f64| curve.evaluate(t).distance(target);

        let seeds = self.seeds.max(2);
        let start = (0..seeds)
            .map(|k| k as f64 / seeds as f64)
            .chain(std::iter::once(0.5))
            .map(|t| (t, distance(t)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map_or(0.5, |(t, _)| t);

        let simplex = NelderMead {
            max_iterations: self.max_iterations,
            ftol: self.tolerance,
            xtol: self.tolerance,
            initial_step: 1.0 / seeds as f64,
        };
        let report = simplex.minimize(|x| distance(x[0]), &[start])?;

        let t = reduce(report.x[0], wraparound);
        let non_convergence = (!report.converged).then_some(SolverNonConvergence {
            iterations: report.iterations,
        });
        if non_convergence.is_some() {
            warn!(target = ?target.to_array(), t, "nearest-point search hit iteration cap");
        }
        debug!(t, distance = report.value, iterations = report.iterations, "nearest point");

        Ok(NearestPoint {
            t,
            distance: distance(t),
            converged: report.converged,
            non_convergence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ModelKind;

    fn ramp() -> FittedCurve {
        FittedCurve::new(
            ModelKind::HornerPolynomial,
            2,
            false,
            vec![Vec3::new(0.0, 0.2, 1.0), Vec3::new(1.0, 0.6, -1.0)],
        )
    }

    #[test]
    fn test_finds_point_on_ramp() {
        let curve = ramp();
        for t0 in [0.0, 0.1, 0.37, 0.5, 0.9, 1.0] {
            let found = NearestPointSolver::default().solve(&curve, curve.evaluate(t0)).unwrap();
            assert!((found.t - t0).abs() < 1e-4, "t0 = {t0}, found {found:?}");
            assert!(found.distance < 1e-4);
        }
    }

    #[test]
    fn test_off_curve_target() {
        // Closest point of the ramp to a color past its end is the end
        let curve = ramp();
        let found = NearestPointSolver::default()
            .solve(&curve, Vec3::new(2.0, 1.0, -1.0))
            .unwrap();
        assert!((found.t - 1.0).abs() < 1e-6, "{found:?}");
    }

    #[test]
    fn test_cyclic_result_in_unit_interval() {
        let curve = FittedCurve::new(
            ModelKind::Trigonometric,
            4,
            true,
            vec![Vec3::splat(0.5), Vec3::new(0.5, 0.3, 0.1), Vec3::ONE, Vec3::new(0.0, 0.1, 0.2)],
        );
        for t0 in [0.0, 0.25, 0.5, 0.75, 0.999] {
            let found = NearestPointSolver::default().solve(&curve, curve.evaluate(t0)).unwrap();
            assert!((0.0..1.0).contains(&found.t), "{found:?}");
            assert!(found.distance < 1e-4, "t0 = {t0}, found {found:?}");
        }
    }

    #[test]
    fn test_cap_is_reported() {
        let solver = NearestPointSolver {
            max_iterations: 1,
            seeds: 4,
            ..Default::default()
        };
        let found = solver.solve(&ramp(), ramp().evaluate(0.37)).unwrap();
        assert!(!found.converged);
        assert_eq!(found.non_convergence, Some(SolverNonConvergence { iterations: 1 }));
    }
}
