//! Nonlinear least squares by a Levenberg–Marquardt trust region.
//!
//! Minimizes `½ Σ s² ρ((rᵢ(x)/s)²)` over `x`, where `r` is a user residual
//! function and `ρ` a [`Loss`]. The Jacobian is estimated by forward
//! differences. Robust losses are handled by reweighting each residual with
//! `ρ'` at the current iterate.
//!
//! A step is accepted only when it lowers the cost, so the returned
//! parameters are never worse than the initial guess.
//!
//! # Example
//!
//! ```rust
//! use cmap_optim::{LeastSquares, Loss};
//!
//! // Fit y = a * exp(b t)
//! let t: Vec<f64> = (0..20).map(|i| i as f64 / 19.0).collect();
//! let y: Vec<f64> = t.iter().map(|t| 2.0 * (-1.5 * t).exp()).collect();
//!
//! let report = LeastSquares::new(Loss::Linear)
//!     .minimize(
//!         |p, out| {
//!             for (o, (t, y)) in out.iter_mut().zip(t.iter().zip(&y)) {
//!                 *o = p[0] * (p[1] * t).exp() - y;
//!             }
//!         },
//!         t.len(),
//!         &[1.0, 0.0],
//!     )
//!     .unwrap();
//!
//! assert!(report.converged);
//! assert!((report.params[0] - 2.0).abs() < 1e-6);
//! assert!((report.params[1] + 1.5).abs() < 1e-6);
//! ```

use crate::linalg::{Matrix, norm, solve};
use crate::{Loss, OptimError, OptimResult};
use tracing::{debug, trace};

/// Largest damping before a step is declared impossible.
const MAX_DAMPING: f64 = 1e16;

/// Levenberg–Marquardt solver settings.
#[derive(Debug, Clone, PartialEq)]
pub struct LeastSquares {
    /// Loss applied to squared residuals.
    pub loss: Loss,
    /// Soft margin `s` between inlier and outlier residuals.
    pub loss_scale: f64,
    /// Cap on outer iterations (Jacobian evaluations).
    pub max_iterations: usize,
    /// Stop when an accepted step lowers the cost by less than
    /// `ftol * cost`.
    pub ftol: f64,
    /// Stop when the step is shorter than `xtol * (xtol + |x|)`.
    pub xtol: f64,
    /// Stop when the infinity norm of the gradient drops below this.
    pub gtol: f64,
}

impl Default for LeastSquares {
    fn default() -> Self {
        Self {
            loss: Loss::Linear,
            loss_scale: 1.0,
            max_iterations: 5000,
            ftol: 1e-10,
            xtol: 1e-10,
            gtol: 1e-12,
        }
    }
}

/// Outcome of a least-squares run.
#[derive(Debug, Clone, PartialEq)]
pub struct LeastSquaresReport {
    /// Best parameters found.
    pub params: Vec<f64>,
    /// Robust cost at `params`.
    pub cost: f64,
    /// Outer iterations performed.
    pub iterations: usize,
    /// Whether a tolerance was met before the iteration cap.
    pub converged: bool,
}

impl LeastSquares {
    /// Solver with the given loss and default tolerances.
    pub fn new(loss: Loss) -> Self {
        Self {
            loss,
            ..Self::default()
        }
    }

    /// Sets the iteration cap.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the loss soft margin.
    pub fn with_loss_scale(mut self, scale: f64) -> Self {
        self.loss_scale = scale;
        self
    }

    /// Minimizes the robust cost of `residuals`.
    ///
    /// `residuals(params, out)` must fill `out` (length `count`).
    ///
    /// # Errors
    ///
    /// - [`OptimError::EmptyProblem`] for zero residuals or parameters
    /// - [`OptimError::Underdetermined`] if `count < x0.len()`
    /// - [`OptimError::NonFinite`] if the residuals at `x0` are not finite
    pub fn minimize<F>(&self, residuals: F, count: usize, x0: &[f64]) -> OptimResult<LeastSquaresReport>
    where
        F: Fn(&[f64], &mut [f64]),
    {
        let n = x0.len();
        if n == 0 || count == 0 {
            return Err(OptimError::EmptyProblem);
        }
        if count < n {
            return Err(OptimError::Underdetermined { residuals: count, params: n });
        }

        let scale = if self.loss_scale > 0.0 { self.loss_scale } else { 1.0 };
        let s2 = scale * scale;

        let mut x = x0.to_vec();
        let mut r = vec![0.0; count];
        residuals(&x, &mut r);
        if r.iter().any(|v| !v.is_finite()) {
            return Err(OptimError::NonFinite);
        }
        let mut cost = self.loss.cost(&r, scale);

        let mut damping = 1e-3;
        let mut converged = false;
        let mut iterations = 0;
        let mut r_trial = vec![0.0; count];

        while iterations < self.max_iterations {
            iterations += 1;

            let jac = forward_jacobian(&residuals, &x, &r);
            let weights: Vec<f64> = r.iter().map(|ri| self.loss.weight(ri * ri / s2)).collect();
            let weighted_r: Vec<f64> = r.iter().zip(&weights).map(|(ri, wi)| ri * wi).collect();

            let hessian = jac.weighted_gram(Some(&weights));
            let gradient = jac.transpose_mul_vec(&weighted_r)?;

            let g_inf = gradient.iter().fold(0.0f64, |acc, g| acc.max(g.abs()));
            if g_inf <= self.gtol {
                converged = true;
                break;
            }

            // Inner loop: raise damping until a step lowers the cost
            let mut accepted = false;
            while damping <= MAX_DAMPING {
                let mut system = hessian.clone();
                for i in 0..n {
                    system[(i, i)] += damping * hessian[(i, i)].max(1e-12);
                }
                let rhs: Vec<f64> = gradient.iter().map(|g| -g).collect();
                let step = match solve(&system, &rhs) {
                    Ok(step) => step,
                    Err(_) => {
                        damping *= 10.0;
                        continue;
                    }
                };

                let x_trial: Vec<f64> = x.iter().zip(&step).map(|(a, b)| a + b).collect();
                residuals(&x_trial, &mut r_trial);
                let trial_cost = if r_trial.iter().all(|v| v.is_finite()) {
                    self.loss.cost(&r_trial, scale)
                } else {
                    f64::INFINITY
                };

                let step_norm = norm(&step);
                let small_step = step_norm <= self.xtol * (self.xtol + norm(&x));

                if trial_cost < cost {
                    let reduction = cost - trial_cost;
                    x = x_trial;
                    std::mem::swap(&mut r, &mut r_trial);
                    cost = trial_cost;
                    damping = (damping / 3.0).max(1e-12);
                    accepted = true;
                    if reduction <= self.ftol * cost || small_step {
                        converged = true;
                    }
                    break;
                }

                if small_step {
                    // No representable improvement left
                    converged = true;
                    break;
                }
                damping *= 4.0;
            }

            trace!(iteration = iterations, cost, damping, "least squares step");

            if converged {
                break;
            }
            if !accepted {
                // Damping exhausted without progress; x is a local minimum
                converged = true;
                break;
            }
        }

        debug!(iterations, cost, converged, loss = ?self.loss, "least squares finished");
        Ok(LeastSquaresReport {
            params: x,
            cost,
            iterations,
            converged,
        })
    }
}

/// Forward-difference Jacobian (`count x n`) at `x`, given `r = f(x)`.
fn forward_jacobian<F>(residuals: &F, x: &[f64], r: &[f64]) -> Matrix
where
    F: Fn(&[f64], &mut [f64]),
{
    let n = x.len();
    let m = r.len();
    let mut jac = Matrix::zeros(m, n);
    let mut xp = x.to_vec();
    let mut rp = vec![0.0; m];

    for j in 0..n {
        let h = f64::EPSILON.sqrt() * x[j].abs().max(1.0);
        xp[j] = x[j] + h;
        residuals(&xp, &mut rp);
        // Use the actually representable step
        let dh = xp[j] - x[j];
        for i in 0..m {
            jac[(i, j)] = (rp[i] - r[i]) / dh;
        }
        xp[j] = x[j];
    }
    jac
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn line_residuals(t: &[f64], y: &[f64]) -> impl Fn(&[f64], &mut [f64]) {
        let t = t.to_vec();
        let y = y.to_vec();
        move |p: &[f64], out: &mut [f64]| {
            for i in 0..t.len() {
                out[i] = p[0] + p[1] * t[i] - y[i];
            }
        }
    }

    #[test]
    fn test_linear_problem_exact() {
        let t: Vec<f64> = (0..10).map(|i| i as f64).collect();
        let y: Vec<f64> = t.iter().map(|t| 3.0 - 0.5 * t).collect();
        let report = LeastSquares::default()
            .minimize(line_residuals(&t, &y), t.len(), &[0.0, 0.0])
            .unwrap();
        assert!(report.converged);
        assert_abs_diff_eq!(report.params[0], 3.0, epsilon = 1e-6);
        assert_abs_diff_eq!(report.params[1], -0.5, epsilon = 1e-6);
        assert!(report.cost < 1e-12);
    }

    #[test]
    fn test_rosenbrock() {
        // r = (10 (y - x²), 1 - x)
        let report = LeastSquares::default()
            .minimize(
                |p, out| {
                    out[0] = 10.0 * (p[1] - p[0] * p[0]);
                    out[1] = 1.0 - p[0];
                },
                2,
                &[-1.2, 1.0],
            )
            .unwrap();
        assert_abs_diff_eq!(report.params[0], 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(report.params[1], 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_robust_loss_ignores_outlier() {
        let t: Vec<f64> = (0..21).map(|i| i as f64 / 20.0).collect();
        let mut y: Vec<f64> = t.iter().map(|t| 1.0 + 2.0 * t).collect();
        y[10] += 50.0;

        let plain = LeastSquares::new(Loss::Linear)
            .minimize(line_residuals(&t, &y), t.len(), &[1.0, 2.0])
            .unwrap();
        let robust = LeastSquares::new(Loss::Cauchy)
            .with_loss_scale(0.1)
            .minimize(line_residuals(&t, &y), t.len(), &[1.0, 2.0])
            .unwrap();

        let plain_err = (plain.params[0] - 1.0).abs();
        let robust_err = (robust.params[0] - 1.0).abs();
        assert!(robust_err < plain_err, "robust {robust_err} vs plain {plain_err}");
    }

    #[test]
    fn test_iteration_cap_returns_best_effort() {
        let start = [-1.2, 1.0];
        let f = |p: &[f64], out: &mut [f64]| {
            out[0] = 10.0 * (p[1] - p[0] * p[0]);
            out[1] = 1.0 - p[0];
        };
        let initial_cost = Loss::Linear.cost(&[10.0 * (1.0 - 1.44), 2.2], 1.0);
        let report = LeastSquares::default()
            .with_max_iterations(2)
            .minimize(f, 2, &start)
            .unwrap();
        assert_eq!(report.iterations, 2);
        assert!(!report.converged);
        assert!(report.cost <= initial_cost);
    }

    #[test]
    fn test_errors() {
        let ls = LeastSquares::default();
        assert_eq!(ls.minimize(|_, _| {}, 0, &[1.0]), Err(OptimError::EmptyProblem));
        assert_eq!(
            ls.minimize(|_, _| {}, 1, &[1.0, 2.0]),
            Err(OptimError::Underdetermined { residuals: 1, params: 2 })
        );
        assert_eq!(
            ls.minimize(|_, out| out[0] = f64::NAN, 1, &[1.0]),
            Err(OptimError::NonFinite)
        );
    }
}
