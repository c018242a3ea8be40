//! Derivative-free minimization with the Nelder–Mead simplex.
//!
//! Standard coefficients: reflection 1, expansion 2, contraction ½,
//! shrink ½. Terminates when both the simplex spread in value and in
//! position fall below the tolerances, or at the iteration cap.

use crate::{OptimError, OptimResult};
use tracing::trace;

/// Nelder–Mead settings.
#[derive(Debug, Clone, PartialEq)]
pub struct NelderMead {
    /// Cap on simplex iterations.
    pub max_iterations: usize,
    /// Absolute tolerance on objective spread across the simplex.
    pub ftol: f64,
    /// Absolute tolerance on vertex spread (infinity norm).
    pub xtol: f64,
    /// Edge length of the initial simplex.
    pub initial_step: f64,
}

impl Default for NelderMead {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            ftol: 1e-10,
            xtol: 1e-10,
            initial_step: 0.05,
        }
    }
}

/// Outcome of a Nelder–Mead run.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimizeReport {
    /// Best point found.
    pub x: Vec<f64>,
    /// Objective at `x`.
    pub value: f64,
    /// Iterations performed.
    pub iterations: usize,
    /// Whether the tolerances were met before the cap.
    pub converged: bool,
}

impl NelderMead {
    /// Minimizes `f` starting from `x0`.
    ///
    /// Non-finite objective values are treated as `+∞`, so the simplex
    /// walks away from them.
    ///
    /// # Errors
    ///
    /// [`OptimError::EmptyProblem`] if `x0` is empty.
    ///
    /// # Example
    ///
    /// ```rust
    /// use cmap_optim::NelderMead;
    ///
    /// let report = NelderMead::default()
    ///     .minimize(|x| (x[0] - 0.3).powi(2) + 1.0, &[0.5])
    ///     .unwrap();
    /// assert!((report.x[0] - 0.3).abs() < 1e-4);
    /// ```
    pub fn minimize<F>(&self, f: F, x0: &[f64]) -> OptimResult<MinimizeReport>
    where
        F: Fn(&[f64]) -> f64,
    {
        let n = x0.len();
        if n == 0 {
            return Err(OptimError::EmptyProblem);
        }
        let eval = |x: &[f64]| {
            let v = f(x);
            if v.is_finite() { v } else { f64::INFINITY }
        };

        let mut simplex: Vec<(Vec<f64>, f64)> = Vec::with_capacity(n + 1);
        simplex.push((x0.to_vec(), eval(x0)));
        for i in 0..n {
            let mut p = x0.to_vec();
            p[i] += self.initial_step;
            let v = eval(&p[..]);
            simplex.push((p, v));
        }

        let mut iterations = 0;
        let mut converged = false;

        while iterations < self.max_iterations {
            simplex.sort_by(|a, b| a.1.total_cmp(&b.1));

            let best = simplex[0].1;
            let f_spread = simplex.iter().map(|(_, v)| (v - best).abs()).fold(0.0, f64::max);
            let x_spread = simplex[1..]
                .iter()
                .flat_map(|(p, _)| p.iter().zip(&simplex[0].0).map(|(a, b)| (a - b).abs()))
                .fold(0.0, f64::max);
            if f_spread <= self.ftol && x_spread <= self.xtol {
                converged = true;
                break;
            }

            iterations += 1;

            // Centroid of all but the worst vertex
            let mut centroid = vec![0.0; n];
            for (p, _) in &simplex[..n] {
                for (c, v) in centroid.iter_mut().zip(p) {
                    *c += v / n as f64;
                }
            }
            let along = |t: f64| -> Vec<f64> {
                centroid
                    .iter()
                    .zip(&simplex[n].0)
                    .map(|(c, w)| c + t * (c - w))
                    .collect()
            };

            let worst = simplex[n].1;
            let second_worst = simplex[n - 1].1;

            let reflected = along(1.0);
            let fr = eval(&reflected[..]);

            if fr < best {
                let expanded = along(2.0);
                let fe = eval(&expanded[..]);
                simplex[n] = if fe < fr { (expanded, fe) } else { (reflected, fr) };
                continue;
            }
            if fr < second_worst {
                simplex[n] = (reflected, fr);
                continue;
            }

            let (contracted, fc) = if fr < worst {
                let p = along(0.5);
                let v = eval(&p[..]);
                (p, v)
            } else {
                let p = along(-0.5);
                let v = eval(&p[..]);
                (p, v)
            };
            if fc < fr.min(worst) {
                simplex[n] = (contracted, fc);
                continue;
            }

            // Shrink toward the best vertex
            let anchor = simplex[0].0.clone();
            for (p, v) in simplex.iter_mut().skip(1) {
                for (pi, ai) in p.iter_mut().zip(&anchor) {
                    *pi = ai + 0.5 * (*pi - ai);
                }
                *v = eval(&p[..]);
            }
        }

        simplex.sort_by(|a, b| a.1.total_cmp(&b.1));
        let (x, value) = simplex.swap_remove(0);
        trace!(iterations, value, converged, "nelder-mead finished");
        Ok(MinimizeReport {
            x,
            value,
            iterations,
            converged,
        })
    }
}
