//! Basis models for fitted curves.
//!
//! Each [`ModelKind`] maps to a [`Basis`]: how to evaluate one channel from
//! its parameters, how many parameters a given degree needs, and how to
//! guess a starting point for the optimizer. The mapping is an exhaustive
//! `match`, so adding a model without a basis does not compile.
//!
//! | Model | Parameters for degree `d` | Initial guess |
//! |-------|---------------------------|---------------|
//! | HornerPolynomial | `d` | linear least squares |
//! | Trigonometric | 4 | mean + first harmonic |
//! | Fourier | `d` rounded up to even | mean + DFT harmonics |
//! | Gaussian | `3d` | evenly spaced bumps |
//! | Exponential | `d` | linear least squares |
//! | ChebyshevT / ChebyshevU | `d` | linear least squares |

use crate::ModelKind;
use cmap_optim::linalg::{Matrix, lstsq};
use std::f64::consts::TAU;

/// Evaluation, arity and initial-guess strategy of one model.
#[derive(Debug, Clone, Copy)]
pub struct Basis {
    kind: ModelKind,
    evaluate: fn(f64, &[f64]) -> f64,
    arity: fn(usize) -> usize,
    guess: Guess,
}

/// Starting-point strategy.
#[derive(Debug, Clone, Copy)]
enum Guess {
    /// Model is linear in its parameters; `row(t, arity)` is one design
    /// matrix row and the guess is the exact least-squares solution.
    Linear(fn(f64, usize) -> Vec<f64>),
    /// Model-specific heuristic `(t, y, arity) -> params`.
    Heuristic(fn(&[f64], &[f64], usize) -> Vec<f64>),
}

impl ModelKind {
    /// The basis strategy of this model.
    pub fn basis(self) -> &'static Basis {
        match self {
            Self::HornerPolynomial => &HORNER,
            Self::Trigonometric => &TRIGONOMETRIC,
            Self::Fourier => &FOURIER,
            Self::Gaussian => &GAUSSIAN,
            Self::Exponential => &EXPONENTIAL,
            Self::ChebyshevT => &CHEBYSHEV_T,
            Self::ChebyshevU => &CHEBYSHEV_U,
        }
    }
}

impl Basis {
    /// Model this basis implements.
    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// Evaluates one channel at `t`.
    #[inline]
    pub fn evaluate(&self, t: f64, params: &[f64]) -> f64 {
        (self.evaluate)(t, params)
    }

    /// Parameter count per channel for `degree`.
    #[inline]
    pub fn arity(&self, degree: usize) -> usize {
        (self.arity)(degree)
    }

    /// Returns true if the model is linear in its parameters.
    pub fn is_linear(&self) -> bool {
        matches!(self.guess, Guess::Linear(_))
    }

    /// Starting parameters for fitting samples `(t, y)` of one channel.
    pub fn initial_guess(&self, t: &[f64], y: &[f64], arity: usize) -> Vec<f64> {
        match self.guess {
            Guess::Linear(row) => {
                let rows: Vec<Vec<f64>> = t.iter().map(|&ti| row(ti, arity)).collect();
                let design = Matrix::from_fn(t.len(), arity, |r, c| rows[r][c]);
                lstsq(&design, y).unwrap_or_else(|_| vec![0.0; arity])
            }
            Guess::Heuristic(guess) => guess(t, y, arity),
        }
    }
}

// ============================================================================
// Polynomial
// ============================================================================

static HORNER: Basis = Basis {
    kind: ModelKind::HornerPolynomial,
    evaluate: horner,
    arity: same_as_degree,
    guess: Guess::Linear(power_row),
};

fn same_as_degree(degree: usize) -> usize {
    degree
}

fn four(_: usize) -> usize {
    4
}

fn even_at_least_degree(degree: usize) -> usize {
    degree + degree % 2
}

fn three_per_degree(degree: usize) -> usize {
    3 * degree
}

/// `c[0] + t(c[1] + t(c[2] + ...))`.
pub fn horner(t: f64, c: &[f64]) -> f64 {
    c.iter().rev().fold(0.0, |acc, &ck| ck + t * acc)
}

fn power_row(t: f64, arity: usize) -> Vec<f64> {
    std::iter::successors(Some(1.0), |p| Some(p * t)).take(arity).collect()
}

// ============================================================================
// Trigonometric and Fourier
// ============================================================================

static TRIGONOMETRIC: Basis = Basis {
    kind: ModelKind::Trigonometric,
    evaluate: trigonometric,
    arity: four,
    guess: Guess::Heuristic(trigonometric_guess),
};

/// `a + b cos(2π(c t + d))`.
pub fn trigonometric(t: f64, c: &[f64]) -> f64 {
    match *c {
        [a, b, f, d, ..] => a + b * (TAU * (f * t + d)).cos(),
        // Short coefficient lists keep only the offset
        _ => c.first().copied().unwrap_or(0.0),
    }
}

/// Amplitude and phase (in turns) of harmonic `k`, cosine form.
fn harmonic(t: &[f64], y: &[f64], k: f64) -> (f64, f64) {
    let n = t.len().max(1) as f64;
    let (a, b) = t.iter().zip(y).fold((0.0, 0.0), |(a, b), (&ti, &yi)| {
        let (s, c) = (TAU * k * ti).sin_cos();
        (a + yi * c, b + yi * s)
    });
    let (a, b) = (2.0 * a / n, 2.0 * b / n);
    // b cos(2π(kt + d)) = A cos(2πkt) + B sin(2πkt)
    (a.hypot(b), (-b).atan2(a) / TAU)
}

fn mean(y: &[f64]) -> f64 {
    y.iter().sum::<f64>() / y.len().max(1) as f64
}

fn trigonometric_guess(t: &[f64], y: &[f64], _arity: usize) -> Vec<f64> {
    let (amplitude, phase) = harmonic(t, y, 1.0);
    vec![mean(y), amplitude, 1.0, phase]
}

static FOURIER: Basis = Basis {
    kind: ModelKind::Fourier,
    evaluate: fourier,
    arity: even_at_least_degree,
    guess: Guess::Heuristic(fourier_guess),
};

/// `c0 cos(2π c1) + Σₖ c₂ₖ cos(2π(k t + c₂ₖ₊₁))` for `k = 1..len/2`.
pub fn fourier(t: f64, c: &[f64]) -> f64 {
    let mut result = match *c {
        [c0, c1, ..] => c0 * (TAU * c1).cos(),
        _ => c.first().copied().unwrap_or(0.0),
    };
    for k in 1..c.len() / 2 {
        result += c[2 * k] * (TAU * (k as f64 * t + c[2 * k + 1])).cos();
    }
    result
}

fn fourier_guess(t: &[f64], y: &[f64], arity: usize) -> Vec<f64> {
    let mut params = vec![mean(y), 0.0];
    for k in 1..arity / 2 {
        let (amplitude, phase) = harmonic(t, y, k as f64);
        params.extend([amplitude, phase]);
    }
    params
}

// ============================================================================
// Gaussian
// ============================================================================

static GAUSSIAN: Basis = Basis {
    kind: ModelKind::Gaussian,
    evaluate: gaussian,
    arity: three_per_degree,
    guess: Guess::Heuristic(gaussian_guess),
};

/// Sum of bumps `a exp(-(t - μ)² / 2σ²)` over `(a, μ, σ)` triplets.
pub fn gaussian(t: f64, c: &[f64]) -> f64 {
    c.chunks_exact(3)
        .map(|g| {
            let (a, mu, sigma) = (g[0], g[1], g[2]);
            a * (-(t - mu).powi(2) / (2.0 * sigma * sigma + 1e-12)).exp()
        })
        .sum()
}

fn gaussian_guess(t: &[f64], y: &[f64], arity: usize) -> Vec<f64> {
    let bumps = arity / 3;
    let sigma = 1.0 / bumps.max(1) as f64;
    (0..bumps)
        .flat_map(|j| {
            let mu = (j as f64 + 0.5) / bumps as f64;
            // Sample closest to the bump center
            let a = t
                .iter()
                .zip(y)
                .min_by(|(ta, _), (tb, _)| (*ta - mu).abs().total_cmp(&(*tb - mu).abs()))
                .map_or(0.0, |(_, &yi)| yi);
            [a, mu, sigma]
        })
        .collect()
}

// ============================================================================
// Exponential
// ============================================================================

static EXPONENTIAL: Basis = Basis {
    kind: ModelKind::Exponential,
    evaluate: exponential,
    arity: same_as_degree,
    guess: Guess::Linear(exponential_row),
};

/// `Σ cₖ exp(-k t)`.
pub fn exponential(t: f64, c: &[f64]) -> f64 {
    c.iter().enumerate().map(|(k, ck)| ck * (-(k as f64) * t).exp()).sum()
}

fn exponential_row(t: f64, arity: usize) -> Vec<f64> {
    (0..arity).map(|k| (-(k as f64) * t).exp()).collect()
}

// ============================================================================
// Chebyshev
// ============================================================================

static CHEBYSHEV_T: Basis = Basis {
    kind: ModelKind::ChebyshevT,
    evaluate: chebyshev_t,
    arity: same_as_degree,
    guess: Guess::Linear(chebyshev_t_row),
};

static CHEBYSHEV_U: Basis = Basis {
    kind: ModelKind::ChebyshevU,
    evaluate: chebyshev_u,
    arity: same_as_degree,
    guess: Guess::Linear(chebyshev_u_row),
};

/// `P₀, P₁, ...` on `x = 2t - 1` via `Pₖ₊₁ = 2x Pₖ - Pₖ₋₁`, with `P₁ = first`.
fn chebyshev_terms(t: f64, count: usize, second_kind: bool) -> impl Iterator<Item = f64> {
    let x = 2.0 * t - 1.0;
    let first = if second_kind { 2.0 * x } else { x };
    std::iter::successors(Some((1.0, first)), move |&(prev, cur)| Some((cur, 2.0 * x * cur - prev)))
        .map(|(p, _)| p)
        .take(count)
}

/// `Σ cₖ Tₖ(2t - 1)`.
pub fn chebyshev_t(t: f64, c: &[f64]) -> f64 {
    c.iter().zip(chebyshev_terms(t, c.len(), false)).map(|(ck, tk)| ck * tk).sum()
}

/// `Σ cₖ Uₖ(2t - 1)`.
pub fn chebyshev_u(t: f64, c: &[f64]) -> f64 {
    c.iter().zip(chebyshev_terms(t, c.len(), true)).map(|(ck, uk)| ck * uk).sum()
}

fn chebyshev_t_row(t: f64, arity: usize) -> Vec<f64> {
    chebyshev_terms(t, arity, false).collect()
}

fn chebyshev_u_row(t: f64, arity: usize) -> Vec<f64> {
    chebyshev_terms(t, arity, true).collect()
}
