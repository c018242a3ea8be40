//! # cmap-optim
//!
//! Numeric engines behind curve fitting and nearest-point search.
//!
//! - [`linalg`] - dense matrices, Gaussian elimination, Householder QR
//! - [`Loss`] - robust losses (linear, soft-L1, Cauchy, arctan)
//! - [`LeastSquares`] - Levenberg–Marquardt trust region with numeric
//!   Jacobian and a hard iteration cap
//! - [`NelderMead`] - derivative-free simplex minimization
//!
//! Both iterative solvers always return their best iterate together with a
//! `converged` flag; hitting the iteration cap is reported, not raised.
//!
//! # Usage
//!
//! ```rust
//! use cmap_optim::{LeastSquares, Loss};
//!
//! let report = LeastSquares::new(Loss::Arctan)
//!     .with_max_iterations(100)
//!     .minimize(|p, out| out[0] = p[0] - 3.0, 1, &[0.0])
//!     .unwrap();
//! assert!((report.params[0] - 3.0).abs() < 1e-6);
//! ```
//!
//! # Dependencies
//!
//! - `thiserror` - [`OptimError`]
//! - `tracing` - per-run diagnostics
//! - `serde` - [`Loss`] appears in fit configuration
//!
//! # Used By
//!
//! - `cmap-gradient` - curve fitting, nearest-point solver

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod least_squares;
pub mod linalg;
mod loss;
mod nelder_mead;

pub use error::{OptimError, OptimResult};
pub use least_squares::{LeastSquares, LeastSquaresReport};
pub use loss::Loss;
pub use nelder_mead::{MinimizeReport, NelderMead};
