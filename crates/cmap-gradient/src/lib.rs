//! # cmap-gradient
//!
//! Color gradients defined by anchor colors and approximated by compact
//! numeric curves.
//!
//! # Pipeline
//!
//! ```text
//! anchors (sRGB)
//!   -> determine_weights   cumulative distance in the weight space
//!   -> Evaluator           piecewise mix in the mix space, back to sRGB
//!   -> fit_curve           per-channel basis fit over sampled evaluator
//!   -> FittedCurve         coefficients + FitQuality
//!   -> NearestPointSolver  color -> curve parameter
//! ```
//!
//! [`ColorGradient`] ties the steps together and refits on every mutation.
//! [`sort_by_hue`] orders unordered palettes before they become anchors.
//!
//! # Usage
//!
//! ```rust
//! use cmap_gradient::{ColorGradient, GradientConfig, ModelKind, presets};
//! use cmap_math::Vec3;
//!
//! let gradient = presets::warm_dusk()?;
//! let color = gradient.evaluate_fit(0.4);
//! let back = gradient.nearest_weight(color)?;
//! assert!((back.t - 0.4).abs() < 1e-2);
//!
//! let config = GradientConfig { model: ModelKind::ChebyshevT, degree: 8, ..Default::default() };
//! let custom = ColorGradient::new("custom", vec![Vec3::ZERO, Vec3::ONE], config)?;
//! assert_eq!(custom.coefficients().len(), 8);
//! # Ok::<(), cmap_gradient::GradientError>(())
//! ```
//!
//! # Dependencies
//!
//! - `cmap-space` - conversions for weighting, mixing and hue sorting
//! - `cmap-optim` - least squares and Nelder–Mead
//! - `serde`, `serde_json`, `serde_yaml` - gradient documents
//! - `thiserror` - [`GradientError`]
//! - `tracing` - fit diagnostics and degenerate-input warnings
//!
//! # Used By
//!
//! - `cmap-cli` - command line driver

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod config;
mod error;
mod evaluator;
mod fitter;
mod gradient;
mod hue;
pub mod model;
mod nearest;
pub mod presets;
mod record;
mod weighting;

pub use config::{FitAlgorithm, GradientConfig, ModelKind, WeightSpace};
pub use error::{GradientError, GradientResult};
pub use evaluator::Evaluator;
pub use fitter::{FitNonConvergence, FitQuality, FittedCurve, fit_curve};
pub use gradient::{ColorGradient, anchors_from_curve};
pub use hue::sort_by_hue;
pub use model::Basis;
pub use nearest::{NearestPoint, NearestPointSolver, SolverNonConvergence};
pub use record::{DocumentFormat, GradientDocument, GradientRecord, PreviewPair};
pub use weighting::{MIN_SEGMENT_SHARE, determine_weights};
