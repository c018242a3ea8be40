//! Error types for gradient operations.

use cmap_optim::OptimError;
use cmap_space::ColorError;
use thiserror::Error;

/// Gradient error.
///
/// Optimizer non-convergence is not an error; see
/// [`FitQuality`](crate::FitQuality) and
/// [`NearestPoint`](crate::NearestPoint).
#[derive(Debug, Error)]
pub enum GradientError {
    /// The gradient has no anchors, or a mutation would leave it empty.
    #[error("degenerate gradient: {0}")]
    DegenerateGradient(String),

    /// Anchor index out of range.
    #[error("anchor index {index} out of range for {len} anchors")]
    AnchorIndex {
        /// Requested index.
        index: usize,
        /// Anchor count.
        len: usize,
    },

    /// Fit configuration is inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Color conversion failed.
    #[error(transparent)]
    Color(#[from] ColorError),

    /// Optimizer rejected the problem.
    #[error("optimizer error: {0}")]
    Optim(#[from] OptimError),

    /// Reading or writing a document failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document could not be parsed or written.
    #[error("document format error: {0}")]
    Format(String),
}

/// Result type for gradient operations.
pub type GradientResult<T> = Result<T, GradientError>;
