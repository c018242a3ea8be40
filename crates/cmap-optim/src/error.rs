//! Error types for the optimizers.

use thiserror::Error;

/// Optimizer error.
///
/// Running out of iterations is not an error: every solver reports it in
/// its result alongside the best iterate.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OptimError {
    /// Operand shapes do not agree.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Required size.
        expected: usize,
        /// Supplied size.
        found: usize,
    },

    /// Fewer residuals than parameters.
    #[error("underdetermined problem: {residuals} residuals for {params} parameters")]
    Underdetermined {
        /// Residual count.
        residuals: usize,
        /// Parameter count.
        params: usize,
    },

    /// Matrix is singular or numerically rank deficient.
    #[error("singular matrix")]
    Singular,

    /// No parameters or no residuals.
    #[error("empty problem")]
    EmptyProblem,

    /// Objective is NaN or infinite at the starting point.
    #[error("objective is not finite at the initial guess")]
    NonFinite,
}

/// Result type for optimizer operations.
pub type OptimResult<T> = Result<T, OptimError>;
