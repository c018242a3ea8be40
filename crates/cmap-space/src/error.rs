//! Error types for color space conversions.

use crate::ColorSpaceType;
use thiserror::Error;

/// Color conversion error.
///
/// Graph errors describe a static configuration problem (a missing edge or a
/// white point that was never supplied). They are surfaced immediately and
/// never retried.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ColorError {
    /// No chain of transforms connects the two color spaces.
    #[error("no conversion path from {from} to {to}")]
    UnreachableColorSpace {
        /// Source color space.
        from: ColorSpaceType,
        /// Target color space.
        to: ColorSpaceType,
    },

    /// A transform on the route needs a white point that was not supplied.
    #[error("conversion {from} -> {to} requires an illuminant/observer white point")]
    MissingColorSpaceParameter {
        /// Source of the edge that needs the parameter.
        from: ColorSpaceType,
        /// Target of the edge that needs the parameter.
        to: ColorSpaceType,
    },

    /// Input value is invalid (unknown name, NaN, out of expected range).
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Result type for color conversions.
pub type ColorResult<T> = Result<T, ColorError>;
