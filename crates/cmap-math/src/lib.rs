//! # cmap-math
//!
//! Math primitives shared by the colormap crates.
//!
//! - [`Vec3`] - 3-component color triples (RGB, XYZ, Lab, ...)
//! - [`Mat3`] - 3x3 matrices for linear color transforms
//! - Chromatic adaptation ([`adapt_matrix`], [`BRADFORD`])
//! - Interpolation helpers ([`lerp`], [`fract`])
//!
//! # Design
//!
//! Everything is `f64`. Gradient fitting compares round trips through
//! perceptual spaces whose channels reach 100, so single precision would
//! eat the whole error budget.
//!
//! Matrices are stored **row-major** and multiply **column vectors**:
//!
//! ```text
//! result = matrix * vector
//! ```
//!
//! # Usage
//!
//! ```rust
//! use cmap_math::{Mat3, Vec3};
//!
//! let rgb_to_xyz = Mat3::from_rows([
//!     [0.4124564, 0.3575761, 0.1804375],
//!     [0.2126729, 0.7151522, 0.0721750],
//!     [0.0193339, 0.1191920, 0.9503041],
//! ]);
//!
//! let xyz = rgb_to_xyz * Vec3::new(1.0, 0.5, 0.25);
//! ```
//!
//! # Dependencies
//!
//! - `glam` - `DVec3` / `DMat3` interop for downstream callers (`to_glam` /
//!   `from_glam`); the cmap crates themselves work on [`Vec3`] and [`Mat3`]
//! - `serde` - [`Vec3`] serializes as a `[x, y, z]` array
//!
//! # Used By
//!
//! - `cmap-space` - color space transforms
//! - `cmap-gradient` - gradient mixing and curve evaluation

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod mat3;
mod vec3;
mod interp;
mod adapt;

pub use mat3::*;
pub use vec3::*;
pub use interp::*;
pub use adapt::*;

/// Re-export glam types for direct use
pub mod glam {
    pub use ::glam::{DMat3, DVec3};
}
