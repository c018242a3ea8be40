//! # cmap-space
//!
//! Color space conversion engine: a graph of direct, invertible transforms
//! between sixteen color spaces, routed by shortest path.
//!
//! # Supported Spaces
//!
//! | Family | Spaces |
//! |--------|--------|
//! | RGB | SRGB, RGB (linear), AdobeRGB, ACESAP1 |
//! | CIE | CIEXYZ, CIELAB, CIELCH, CIELuv, CIE1931Yxy |
//! | Perceptual | OKLAB, OKLCH, HunterLAB, HunterLCH |
//! | Cylindrical / video | HSL, HSV, YCbCr |
//!
//! # Usage
//!
//! ```rust
//! use cmap_math::Vec3;
//! use cmap_space::{ColorSpaceType, Illuminant, Observer, convert};
//!
//! let oklab = convert(
//!     Vec3::new(0.15, 0.18, 0.26),
//!     ColorSpaceType::Srgb,
//!     ColorSpaceType::OkLab,
//!     Observer::Cie1931,
//!     Illuminant::D65,
//! )?;
//! # Ok::<(), cmap_space::ColorError>(())
//! ```
//!
//! White-point dependent spaces (CIELAB, HunterLAB, CIELuv and their polar
//! forms) take the reference white from the observer/illuminant table; the
//! other spaces ignore both arguments.
//!
//! # Dependencies
//!
//! - `cmap-math` - vectors, matrices, Bradford adaptation
//! - `thiserror` - [`ColorError`]
//! - `serde` - stable names for [`ColorSpaceType`], [`Observer`], [`Illuminant`]
//! - `tracing` - route diagnostics
//!
//! # Used By
//!
//! - `cmap-gradient` - weighting, mixing, hue sorting

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod color;
mod error;
pub mod graph;
pub mod primaries;
mod space;
pub mod transfer;
pub mod transforms;
mod tristimulus;

pub use color::Color;
pub use error::{ColorError, ColorResult};
pub use graph::{ColorSpaceGraph, Conversion, Edge, EdgeTransform, Route, convert};
pub use space::ColorSpaceType;
pub use tristimulus::{Illuminant, Observer, white_point};
