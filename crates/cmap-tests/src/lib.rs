//! Integration tests for cmap crates.
//!
//! End-to-end properties that span the conversion graph, the gradient
//! engine and document persistence.
//!
//! - `conversions` - round trips over every pair of color spaces
//! - `gradients` - weights, continuity, fit quality, nearest point,
//!   hue sorting
//! - `documents` - file round trips and reproducible refits

use cmap_math::Vec3;
use cmap_space::ColorSpaceType;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(test)]
mod conversions;
#[cfg(test)]
mod documents;
#[cfg(test)]
mod gradients;

/// Deterministic generator shared by the property tests.
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random sRGB color away from the gamut boundary.
pub fn random_srgb(rng: &mut StdRng) -> Vec3 {
    Vec3::new(
        rng.random_range(0.05..0.95),
        rng.random_range(0.05..0.95),
        rng.random_range(0.05..0.95),
    )
}

/// Largest per-channel difference, taking hue channels modulo their period.
pub fn channel_diff(space: ColorSpaceType, a: Vec3, b: Vec3) -> f64 {
    (0..3)
        .map(|i| {
            let d = a[i] - b[i];
            match space.hue_channel() {
                Some((channel, period)) if channel == i => {
                    let wrapped = d.rem_euclid(period);
                    wrapped.min(period - wrapped)
                }
                _ => d.abs(),
            }
        })
        .fold(0.0, f64::max)
}
