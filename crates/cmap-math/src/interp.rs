//! Scalar interpolation helpers.
//!
//! ```rust
//! use cmap_math::{lerp, fract};
//!
//! assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
//! assert_eq!(fract(1.25), 0.25);
//! ```

/// Linear interpolation between two values.
///
/// Returns `a` when `t = 0.0`, and `b` when `t = 1.0`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Inverse linear interpolation.
///
/// Returns 0 when the range is empty.
#[inline]
pub fn inverse_lerp(a: f64, b: f64, value: f64) -> f64 {
    if (b - a).abs() < 1e-300 {
        0.0
    } else {
        (value - a) / (b - a)
    }
}

/// Fractional part, always in [0, 1) (GLSL `fract`).
///
/// ```rust
/// use cmap_math::fract;
///
/// assert!((fract(-0.25) - 0.75).abs() < 1e-12);
/// ```
#[inline]
pub fn fract(x: f64) -> f64 {
    let f = x - x.floor();
    // x - floor(x) rounds up to 1.0 for tiny negative x
    if f >= 1.0 { 0.0 } else { f }
}

/// Evenly spaced samples over [start, end], both ends included.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| if i == count - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}
