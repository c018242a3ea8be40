//! Chromatic Adaptation Transforms (CAT).
//!
//! Used where a color space is defined under a different illuminant than
//! the working CIEXYZ (ACES AP1 is D60, everything else here is D65).
//!
//! ```rust
//! use cmap_math::{adapt_matrix, BRADFORD, D65, D60};
//!
//! let d65_to_d60 = adapt_matrix(BRADFORD, D65, D60);
//! let white = d65_to_d60 * D65;
//! assert!((white.x - D60.x).abs() < 1e-9);
//! ```

use crate::{Mat3, Vec3};

/// CIE Standard Illuminant D65, normalized to Y = 1.
pub const D65: Vec3 = Vec3::new(0.95047, 1.0, 1.08883);

/// ACES white point (~D60), normalized to Y = 1.
pub const D60: Vec3 = Vec3::new(0.95265, 1.0, 1.00883);

/// Bradford chromatic adaptation matrix.
///
/// Lam, K.M. (1985). Metamerism and Colour Constancy.
pub const BRADFORD: Mat3 = Mat3::from_rows([
    [0.8951, 0.2664, -0.1614],
    [-0.7502, 1.7135, 0.0367],
    [0.0389, -0.0685, 1.0296],
]);

/// Computes a chromatic adaptation matrix between two white points.
///
/// The result maps XYZ under `src_white` to XYZ under `dst_white`:
/// `M^-1 * diag(dst_cone / src_cone) * M`.
pub fn adapt_matrix(method: Mat3, src_white: Vec3, dst_white: Vec3) -> Mat3 {
    let method_inv = method.inverse().unwrap_or(Mat3::IDENTITY);

    let src_cone = method * src_white;
    let dst_cone = method * dst_white;

    let scale = Mat3::diagonal(
        dst_cone.x / src_cone.x,
        dst_cone.y / src_cone.y,
        dst_cone.z / src_cone.z,
    );

    method_inv * scale * method
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_adapt_matrix_roundtrip() {
        let there = adapt_matrix(BRADFORD, D65, D60);
        let back = adapt_matrix(BRADFORD, D60, D65);
        let roundtrip = back * there;

        for i in 0..3 {
            for j in 0..3 {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(roundtrip.m[i][j], expected, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_adapt_identity() {
        let same = adapt_matrix(BRADFORD, D65, D65);
        let v = Vec3::new(0.3, 0.4, 0.5);
        assert_abs_diff_eq!((same * v).x, v.x, epsilon = 1e-12);
        assert_abs_diff_eq!((same * v).z, v.z, epsilon = 1e-12);
    }
}
