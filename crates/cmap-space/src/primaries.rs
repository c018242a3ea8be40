//! RGB primaries and RGB-XYZ matrix generation.
//!
//! The sRGB matrix used by the graph is the published constant
//! ([`SRGB_TO_XYZ`]); Adobe RGB and ACES AP1 matrices are derived here from
//! their chromaticities.
//!
//! ```rust
//! use cmap_math::Vec3;
//! use cmap_space::primaries::{ADOBE_RGB, rgb_to_xyz_matrix};
//!
//! let m = rgb_to_xyz_matrix(&ADOBE_RGB);
//! let white = m * Vec3::ONE;
//! assert!((white.y - 1.0).abs() < 1e-9);
//! ```

use cmap_math::{Mat3, Vec3};

/// RGB color space primaries definition.
///
/// Primaries and white point are CIE xy chromaticity coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primaries {
    /// Red primary (x, y) chromaticity
    pub r: (f64, f64),
    /// Green primary (x, y) chromaticity
    pub g: (f64, f64),
    /// Blue primary (x, y) chromaticity
    pub b: (f64, f64),
    /// White point (x, y) chromaticity
    pub w: (f64, f64),
    /// Color space name
    pub name: &'static str,
}

impl Primaries {
    /// White point as XYZ (Y=1).
    #[inline]
    pub fn white_xyz(&self) -> Vec3 {
        xy_to_xyz(self.w.0, self.w.1)
    }
}

/// D65 white point chromaticity.
pub const D65_XY: (f64, f64) = (0.31270, 0.32900);

/// D60 white point chromaticity (ACES).
pub const D60_XY: (f64, f64) = (0.32168, 0.33767);

/// sRGB / Rec.709 primaries (D65 white point).
pub const SRGB: Primaries = Primaries {
    r: (0.6400, 0.3300),
    g: (0.3000, 0.6000),
    b: (0.1500, 0.0600),
    w: D65_XY,
    name: "sRGB",
};

/// Adobe RGB (1998) primaries (D65 white point).
pub const ADOBE_RGB: Primaries = Primaries {
    r: (0.6400, 0.3300),
    g: (0.2100, 0.7100),
    b: (0.1500, 0.0600),
    w: D65_XY,
    name: "Adobe RGB",
};

/// ACES AP1 primaries (D60 white point), the ACEScg working gamut.
pub const ACES_AP1: Primaries = Primaries {
    r: (0.7130, 0.2930),
    g: (0.1650, 0.8300),
    b: (0.1280, 0.0440),
    w: D60_XY,
    name: "ACES AP1",
};

/// Linear sRGB to XYZ (D65, Y=1), IEC 61966-2-1 constants.
pub const SRGB_TO_XYZ: Mat3 = Mat3::from_rows([
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
]);

/// Converts xy chromaticity to XYZ (with Y=1).
fn xy_to_xyz(x: f64, y: f64) -> Vec3 {
    if y.abs() < 1e-12 {
        Vec3::ZERO
    } else {
        Vec3::new(x / y, 1.0, (1.0 - x - y) / y)
    }
}

/// Computes the RGB to XYZ matrix for a set of primaries.
///
/// Columns are the primaries' XYZ, scaled so that RGB (1, 1, 1) lands on
/// the white point.
pub fn rgb_to_xyz_matrix(primaries: &Primaries) -> Mat3 {
    let r_xyz = xy_to_xyz(primaries.r.0, primaries.r.1);
    let g_xyz = xy_to_xyz(primaries.g.0, primaries.g.1);
    let b_xyz = xy_to_xyz(primaries.b.0, primaries.b.1);

    let m = Mat3::from_col_vecs(r_xyz, g_xyz, b_xyz);

    // Solve M * S = W for the per-primary scale
    let s = m.inverse().unwrap_or(Mat3::IDENTITY) * primaries.white_xyz();

    Mat3::from_col_vecs(r_xyz * s.x, g_xyz * s.y, b_xyz * s.z)
}

/// Computes the XYZ to RGB matrix for a set of primaries.
pub fn xyz_to_rgb_matrix(primaries: &Primaries) -> Mat3 {
    rgb_to_xyz_matrix(primaries).inverse().unwrap_or(Mat3::IDENTITY)
}
