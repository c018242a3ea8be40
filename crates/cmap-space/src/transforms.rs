//! Pure conversion functions, one pair per graph edge.
//!
//! Every function takes a color triple (and, for the white-point dependent
//! spaces, the reference white as XYZ with `Y = 100`) and returns the
//! converted triple. None of them allocate or fail; out-of-gamut input
//! produces out-of-gamut output.
//!
//! # Scaling
//!
//! - CIEXYZ is scaled so reference white has `Y = 100`.
//! - OKLab, Adobe RGB and ACES AP1 are defined on `Y = 1` XYZ; the
//!   functions here divide and multiply by 100 at the boundary.
//! - LCH hues are radians in `(-π, π]`, HSL/HSV hues are turns in `[0, 1)`.

use crate::primaries::{ACES_AP1, ADOBE_RGB, SRGB_TO_XYZ, xyz_to_rgb_matrix};
use crate::transfer::{adobe, srgb};
use cmap_math::{BRADFORD, D60, D65, Mat3, Vec3, adapt_matrix};
use std::sync::LazyLock;

/// Inverse of an analytically invertible matrix.
fn invert(m: &Mat3) -> Mat3 {
    m.inverse().unwrap_or(Mat3::IDENTITY)
}

// ============================================================================
// sRGB <-> linear RGB
// ============================================================================

/// Gamma-encoded sRGB to linear RGB.
pub fn srgb_to_rgb(c: Vec3) -> Vec3 {
    c.map(srgb::eotf)
}

/// Linear RGB to gamma-encoded sRGB.
pub fn rgb_to_srgb(c: Vec3) -> Vec3 {
    c.map(srgb::oetf)
}

// ============================================================================
// Linear RGB <-> CIEXYZ
// ============================================================================

static XYZ_TO_SRGB: LazyLock<Mat3> = LazyLock::new(|| invert(&SRGB_TO_XYZ));

/// Linear sRGB to CIEXYZ (D65, `Y = 100`).
///
/// ```rust
/// use cmap_math::Vec3;
/// use cmap_space::transforms::rgb_to_xyz;
///
/// let white = rgb_to_xyz(Vec3::ONE);
/// assert!((white.y - 100.0).abs() < 1e-4);
/// ```
pub fn rgb_to_xyz(c: Vec3) -> Vec3 {
    SRGB_TO_XYZ * c * 100.0
}

/// CIEXYZ (`Y = 100`) to linear sRGB.
pub fn xyz_to_rgb(c: Vec3) -> Vec3 {
    *XYZ_TO_SRGB * (c / 100.0)
}

// ============================================================================
// CIEXYZ <-> CIELAB
// ============================================================================

const CIE_DELTA: f64 = 6.0 / 29.0;

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > CIE_DELTA * CIE_DELTA * CIE_DELTA {
        t.cbrt()
    } else {
        t / (3.0 * CIE_DELTA * CIE_DELTA) + 4.0 / 29.0
    }
}

#[inline]
fn lab_f_inv(t: f64) -> f64 {
    if t > CIE_DELTA {
        t * t * t
    } else {
        3.0 * CIE_DELTA * CIE_DELTA * (t - 4.0 / 29.0)
    }
}

/// CIEXYZ to CIE 1976 L*a*b* relative to `white`.
pub fn xyz_to_lab(c: Vec3, white: Vec3) -> Vec3 {
    let f = (c / white).map(lab_f);
    Vec3::new(116.0 * f.y - 16.0, 500.0 * (f.x - f.y), 200.0 * (f.y - f.z))
}

/// CIE 1976 L*a*b* to CIEXYZ relative to `white`.
pub fn lab_to_xyz(c: Vec3, white: Vec3) -> Vec3 {
    let fy = (c.x + 16.0) / 116.0;
    let fx = fy + c.y / 500.0;
    let fz = fy - c.z / 200.0;
    Vec3::new(fx, fy, fz).map(lab_f_inv) * white
}

// ============================================================================
// Cartesian <-> polar (LCH family)
// ============================================================================

/// Lab-like `(L, a, b)` to `(L, C, H)`, hue in radians.
pub fn cartesian_to_polar(c: Vec3) -> Vec3 {
    Vec3::new(c.x, c.y.hypot(c.z), c.z.atan2(c.y))
}

/// `(L, C, H)` back to `(L, a, b)`.
pub fn polar_to_cartesian(c: Vec3) -> Vec3 {
    let (sin, cos) = c.z.sin_cos();
    Vec3::new(c.x, c.y * cos, c.y * sin)
}

// ============================================================================
// CIEXYZ <-> OKLab
// ============================================================================

/// XYZ (D65, Y=1) to approximate cone responses.
const OKLAB_M1: Mat3 = Mat3::from_rows([
    [0.8189330101, 0.3618667424, -0.1288597137],
    [0.0329845436, 0.9293118715, 0.0361456387],
    [0.0482003018, 0.2643662691, 0.6338517070],
]);

/// Compressed cone responses to Lab.
const OKLAB_M2: Mat3 = Mat3::from_rows([
    [0.2104542553, 0.7936177850, -0.0040720468],
    [1.9779984951, -2.4285922050, 0.4505937099],
    [0.0259040371, 0.7827717662, -0.8086757660],
]);

static OKLAB_M1_INV: LazyLock<Mat3> = LazyLock::new(|| invert(&OKLAB_M1));
static OKLAB_M2_INV: LazyLock<Mat3> = LazyLock::new(|| invert(&OKLAB_M2));

/// CIEXYZ (`Y = 100`) to OKLab.
pub fn xyz_to_oklab(c: Vec3) -> Vec3 {
    let lms = OKLAB_M1 * (c / 100.0);
    OKLAB_M2 * lms.map(f64::cbrt)
}

/// OKLab to CIEXYZ (`Y = 100`).
pub fn oklab_to_xyz(c: Vec3) -> Vec3 {
    let lms = (*OKLAB_M2_INV * c).map(|v| v * v * v);
    *OKLAB_M1_INV * lms * 100.0
}

// ============================================================================
// CIEXYZ <-> Hunter Lab
// ============================================================================

#[inline]
fn hunter_k(white: Vec3) -> (f64, f64) {
    let ka = 175.0 / 198.04 * (white.x + white.y);
    let kb = 70.0 / 218.11 * (white.y + white.z);
    (ka, kb)
}

/// CIEXYZ to Hunter Lab relative to `white`.
pub fn xyz_to_hunter_lab(c: Vec3, white: Vec3) -> Vec3 {
    let (ka, kb) = hunter_k(white);
    let n = c / white;
    let sq = n.y.max(0.0).sqrt();
    if sq <= 0.0 {
        return Vec3::ZERO;
    }
    Vec3::new(100.0 * sq, ka * (n.x - n.y) / sq, kb * (n.y - n.z) / sq)
}

/// Hunter Lab to CIEXYZ relative to `white`.
pub fn hunter_lab_to_xyz(c: Vec3, white: Vec3) -> Vec3 {
    let (ka, kb) = hunter_k(white);
    let sq = c.x / 100.0;
    let ny = sq * sq;
    let nx = c.y * sq / ka + ny;
    let nz = ny - c.z * sq / kb;
    Vec3::new(nx, ny, nz) * white
}

// ============================================================================
// sRGB <-> HSL / HSV
// ============================================================================

/// Hue in turns from the max/min channels.
fn hue_of(c: Vec3, max: f64, delta: f64) -> f64 {
    if delta <= 0.0 {
        return 0.0;
    }
    let sector = if max == c.x {
        ((c.y - c.z) / delta).rem_euclid(6.0)
    } else if max == c.y {
        (c.z - c.x) / delta + 2.0
    } else {
        (c.x - c.y) / delta + 4.0
    };
    let h = sector / 6.0;
    if h >= 1.0 { h - 1.0 } else { h }
}

/// Chroma/hue/offset back to RGB, shared by HSL and HSV.
fn from_hue_chroma(h: f64, chroma: f64, m: f64) -> Vec3 {
    let h6 = (h * 6.0).rem_euclid(6.0);
    let x = chroma * (1.0 - ((h6 % 2.0) - 1.0).abs());
    let (r, g, b) = match h6 as u8 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    Vec3::new(r + m, g + m, b + m)
}

/// sRGB to `(hue, saturation, lightness)`.
///
/// ```rust
/// use cmap_math::Vec3;
/// use cmap_space::transforms::srgb_to_hsl;
///
/// let red = srgb_to_hsl(Vec3::new(1.0, 0.0, 0.0));
/// assert_eq!(red, Vec3::new(0.0, 1.0, 0.5));
/// ```
pub fn srgb_to_hsl(c: Vec3) -> Vec3 {
    let max = c.max_element();
    let min = c.min_element();
    let delta = max - min;
    let l = (max + min) / 2.0;
    let denom = 1.0 - (2.0 * l - 1.0).abs();
    let s = if delta <= 0.0 || denom <= 0.0 { 0.0 } else { delta / denom };
    Vec3::new(hue_of(c, max, delta), s, l)
}

/// `(hue, saturation, lightness)` to sRGB.
pub fn hsl_to_srgb(c: Vec3) -> Vec3 {
    let (h, s, l) = (c.x, c.y, c.z);
    let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
    from_hue_chroma(h, chroma, l - chroma / 2.0)
}

/// sRGB to `(hue, saturation, value)`.
pub fn srgb_to_hsv(c: Vec3) -> Vec3 {
    let max = c.max_element();
    let delta = max - c.min_element();
    let s = if max <= 0.0 || delta <= 0.0 { 0.0 } else { delta / max };
    Vec3::new(hue_of(c, max, delta), s, max)
}

/// `(hue, saturation, value)` to sRGB.
pub fn hsv_to_srgb(c: Vec3) -> Vec3 {
    let (h, s, v) = (c.x, c.y, c.z);
    let chroma = v * s;
    from_hue_chroma(h, chroma, v - chroma)
}

// ============================================================================
// sRGB <-> YCbCr
// ============================================================================

/// Luma (BT.601 weights) with chroma scaled by 0.565 (B-Y) and 0.713 (R-Y).
const YCBCR_FORWARD: Mat3 = Mat3::from_rows([
    [0.299, 0.587, 0.114],
    [-0.565 * 0.299, -0.565 * 0.587, 0.565 * (1.0 - 0.114)],
    [0.713 * (1.0 - 0.299), -0.713 * 0.587, -0.713 * 0.114],
]);

// The rounded textbook inverse (1.403, -0.344, -0.714, 1.770) is off by
// ~1e-3; the exact inverse keeps round trips tight.
static YCBCR_INVERSE: LazyLock<Mat3> = LazyLock::new(|| invert(&YCBCR_FORWARD));

/// sRGB to YCbCr (no offsets; chroma centered on zero).
pub fn srgb_to_ycbcr(c: Vec3) -> Vec3 {
    YCBCR_FORWARD * c
}

/// YCbCr to sRGB.
pub fn ycbcr_to_srgb(c: Vec3) -> Vec3 {
    *YCBCR_INVERSE * c
}

// ============================================================================
// CIEXYZ <-> CIE 1931 Yxy
// ============================================================================

/// CIEXYZ to `(Y, x, y)`. Black maps to `(0, 0, 0)`.
pub fn xyz_to_yxy(c: Vec3) -> Vec3 {
    let sum = c.x + c.y + c.z;
    if sum.abs() < 1e-12 {
        return Vec3::new(c.y, 0.0, 0.0);
    }
    Vec3::new(c.y, c.x / sum, c.y / sum)
}

/// `(Y, x, y)` to CIEXYZ.
pub fn yxy_to_xyz(c: Vec3) -> Vec3 {
    let (big_y, x, y) = (c.x, c.y, c.z);
    if y.abs() < 1e-12 {
        return Vec3::new(0.0, big_y, 0.0);
    }
    Vec3::new(x * big_y / y, big_y, (1.0 - x - y) * big_y / y)
}

// ============================================================================
// CIEXYZ <-> CIELuv
// ============================================================================

/// `(u', v')` chromaticity, zero for black.
#[inline]
fn uv_prime(c: Vec3) -> (f64, f64) {
    let denom = c.x + 15.0 * c.y + 3.0 * c.z;
    if denom.abs() < 1e-12 {
        (0.0, 0.0)
    } else {
        (4.0 * c.x / denom, 9.0 * c.y / denom)
    }
}

/// CIEXYZ to CIE 1976 L*u*v* relative to `white`.
pub fn xyz_to_luv(c: Vec3, white: Vec3) -> Vec3 {
    let yr = c.y / white.y;
    let l = if yr > CIE_DELTA * CIE_DELTA * CIE_DELTA {
        116.0 * yr.cbrt() - 16.0
    } else {
        yr * (29.0_f64 / 3.0).powi(3)
    };
    let (u, v) = uv_prime(c);
    let (un, vn) = uv_prime(white);
    Vec3::new(l, 13.0 * l * (u - un), 13.0 * l * (v - vn))
}

/// CIE 1976 L*u*v* to CIEXYZ relative to `white`.
pub fn luv_to_xyz(c: Vec3, white: Vec3) -> Vec3 {
    let l = c.x;
    if l.abs() < 1e-12 {
        return Vec3::ZERO;
    }
    let (un, vn) = uv_prime(white);
    let u = c.y / (13.0 * l) + un;
    let v = c.z / (13.0 * l) + vn;
    let y = if l > 8.0 {
        white.y * ((l + 16.0) / 116.0).powi(3)
    } else {
        white.y * l * (3.0_f64 / 29.0).powi(3)
    };
    if v.abs() < 1e-12 {
        return Vec3::new(0.0, y, 0.0);
    }
    Vec3::new(
        y * 9.0 * u / (4.0 * v),
        y,
        y * (12.0 - 3.0 * u - 20.0 * v) / (4.0 * v),
    )
}

// ============================================================================
// CIEXYZ <-> Adobe RGB / ACES AP1
// ============================================================================

static XYZ_TO_ADOBE: LazyLock<Mat3> = LazyLock::new(|| xyz_to_rgb_matrix(&ADOBE_RGB));
static ADOBE_TO_XYZ: LazyLock<Mat3> = LazyLock::new(|| invert(&XYZ_TO_ADOBE));

/// CIEXYZ (`Y = 100`) to gamma-encoded Adobe RGB (1998).
pub fn xyz_to_adobe_rgb(c: Vec3) -> Vec3 {
    (*XYZ_TO_ADOBE * (c / 100.0)).map(adobe::oetf)
}

/// Gamma-encoded Adobe RGB (1998) to CIEXYZ (`Y = 100`).
pub fn adobe_rgb_to_xyz(c: Vec3) -> Vec3 {
    *ADOBE_TO_XYZ * c.map(adobe::eotf) * 100.0
}

// D65 XYZ -> Bradford to D60 -> AP1 linear RGB
static XYZ_TO_AP1: LazyLock<Mat3> =
    LazyLock::new(|| xyz_to_rgb_matrix(&ACES_AP1) * adapt_matrix(BRADFORD, D65, D60));
static AP1_TO_XYZ: LazyLock<Mat3> = LazyLock::new(|| invert(&XYZ_TO_AP1));

/// CIEXYZ (D65, `Y = 100`) to linear ACES AP1 (ACEScg).
pub fn xyz_to_aces_ap1(c: Vec3) -> Vec3 {
    *XYZ_TO_AP1 * (c / 100.0)
}

/// Linear ACES AP1 (ACEScg) to CIEXYZ (D65, `Y = 100`).
pub fn aces_ap1_to_xyz(c: Vec3) -> Vec3 {
    *AP1_TO_XYZ * c * 100.0
}
