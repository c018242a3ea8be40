//! Standard observers, illuminants and their reference white points.
//!
//! White points are tristimulus XYZ values normalized to `Y = 100`, as
//! published for the CIE 1931 2° and CIE 1964 10° standard observers.
//!
//! # Usage
//!
//! ```rust
//! use cmap_space::{Illuminant, Observer, white_point};
//!
//! let d65 = white_point(Observer::Cie1931, Illuminant::D65);
//! assert_eq!(d65.y, 100.0);
//! ```

use crate::{ColorError, ColorResult};
use cmap_math::Vec3;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Standard colorimetric observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Observer {
    /// CIE 1931, 2° field of view.
    #[default]
    #[serde(rename = "CIE1931_2")]
    Cie1931,
    /// CIE 1964, 10° field of view.
    #[serde(rename = "CIE1964_10")]
    Cie1964,
}

impl Observer {
    /// Both observers.
    pub const ALL: [Observer; 2] = [Self::Cie1931, Self::Cie1964];

    /// Field of view in degrees.
    pub const fn degrees(self) -> u32 {
        match self {
            Self::Cie1931 => 2,
            Self::Cie1964 => 10,
        }
    }
}

impl fmt::Display for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cie1931 => f.write_str("CIE1931_2"),
            Self::Cie1964 => f.write_str("CIE1964_10"),
        }
    }
}

impl FromStr for Observer {
    type Err = ColorError;

    /// Accepts `CIE1931_2` / `CIE1964_10` or just the field of view (`2`, `10`).
    fn from_str(s: &str) -> ColorResult<Self> {
        let s = s.trim().trim_end_matches('°');
        Self::ALL
            .into_iter()
            .find(|o| o.to_string().eq_ignore_ascii_case(s) || o.degrees().to_string() == s)
            .ok_or_else(|| ColorError::InvalidValue(format!("unknown observer '{s}'")))
    }
}

/// CIE standard illuminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum Illuminant {
    /// Incandescent / tungsten.
    A,
    /// Direct sunlight at noon (obsolete).
    B,
    /// Average daylight (obsolete).
    C,
    /// Horizon light, ICC profile PCS.
    D50,
    /// Mid-morning / mid-afternoon daylight.
    D55,
    /// Noon daylight, sRGB and most displays.
    #[default]
    D65,
    /// North sky daylight.
    D75,
    /// Equal energy.
    E,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

impl Illuminant {
    /// Every illuminant in table order.
    pub const ALL: [Illuminant; 20] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D50,
        Self::D55,
        Self::D65,
        Self::D75,
        Self::E,
        Self::F1,
        Self::F2,
        Self::F3,
        Self::F4,
        Self::F5,
        Self::F6,
        Self::F7,
        Self::F8,
        Self::F9,
        Self::F10,
        Self::F11,
        Self::F12,
    ];

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Illuminant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromStr for Illuminant {
    type Err = ColorError;

    fn from_str(s: &str) -> ColorResult<Self> {
        Self::ALL
            .into_iter()
            .find(|i| i.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ColorError::InvalidValue(format!("unknown illuminant '{s}'")))
    }
}

// ============================================================================
// Tristimulus table
// ============================================================================

/// (X, Z) pairs for the 2° observer; Y is always 100.
const CIE1931_XZ: [(f64, f64); 20] = [
    (109.850, 35.585),  // A
    (99.0927, 85.313),  // B
    (98.074, 118.232),  // C
    (96.422, 82.521),   // D50
    (95.682, 92.149),   // D55
    (95.047, 108.883),  // D65
    (94.972, 122.638),  // D75
    (100.000, 100.000), // E
    (92.834, 103.665),  // F1
    (99.187, 67.395),   // F2
    (103.754, 49.861),  // F3
    (109.147, 38.813),  // F4
    (90.872, 98.723),   // F5
    (97.309, 60.191),   // F6
    (95.044, 108.755),  // F7
    (96.413, 82.333),   // F8
    (100.365, 67.868),  // F9
    (96.174, 81.712),   // F10
    (100.966, 64.370),  // F11
    (108.046, 39.228),  // F12
];

/// (X, Z) pairs for the 10° observer; Y is always 100.
const CIE1964_XZ: [(f64, f64); 20] = [
    (111.144, 35.200),  // A
    (99.178, 84.3493),  // B
    (97.285, 116.145),  // C
    (96.720, 81.427),   // D50
    (95.799, 90.926),   // D55
    (94.811, 107.304),  // D65
    (94.416, 120.641),  // D75
    (100.000, 100.000), // E
    (94.791, 103.191),  // F1
    (103.280, 69.026),  // F2
    (108.968, 51.965),  // F3
    (114.961, 40.963),  // F4
    (93.369, 98.636),   // F5
    (102.148, 62.074),  // F6
    (95.792, 107.687),  // F7
    (97.115, 81.135),   // F8
    (102.116, 67.826),  // F9
    (99.001, 83.134),   // F10
    (103.866, 65.627),  // F11
    (111.428, 40.353),  // F12
];

/// Reference white point (XYZ, `Y = 100`) for an observer/illuminant pair.
///
/// # Example
///
/// ```rust
/// use cmap_space::{Illuminant, Observer, white_point};
///
/// let a = white_point(Observer::Cie1964, Illuminant::A);
/// assert!(a.x > a.z);
/// ```
pub fn white_point(observer: Observer, illuminant: Illuminant) -> Vec3 {
    let table = match observer {
        Observer::Cie1931 => &CIE1931_XZ,
        Observer::Cie1964 => &CIE1964_XZ,
    };
    let (x, z) = table[illuminant.index()];
    Vec3::new(x, 100.0, z)
}
