//! Color space identifiers.
//!
//! [`ColorSpaceType`] names every node of the conversion graph. The serde
//! representation is the upper-case name stored in gradient documents
//! (`"OKLAB"`, `"CIELCH"`, `"HunterLAB"`, ...).

use crate::{ColorError, ColorResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A tagged color space identifier.
///
/// Values are plain triples; the space they live in always travels next to
/// them as one of these tags.
///
/// # Channel ranges
///
/// | Space | Channels | Typical range |
/// |-------|----------|---------------|
/// | `Srgb`, `Rgb`, `AdobeRgb`, `AcesAp1` | R, G, B | [0, 1] |
/// | `CieXyz` | X, Y, Z | [0, ~110] |
/// | `CieLab`, `HunterLab` | L, a, b | L in [0, 100] |
/// | `CieLch`, `OkLch`, `HunterLch` | L, C, H | H in radians |
/// | `OkLab` | L, a, b | L in [0, 1] |
/// | `Hsl`, `Hsv` | H, S, L/V | H in turns, [0, 1) |
/// | `YCbCr` | Y, Cb, Cr | Y in [0, 1], chroma in ~[-0.5, 0.5] |
/// | `CieYxy` | Y, x, y | Y in [0, 100] |
/// | `CieLuv` | L, u, v | L in [0, 100] |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColorSpaceType {
    /// Gamma-encoded sRGB. Anchor colors are stored in this space.
    #[serde(rename = "SRGB")]
    Srgb,
    /// Linear-light sRGB.
    #[serde(rename = "RGB")]
    Rgb,
    /// CIE 1931 XYZ, reference white Y = 100.
    #[serde(rename = "CIEXYZ")]
    CieXyz,
    /// CIE 1976 L*a*b*.
    #[serde(rename = "CIELAB")]
    CieLab,
    /// Polar CIELAB.
    #[serde(rename = "CIELCH")]
    CieLch,
    /// Björn Ottosson's OKLab.
    #[serde(rename = "OKLAB")]
    OkLab,
    /// Polar OKLab.
    #[serde(rename = "OKLCH")]
    OkLch,
    /// Hunter 1948 Lab.
    #[serde(rename = "HunterLAB")]
    HunterLab,
    /// Polar Hunter Lab.
    #[serde(rename = "HunterLCH")]
    HunterLch,
    /// Hue, saturation, lightness over sRGB.
    #[serde(rename = "HSL")]
    Hsl,
    /// Hue, saturation, value over sRGB.
    #[serde(rename = "HSV")]
    Hsv,
    /// Luma plus scaled blue/red difference.
    #[serde(rename = "YCbCr")]
    YCbCr,
    /// CIE 1931 luminance plus xy chromaticity.
    #[serde(rename = "CIE1931Yxy")]
    CieYxy,
    /// CIE 1976 L*u*v*.
    #[serde(rename = "CIELuv")]
    CieLuv,
    /// Adobe RGB (1998), gamma encoded.
    #[serde(rename = "AdobeRGB")]
    AdobeRgb,
    /// ACES AP1 primaries, linear (ACEScg).
    #[serde(rename = "ACESAP1")]
    AcesAp1,
}

impl ColorSpaceType {
    /// Every color space, in graph node order.
    pub const ALL: [ColorSpaceType; 16] = [
        Self::Srgb,
        Self::Rgb,
        Self::CieXyz,
        Self::CieLab,
        Self::CieLch,
        Self::OkLab,
        Self::OkLch,
        Self::HunterLab,
        Self::HunterLch,
        Self::Hsl,
        Self::Hsv,
        Self::YCbCr,
        Self::CieYxy,
        Self::CieLuv,
        Self::AdobeRgb,
        Self::AcesAp1,
    ];

    /// Number of color spaces.
    pub const COUNT: usize = Self::ALL.len();

    /// Dense index for table lookups.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Canonical name, identical to the serialized form.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Srgb => "SRGB",
            Self::Rgb => "RGB",
            Self::CieXyz => "CIEXYZ",
            Self::CieLab => "CIELAB",
            Self::CieLch => "CIELCH",
            Self::OkLab => "OKLAB",
            Self::OkLch => "OKLCH",
            Self::HunterLab => "HunterLAB",
            Self::HunterLch => "HunterLCH",
            Self::Hsl => "HSL",
            Self::Hsv => "HSV",
            Self::YCbCr => "YCbCr",
            Self::CieYxy => "CIE1931Yxy",
            Self::CieLuv => "CIELuv",
            Self::AdobeRgb => "AdobeRGB",
            Self::AcesAp1 => "ACESAP1",
        }
    }

    /// Index of the hue channel and its period, if the space has one.
    ///
    /// ```rust
    /// use cmap_space::ColorSpaceType;
    ///
    /// assert_eq!(ColorSpaceType::Hsv.hue_channel(), Some((0, 1.0)));
    /// assert_eq!(ColorSpaceType::OkLab.hue_channel(), None);
    /// ```
    pub const fn hue_channel(self) -> Option<(usize, f64)> {
        match self {
            Self::CieLch | Self::OkLch | Self::HunterLch => Some((2, std::f64::consts::TAU)),
            Self::Hsl | Self::Hsv => Some((0, 1.0)),
            _ => None,
        }
    }
}

impl fmt::Display for ColorSpaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for ColorSpaceType {
    type Err = ColorError;

    /// Parses a color space name, ignoring ASCII case.
    fn from_str(s: &str) -> ColorResult<Self> {
        Self::ALL
            .into_iter()
            .find(|space| space.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ColorError::InvalidValue(format!("unknown color space '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all() {
        for (i, space) in ColorSpaceType::ALL.iter().enumerate() {
            assert_eq!(space.index(), i, "{space} out of order");
        }
    }

    #[test]
    fn test_parse_names() {
        for space in ColorSpaceType::ALL {
            assert_eq!(space.name().parse::<ColorSpaceType>(), Ok(space));
        }
        assert_eq!("oklab".parse::<ColorSpaceType>(), Ok(ColorSpaceType::OkLab));
        assert!("CMYK".parse::<ColorSpaceType>().is_err());
    }

    #[test]
    fn test_serde_names() {
        for space in ColorSpaceType::ALL {
            let json = serde_json::to_string(&space).expect("serialize");
            assert_eq!(json, format!("\"{}\"", space.name()));
            let back: ColorSpaceType = serde_json::from_str(&json).expect("deserialize");
            assert_eq!(back, space);
        }
    }
}
