//! Color values tagged with their space.

use crate::{ColorResult, ColorSpaceType, Illuminant, Observer, convert};
use cmap_math::Vec3;
use serde::{Deserialize, Serialize};

/// A color triple together with the space it is expressed in.
///
/// # Example
///
/// ```rust
/// use cmap_space::{Color, ColorSpaceType};
///
/// let red = Color::srgb(1.0, 0.0, 0.0);
/// let lch = red.to(ColorSpaceType::OkLch)?;
/// assert_eq!(lch.space, ColorSpaceType::OkLch);
/// # Ok::<(), cmap_space::ColorError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    /// Channel values.
    pub value: Vec3,
    /// Space the channels are expressed in.
    pub space: ColorSpaceType,
}

impl Color {
    /// Tags a triple with its space.
    pub fn new(value: Vec3, space: ColorSpaceType) -> Self {
        Self { value, space }
    }

    /// Gamma-encoded sRGB color.
    pub fn srgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(Vec3::new(r, g, b), ColorSpaceType::Srgb)
    }

    /// Converts to another space under the default 2°/D65 white point.
    pub fn to(&self, space: ColorSpaceType) -> ColorResult<Self> {
        self.to_with(space, Observer::default(), Illuminant::default())
    }

    /// Converts to another space under an explicit white point.
    pub fn to_with(
        &self,
        space: ColorSpaceType,
        observer: Observer,
        illuminant: Illuminant,
    ) -> ColorResult<Self> {
        let value = convert(self.value, self.space, space, observer, illuminant)?;
        Ok(Self::new(value, space))
    }
}
