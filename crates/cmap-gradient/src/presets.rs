//! Built-in gradients.
//!
//! Each call builds and fits a fresh instance.

use crate::{ColorGradient, GradientConfig, GradientResult};
use cmap_math::Vec3;

const WARM_DUSK: [[f64; 3]; 8] = [
    [0.15, 0.18, 0.26],
    [0.51, 0.56, 0.66],
    [0.78, 0.67, 0.68],
    [0.96, 0.75, 0.60],
    [0.97, 0.81, 0.55],
    [0.97, 0.61, 0.42],
    [0.91, 0.42, 0.34],
    [0.58, 0.23, 0.22],
];

const OCEAN_SUNSET: [[f64; 3]; 8] = [
    [0.02, 0.07, 0.16],
    [0.07, 0.31, 0.41],
    [0.38, 0.67, 0.69],
    [0.95, 0.85, 0.76],
    [0.98, 0.94, 0.83],
    [0.99, 0.92, 0.51],
    [0.92, 0.44, 0.40],
    [0.46, 0.25, 0.33],
];

fn anchors(colors: &[[f64; 3]]) -> Vec<Vec3> {
    colors.iter().copied().map(Vec3::from_array).collect()
}

/// Dusky blue through peach to brick red.
pub fn warm_dusk() -> GradientResult<ColorGradient> {
    ColorGradient::new("Warm Dusk", anchors(&WARM_DUSK), GradientConfig::default())
}

/// Deep sea blue through sand to plum.
pub fn ocean_sunset() -> GradientResult<ColorGradient> {
    ColorGradient::new("Ocean Sunset", anchors(&OCEAN_SUNSET), GradientConfig::default())
}

/// Every preset, in a stable order.
pub fn all() -> GradientResult<Vec<ColorGradient>> {
    Ok(vec![warm_dusk()?, ocean_sunset()?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_fresh() {
        let mut a = warm_dusk().unwrap();
        a.push_anchor(Vec3::ONE).unwrap();
        assert_eq!(warm_dusk().unwrap().anchors().len(), 8);
    }

    #[test]
    fn test_presets_fit_well() {
        for g in all().unwrap() {
            let quality = g.quality().unwrap();
            assert!(quality.residual < 1.5, "{}: {quality:?}", g.name());
            assert_eq!(g.coefficients().len(), 6);
        }
    }
}
