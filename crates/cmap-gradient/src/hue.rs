//! Ordering unordered palettes by hue.

use crate::GradientResult;
use cmap_math::Vec3;
use cmap_space::{ColorSpaceGraph, ColorSpaceType, Illuminant, Observer};

/// Sorts colors by CIELCH hue and rotates the darkest-magnitude color first.
///
/// Hue comes from converting each color to CIELCH (2° observer, D65).
/// After sorting by ascending hue, the cyclic order is rotated so that the
/// color with the smallest vector length in `source_space` leads. Ties keep
/// the earlier position.
///
/// # Errors
///
/// [`GradientError::Color`](crate::GradientError::Color) if `source_space`
/// cannot reach CIELCH.
///
/// # Example
///
/// ```rust
/// use cmap_gradient::sort_by_hue;
/// use cmap_math::Vec3;
/// use cmap_space::ColorSpaceType;
///
/// let palette = [
///     Vec3::new(0.9, 0.1, 0.1),
///     Vec3::new(0.1, 0.1, 0.9),
///     Vec3::new(0.1, 0.9, 0.1),
/// ];
/// let sorted = sort_by_hue(&palette, ColorSpaceType::Srgb)?;
/// assert_eq!(sorted.len(), 3);
/// # Ok::<(), cmap_gradient::GradientError>(())
/// ```
pub fn sort_by_hue(colors: &[Vec3], source_space: ColorSpaceType) -> GradientResult<Vec<Vec3>> {
    let conversion = ColorSpaceGraph::global().conversion(
        source_space,
        ColorSpaceType::CieLch,
        Some(cmap_space::white_point(Observer::Cie1931, Illuminant::D65)),
    )?;

    let mut keyed: Vec<(f64, Vec3)> = colors.iter().map(|&c| (conversion.apply(c).z, c)).collect();
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    let mut sorted: Vec<Vec3> = keyed.into_iter().map(|(_, c)| c).collect();

    let darkest = sorted
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.length().total_cmp(&b.1.length()))
        .map_or(0, |(i, _)| i);
    sorted.rotate_left(darkest);
    Ok(sorted)
}
