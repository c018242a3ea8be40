//! Persisted gradient records and documents.
//!
//! Only anchors and configuration are stored; weights and coefficients are
//! re-derived on load.
//!
//! ```yaml
//! gradients:
//!   - name: Warm Dusk
//!     degree: 6
//!     weight_color_space: OKLAB
//!     mix_color_space: OKLAB
//!     colors: [[0.15, 0.18, 0.26], [0.51, 0.56, 0.66]]
//!     observer: CIE1931_2
//!     illuminant: D65
//!     model: HornerPolynomial
//!     wraparound: true
//!     algorithm: TrustRegion
//!     max_fit_iteration_count: 5000
//!     fit_amount: 256
//! preview_color_spaces:
//!   - weight: SRGB
//!     mix: SRGB
//! ```

use crate::{
    ColorGradient, FitAlgorithm, GradientConfig, GradientError, GradientResult, ModelKind, WeightSpace,
};
use cmap_math::Vec3;
use cmap_space::{ColorSpaceType, Illuminant, Observer};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Flat, serializable form of a [`ColorGradient`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientRecord {
    /// Display name.
    pub name: String,
    /// Polynomial order or basis count.
    #[serde(default = "defaults::degree")]
    pub degree: usize,
    /// Space used to measure anchor spacing.
    #[serde(default)]
    pub weight_color_space: WeightSpace,
    /// Space in which anchors are blended.
    #[serde(default = "defaults::mix_space")]
    pub mix_color_space: ColorSpaceType,
    /// Anchors in sRGB.
    pub colors: Vec<Vec3>,
    /// Observer for white-point dependent spaces.
    #[serde(default)]
    pub observer: Observer,
    /// Illuminant for white-point dependent spaces.
    #[serde(default)]
    pub illuminant: Illuminant,
    /// Basis model.
    #[serde(default)]
    pub model: ModelKind,
    /// Cyclic gradient.
    #[serde(default = "defaults::wraparound")]
    pub wraparound: bool,
    /// Fit optimizer.
    #[serde(default)]
    pub algorithm: FitAlgorithm,
    /// Iteration cap per channel fit.
    #[serde(default = "defaults::max_iterations")]
    pub max_fit_iteration_count: usize,
    /// Fit sample count.
    #[serde(default = "defaults::sample_count")]
    pub fit_amount: usize,
}

mod defaults {
    use super::*;

    pub fn degree() -> usize {
        GradientConfig::default().degree
    }

    pub fn mix_space() -> ColorSpaceType {
        GradientConfig::default().mix_space
    }

    pub fn wraparound() -> bool {
        true
    }

    pub fn max_iterations() -> usize {
        GradientConfig::default().max_iterations
    }

    pub fn sample_count() -> usize {
        GradientConfig::default().sample_count
    }
}

impl GradientRecord {
    /// Configuration stored in the record.
    pub fn config(&self) -> GradientConfig {
        GradientConfig {
            degree: self.degree,
            weight_space: self.weight_color_space,
            mix_space: self.mix_color_space,
            model: self.model,
            wraparound: self.wraparound,
            observer: self.observer,
            illuminant: self.illuminant,
            algorithm: self.algorithm,
            max_iterations: self.max_fit_iteration_count,
            sample_count: self.fit_amount,
        }
    }
}

impl From<&ColorGradient> for GradientRecord {
    fn from(g: &ColorGradient) -> Self {
        let c = g.config();
        Self {
            name: g.name().to_string(),
            degree: c.degree,
            weight_color_space: c.weight_space,
            mix_color_space: c.mix_space,
            colors: g.anchors().to_vec(),
            observer: c.observer,
            illuminant: c.illuminant,
            model: c.model,
            wraparound: c.wraparound,
            algorithm: c.algorithm,
            max_fit_iteration_count: c.max_iterations,
            fit_amount: c.sample_count,
        }
    }
}

impl TryFrom<GradientRecord> for ColorGradient {
    type Error = GradientError;

    fn try_from(record: GradientRecord) -> GradientResult<Self> {
        let config = record.config();
        ColorGradient::new(record.name, record.colors, config)
    }
}

/// A (weight space, mix space) combination shown in color-map previews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewPair {
    /// Weight space.
    pub weight: WeightSpace,
    /// Mix space.
    pub mix: ColorSpaceType,
}

impl PreviewPair {
    /// Pair measuring and mixing in the same space.
    pub const fn same(space: ColorSpaceType) -> Self {
        Self {
            weight: WeightSpace::Space(space),
            mix: space,
        }
    }
}

/// A collection of gradients plus preview settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientDocument {
    /// Stored gradients.
    #[serde(default)]
    pub gradients: Vec<GradientRecord>,
    /// Combinations for color-map previews.
    #[serde(default = "GradientDocument::default_previews")]
    pub preview_color_spaces: Vec<PreviewPair>,
}

impl Default for GradientDocument {
    fn default() -> Self {
        Self {
            gradients: Vec::new(),
            preview_color_spaces: Self::default_previews(),
        }
    }
}

/// On-disk encoding of a [`GradientDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON (`.json`).
    Json,
    /// YAML (`.yaml`, `.yml`).
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from a file extension; anything but `.json` is YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Yaml,
        }
    }
}

impl GradientDocument {
    /// Default preview combinations.
    pub fn default_previews() -> Vec<PreviewPair> {
        [
            ColorSpaceType::Srgb,
            ColorSpaceType::OkLab,
            ColorSpaceType::CieLab,
            ColorSpaceType::AcesAp1,
            ColorSpaceType::HunterLch,
        ]
        .into_iter()
        .map(PreviewPair::same)
        .collect()
    }

    /// Document holding records of `gradients`.
    pub fn from_gradients<'a>(gradients: impl IntoIterator<Item = &'a ColorGradient>) -> Self {
        Self {
            gradients: gradients.into_iter().map(GradientRecord::from).collect(),
            ..Self::default()
        }
    }

    /// Rebuilds and refits every stored gradient.
    pub fn to_gradients(&self) -> GradientResult<Vec<ColorGradient>> {
        self.gradients.iter().cloned().map(ColorGradient::try_from).collect()
    }

    /// Preview pairs as `(weight, mix)` tuples for [`ColorGradient::color_maps`].
    pub fn preview_pairs(&self) -> Vec<(WeightSpace, ColorSpaceType)> {
        self.preview_color_spaces.iter().map(|p| (p.weight, p.mix)).collect()
    }

    /// Parses a document.
    pub fn parse(text: &str, format: DocumentFormat) -> GradientResult<Self> {
        match format {
            DocumentFormat::Json => serde_json::from_str(text).map_err(|e| GradientError::Format(e.to_string())),
            DocumentFormat::Yaml => serde_yaml::from_str(text).map_err(|e| GradientError::Format(e.to_string())),
        }
    }

    /// Serializes the document.
    pub fn render(&self, format: DocumentFormat) -> GradientResult<String> {
        match format {
            DocumentFormat::Json => {
                serde_json::to_string_pretty(self).map_err(|e| GradientError::Format(e.to_string()))
            }
            DocumentFormat::Yaml => serde_yaml::to_string(self).map_err(|e| GradientError::Format(e.to_string())),
        }
    }

    /// Loads a document, choosing the format by extension.
    pub fn load(path: impl AsRef<Path>) -> GradientResult<Self> {
        let path = path.as_ref();
        let doc = Self::parse(&fs::read_to_string(path)?, DocumentFormat::from_path(path))?;
        debug!(path = %path.display(), gradients = doc.gradients.len(), "loaded document");
        Ok(doc)
    }

    /// Saves the document, choosing the format by extension.
    pub fn save(&self, path: impl AsRef<Path>) -> GradientResult<()> {
        let path = path.as_ref();
        fs::write(path, self.render(DocumentFormat::from_path(path))?)?;
        debug!(path = %path.display(), gradients = self.gradients.len(), "saved document");
        Ok(())
    }
}
