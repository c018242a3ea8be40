//! CLI command implementations

pub mod batch;
pub mod convert;
pub mod fit;
pub mod nearest;
pub mod presets;
pub mod sample;
pub mod sort;

use crate::{Overrides, Selection};
use anyhow::{Context, Result, bail};
use cmap_gradient::{ColorGradient, FittedCurve, GradientConfig, GradientDocument};
use cmap_math::Vec3;
use serde::Serialize;
use std::path::Path;

/// Load gradient document from path
pub fn load_document(path: &Path) -> Result<GradientDocument> {
    GradientDocument::load(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save gradient document to path
pub fn save_document(path: &Path, doc: &GradientDocument) -> Result<()> {
    doc.save(path)
        .with_context(|| format!("Failed to save: {}", path.display()))
}

/// Loads and fits the selected gradients of a document.
pub fn load_gradients(selection: &Selection) -> Result<Vec<ColorGradient>> {
    let doc = load_document(&selection.input)?;
    select(&doc, selection.name.as_deref())
        .with_context(|| format!("In document: {}", selection.input.display()))
}

/// Rebuilds the gradients of `doc`, keeping only `name` when given.
pub fn select(doc: &GradientDocument, name: Option<&str>) -> Result<Vec<ColorGradient>> {
    let records = doc
        .gradients
        .iter()
        .filter(|r| name.is_none_or(|n| r.name == n))
        .cloned();
    let gradients = records
        .map(|r| {
            let label = r.name.clone();
            ColorGradient::try_from(r).with_context(|| format!("Gradient '{label}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    if gradients.is_empty() {
        match name {
            Some(n) => bail!("No gradient named '{n}'"),
            None => bail!("Document has no gradients"),
        }
    }
    Ok(gradients)
}

impl Overrides {
    /// Applies every given override to `config`.
    pub fn apply(&self, config: &GradientConfig) -> GradientConfig {
        GradientConfig {
            model: self.model.unwrap_or(config.model),
            degree: self.degree.unwrap_or(config.degree),
            weight_space: self.weight_space.unwrap_or(config.weight_space),
            mix_space: self.mix_space.unwrap_or(config.mix_space),
            algorithm: self.algorithm.unwrap_or(config.algorithm),
            max_iterations: self.max_iterations.unwrap_or(config.max_iterations),
            wraparound: config.wraparound && !self.open,
            ..*config
        }
    }

    /// Returns true if no override was given.
    pub fn is_empty(&self) -> bool {
        self.model.is_none()
            && self.degree.is_none()
            && self.weight_space.is_none()
            && self.mix_space.is_none()
            && self.algorithm.is_none()
            && self.max_iterations.is_none()
            && !self.open
    }
}

/// JSON report of one fitted gradient.
#[derive(Serialize)]
pub struct CurveReport<'a> {
    /// Gradient name.
    pub name: &'a str,
    /// Anchor weights.
    pub weights: &'a [f64],
    /// Fitted curve with coefficients and quality.
    pub curve: &'a FittedCurve,
}

impl<'a> CurveReport<'a> {
    pub fn new(gradient: &'a ColorGradient) -> Self {
        Self {
            name: gradient.name(),
            weights: gradient.weights(),
            curve: gradient.curve(),
        }
    }
}

/// Formats a triple for text output.
pub fn format_color(c: Vec3) -> String {
    format!("{:>9.6} {:>9.6} {:>9.6}", c.x, c.y, c.z)
}

/// Formats an sRGB triple as `#rrggbb`, clamping out-of-gamut channels.
pub fn format_hex(c: Vec3) -> String {
    let [r, g, b] = c.clamp01().to_array().map(|v| (v * 255.0).round() as u8);
    format!("#{r:02x}{g:02x}{b:02x}")
}
