//! Presets command: write the built-in gradients.

use super::save_document;
use crate::PresetsArgs;
use anyhow::Result;
use cmap_gradient::{GradientDocument, presets};

pub fn run(args: PresetsArgs, verbose: bool) -> Result<()> {
    let gradients = presets::all()?;
    save_document(&args.output, &GradientDocument::from_gradients(&gradients))?;
    if verbose {
        println!("Wrote {} gradients to {}", gradients.len(), args.output.display());
    }
    Ok(())
}
