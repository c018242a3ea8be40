//! Sort command: hue ordering of palettes or gradient anchors.

use super::{format_color, load_document, save_document, select};
use crate::SortArgs;
use anyhow::{Context, Result, bail};
use cmap_gradient::{GradientDocument, sort_by_hue};
use tracing::info;

pub fn run(args: SortArgs, verbose: bool) -> Result<()> {
    match &args.input {
        Some(_) if !args.colors.is_empty() => bail!("Give either a document or --color values, not both"),
        Some(input) => sort_document(input, &args, verbose),
        None if args.colors.is_empty() => bail!("Nothing to sort: give a document or --color values"),
        None => {
            for c in sort_by_hue(&args.colors, args.space)? {
                println!("{}", format_color(c));
            }
            Ok(())
        }
    }
}

fn sort_document(input: &std::path::Path, args: &SortArgs, verbose: bool) -> Result<()> {
    let doc = load_document(input)?;
    let mut gradients = select(&doc, args.name.as_deref())?;

    for g in &mut gradients {
        let sorted = sort_by_hue(g.anchors(), args.space)?;
        g.replace_anchors(sorted)
            .with_context(|| format!("Gradient '{}'", g.name()))?;
        info!(name = g.name(), anchors = g.anchors().len(), "sorted anchors");
        if verbose || args.output.is_none() {
            println!("{}", g.name());
            for c in g.anchors() {
                println!("  {}", format_color(*c));
            }
        }
    }

    if let Some(output) = &args.output {
        let out = GradientDocument {
            preview_color_spaces: doc.preview_color_spaces.clone(),
            ..GradientDocument::from_gradients(&gradients)
        };
        save_document(output, &out)?;
    }
    Ok(())
}
