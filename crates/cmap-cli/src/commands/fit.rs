//! Fit command: refit gradients and print their coefficients.

use super::{CurveReport, format_color, load_document, save_document, select};
use crate::FitArgs;
use anyhow::{Context, Result};
use cmap_gradient::{ColorGradient, GradientDocument};
use tracing::{debug, info};

pub fn run(args: FitArgs, verbose: bool) -> Result<()> {
    let doc = load_document(&args.selection.input)?;
    let mut gradients = select(&doc, args.selection.name.as_deref())?;

    if !args.overrides.is_empty() {
        for g in &mut gradients {
            let config = args.overrides.apply(g.config());
            g.set_config(config)
                .with_context(|| format!("Gradient '{}'", g.name()))?;
        }
    }
    info!(gradients = gradients.len(), "fitted");

    if args.json {
        let reports: Vec<CurveReport> = gradients.iter().map(CurveReport::new).collect();
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for g in &gradients {
            print_text(g, verbose);
        }
    }

    if args.maps {
        let pairs = doc.preview_pairs();
        for g in &gradients {
            let maps = g.color_maps(&pairs).with_context(|| format!("Gradient '{}'", g.name()))?;
            println!("{} color maps:", g.name());
            for ((weight, mix), curve) in pairs.iter().zip(&maps) {
                let residual = curve.quality().map_or(f64::NAN, |q| q.residual);
                println!("  weight {weight:<12} mix {mix:<12} residual {residual:.6}");
            }
        }
    }

    if let Some(output) = &args.output {
        let out = GradientDocument {
            preview_color_spaces: doc.preview_color_spaces.clone(),
            ..GradientDocument::from_gradients(&gradients)
        };
        save_document(output, &out)?;
        debug!(path = %output.display(), "wrote document");
        if verbose {
            println!("Wrote {}", output.display());
        }
    }

    Ok(())
}

fn print_text(g: &ColorGradient, verbose: bool) {
    let config = g.config();
    println!("{}", g.name());
    println!(
        "  Model:    {} (degree {}, {} coefficients)",
        config.model,
        config.degree,
        g.coefficients().len()
    );
    println!("  Spaces:   weight {} / mix {}", config.weight_space, config.mix_space);
    if let Some(q) = g.quality() {
        let status = if q.converged { "converged" } else { "iteration cap reached" };
        println!("  Fit:      residual {:.6}, {} iterations, {status}", q.residual, q.iterations);
    }
    if verbose {
        let weights: Vec<String> = g.weights().iter().map(|w| format!("{w:.4}")).collect();
        println!("  Weights:  {}", weights.join(" "));
    }
    println!("  Coefficients (R G B):");
    for (k, c) in g.coefficients().iter().enumerate() {
        println!("    c{k:<3} {}", format_color(*c));
    }
}
