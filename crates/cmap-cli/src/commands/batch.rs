//! Batch command: fit many documents in parallel.

use super::{CurveReport, load_document, select};
use crate::BatchArgs;
use anyhow::{Context, Result, bail};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, trace, warn};

pub fn run(args: BatchArgs, verbose: bool) -> Result<()> {
    trace!(inputs = args.input.len(), "batch::run");
    info!(files = args.input.len(), "Starting batch fitting");

    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("Failed to create: {}", args.output_dir.display()))?;

    // A failing document never aborts the others
    let results: Vec<Result<PathBuf>> = args
        .input
        .par_iter()
        .map(|input| process_file(input, &args.output_dir))
        .collect();

    let mut success = 0;
    let mut failed = 0;
    for (input, r) in args.input.iter().zip(results) {
        match r {
            Ok(report) => {
                success += 1;
                if verbose {
                    println!("{} -> {}", input.display(), report.display());
                }
            }
            Err(e) => {
                failed += 1;
                eprintln!("Error: {e:#}");
            }
        }
    }

    info!(success, failed, "Batch fitting complete");
    println!("Processed: {success} success, {failed} failed");

    if failed > 0 {
        bail!("{failed} files failed");
    }
    Ok(())
}

/// Fits every gradient of one document and writes `<stem>.fit.json`.
fn process_file(input: &Path, output_dir: &Path) -> Result<PathBuf> {
    let doc = load_document(input)?;
    let gradients = select(&doc, None).with_context(|| format!("In document: {}", input.display()))?;
    let reports: Vec<CurveReport> = gradients.iter().map(CurveReport::new).collect();

    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("gradients");
    let output = output_dir.join(format!("{stem}.fit.json"));
    std::fs::write(&output, serde_json::to_string_pretty(&reports)?)
        .with_context(|| format!("Failed to write: {}", output.display()))?;

    let stalled = gradients
        .iter()
        .filter(|g| g.quality().is_some_and(|q| !q.converged))
        .count();
    if stalled > 0 {
        warn!(path = %input.display(), stalled, "some fits hit the iteration cap");
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmap_gradient::{ColorGradient, GradientConfig, GradientDocument};
    use cmap_math::Vec3;

    #[test]
    fn test_process_file_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let gradient = ColorGradient::new(
            "bw",
            vec![Vec3::ZERO, Vec3::ONE],
            GradientConfig {
                sample_count: 32,
                ..Default::default()
            },
        )
        .unwrap();
        let input = dir.path().join("doc.yaml");
        GradientDocument::from_gradients([&gradient]).save(&input).unwrap();

        let report = process_file(&input, dir.path()).unwrap();
        assert_eq!(report.file_name().unwrap(), "doc.fit.json");
        let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(report).unwrap()).unwrap();
        assert_eq!(json[0]["name"], "bw");
        assert_eq!(json[0]["curve"]["coefficients"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn test_process_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(process_file(&dir.path().join("missing.yaml"), dir.path()).is_err());
    }
}
