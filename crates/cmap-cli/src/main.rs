//! cmap - colormap gradient CLI
//!
//! Fits anchor-based gradients to compact curves and queries them.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use cmap_gradient::{FitAlgorithm, ModelKind, WeightSpace};
use cmap_math::Vec3;
use cmap_space::{ColorSpaceType, Illuminant, Observer};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "cmap")]
#[command(author, version, about = "Colormap gradient fitting CLI")]
#[command(long_about = "
Builds color gradients from anchor colors, fits them with compact numeric
models and queries the result.

Gradient documents are JSON (.json) or YAML (anything else).

Examples:
  cmap presets -o gradients.yaml             # Write the built-in gradients
  cmap fit gradients.yaml                    # Fit and print coefficients
  cmap fit gradients.yaml -n 'Warm Dusk' --model chebyshevt --degree 8
  cmap sample gradients.yaml -n 'Warm Dusk' -c 8 --fit
  cmap nearest gradients.yaml 0.9,0.5,0.4
  cmap convert 1,0.5,0 --from SRGB --to CIELAB
  cmap sort -c 0.1,0.1,0.8 -c 0.8,0.1,0.1 -c 0.1,0.8,0.1
  cmap batch a.yaml b.json -o reports/
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit gradients from a document and print their coefficients
    #[command(visible_alias = "f")]
    Fit(FitArgs),

    /// Convert one color between color spaces
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// Order colors by hue, darkest first
    Sort(SortArgs),

    /// Find the curve parameter closest to a color
    #[command(visible_alias = "n")]
    Nearest(NearestArgs),

    /// Sample a gradient at evenly spaced parameters
    #[command(visible_alias = "s")]
    Sample(SampleArgs),

    /// Fit many documents in parallel and write JSON reports
    Batch(BatchArgs),

    /// Write the built-in gradients to a document
    Presets(PresetsArgs),
}

/// Gradient selection shared by document commands.
#[derive(Args)]
struct Selection {
    /// Gradient document (.json, .yaml)
    input: PathBuf,

    /// Only the gradient with this name
    #[arg(short, long)]
    name: Option<String>,
}

/// Configuration overrides applied on top of the stored records.
#[derive(Args, Default)]
struct Overrides {
    /// Basis model (HornerPolynomial, Trigonometric, Fourier, Gaussian, Exponential, ChebyshevT, ChebyshevU)
    #[arg(long)]
    model: Option<ModelKind>,

    /// Polynomial order or basis count
    #[arg(long)]
    degree: Option<usize>,

    /// Weight space (color space name or Unweighted)
    #[arg(long)]
    weight_space: Option<WeightSpace>,

    /// Mix space
    #[arg(long)]
    mix_space: Option<ColorSpaceType>,

    /// Fit algorithm (trf, lsq)
    #[arg(long)]
    algorithm: Option<FitAlgorithm>,

    /// Iteration cap per channel
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Disable wraparound
    #[arg(long)]
    open: bool,
}

#[derive(Args)]
struct FitArgs {
    #[command(flatten)]
    selection: Selection,

    #[command(flatten)]
    overrides: Overrides,

    /// Also fit every preview color-space pair of the document
    #[arg(long)]
    maps: bool,

    /// Write the (overridden) gradients to this document
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Machine-readable output (JSON)
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct ConvertArgs {
    /// Color as r,g,b (channel values of the source space)
    #[arg(value_parser = parse_color, allow_hyphen_values = true)]
    color: Vec3,

    /// Source space
    #[arg(long, default_value = "SRGB")]
    from: ColorSpaceType,

    /// Target space
    #[arg(long)]
    to: ColorSpaceType,

    /// Observer (CIE1931_2, CIE1964_10)
    #[arg(long, default_value = "CIE1931_2")]
    observer: Observer,

    /// Illuminant (A..F12)
    #[arg(long, default_value = "D65")]
    illuminant: Illuminant,
}

#[derive(Args)]
struct SortArgs {
    /// Document whose gradients get their anchors sorted
    input: Option<PathBuf>,

    /// Color to sort (r,g,b), repeatable; used instead of a document
    #[arg(short, long = "color", value_parser = parse_color)]
    colors: Vec<Vec3>,

    /// Only the gradient with this name
    #[arg(short, long)]
    name: Option<String>,

    /// Space the colors are given in
    #[arg(long, default_value = "SRGB")]
    space: ColorSpaceType,

    /// Write the sorted document here
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct NearestArgs {
    #[command(flatten)]
    selection: Selection,

    /// Target sRGB color as r,g,b
    #[arg(value_parser = parse_color)]
    color: Vec3,

    /// Simplex iteration cap
    #[arg(long, default_value = "500")]
    max_iterations: usize,

    /// Machine-readable output (JSON)
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct SampleArgs {
    #[command(flatten)]
    selection: Selection,

    /// Number of samples
    #[arg(short, long, default_value = "16")]
    count: usize,

    /// Sample the fitted curve instead of the anchor mix
    #[arg(long)]
    fit: bool,

    /// Print hex codes instead of floats
    #[arg(long)]
    hex: bool,
}

#[derive(Args)]
struct BatchArgs {
    /// Gradient documents
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Output directory for reports
    #[arg(short, long)]
    output_dir: PathBuf,
}

#[derive(Args)]
struct PresetsArgs {
    /// Output document
    #[arg(short, long)]
    output: PathBuf,
}

/// Parses `r,g,b` (comma or whitespace separated).
fn parse_color(s: &str) -> std::result::Result<Vec3, String> {
    let parts: Vec<f64> = s
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|p| !p.is_empty())
        .map(|p| p.parse::<f64>().map_err(|e| format!("'{p}': {e}")))
        .collect::<std::result::Result<_, _>>()?;
    match parts[..] {
        [r, g, b] => Ok(Vec3::new(r, g, b)),
        _ => Err(format!("expected 3 components, got {}", parts.len())),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(std::io::stderr)
        .init();

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Fit(args) => commands::fit::run(args, cli.verbose),
        Commands::Convert(args) => commands::convert::run(args, cli.verbose),
        Commands::Sort(args) => commands::sort::run(args, cli.verbose),
        Commands::Nearest(args) => commands::nearest::run(args, cli.verbose),
        Commands::Sample(args) => commands::sample::run(args, cli.verbose),
        Commands::Batch(args) => commands::batch::run(args, cli.verbose),
        Commands::Presets(args) => commands::presets::run(args, cli.verbose),
    }
}
