//! Sample command: colors at evenly spaced parameters.

use super::{format_color, format_hex, load_gradients};
use crate::SampleArgs;
use anyhow::{Result, bail};
use cmap_math::linspace;

pub fn run(args: SampleArgs, verbose: bool) -> Result<()> {
    if args.count == 0 {
        bail!("Sample count must be positive");
    }
    let gradients = load_gradients(&args.selection)?;
    let t = linspace(0.0, 1.0, args.count);

    for g in &gradients {
        let colors = if args.fit { g.sample_fit(args.count) } else { g.sample(args.count) };
        if gradients.len() > 1 || verbose {
            println!("{}", g.name());
        }
        for (ti, c) in t.iter().zip(colors) {
            if args.hex {
                println!("{ti:.4} {}", format_hex(c));
            } else {
                println!("{ti:.4} {}", format_color(c));
            }
        }
    }
    Ok(())
}
