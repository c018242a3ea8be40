//! Convert command: one color between color spaces.

use super::format_color;
use crate::ConvertArgs;
use anyhow::{Context, Result};
use cmap_space::ColorSpaceGraph;

pub fn run(args: ConvertArgs, verbose: bool) -> Result<()> {
    let graph = ColorSpaceGraph::global();
    if verbose {
        let route = graph.route(args.from, args.to)?;
        let hops: Vec<String> = route.spaces().iter().map(ToString::to_string).collect();
        println!("Route: {}", hops.join(" -> "));
    }
    let out = graph
        .convert(args.color, args.from, args.to, args.observer, args.illuminant)
        .with_context(|| format!("Converting {} -> {}", args.from, args.to))?;
    println!("{}", format_color(out));
    Ok(())
}
