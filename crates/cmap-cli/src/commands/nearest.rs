//! Nearest command: curve parameter closest to a color.

use super::{format_color, load_gradients};
use crate::NearestArgs;
use anyhow::Result;
use cmap_gradient::NearestPointSolver;
use serde_json::json;

pub fn run(args: NearestArgs, verbose: bool) -> Result<()> {
    let solver = NearestPointSolver {
        max_iterations: args.max_iterations,
        ..Default::default()
    };

    let mut results = Vec::new();
    for g in load_gradients(&args.selection)? {
        let found = solver.solve(g.curve(), args.color)?;
        if args.json {
            results.push(json!({ "name": g.name(), "nearest": found }));
            continue;
        }
        println!("{}", g.name());
        println!("  t:         {:.6}", found.t);
        println!("  distance:  {:.6}", found.distance);
        if verbose {
            println!("  curve:     {}", format_color(g.evaluate_fit(found.t)));
            println!("  reference: {}", format_color(g.evaluate(found.t)));
        }
        if let Some(nc) = found.non_convergence {
            println!("  warning:   stopped after {} iterations", nc.iterations);
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    }
    Ok(())
}
