//! `preflight explain`: show how a package was first reached from the root.

use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use preflight::output::OutputConfig;
use preflight_graph::{explain, BuildOptions, PathStep};

use super::build_from_snapshot;

/// Print the discovery path from the root to `target`.
pub fn run(
    root: &str,
    target: &str,
    snapshot: &Path,
    options: &BuildOptions,
) -> anyhow::Result<()> {
    let graph = build_from_snapshot(snapshot, root, options)?;
    let steps = explain(&graph, target)
        .with_context(|| format!("cannot explain path to {target:?}"))?;

    if steps.is_empty() {
        println!(
            "{target} is not reachable from {} within the analyzed graph.",
            graph.root()
        );
        if graph.truncated() {
            println!("(graph truncated at node cap; the package may lie beyond it)");
        }
        return Ok(());
    }

    let config = OutputConfig::from_env();
    for (i, step) in steps.iter().enumerate() {
        if i == 0 {
            println!("{} (ROOT)", step.package);
        } else {
            println!("  -> {}{}", step.package, annotations(step, &config));
        }
    }
    Ok(())
}

fn annotations(step: &PathStep, config: &OutputConfig) -> String {
    let mut parts = String::new();

    let reason = format!(" ({})", step.reason);
    if config.use_colors {
        parts.push_str(&reason.dimmed().to_string());
    } else {
        parts.push_str(&reason);
    }

    if !step.flags.is_empty() {
        let names: Vec<String> = step.flags.iter().map(ToString::to_string).collect();
        let flags = format!(" [{}]", names.join(", "));
        if config.use_colors {
            parts.push_str(&flags.yellow().to_string());
        } else {
            parts.push_str(&flags);
        }
    }

    parts
}
