//! `preflight cycles`: list reference cycles reachable from the root.

use std::path::Path;

use preflight_graph::{detect_cycles, BuildOptions, PackageId};

use super::build_from_snapshot;

/// Detect and print cycles in the analyzed graph.
pub fn run(root: &str, snapshot: &Path, options: &BuildOptions) -> anyhow::Result<()> {
    let graph = build_from_snapshot(snapshot, root, options)?;
    let cycles = detect_cycles(&graph);

    if cycles.is_empty() {
        println!("No cycles detected.");
        return Ok(());
    }

    println!("{} cycle(s) detected:", cycles.len());
    for cycle in &cycles {
        let mut names: Vec<&str> = cycle.iter().map(PackageId::as_str).collect();
        // Repeat the first member so the loop reads closed.
        if let Some(first) = names.first().copied() {
            names.push(first);
        }
        println!("  {}", names.join(" -> "));
    }
    Ok(())
}
