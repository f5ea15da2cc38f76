//! `preflight tree`: render the dependency tree of a root asset.

use std::path::Path;

use anyhow::Context;
use preflight::output::{self, OutputConfig};
use preflight_graph::{project, BuildOptions};

use super::build_from_snapshot;

/// Build the graph and print its tree projection to stdout.
pub fn run(root: &str, snapshot: &Path, options: &BuildOptions) -> anyhow::Result<()> {
    let graph = build_from_snapshot(snapshot, root, options)?;
    let tree = project(&graph);
    let root_class = graph
        .node(graph.root())
        .map_or("Unknown", |node| node.class.as_str());

    let config = OutputConfig::from_env();
    output::tree::print_tree(&tree, root_class, &config)
        .context("cannot write tree to stdout")?;

    if graph.truncated() {
        println!("(graph truncated at node cap; tree is incomplete)");
    }
    Ok(())
}
