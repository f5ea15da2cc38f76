//! CLI command implementations.

pub mod analyze;
pub mod cycles;
pub mod explain;
pub mod tree;

use std::path::Path;

use anyhow::Context;
use preflight_graph::{build_graph, BuildOptions, DependencyGraph};

/// Load a snapshot and build the dependency graph for `root`.
///
/// Shared by every command; input errors carry the offending path or root in
/// their context.
fn build_from_snapshot(
    snapshot: &Path,
    root: &str,
    options: &BuildOptions,
) -> anyhow::Result<DependencyGraph> {
    let source = preflight::snapshot::load_snapshot(snapshot)?;
    build_graph(&source, root, options)
        .with_context(|| format!("cannot analyze root asset {root:?}"))
}
