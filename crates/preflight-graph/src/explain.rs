//! "Why is this here" path reconstruction.
//!
//! Walks the first-parent chain backwards from a target package to the root
//! and replays the edge that discovered each step. Because parents are
//! write-once in BFS order, the reconstructed path is the earliest-found
//! (shortest) path to the target.

use serde::Serialize;

use crate::classify::Flag;
use crate::error::{Error, Result};
use crate::graph::DependencyGraph;
use crate::paths::PackageId;

/// Reason tag carried by the first step of every explanation.
pub const ROOT_REASON: &str = "ROOT";

/// One step along a discovery path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PathStep {
    /// Package at this step.
    pub package: PackageId,
    /// Why this step was taken: `"ROOT"` for the first step, the discovering
    /// edge's reason afterwards.
    pub reason: String,
    /// Flags of the discovering edge; empty for the root.
    pub flags: Vec<Flag>,
}

/// Reconstruct the discovery path from the graph's root to `target_raw`.
///
/// The target may be given in any accepted loose form; it is normalized to a
/// package first. A package absent from the graph yields an empty sequence,
/// not an error.
///
/// # Errors
///
/// [`Error::ParentCycle`] when the parent chain does not terminate within
/// the graph's node count. The builder's write-once parents make this
/// impossible for well-formed graphs; the bound exists so corrupted state is
/// reported instead of looping forever.
pub fn explain(graph: &DependencyGraph, target_raw: &str) -> Result<Vec<PathStep>> {
    let target = PackageId::from_raw(target_raw);
    if !graph.contains(&target) {
        return Ok(Vec::new());
    }

    let mut chain = vec![target.clone()];
    let mut cursor = target;
    while &cursor != graph.root() {
        let Some(parent) = graph.parent_of(&cursor) else {
            break;
        };
        if chain.len() > graph.node_count() {
            return Err(Error::ParentCycle(chain[0].clone()));
        }
        cursor = parent.clone();
        chain.push(cursor.clone());
    }
    chain.reverse();

    let mut steps = Vec::with_capacity(chain.len());
    let mut packages = chain.into_iter();
    if let Some(first) = packages.next() {
        steps.push(PathStep {
            package: first,
            reason: ROOT_REASON.to_string(),
            flags: Vec::new(),
        });
    }
    for package in packages {
        // Every non-root node gets its discovering edge recorded at
        // creation; the fallback covers hand-assembled graphs only.
        let (reason, flags) = graph.edge_for_child(&package).map_or_else(
            || ("Unknown".to_string(), Vec::new()),
            |edge| (edge.reason.clone(), edge.flags.clone()),
        );
        steps.push(PathStep {
            package,
            reason,
            flags,
        });
    }

    Ok(steps)
}
