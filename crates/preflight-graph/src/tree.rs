//! Projection of the flat edge list into a display hierarchy.
//!
//! The graph is a general digraph: a package can be referenced from several
//! parents and back-edges to ancestors are legal. The projector expands the
//! full adjacency under the root in edge insertion order, but tracks the set
//! of ancestors on the current expansion path; a child already on that path
//! is emitted as a childless leaf marked cyclic instead of being recursed
//! into. Recursion depth is therefore bounded by the number of distinct
//! packages.

use std::collections::HashMap;

use serde::Serialize;

use crate::classify::Flag;
use crate::explain::ROOT_REASON;
use crate::graph::{DependencyGraph, Edge};
use crate::paths::PackageId;

/// One node of the projected display tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    /// Package at this position.
    pub package: PackageId,
    /// `"ROOT"` at the root, the discovering edge's reason below it.
    pub reason: String,
    /// Node flags at the root, edge flags below it.
    pub flags: Vec<Flag>,
    /// Depth in the tree; the root is 0.
    pub depth: u32,
    /// Set when this package closed a cycle and was not expanded.
    pub cyclic: bool,
    /// Children in edge insertion order.
    pub children: Vec<TreeNode>,
}

/// Project a graph into a rooted tree for display.
#[must_use]
pub fn project(graph: &DependencyGraph) -> TreeNode {
    // Adjacency view over the edge list, preserving insertion order. Each
    // ordered (from, to) pair occurs at most once, so index lookup per pair
    // is unambiguous.
    let mut adjacency: HashMap<&PackageId, Vec<&Edge>> = HashMap::new();
    for edge in graph.edges() {
        adjacency.entry(&edge.from).or_default().push(edge);
    }

    let root = graph.root();
    let root_flags = graph
        .node(root)
        .map(|node| node.flags.clone())
        .unwrap_or_default();

    let mut path: Vec<PackageId> = Vec::new();
    let children = expand_children(&adjacency, root, 0, &mut path);

    TreeNode {
        package: root.clone(),
        reason: ROOT_REASON.to_string(),
        flags: root_flags,
        depth: 0,
        cyclic: false,
        children,
    }
}

/// Expand the children of `package` at `depth`, guarding against cycles with
/// the explicit ancestor `path` stack.
fn expand_children(
    adjacency: &HashMap<&PackageId, Vec<&Edge>>,
    package: &PackageId,
    depth: u32,
    path: &mut Vec<PackageId>,
) -> Vec<TreeNode> {
    let Some(edges) = adjacency.get(package) else {
        return Vec::new();
    };

    path.push(package.clone());
    let mut children = Vec::with_capacity(edges.len());
    for edge in edges {
        let closes_cycle = path.contains(&edge.to);
        let grandchildren = if closes_cycle {
            Vec::new()
        } else {
            expand_children(adjacency, &edge.to, depth + 1, path)
        };
        children.push(TreeNode {
            package: edge.to.clone(),
            reason: edge.reason.clone(),
            flags: edge.flags.clone(),
            depth: depth + 1,
            cyclic: closes_cycle,
            children: grandchildren,
        });
    }
    path.pop();

    children
}
