//! Circular dependency detection.
//!
//! The BFS builder tolerates cycles; this module reports them. Cycles are
//! the strongly connected components of the edge set with more than one
//! member (self-edges are discarded at build time, so singleton components
//! are never cyclic).

use std::collections::HashMap;

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::classify::DepKind;
use crate::graph::DependencyGraph;
use crate::paths::PackageId;

/// Find all dependency cycles in a built graph.
///
/// Each cycle lists its member packages, rotated to start at the
/// lexicographically smallest one; the cycles themselves are sorted by that
/// first member. Output is deterministic for a given graph.
#[must_use]
pub fn detect_cycles(graph: &DependencyGraph) -> Vec<Vec<PackageId>> {
    let mut digraph: DiGraph<PackageId, DepKind> = DiGraph::new();
    let mut indices: HashMap<&PackageId, NodeIndex> = HashMap::new();

    for node in graph.nodes() {
        let idx = digraph.add_node(node.package.clone());
        indices.insert(&node.package, idx);
    }
    for edge in graph.edges() {
        if let (Some(&from), Some(&to)) = (indices.get(&edge.from), indices.get(&edge.to)) {
            digraph.add_edge(from, to, edge.kind);
        }
    }

    let mut cycles: Vec<Vec<PackageId>> = tarjan_scc(&digraph)
        .into_iter()
        .filter(|component| component.len() > 1)
        .map(|component| {
            let mut members: Vec<PackageId> =
                component.into_iter().map(|idx| digraph[idx].clone()).collect();
            rotate_to_smallest(&mut members);
            members
        })
        .collect();

    cycles.sort_by(|a, b| a[0].cmp(&b[0]));
    cycles
}

/// Rotate a cycle in place so its smallest member comes first, preserving
/// the relative order of the rest.
fn rotate_to_smallest(members: &mut [PackageId]) {
    if let Some(smallest) = members
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.cmp(b))
        .map(|(i, _)| i)
    {
        members.rotate_left(smallest);
    }
}
