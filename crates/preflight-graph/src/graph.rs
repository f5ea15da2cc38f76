//! Bounded breadth-first construction of the dependency graph.
//!
//! Starting from a root package, the builder expands nodes level by level
//! through a [`DependencySource`], classifying each discovered edge and
//! recording first-discovery parents. Two bounds keep a single analysis
//! cheap: `max_depth` stops expansion below a level, and `max_nodes` caps the
//! node set and marks the result truncated.
//!
//! ## First-discovery semantics
//!
//! - A node is created lazily, exactly once, the first time any package is
//!   referenced (the root included). Nodes are never mutated afterwards.
//! - Every classified edge is appended to the edge list, but `parents` and
//!   `edge_by_child` are write-once per child: the first discovered parent
//!   (BFS order, i.e. the shortest path) wins and later discoveries do not
//!   alter it. This is what keeps the parent chain acyclic.
//! - When one expansion yields both a hard and a soft reference to the same
//!   target, hard wins: hard dependencies are classified first and soft ones
//!   are only added for targets not already taken.

use std::collections::{HashMap, HashSet, VecDeque};

use serde::Serialize;
use tracing::{debug, warn};

use crate::classify::{classify, is_editor_only_suspected, DepKind, Flag};
use crate::error::{Error, Result};
use crate::paths::PackageId;
use crate::source::{DependencyLists, DependencySource, UNKNOWN_CLASS};

/// Bounds for a single graph build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Maximum BFS depth; nodes at this depth are kept but not expanded.
    pub max_depth: u32,
    /// Maximum number of nodes; reaching it stops traversal and sets
    /// [`DependencyGraph::truncated`].
    pub max_nodes: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            max_depth: 4,
            max_nodes: 400,
        }
    }
}

/// One distinct package in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// Canonical package name.
    pub package: PackageId,
    /// Resolved asset class, or `"Unknown"`.
    pub class: String,
    /// Flags derived once at creation from the package path.
    pub flags: Vec<Flag>,
}

/// One directed dependency arc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Edge {
    /// Referencing package.
    pub from: PackageId,
    /// Referenced package.
    pub to: PackageId,
    /// Reference kind.
    pub kind: DepKind,
    /// Human-readable explanation for the edge.
    pub reason: String,
    /// Semantic flags, possibly empty.
    pub flags: Vec<Flag>,
    /// 1-based BFS depth of `to` along the discovery path that created this
    /// edge.
    pub depth: u32,
}

/// Summary counts computed once after traversal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GraphStats {
    /// Distinct packages.
    pub node_count: usize,
    /// Dependency edges.
    pub edge_count: usize,
    /// Nodes flagged editor-only.
    pub editor_only: usize,
    /// Edges with a hard reference kind.
    pub hard_edges: usize,
    /// Edges with a soft reference kind.
    pub soft_edges: usize,
}

/// The dependency graph of one root asset.
///
/// Built by [`build_graph`]; immutable afterwards. Invariants:
///
/// - the root package is always present in the node set;
/// - both endpoints of every edge are in the node set;
/// - the parent chain of any node leads to the root without cycles.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    root: PackageId,
    nodes: HashMap<PackageId, Node>,
    edges: Vec<Edge>,
    parents: HashMap<PackageId, PackageId>,
    edge_by_child: HashMap<PackageId, usize>,
    truncated: bool,
    stats: GraphStats,
}

impl DependencyGraph {
    /// The package traversal started from.
    #[must_use]
    pub fn root(&self) -> &PackageId {
        &self.root
    }

    /// Look up a node by package.
    #[must_use]
    pub fn node(&self, package: &PackageId) -> Option<&Node> {
        self.nodes.get(package)
    }

    /// Whether a package is part of the graph.
    #[must_use]
    pub fn contains(&self, package: &PackageId) -> bool {
        self.nodes.contains_key(package)
    }

    /// All nodes, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All edges, in discovery order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The first-discovered parent of a package, if it has one.
    #[must_use]
    pub fn parent_of(&self, package: &PackageId) -> Option<&PackageId> {
        self.parents.get(package)
    }

    /// The edge that established a package's first parent.
    #[must_use]
    pub fn edge_for_child(&self, package: &PackageId) -> Option<&Edge> {
        self.edge_by_child
            .get(package)
            .and_then(|&idx| self.edges.get(idx))
    }

    /// Whether traversal stopped early because the node cap was hit.
    #[must_use]
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Summary counts.
    #[must_use]
    pub fn stats(&self) -> &GraphStats {
        &self.stats
    }

    /// Number of distinct packages.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Assemble a graph directly from parts. Test-only: lets tests corrupt
    /// invariants the builder upholds.
    #[cfg(test)]
    pub(crate) fn from_parts(
        root: PackageId,
        nodes: HashMap<PackageId, Node>,
        edges: Vec<Edge>,
        parents: HashMap<PackageId, PackageId>,
        edge_by_child: HashMap<PackageId, usize>,
    ) -> Self {
        let stats = compute_stats(&nodes, &edges);
        Self {
            root,
            nodes,
            edges,
            parents,
            edge_by_child,
            truncated: false,
            stats,
        }
    }
}

/// Build the dependency graph reachable from `root_raw`.
///
/// The raw root path may be any of the accepted loose forms (package path,
/// object path, export text); it is normalized before traversal.
///
/// Registry failures are not fatal: a package whose lookup fails is kept as a
/// leaf, a package whose class cannot be resolved gets `"Unknown"`.
///
/// # Errors
///
/// [`Error::EmptyRootPath`] when `root_raw` is empty or whitespace.
pub fn build_graph(
    source: &dyn DependencySource,
    root_raw: &str,
    options: &BuildOptions,
) -> Result<DependencyGraph> {
    if root_raw.trim().is_empty() {
        return Err(Error::EmptyRootPath);
    }

    let root = PackageId::from_raw(root_raw);
    let max_nodes = options.max_nodes.max(1);

    let mut nodes: HashMap<PackageId, Node> = HashMap::new();
    let mut edges: Vec<Edge> = Vec::new();
    let mut parents: HashMap<PackageId, PackageId> = HashMap::new();
    let mut edge_by_child: HashMap<PackageId, usize> = HashMap::new();
    let mut truncated = false;

    ensure_node(&mut nodes, source, &root);

    let mut visited: HashSet<PackageId> = HashSet::from([root.clone()]);
    let mut queue: VecDeque<(PackageId, u32)> = VecDeque::from([(root.clone(), 0)]);

    'traversal: while let Some((current, depth)) = queue.pop_front() {
        if depth >= options.max_depth {
            continue;
        }
        if nodes.len() >= max_nodes {
            truncated = true;
            break;
        }

        let lists = match source.dependencies(&current) {
            Ok(lists) => lists,
            Err(error) => {
                warn!(package = %current, %error, "dependency lookup failed, keeping node as a leaf");
                continue;
            }
        };

        for (dep, kind) in combine_hard_then_soft(lists) {
            if dep == current {
                continue;
            }

            if !nodes.contains_key(&dep) {
                // Enforce the cap during expansion too, so node_count never
                // exceeds max_nodes mid-level.
                if nodes.len() >= max_nodes {
                    truncated = true;
                    break 'traversal;
                }
                ensure_node(&mut nodes, source, &dep);
            }

            let classification = classify(&root, &current, &dep, kind, depth + 1);
            edges.push(Edge {
                from: current.clone(),
                to: dep.clone(),
                kind,
                reason: classification.reason,
                flags: classification.flags,
                depth: depth + 1,
            });

            // The root has no parent; a back-edge to it stays in the edge
            // list but must not register one.
            if dep != root && !parents.contains_key(&dep) {
                parents.insert(dep.clone(), current.clone());
                edge_by_child.insert(dep.clone(), edges.len() - 1);
            }

            if visited.insert(dep.clone()) {
                queue.push_back((dep, depth + 1));
            }
        }
    }

    let stats = compute_stats(&nodes, &edges);
    debug!(
        root = %root,
        nodes = stats.node_count,
        edges = stats.edge_count,
        truncated,
        "dependency graph built"
    );

    Ok(DependencyGraph {
        root,
        nodes,
        edges,
        parents,
        edge_by_child,
        truncated,
        stats,
    })
}

/// Merge hard and soft lists into one ordered set, hard first, hard winning
/// on conflict within this expansion.
fn combine_hard_then_soft(lists: DependencyLists) -> Vec<(PackageId, DepKind)> {
    let mut seen: HashSet<PackageId> = HashSet::new();
    let mut combined = Vec::with_capacity(lists.hard.len() + lists.soft.len());

    for dep in lists.hard {
        if seen.insert(dep.clone()) {
            combined.push((dep, DepKind::Hard));
        }
    }
    for dep in lists.soft {
        if seen.insert(dep.clone()) {
            combined.push((dep, DepKind::Soft));
        }
    }

    combined
}

/// Create the node for `package` if it does not exist yet.
///
/// Class resolution failure degrades to [`UNKNOWN_CLASS`]; node flags are
/// derived once from the package path.
fn ensure_node(
    nodes: &mut HashMap<PackageId, Node>,
    source: &dyn DependencySource,
    package: &PackageId,
) {
    if nodes.contains_key(package) {
        return;
    }

    let class = match source.asset_class(package) {
        Ok(class) => class,
        Err(error) => {
            debug!(package = %package, %error, "class lookup failed, using sentinel");
            UNKNOWN_CLASS.to_string()
        }
    };

    let flags = if is_editor_only_suspected(package.as_str()) {
        vec![Flag::EditorOnly]
    } else {
        Vec::new()
    };

    nodes.insert(
        package.clone(),
        Node {
            package: package.clone(),
            class,
            flags,
        },
    );
}

fn compute_stats(nodes: &HashMap<PackageId, Node>, edges: &[Edge]) -> GraphStats {
    let mut stats = GraphStats {
        node_count: nodes.len(),
        edge_count: edges.len(),
        ..GraphStats::default()
    };

    for node in nodes.values() {
        if node.flags.contains(&Flag::EditorOnly) {
            stats.editor_only += 1;
        }
    }
    for edge in edges {
        match edge.kind {
            DepKind::Hard => stats.hard_edges += 1,
            DepKind::Soft => stats.soft_edges += 1,
        }
    }

    stats
}
