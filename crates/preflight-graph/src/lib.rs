//! # Preflight Graph: Asset Dependency Analysis
//!
//! `preflight-graph` builds the dependency graph of a content asset, flags
//! policy violations (editor-only content leaking into shippable runtime
//! references), and explains why any package ended up in the graph.
//!
//! ## Design Philosophy
//!
//! - **Bounded by construction** - BFS with depth and node caps; a single
//!   analysis is cheap no matter how tangled the registry is
//! - **Best effort** - a failed registry lookup degrades one node, never the
//!   whole traversal
//! - **Injected registry** - the host asset database is a trait, not ambient
//!   state; anything map-shaped can stand in for it
//! - **Facts with reasons** - every edge carries a human-readable reason and
//!   semantic flags, so reports can say *why*, not just *what*
//!
//! ## Quick Start
//!
//! ```
//! use preflight_graph::{build_graph, evaluate, BuildOptions, InMemorySource};
//!
//! let registry = InMemorySource::new()
//!     .with_asset("/Game/Foo/Foo", "Blueprint", &["/Game/Bar/Bar"], &[])
//!     .with_asset("/Game/Bar/Bar", "StaticMesh", &[], &["/Editor/Dev/Baz"]);
//!
//! let graph = build_graph(&registry, "/Game/Foo/Foo", &BuildOptions::default())?;
//! assert_eq!(graph.stats().node_count, 3);
//!
//! let violations = evaluate(&graph);
//! assert_eq!(violations[0].policy_id, "NO_EDITOR_DEPS");
//! # Ok::<(), preflight_graph::Error>(())
//! ```

mod classify;
mod cycles;
mod error;
mod explain;
mod graph;
mod paths;
mod policy;
mod source;
mod tree;

pub use classify::{
    classify, is_editor_only_suspected, Classification, DepKind, Flag, EDITOR_ONLY_MARKERS,
    RUNTIME_CONTENT_ROOT,
};
pub use cycles::detect_cycles;
pub use error::{Error, Result};
pub use explain::{explain, PathStep, ROOT_REASON};
pub use graph::{build_graph, BuildOptions, DependencyGraph, Edge, GraphStats, Node};
pub use paths::{ObjectPath, PackageId};
pub use policy::{
    evaluate, evaluate_with, NoEditorDeps, Policy, Severity, Violation, NO_EDITOR_DEPS,
};
pub use source::{
    AssetRecord, DependencyLists, DependencySource, InMemorySource, SourceError, UNKNOWN_CLASS,
};
pub use tree::{project, TreeNode};
