//! Policy evaluation over a built graph.
//!
//! A policy is a pure pass over the graph producing violations. Policies are
//! composed by [`evaluate_with`], which deduplicates by
//! `(policy_id, violating_package)`, keeping the first occurrence in edge
//! order. One policy ships built in: no editor-only content reachable from
//! the runtime dependency graph.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::error;

use crate::classify::Flag;
use crate::explain::explain;
use crate::graph::DependencyGraph;
use crate::paths::PackageId;

/// How severe a violation is for the report status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Must be fixed; fails the preflight.
    Error,
    /// Should be reviewed; preflight passes with warnings.
    Warning,
    /// Informational only.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// One detected policy violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Stable identifier of the violated policy.
    pub policy_id: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Advisory message for the user.
    pub message: String,
    /// The package that violates the policy.
    pub violating_package: PackageId,
    /// Discovery path from the root to the violating package.
    pub example_path: Vec<PackageId>,
}

/// A rule evaluated against a built graph.
///
/// Implementations must be pure: same graph in, same violations out.
/// Deduplication across policies is handled by [`evaluate_with`], so a
/// policy may emit the same `(id, package)` pair more than once.
pub trait Policy {
    /// Stable identifier emitted on every violation of this policy.
    fn id(&self) -> &'static str;

    /// Scan the graph and return violations, in edge order.
    fn evaluate(&self, root: &PackageId, graph: &DependencyGraph) -> Vec<Violation>;
}

/// Policy id of [`NoEditorDeps`].
pub const NO_EDITOR_DEPS: &str = "NO_EDITOR_DEPS";

const NO_EDITOR_DEPS_MESSAGE: &str = "Editor-only / dev content appears in the runtime \
     dependency graph. This may cause cook or shipping issues.";

/// Built-in policy: editor-only content must not be reachable from the
/// runtime dependency graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEditorDeps;

impl Policy for NoEditorDeps {
    fn id(&self) -> &'static str {
        NO_EDITOR_DEPS
    }

    fn evaluate(&self, _root: &PackageId, graph: &DependencyGraph) -> Vec<Violation> {
        let mut violations = Vec::new();

        for edge in graph.edges() {
            if !edge.flags.contains(&Flag::EditorOnly) {
                continue;
            }

            let violating = edge.to.clone();
            let example_path = match explain(graph, violating.as_str()) {
                Ok(steps) => steps.into_iter().map(|step| step.package).collect(),
                Err(err) => {
                    // Internal consistency error: degrade to a one-element
                    // path instead of failing the evaluation.
                    error!(package = %violating, %err, "path explanation failed");
                    vec![violating.clone()]
                }
            };

            violations.push(Violation {
                policy_id: NO_EDITOR_DEPS.to_string(),
                severity: Severity::Warning,
                message: NO_EDITOR_DEPS_MESSAGE.to_string(),
                violating_package: violating,
                example_path,
            });
        }

        violations
    }
}

/// Evaluate the built-in policy set against a graph.
#[must_use]
pub fn evaluate(graph: &DependencyGraph) -> Vec<Violation> {
    evaluate_with(graph, &[&NoEditorDeps])
}

/// Evaluate an arbitrary set of policies and deduplicate the result.
///
/// Violations are deduplicated by `(policy_id, violating_package)`; the
/// first occurrence wins, in policy order then edge order.
#[must_use]
pub fn evaluate_with(graph: &DependencyGraph, policies: &[&dyn Policy]) -> Vec<Violation> {
    let root = graph.root().clone();
    let mut seen: HashSet<(String, PackageId)> = HashSet::new();
    let mut deduped = Vec::new();

    for policy in policies {
        for violation in policy.evaluate(&root, graph) {
            let key = (
                violation.policy_id.clone(),
                violation.violating_package.clone(),
            );
            if seen.insert(key) {
                deduped.push(violation);
            }
        }
    }

    deduped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{build_graph, BuildOptions};
    use crate::source::InMemorySource;

    fn pkg(s: &str) -> PackageId {
        PackageId::new(s)
    }

    #[test]
    fn flags_editor_only_dependency_with_example_path() {
        let source = InMemorySource::new()
            .with_asset("/Game/Foo/Foo", "Blueprint", &["/Game/Bar/Bar"], &[])
            .with_asset("/Game/Bar/Bar", "StaticMesh", &[], &["/Editor/Dev/Baz"]);
        let graph = build_graph(&source, "/Game/Foo/Foo", &BuildOptions::default())
            .expect("build should succeed");

        let violations = evaluate(&graph);

        assert_eq!(violations.len(), 1);
        let v = &violations[0];
        assert_eq!(v.policy_id, NO_EDITOR_DEPS);
        assert_eq!(v.severity, Severity::Warning);
        assert_eq!(v.violating_package, pkg("/Editor/Dev/Baz"));
        assert_eq!(
            v.example_path,
            vec![
                pkg("/Game/Foo/Foo"),
                pkg("/Game/Bar/Bar"),
                pkg("/Editor/Dev/Baz")
            ]
        );
    }

    #[test]
    fn clean_graph_has_no_violations() {
        let source = InMemorySource::new()
            .with_asset("/Game/Root", "Blueprint", &["/Game/Mesh"], &[]);
        let graph = build_graph(&source, "/Game/Root", &BuildOptions::default())
            .expect("build should succeed");

        assert!(evaluate(&graph).is_empty());
    }

    #[test]
    fn duplicate_reaches_are_deduplicated_first_wins() {
        // Two distinct parents both reference the same editor-only package;
        // the edge list has two flagged edges but only one violation may
        // surface, carrying the first-discovered path.
        let source = InMemorySource::new()
            .with_asset("/Game/Hub", "Blueprint", &["/Game/B", "/Game/C"], &[])
            .with_asset("/Game/B", "Blueprint", &["/Editor/Shared"], &[])
            .with_asset("/Game/C", "Blueprint", &["/Editor/Shared"], &[]);
        let graph = build_graph(&source, "/Game/Hub", &BuildOptions::default())
            .expect("build should succeed");

        let violations = evaluate(&graph);

        assert_eq!(violations.len(), 1, "dedup by (policy_id, package)");
        assert_eq!(
            violations[0].example_path,
            vec![pkg("/Game/Hub"), pkg("/Game/B"), pkg("/Editor/Shared")],
            "example path follows the first-discovered parent"
        );
    }

    #[test]
    fn additional_policies_compose_and_dedup() {
        struct EverythingIsFine;

        impl Policy for EverythingIsFine {
            fn id(&self) -> &'static str {
                "FINE"
            }

            fn evaluate(&self, root: &PackageId, _graph: &DependencyGraph) -> Vec<Violation> {
                // Emits the same violation twice to exercise dedup.
                let v = Violation {
                    policy_id: "FINE".to_string(),
                    severity: Severity::Info,
                    message: "nothing to see".to_string(),
                    violating_package: root.clone(),
                    example_path: vec![root.clone()],
                };
                vec![v.clone(), v]
            }
        }

        let source = InMemorySource::new();
        let graph = build_graph(&source, "/Game/Root", &BuildOptions::default())
            .expect("build should succeed");

        let violations = evaluate_with(&graph, &[&NoEditorDeps, &EverythingIsFine]);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].policy_id, "FINE");
    }
}
