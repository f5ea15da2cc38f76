//! Preflight report assembly and rendering.
//!
//! A report mirrors one analysis run: overall status, the root asset, graph
//! statistics, and a findings list derived from policy violations. Reports
//! render to Markdown for humans and to JSON for tooling; both carry the
//! same fields.

use std::fmt;
use std::time::Duration;

use chrono::Utc;
use preflight_graph::{explain, DependencyGraph, Flag, PathStep, Severity, Violation};
use serde::Serialize;
use tracing::error;

/// Finding code used when traversal hit the node cap.
pub const GRAPH_TRUNCATED: &str = "GRAPH_TRUNCATED";

/// Overall outcome of a preflight run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    /// No findings above info.
    Pass,
    /// At least one warning.
    Warn,
    /// At least one error.
    Fail,
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "pass"),
            Self::Warn => write!(f, "warn"),
            Self::Fail => write!(f, "fail"),
        }
    }
}

/// One reportable finding.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    /// Severity for status aggregation.
    pub severity: Severity,
    /// Stable machine-readable code.
    pub code: String,
    /// Human-readable advice.
    pub hint: String,
    /// The asset the finding is about, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset: Option<String>,
    /// Structured extra data, e.g. an example dependency path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Graph statistics carried by the report.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ReportStats {
    /// Distinct packages scanned.
    pub node_count: usize,
    /// Dependency edges recorded.
    pub edge_count: usize,
    /// Hard reference edges.
    pub hard_edges: usize,
    /// Soft reference edges.
    pub soft_edges: usize,
    /// Packages suspected to be editor-only.
    pub editor_only_suspected: usize,
    /// Whether traversal stopped at the node cap.
    pub truncated: bool,
}

/// The complete result of one preflight analysis.
#[derive(Debug, Clone, Serialize)]
pub struct PreflightReport {
    /// Overall outcome.
    pub status: ReportStatus,
    /// Canonical root package the analysis started from.
    pub root_asset: String,
    /// UTC timestamp of the run.
    pub timestamp_utc: String,
    /// Wall-clock duration of the analysis in seconds.
    pub duration_sec: f64,
    /// Graph statistics.
    pub stats: ReportStats,
    /// Findings, violations first, in discovery order.
    pub findings: Vec<Finding>,
    /// Discovery path to one editor-only package, when any exists.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_explanation: Option<Vec<PathStep>>,
}

/// Assemble a report from a built graph and its policy violations.
#[must_use]
pub fn build_report(
    graph: &DependencyGraph,
    violations: &[Violation],
    duration: Duration,
) -> PreflightReport {
    let mut findings: Vec<Finding> = violations.iter().map(finding_from_violation).collect();

    if graph.truncated() {
        findings.push(Finding {
            severity: Severity::Warning,
            code: GRAPH_TRUNCATED.to_string(),
            hint: "Traversal stopped at the node cap; results are incomplete.".to_string(),
            asset: None,
            details: None,
        });
    }

    let status = aggregate_status(&findings);
    let stats = graph.stats();

    PreflightReport {
        status,
        root_asset: graph.root().to_string(),
        timestamp_utc: Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string(),
        duration_sec: duration.as_secs_f64(),
        stats: ReportStats {
            node_count: stats.node_count,
            edge_count: stats.edge_count,
            hard_edges: stats.hard_edges,
            soft_edges: stats.soft_edges,
            editor_only_suspected: stats.editor_only,
            truncated: graph.truncated(),
        },
        findings,
        example_explanation: example_explanation(graph),
    }
}

fn finding_from_violation(violation: &Violation) -> Finding {
    let path: Vec<&str> = violation
        .example_path
        .iter()
        .map(preflight_graph::PackageId::as_str)
        .collect();
    Finding {
        severity: violation.severity,
        code: violation.policy_id.clone(),
        hint: violation.message.clone(),
        asset: Some(violation.violating_package.to_string()),
        details: Some(serde_json::json!({ "example_path": path })),
    }
}

fn aggregate_status(findings: &[Finding]) -> ReportStatus {
    if findings.iter().any(|f| f.severity == Severity::Error) {
        ReportStatus::Fail
    } else if findings.iter().any(|f| f.severity == Severity::Warning) {
        ReportStatus::Warn
    } else {
        ReportStatus::Pass
    }
}

/// Explain the first editor-only package in edge order, if any.
///
/// Edge order is used rather than node iteration so the chosen example is
/// deterministic.
fn example_explanation(graph: &DependencyGraph) -> Option<Vec<PathStep>> {
    let target = graph
        .edges()
        .iter()
        .find(|edge| edge.flags.contains(&Flag::EditorOnly))
        .map(|edge| edge.to.clone())?;

    match explain(graph, target.as_str()) {
        Ok(steps) if !steps.is_empty() => Some(steps),
        Ok(_) => None,
        Err(err) => {
            error!(package = %target, %err, "example path explanation failed");
            None
        }
    }
}

/// Render a report as a Markdown document.
#[must_use]
pub fn to_markdown(report: &PreflightReport) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("# Preflight Report".to_string());
    lines.push(String::new());
    lines.push(format!(
        "**Status:** `{}`",
        report.status.to_string().to_uppercase()
    ));
    lines.push(format!("**Timestamp (UTC):** `{}`", report.timestamp_utc));
    lines.push(format!("**Root Asset:** `{}`", report.root_asset));
    lines.push(format!("**Duration:** `{:.3}s`", report.duration_sec));
    lines.push(String::new());

    lines.push("## Summary".to_string());
    lines.push(format!(
        "- Total assets scanned: **{}**",
        report.stats.node_count
    ));
    lines.push(format!(
        "- Total dependency edges: **{}**",
        report.stats.edge_count
    ));
    lines.push(format!(
        "- Hard references: **{}**",
        report.stats.hard_edges
    ));
    lines.push(format!(
        "- Soft references: **{}**",
        report.stats.soft_edges
    ));
    lines.push(format!(
        "- Editor-only suspected assets: **{}**",
        report.stats.editor_only_suspected
    ));
    if report.stats.truncated {
        lines.push("- **Graph truncated at node cap**".to_string());
    }
    lines.push(String::new());

    for (title, severity) in [
        ("Errors", Severity::Error),
        ("Warnings", Severity::Warning),
        ("Info", Severity::Info),
    ] {
        let group: Vec<&Finding> = report
            .findings
            .iter()
            .filter(|f| f.severity == severity)
            .collect();
        lines.push(format!("## {title} ({})", group.len()));
        if group.is_empty() {
            lines.push("- None".to_string());
        }
        for finding in group {
            let asset = finding
                .asset
                .as_deref()
                .map(|a| format!(" `{a}`"))
                .unwrap_or_default();
            lines.push(format!("- **{}** - {}{asset}", finding.code, finding.hint));
            if let Some(path) = finding
                .details
                .as_ref()
                .and_then(|d| d.get("example_path"))
                .and_then(|p| p.as_array())
            {
                lines.push("  - Example path:".to_string());
                for step in path {
                    if let Some(s) = step.as_str() {
                        lines.push(format!("    - `{s}`"));
                    }
                }
            }
        }
        lines.push(String::new());
    }

    if let Some(steps) = &report.example_explanation {
        lines.push("## Example Explanation Path".to_string());
        for (i, step) in steps.iter().enumerate() {
            if i == 0 {
                lines.push(format!("- `{}` *(ROOT)*", step.package));
            } else {
                let flags = if step.flags.is_empty() {
                    String::new()
                } else {
                    let names: Vec<String> =
                        step.flags.iter().map(ToString::to_string).collect();
                    format!(" (flags: {})", names.join(", "))
                };
                lines.push(format!("- `{}` - {}{flags}", step.package, step.reason));
            }
        }
        lines.push(String::new());
    }

    lines.push("---".to_string());
    lines.push("_Preflight is heuristic; it highlights risk to support safe decisions._".to_string());

    lines.join("\n")
}

/// Render a report as pretty JSON.
///
/// # Errors
///
/// Serialization of a report cannot practically fail; the error type is
/// kept so callers can still `?` it.
pub fn to_json(report: &PreflightReport) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use preflight_graph::{build_graph, evaluate, BuildOptions, InMemorySource};

    fn leaky_report() -> PreflightReport {
        let source = InMemorySource::new()
            .with_asset("/Game/Foo/Foo", "Blueprint", &["/Game/Bar/Bar"], &[])
            .with_asset("/Game/Bar/Bar", "StaticMesh", &[], &["/Editor/Dev/Baz"]);
        let graph = build_graph(&source, "/Game/Foo/Foo", &BuildOptions::default())
            .expect("build should succeed");
        let violations = evaluate(&graph);
        build_report(&graph, &violations, Duration::from_millis(42))
    }

    #[test]
    fn violation_downgrades_status_to_warn() {
        let report = leaky_report();
        assert_eq!(report.status, ReportStatus::Warn);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].code, "NO_EDITOR_DEPS");
        assert_eq!(
            report.findings[0].asset.as_deref(),
            Some("/Editor/Dev/Baz")
        );
    }

    #[test]
    fn clean_graph_passes() {
        let source = InMemorySource::new()
            .with_asset("/Game/Root", "Blueprint", &["/Game/Mesh"], &[]);
        let graph = build_graph(&source, "/Game/Root", &BuildOptions::default())
            .expect("build should succeed");
        let report = build_report(&graph, &evaluate(&graph), Duration::from_millis(1));

        assert_eq!(report.status, ReportStatus::Pass);
        assert!(report.findings.is_empty());
        assert!(report.example_explanation.is_none());
    }

    #[test]
    fn truncation_surfaces_as_a_warning_finding() {
        let source = InMemorySource::new()
            .with_asset("/Game/Root", "Blueprint", &["/Game/A", "/Game/B"], &[]);
        let graph = build_graph(
            &source,
            "/Game/Root",
            &BuildOptions {
                max_depth: 4,
                max_nodes: 1,
            },
        )
        .expect("build should succeed");
        let report = build_report(&graph, &evaluate(&graph), Duration::from_millis(1));

        assert_eq!(report.status, ReportStatus::Warn);
        assert!(report.stats.truncated);
        assert!(report.findings.iter().any(|f| f.code == GRAPH_TRUNCATED));
    }

    #[test]
    fn markdown_carries_all_summary_fields() {
        let report = leaky_report();
        let md = to_markdown(&report);

        assert!(md.contains("# Preflight Report"));
        assert!(md.contains("**Status:** `WARN`"));
        assert!(md.contains("`/Game/Foo/Foo`"));
        assert!(md.contains("- Total assets scanned: **3**"));
        assert!(md.contains("- Hard references: **1**"));
        assert!(md.contains("- Soft references: **1**"));
        assert!(md.contains("NO_EDITOR_DEPS"));
        assert!(md.contains("    - `/Editor/Dev/Baz`"));
        assert!(md.contains("## Example Explanation Path"));
    }

    #[test]
    fn json_is_lossless_for_report_fields() {
        let report = leaky_report();
        let json = to_json(&report).expect("report serializes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid JSON");

        assert_eq!(value["status"], "warn");
        assert_eq!(value["root_asset"], "/Game/Foo/Foo");
        assert_eq!(value["stats"]["node_count"], 3);
        assert_eq!(value["stats"]["edge_count"], 2);
        assert_eq!(value["stats"]["editor_only_suspected"], 1);
        assert_eq!(value["stats"]["truncated"], false);
        assert_eq!(value["findings"][0]["severity"], "warning");
        assert_eq!(value["findings"][0]["code"], "NO_EDITOR_DEPS");
        assert_eq!(
            value["findings"][0]["details"]["example_path"][2],
            "/Editor/Dev/Baz"
        );
        let example = value["example_explanation"]
            .as_array()
            .expect("example path present");
        assert_eq!(example[0]["reason"], "ROOT");
    }
}
