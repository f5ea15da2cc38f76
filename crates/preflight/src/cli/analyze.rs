//! `preflight analyze`: full policy analysis with a rendered report.

use std::fs;
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use colored::Colorize;
use preflight::output::OutputConfig;
use preflight::report::{self, Finding, PreflightReport, ReportStatus};
use preflight_graph::{evaluate, BuildOptions, Severity};

use super::build_from_snapshot;

/// Rendering format for the analysis report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    /// Short console summary.
    Text,
    /// Markdown document.
    Markdown,
    /// Pretty-printed JSON.
    Json,
}

/// Run an analysis and render the report.
///
/// Returns the report status so the caller can map it to an exit code.
pub fn run(
    root: &str,
    snapshot: &Path,
    options: &BuildOptions,
    format: ReportFormat,
    output: Option<&Path>,
) -> anyhow::Result<ReportStatus> {
    let started = Instant::now();
    let graph = build_from_snapshot(snapshot, root, options)?;
    let violations = evaluate(&graph);
    let report = report::build_report(&graph, &violations, started.elapsed());

    // Colors only apply to the text format on stdout; files stay clean.
    let use_colors = output.is_none() && OutputConfig::from_env().use_colors;
    let rendered = match format {
        ReportFormat::Text => render_text(&report, use_colors),
        ReportFormat::Markdown => report::to_markdown(&report),
        ReportFormat::Json => report::to_json(&report).context("cannot serialize report")?,
    };

    match output {
        Some(path) => fs::write(path, rendered)
            .with_context(|| format!("cannot write report to {}", path.display()))?,
        None => println!("{rendered}"),
    }

    Ok(report.status)
}

fn render_text(report: &PreflightReport, use_colors: bool) -> String {
    let status = report.status.to_string().to_uppercase();
    let status = if use_colors {
        match report.status {
            ReportStatus::Pass => status.green().bold().to_string(),
            ReportStatus::Warn => status.yellow().bold().to_string(),
            ReportStatus::Fail => status.red().bold().to_string(),
        }
    } else {
        status
    };

    let mut lines = vec![
        format!("Preflight: {status}"),
        format!("Root: {}", report.root_asset),
        format!(
            "Assets: {}  Edges: {} (hard {}, soft {})  Editor-only suspected: {}",
            report.stats.node_count,
            report.stats.edge_count,
            report.stats.hard_edges,
            report.stats.soft_edges,
            report.stats.editor_only_suspected
        ),
    ];
    if report.stats.truncated {
        lines.push("Graph truncated at node cap; results are incomplete.".to_string());
    }

    if report.findings.is_empty() {
        lines.push("No findings.".to_string());
    } else {
        lines.push(format!("Findings ({}):", report.findings.len()));
        for finding in &report.findings {
            lines.push(format!(
                "  {} {}",
                severity_tag(finding.severity, use_colors),
                finding_line(finding)
            ));
            if let Some(path) = example_path(finding) {
                lines.push(format!("      via {}", path.join(" -> ")));
            }
        }
    }

    lines.join("\n")
}

fn severity_tag(severity: Severity, use_colors: bool) -> String {
    let tag = format!("[{severity}]");
    if use_colors {
        match severity {
            Severity::Error => tag.red().bold().to_string(),
            Severity::Warning => tag.yellow().to_string(),
            Severity::Info => tag.dimmed().to_string(),
        }
    } else {
        tag
    }
}

fn finding_line(finding: &Finding) -> String {
    match &finding.asset {
        Some(asset) => format!("{} {asset}: {}", finding.code, finding.hint),
        None => format!("{}: {}", finding.code, finding.hint),
    }
}

fn example_path(finding: &Finding) -> Option<Vec<String>> {
    let path = finding.details.as_ref()?.get("example_path")?.as_array()?;
    Some(
        path.iter()
            .filter_map(|step| step.as_str().map(str::to_string))
            .collect(),
    )
}
