//! Dependency tree rendering for `preflight tree` output.

use std::io::{self, Write};

use colored::Colorize;
use preflight_graph::{Flag, TreeNode};

use super::OutputConfig;

/// Visible width of one indentation level (connector or continuation).
const CONNECTOR_WIDTH: usize = 4;

/// Print a projected dependency tree with ASCII/Unicode connectors.
///
/// Renders a tree like:
/// ```text
/// ◆ /Game/Foo/Foo [Blueprint]
/// ├── /Game/Bar/Bar (Hard Runtime Reference)
/// │   └── /Editor/Dev/Baz (Editor-only Suspected (Transitive)) [editor_only, suspicious]
/// └── /Game/Mesh (Soft Reference (optional))
/// ```
///
/// # Errors
///
/// Propagates I/O failures from the underlying writer.
pub fn print_tree(root: &TreeNode, root_class: &str, config: &OutputConfig) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_tree(&mut handle, root, root_class, config)
}

/// Render the tree into an arbitrary writer.
///
/// Lines are bounded to [`OutputConfig::max_width`] visible columns;
/// annotations are trimmed before the package name is.
///
/// # Errors
///
/// Propagates I/O failures from `w`.
pub fn write_tree<W: Write>(
    w: &mut W,
    root: &TreeNode,
    root_class: &str,
    config: &OutputConfig,
) -> io::Result<()> {
    let root_icon = if config.use_ascii { "*" } else { "◆" };
    let root_icon = if config.use_colors {
        root_icon.cyan().bold().to_string()
    } else {
        root_icon.to_string()
    };

    let heading = fit_width(
        &format!("{} [{}]", root.package, root_class),
        config.max_width.saturating_sub(2),
        config.use_ascii,
    );
    writeln!(w, "{root_icon} {heading}")?;
    write_children(w, &root.children, &[], config)
}

/// Recursively render children with connector lines.
///
/// `prefix_segments` tracks which ancestor levels still have siblings below,
/// used to draw the vertical continuation lines.
fn write_children<W: Write>(
    w: &mut W,
    children: &[TreeNode],
    prefix_segments: &[bool],
    config: &OutputConfig,
) -> io::Result<()> {
    let (branch, corner, pipe, space) = if config.use_ascii {
        ("|-- ", "`-- ", "|   ", "    ")
    } else {
        ("├── ", "└── ", "│   ", "    ")
    };

    let available = config
        .max_width
        .saturating_sub((prefix_segments.len() + 1) * CONNECTOR_WIDTH);

    for (i, child) in children.iter().enumerate() {
        let is_last = i == children.len() - 1;

        let mut prefix = String::new();
        for &has_more in prefix_segments {
            let segment = if has_more { pipe } else { space };
            if config.use_colors {
                prefix.push_str(&segment.dimmed().to_string());
            } else {
                prefix.push_str(segment);
            }
        }

        let connector = if is_last { corner } else { branch };
        let connector = if config.use_colors {
            connector.dimmed().to_string()
        } else {
            connector.to_string()
        };

        writeln!(
            w,
            "{}{}{}",
            prefix,
            connector,
            node_line(child, available, config)
        )?;

        if !child.children.is_empty() {
            let mut next_segments = prefix_segments.to_vec();
            next_segments.push(!is_last);
            write_children(w, &child.children, &next_segments, config)?;
        }
    }

    Ok(())
}

/// Render one node's label plus annotations within `available` columns.
///
/// When the full line fits, each annotation keeps its own color. On overflow
/// the annotations are cut first (rendered dimmed as one span); the package
/// name itself is only truncated when it alone exceeds the width.
fn node_line(node: &TreeNode, available: usize, config: &OutputConfig) -> String {
    let label_width = node.package.as_str().chars().count();
    let plain = annotation_text(node);

    if label_width + plain.chars().count() <= available {
        return format!("{}{}", node_label(node, config), annotations(node, config));
    }

    if label_width < available {
        let trimmed = fit_width(&plain, available - label_width, config.use_ascii);
        let trimmed = if config.use_colors {
            trimmed.dimmed().to_string()
        } else {
            trimmed
        };
        return format!("{}{}", node_label(node, config), trimmed);
    }

    fit_width(node.package.as_str(), available, config.use_ascii)
}

/// Truncate `text` to `width` visible columns, marking the cut.
fn fit_width(text: &str, width: usize, use_ascii: bool) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }

    let marker = if use_ascii { "..." } else { "…" };
    let marker_width = marker.chars().count();
    if width <= marker_width {
        return text.chars().take(width).collect();
    }

    let mut cut: String = text.chars().take(width - marker_width).collect();
    cut.push_str(marker);
    cut
}

fn node_label(node: &TreeNode, config: &OutputConfig) -> String {
    let name = node.package.to_string();
    if config.use_colors && node.flags.contains(&Flag::EditorOnly) {
        name.yellow().to_string()
    } else {
        name
    }
}

/// The annotation suffix without colors, used for width accounting.
fn annotation_text(node: &TreeNode) -> String {
    let mut parts = format!(" ({})", node.reason);

    if !node.flags.is_empty() {
        let names: Vec<String> = node.flags.iter().map(ToString::to_string).collect();
        parts.push_str(&format!(" [{}]", names.join(", ")));
    }

    if node.cyclic {
        parts.push_str(" (cyclic)");
    }

    parts
}

fn annotations(node: &TreeNode, config: &OutputConfig) -> String {
    let mut parts = String::new();

    let reason = format!(" ({})", node.reason);
    if config.use_colors {
        parts.push_str(&reason.dimmed().to_string());
    } else {
        parts.push_str(&reason);
    }

    if !node.flags.is_empty() {
        let names: Vec<String> = node.flags.iter().map(ToString::to_string).collect();
        let flags = format!(" [{}]", names.join(", "));
        if config.use_colors {
            parts.push_str(&flags.yellow().to_string());
        } else {
            parts.push_str(&flags);
        }
    }

    if node.cyclic {
        let marker = " (cyclic)";
        if config.use_colors {
            parts.push_str(&marker.red().to_string());
        } else {
            parts.push_str(marker);
        }
    }

    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use preflight_graph::{build_graph, project, BuildOptions, InMemorySource};

    fn plain() -> OutputConfig {
        OutputConfig::new(80, false, false)
    }

    fn render_with(source: &InMemorySource, root: &str, config: &OutputConfig) -> String {
        let graph =
            build_graph(source, root, &BuildOptions::default()).expect("build should succeed");
        let tree = project(&graph);
        let class = graph
            .node(graph.root())
            .map_or_else(|| "Unknown".to_string(), |n| n.class.clone());
        let mut buffer = Vec::new();
        write_tree(&mut buffer, &tree, &class, config).expect("tree rendering should succeed");
        String::from_utf8(buffer).expect("output should be valid UTF-8")
    }

    fn render(source: &InMemorySource, root: &str) -> String {
        render_with(source, root, &plain())
    }

    #[test]
    fn renders_chain_with_connectors() {
        let source = InMemorySource::new()
            .with_asset("/Game/Root", "Blueprint", &["/Game/A", "/Game/B"], &[])
            .with_asset("/Game/A", "StaticMesh", &["/Game/Leaf"], &[]);

        let output = render(&source, "/Game/Root");

        assert!(output.contains("◆ /Game/Root [Blueprint]"), "got: {output}");
        assert!(output.contains("├── /Game/A"), "got: {output}");
        assert!(output.contains("│   └── /Game/Leaf"), "got: {output}");
        assert!(output.contains("└── /Game/B"), "got: {output}");
    }

    #[test]
    fn ascii_mode_uses_ascii_connectors() {
        let source =
            InMemorySource::new().with_asset("/Game/Root", "Blueprint", &["/Game/A"], &[]);
        let output = render_with(&source, "/Game/Root", &OutputConfig::new(80, true, false));

        assert!(output.contains("* /Game/Root"), "got: {output}");
        assert!(output.contains("`-- /Game/A"), "got: {output}");
    }

    #[test]
    fn editor_only_flags_and_reason_are_annotated() {
        let source = InMemorySource::new().with_asset(
            "/Game/Root",
            "Blueprint",
            &[],
            &["/Editor/Dev/Baz"],
        );

        let output = render(&source, "/Game/Root");

        assert!(
            output.contains("/Editor/Dev/Baz (Editor-only Suspected) [editor_only, suspicious]"),
            "got: {output}"
        );
    }

    #[test]
    fn cycles_are_marked_and_not_expanded() {
        let source = InMemorySource::new()
            .with_asset("/Game/A", "Blueprint", &["/Game/B"], &[])
            .with_asset("/Game/B", "Blueprint", &["/Game/A"], &[]);

        let output = render(&source, "/Game/A");

        assert!(output.contains("(cyclic)"), "got: {output}");
        // The back-edge line is a leaf; nothing renders below it.
        let cyclic_line_count = output.lines().filter(|l| l.contains("(cyclic)")).count();
        assert_eq!(cyclic_line_count, 1, "got: {output}");
    }

    #[test]
    fn long_lines_are_truncated_to_max_width() {
        let source = InMemorySource::new().with_asset(
            "/Game/Root",
            "Blueprint",
            &["/Game/Props/AVeryLongPackageNameThatKeepsGoing"],
            &[],
        );

        let output = render_with(&source, "/Game/Root", &OutputConfig::new(30, false, false));

        for line in output.lines() {
            assert!(
                line.chars().count() <= 30,
                "line exceeds the configured width: {line}"
            );
        }
        assert!(
            output.contains('…'),
            "cut lines carry a marker, got: {output}"
        );
    }

    #[test]
    fn annotations_are_trimmed_before_the_package_name() {
        let source = InMemorySource::new().with_asset(
            "/Game/Root",
            "Blueprint",
            &[],
            &["/Editor/Dev/Baz"],
        );

        let output = render_with(&source, "/Game/Root", &OutputConfig::new(30, false, false));
        let line = output.lines().nth(1).expect("child line exists");

        assert!(
            line.contains("/Editor/Dev/Baz"),
            "package name must survive the cut, got: {line}"
        );
        assert!(line.chars().count() <= 30, "got: {line}");
        assert!(line.ends_with('…'), "got: {line}");
    }
}
