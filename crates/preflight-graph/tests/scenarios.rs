//! End-to-end analysis scenarios over in-memory registries.

use preflight_graph::{
    build_graph, detect_cycles, evaluate, explain, project, BuildOptions, Flag, InMemorySource,
    PackageId, NO_EDITOR_DEPS, ROOT_REASON,
};

fn pkg(s: &str) -> PackageId {
    PackageId::new(s)
}

/// Root hard-references Bar, which soft-references editor-only Baz.
fn editor_leak_registry() -> InMemorySource {
    InMemorySource::new()
        .with_asset("/Game/Foo/Foo", "Blueprint", &["/Game/Bar/Bar"], &[])
        .with_asset("/Game/Bar/Bar", "StaticMesh", &[], &["/Editor/Dev/Baz"])
}

#[test]
fn editor_leak_is_detected_with_full_path() {
    let registry = editor_leak_registry();
    let graph = build_graph(
        &registry,
        "/Game/Foo/Foo",
        &BuildOptions {
            max_depth: 4,
            max_nodes: 400,
        },
    )
    .expect("build should succeed");

    assert_eq!(graph.stats().node_count, 3);
    assert_eq!(graph.stats().edge_count, 2);
    assert!(!graph.truncated());

    let baz = graph
        .node(&pkg("/Editor/Dev/Baz"))
        .expect("Baz should be in the graph");
    assert!(baz.flags.contains(&Flag::EditorOnly));

    let violations = evaluate(&graph);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].policy_id, NO_EDITOR_DEPS);
    assert_eq!(
        violations[0].example_path,
        vec![
            pkg("/Game/Foo/Foo"),
            pkg("/Game/Bar/Bar"),
            pkg("/Editor/Dev/Baz")
        ]
    );
}

#[test]
fn node_cap_of_one_yields_truncated_single_node_graph() {
    let registry = editor_leak_registry();
    let graph = build_graph(
        &registry,
        "/Game/Foo/Foo",
        &BuildOptions {
            max_depth: 4,
            max_nodes: 1,
        },
    )
    .expect("build should succeed");

    assert_eq!(graph.stats().node_count, 1);
    assert_eq!(graph.stats().edge_count, 0);
    assert!(graph.truncated());
    assert!(graph.contains(&pkg("/Game/Foo/Foo")));
}

#[test]
fn dependency_cycle_terminates_everywhere() {
    let registry = InMemorySource::new()
        .with_asset("/Game/A", "Blueprint", &["/Game/B"], &[])
        .with_asset("/Game/B", "Blueprint", &["/Game/A"], &[]);

    let graph = build_graph(&registry, "/Game/A", &BuildOptions::default())
        .expect("builder must terminate on cycles");

    assert_eq!(graph.stats().node_count, 2, "each package appears once");

    let steps = explain(&graph, "/Game/B").expect("explain must terminate on cycles");
    let packages: Vec<&str> = steps.iter().map(|s| s.package.as_str()).collect();
    assert_eq!(packages, vec!["/Game/A", "/Game/B"]);
    assert_eq!(steps[0].reason, ROOT_REASON);

    let tree = project(&graph);
    let b = &tree.children[0];
    assert!(
        b.children[0].cyclic,
        "projector must mark the back-edge cyclic instead of recursing"
    );

    let cycles = detect_cycles(&graph);
    assert_eq!(cycles, vec![vec![pkg("/Game/A"), pkg("/Game/B")]]);
}

#[test]
fn export_text_root_path_is_normalized() {
    let registry = editor_leak_registry();
    let graph = build_graph(
        &registry,
        "Blueprint'/Game/Foo/Foo.Foo'",
        &BuildOptions::default(),
    )
    .expect("build should succeed");

    assert_eq!(graph.root(), &pkg("/Game/Foo/Foo"));
    assert_eq!(graph.stats().node_count, 3);
}

#[test]
fn depth_zero_keeps_only_the_root() {
    let registry = editor_leak_registry();
    let graph = build_graph(
        &registry,
        "/Game/Foo/Foo",
        &BuildOptions {
            max_depth: 0,
            max_nodes: 400,
        },
    )
    .expect("build should succeed");

    assert_eq!(graph.stats().node_count, 1);
    assert!(evaluate(&graph).is_empty());
    assert!(project(&graph).children.is_empty());
}
