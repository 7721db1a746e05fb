use std::fs;
use std::sync::atomic::{AtomicBool, Ordering};
use tangle::core::{AliasTable, ScanCoordinator};

#[test]
fn two_file_c_project_produces_exactly_one_edge() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    fs::write(
        root.join("a.c"),
        "#include \"b.h\"\n#include <stdio.h>\n\nint main(void) { return 0; }\n",
    )
    .unwrap();
    fs::write(root.join("b.h"), "#pragma once\n").unwrap();

    let outcome = ScanCoordinator::with_defaults()
        .scan(root, &AliasTable::new())
        .unwrap();

    let graph = &outcome.graph;
    assert_eq!(graph.edges().len(), 1);
    let targets = graph.edges().get("a.c").unwrap();
    assert_eq!(targets.len(), 1);
    assert!(targets.contains("b.h"));

    // The system include contributes neither an edge nor a node.
    assert!(!graph.nodes().contains("stdio.h"));
    assert_eq!(graph.node_count(), 2);

    assert_eq!(outcome.stats.files_processed, 2);
    assert_eq!(outcome.stats.dependencies_found, 1);
    assert_eq!(outcome.stats.errors, 0);
}

#[test]
fn stats_account_for_every_enumerated_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    fs::write(root.join("a.py"), "import os\n").unwrap();
    fs::write(root.join("b.py"), "import a\n").unwrap();
    fs::write(root.join("c.py"), "x = 1\n").unwrap();

    let outcome = ScanCoordinator::with_defaults()
        .scan(root, &AliasTable::new())
        .unwrap();
    let stats = outcome.stats;

    assert_eq!(stats.files_processed + stats.skipped, 3);
    let edge_total: usize = outcome.graph.edges().values().map(|s| s.len()).sum();
    assert_eq!(stats.dependencies_found, edge_total as u64);

    // Zero-dependency files are processed but absent from the edge map.
    assert!(!outcome.graph.edges().contains_key("c.py"));
}

#[test]
fn scan_is_idempotent_on_an_unchanged_tree() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("pkg")).unwrap();
    fs::write(root.join("main.py"), "from pkg import mod\nimport sys\n").unwrap();
    fs::write(root.join("pkg/mod.py"), "import os, json\n").unwrap();

    let coordinator = ScanCoordinator::with_defaults();
    let first = coordinator.scan(root, &AliasTable::new()).unwrap();
    let second = coordinator.scan(root, &AliasTable::new()).unwrap();

    assert_eq!(first.graph, second.graph);
    assert_eq!(first.stats, second.stats);
}

#[test]
fn dispatch_order_does_not_change_the_graph() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    for i in 0..20 {
        fs::write(
            root.join(format!("m{i}.py")),
            format!("import m{}\n", (i + 1) % 20),
        )
        .unwrap();
    }

    // Batch size 1 maximizes interleaving; the merged result must match the
    // single-batch run.
    let fine = ScanCoordinator::with_defaults()
        .with_chunk_size(1)
        .scan(root, &AliasTable::new())
        .unwrap();
    let coarse = ScanCoordinator::with_defaults()
        .with_chunk_size(100)
        .scan(root, &AliasTable::new())
        .unwrap();

    assert_eq!(fine.graph, coarse.graph);
    assert_eq!(fine.stats, coarse.stats);
}

#[test]
fn latin1_only_file_is_processed_not_errored() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    // 0xE9 is not valid UTF-8 on its own; the fallback decoding must carry
    // the file through extraction.
    fs::write(root.join("legacy.py"), b"# caf\xe9\nimport os\n".as_slice()).unwrap();

    let outcome = ScanCoordinator::with_defaults()
        .scan(root, &AliasTable::new())
        .unwrap();

    assert_eq!(outcome.stats.files_processed, 1);
    assert_eq!(outcome.stats.errors, 0);
    assert!(outcome.graph.edges().get("legacy.py").unwrap().contains("os"));
}

#[test]
fn empty_tree_is_a_fatal_condition() {
    let dir = tempfile::TempDir::new().unwrap();
    let err = ScanCoordinator::with_defaults()
        .scan(dir.path(), &AliasTable::new())
        .unwrap_err();
    assert!(err.to_string().contains("no scannable source files"));
}

#[test]
fn cancellation_skips_pending_files_and_reports_partial_stats() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    for i in 0..10 {
        fs::write(root.join(format!("f{i}.py")), "import os\n").unwrap();
    }

    let cancel = AtomicBool::new(false);
    cancel.store(true, Ordering::Relaxed);

    let outcome = ScanCoordinator::with_defaults()
        .scan_with_cancel(root, &AliasTable::new(), &cancel)
        .unwrap();

    assert_eq!(outcome.stats.files_processed, 0);
    assert_eq!(outcome.stats.skipped, 10);
    assert!(outcome.graph.is_empty());
}

#[test]
fn excluded_directories_contribute_nothing() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    fs::create_dir_all(root.join("node_modules/lodash")).unwrap();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("node_modules/lodash/index.js"), "import './x';\n").unwrap();
    fs::write(root.join("src/app.js"), "import './util.js';\n").unwrap();
    fs::write(root.join("src/util.js"), "export const x = 1;\n").unwrap();

    let outcome = ScanCoordinator::with_defaults()
        .scan(root, &AliasTable::new())
        .unwrap();

    for node in outcome.graph.nodes() {
        assert!(!node.contains("node_modules"));
    }
    assert!(outcome.graph.edges().get("src/app.js").unwrap().contains("src/util.js"));
}
