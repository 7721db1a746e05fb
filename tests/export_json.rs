use serde_json::Value;
use std::fs;
use tangle::core::{AliasTable, ScanCoordinator};
use tangle::export::write_json;

#[test]
fn exported_json_carries_nodes_edges_and_language_tags() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    fs::write(root.join("a.c"), "#include \"b.h\"\n").unwrap();
    fs::write(root.join("b.h"), "#pragma once\n").unwrap();
    fs::write(root.join("app.py"), "import requests\n").unwrap();

    let outcome = ScanCoordinator::with_defaults()
        .scan(root, &AliasTable::new())
        .unwrap();

    let out = root.join("graph.json");
    write_json(&outcome.graph, &out).unwrap();

    let parsed: Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    let nodes = parsed["nodes"].as_array().unwrap();
    let edges = parsed["edges"].as_array().unwrap();

    let language_of = |id: &str| -> String {
        nodes
            .iter()
            .find(|n| n["id"] == id)
            .map(|n| n["language"].as_str().unwrap().to_string())
            .unwrap()
    };

    assert_eq!(language_of("a.c"), "c");
    assert_eq!(language_of("b.h"), "c");
    // External refs without a recognizable extension are tagged unknown.
    assert_eq!(language_of("requests"), "unknown");

    assert!(edges
        .iter()
        .any(|e| e["from"] == "a.c" && e["to"] == "b.h"));
    assert!(edges
        .iter()
        .any(|e| e["from"] == "app.py" && e["to"] == "requests"));
}

#[test]
fn export_is_deterministic() {
    let dir = tempfile::TempDir::new().unwrap();
    let root = dir.path();
    for i in 0..5 {
        fs::write(
            root.join(format!("f{i}.py")),
            format!("import dep{i}\n"),
        )
        .unwrap();
    }

    let outcome = ScanCoordinator::with_defaults()
        .scan(root, &AliasTable::new())
        .unwrap();

    let first = root.join("one.json");
    let second = root.join("two.json");
    write_json(&outcome.graph, &first).unwrap();
    write_json(&outcome.graph, &second).unwrap();

    assert_eq!(
        fs::read_to_string(first).unwrap(),
        fs::read_to_string(second).unwrap()
    );
}
