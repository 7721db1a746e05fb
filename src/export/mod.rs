//! Graph serialization for the external rendering collaborator.
//!
//! The renderer consumes a deterministic JSON artifact: the node identifier
//! set with per-node language tags, plus the directed edge list. Layout and
//! styling are the renderer's concern.

use anyhow::{Context, Result};
use petgraph::visit::EdgeRef;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::core::DependencyGraph;

#[derive(Serialize)]
struct NodeExport<'a> {
    id: &'a str,
    language: &'static str,
}

#[derive(Serialize)]
struct EdgeExport<'a> {
    from: &'a str,
    to: &'a str,
}

#[derive(Serialize)]
struct GraphExport<'a> {
    nodes: Vec<NodeExport<'a>>,
    edges: Vec<EdgeExport<'a>>,
}

/// Write the graph as JSON. Node and edge order is sorted, so identical
/// scans produce byte-identical artifacts.
pub fn write_json(graph: &DependencyGraph, path: &Path) -> Result<()> {
    let view = graph.to_petgraph();

    let nodes: Vec<NodeExport> = view
        .node_indices()
        .map(|idx| NodeExport {
            id: view[idx].as_str(),
            language: graph.node_language(&view[idx]),
        })
        .collect();

    let edges: Vec<EdgeExport> = view
        .edge_references()
        .map(|edge| EdgeExport {
            from: view[edge.source()].as_str(),
            to: view[edge.target()].as_str(),
        })
        .collect();

    let json = serde_json::to_string_pretty(&GraphExport { nodes, edges })
        .context("failed to serialize dependency graph")?;
    fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
