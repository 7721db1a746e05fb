use petgraph::graph::{Graph, NodeIndex};
use petgraph::Directed;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use super::Language;

/// The finalized node/edge set. Built once by the coordinator after every
/// file has reached a terminal state; read-only from then on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    edges: BTreeMap<String, BTreeSet<String>>,
    nodes: BTreeSet<String>,
}

impl DependencyGraph {
    /// Derive the node set as the union of all edge sources and targets.
    pub fn from_edges(edges: BTreeMap<String, BTreeSet<String>>) -> Self {
        let mut nodes: BTreeSet<String> = edges.keys().cloned().collect();
        for targets in edges.values() {
            nodes.extend(targets.iter().cloned());
        }
        Self { edges, nodes }
    }

    pub fn nodes(&self) -> &BTreeSet<String> {
        &self.nodes
    }

    /// Mapping from a file's project-relative path to its dependency
    /// identifiers. Files with no dependencies have no entry.
    pub fn edges(&self) -> &BTreeMap<String, BTreeSet<String>> {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(BTreeSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Language tag for a node, for the rendering collaborator. Nodes whose
    /// identifier carries no recognizable extension are tagged "unknown".
    pub fn node_language(&self, id: &str) -> &'static str {
        Language::from_path(Path::new(id)).map_or("unknown", Language::as_str)
    }

    /// Directed petgraph view of the same node/edge set, for consumers that
    /// want to run graph algorithms or layout over it.
    pub fn to_petgraph(&self) -> Graph<String, (), Directed> {
        let mut graph = Graph::new();
        let mut indices: BTreeMap<&str, NodeIndex> = BTreeMap::new();

        for node in &self.nodes {
            let idx = graph.add_node(node.clone());
            indices.insert(node.as_str(), idx);
        }
        for (source, targets) in &self.edges {
            let from = indices[source.as_str()];
            for target in targets {
                graph.add_edge(from, indices[target.as_str()], ());
            }
        }
        graph
    }
}
