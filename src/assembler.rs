use crate::config::{DEFAULT_MAX_DEPTH, GraphConfig};
use crate::graph::{Edge, Node, NodeStore};
use crate::visibility::VisibilityResolver;
use serde::Serialize;

/// The visible part of the graph, ready for layout and rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssembledGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

impl AssembledGraph {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id == id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.node(id).is_some()
    }

    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edges
            .iter()
            .any(|edge| edge.source == source && edge.target == target)
    }

    pub fn edge(&self, source: &str, target: &str) -> Option<&Edge> {
        self.edges
            .iter()
            .find(|edge| edge.source == source && edge.target == target)
    }

    /// `(source, target)` pairs, in emission order.
    pub fn edge_pairs(&self) -> Vec<(&str, &str)> {
        self.edges
            .iter()
            .map(|edge| (edge.source.as_str(), edge.target.as_str()))
            .collect()
    }
}

/// Filters a node store down to its visible nodes and derives their edges.
pub struct GraphAssembler<'a> {
    store: &'a NodeStore,
    max_depth: usize,
}

impl<'a> GraphAssembler<'a> {
    pub fn new(store: &'a NodeStore) -> Self {
        Self {
            store,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_config(self, config: &GraphConfig) -> Self {
        self.with_max_depth(config.max_depth)
    }

    /// Emits every visible node in store order, and an edge from each of its
    /// parents that is expanded and visible as well.
    pub fn assemble(&self) -> AssembledGraph {
        let mut resolver = VisibilityResolver::new(self.store).with_max_depth(self.max_depth);
        let mut graph = AssembledGraph::default();

        for node in self.store.iter() {
            if resolver.is_hidden(&node.id) {
                continue;
            }

            for parent_id in &node.parent_ids {
                if *parent_id == node.id {
                    continue;
                }
                let Some(parent) = self.store.get(parent_id) else {
                    continue;
                };
                if parent.expanded && resolver.is_visible(&parent.id) {
                    let edge_id = format!("edge-{}", graph.edges.len());
                    graph.edges.push(Edge::between(edge_id, parent, node));
                }
            }

            graph.nodes.push(node.clone());
        }

        tracing::debug!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            "assembled visible graph"
        );
        graph
    }
}
