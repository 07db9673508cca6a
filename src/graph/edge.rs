use super::node::{Node, NodeKind};
use serde::Serialize;

/// Rendering hints for an edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeMeta {
    /// Either endpoint is an integration.
    pub is_integration: bool,
    /// The edge is a task output (data flow), not containment.
    pub is_output_mapping: bool,
}

/// A directed connector from a parent to a child, both currently visible.
/// Edges are derived on every assembly pass and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
    pub meta: EdgeMeta,
}

impl Edge {
    pub fn between(id: String, source: &Node, target: &Node) -> Self {
        let is_integration =
            source.kind() == NodeKind::Integration || target.kind() == NodeKind::Integration;
        let is_output_mapping = is_integration
            && target
                .connections()
                .iter()
                .any(|connection| connection.id == source.id);

        Self {
            id,
            source: source.id.clone(),
            target: target.id.clone(),
            label: format!("{} - {}", source.label, target.label),
            meta: EdgeMeta {
                is_integration,
                is_output_mapping,
            },
        }
    }
}
