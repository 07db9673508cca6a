use crate::detail::DetailView;
use crate::graph::NodeKind;
use thiserror::Error;

/// Errors that can occur while loading a snapshot or a configuration file.
#[derive(Error, Debug, Clone)]
pub enum LoadError {
    #[error("Could not read '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse JSON: {0}")]
    Parse(String),
}

/// Errors that can occur when toggling a node's expanded state.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ToggleError {
    #[error("Node '{0}' not found in the node store")]
    NodeNotFound(String),

    #[error("Node '{node_id}' of kind {kind:?} cannot be expanded or collapsed")]
    NotCollapsible { node_id: String, kind: NodeKind },
}

/// Errors that can occur when resolving the detail view of a node.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetailError {
    #[error("Node '{0}' not found in the node store")]
    NodeNotFound(String),

    #[error("Node '{node_id}' of kind {kind:?} has no detail view")]
    NoDetailView { node_id: String, kind: NodeKind },

    #[error("{view:?} '{entity_id}' is not part of the loaded snapshot")]
    EntityNotFound { view: DetailView, entity_id: String },
}
