//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types of the crate. Import
//! it to build and explore a graph without importing each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use profiler_graph::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let snapshot = EntitySnapshot::from_file("path/to/entities.json")?;
//! let config = GraphConfig::from_file("path/to/config.json")?;
//!
//! let store = NodeGraphBuilder::new(&snapshot).with_config(config).build();
//! let detail = show_detail(&store, "app-1")?;
//! println!("{:?} for {}", detail.view, detail.entity_id);
//! # Ok(())
//! # }
//! ```

// Building and assembling
pub use crate::assembler::{AssembledGraph, GraphAssembler};
pub use crate::builder::NodeGraphBuilder;
pub use crate::config::GraphConfig;
pub use crate::controller::CollapseController;
pub use crate::visibility::VisibilityResolver;

// Graph and entity types
pub use crate::entity::{EntitySnapshot, IntoSnapshot};
pub use crate::graph::{Edge, Node, NodeKind, NodePayload, NodeStore};

// Detail views
pub use crate::detail::{DetailRequest, DetailView, show_detail};

// Error types
pub use crate::error::{DetailError, LoadError, ToggleError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
