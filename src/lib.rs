//! # Profiler Graph - Entity Graph Construction and Visibility Engine
//!
//! **Profiler Graph** turns the entities exported from a low-code platform
//! (workspaces, applications, dashboards, reports, integrations and
//! workflows) into a hierarchical node/edge graph, and decides which part of
//! that graph is visible given an expanded/collapsed flag per node.
//!
//! ## Core Workflow
//!
//! 1.  **Load a Snapshot**: Parse an extracted bundle into an `EntitySnapshot`, either from JSON
//!     or through your own `IntoSnapshot` implementation.
//! 2.  **Build**: `NodeGraphBuilder` projects the snapshot into a `NodeStore`, synthesizing
//!     group nodes wherever a parent has more children of one kind than the threshold.
//! 3.  **Assemble**: `GraphAssembler` filters the store down to the visible nodes and derives
//!     the edges between them.
//! 4.  **Interact**: `CollapseController` flips expanded flags and re-assembles; `show_detail`
//!     maps a clicked node to the view that describes it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use profiler_graph::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let snapshot = EntitySnapshot::from_file("bundle/entities.json")?
//!         .with_flattened_layouts(256);
//!
//!     let mut store = NodeGraphBuilder::new(&snapshot).build();
//!     let graph = GraphAssembler::new(&store).assemble();
//!     println!("{} nodes, {} edges", graph.nodes.len(), graph.edges.len());
//!
//!     // Open a workspace's dashboard group.
//!     let mut controller = CollapseController::new(&mut store);
//!     let graph = controller.toggle("ws-1-dashboard-g")?;
//!     println!("{} nodes after toggling", graph.nodes.len());
//!
//!     // A rebuild keeps what the user opened.
//!     let rebuilt = NodeGraphBuilder::new(&snapshot).with_previous(&store).build();
//!     assert_eq!(rebuilt.len(), store.len());
//!
//!     Ok(())
//! }
//! ```

pub mod assembler;
pub mod builder;
pub mod config;
pub mod controller;
pub mod detail;
pub mod entity;
pub mod error;
pub mod graph;
pub mod group;
pub mod prelude;
pub mod visibility;
