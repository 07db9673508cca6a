use crate::config::GraphConfig;
use crate::controller::sync_report_links;
use crate::entity::{Application, EntitySnapshot, flatten_actions};
use crate::graph::{Dimension, Node, NodeKind, NodePayload, NodeStore};
use crate::group::GroupSynthesizer;
use ahash::AHashSet;

mod dashboard;
mod integration;

/// Projects an `EntitySnapshot` into a `NodeStore`.
///
/// ```rust,no_run
/// use profiler_graph::prelude::*;
///
/// # fn run() -> Result<()> {
/// let snapshot = EntitySnapshot::from_file("bundle/entities.json")?;
/// let store = NodeGraphBuilder::new(&snapshot)
///     .with_config(GraphConfig::default())
///     .build();
/// let graph = GraphAssembler::new(&store).assemble();
/// println!("{} visible nodes", graph.nodes.len());
/// # Ok(())
/// # }
/// ```
pub struct NodeGraphBuilder<'a> {
    snapshot: &'a EntitySnapshot,
    previous: Option<&'a NodeStore>,
    config: GraphConfig,
}

impl<'a> NodeGraphBuilder<'a> {
    pub fn new(snapshot: &'a EntitySnapshot) -> Self {
        Self {
            snapshot,
            previous: None,
            config: GraphConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GraphConfig) -> Self {
        self.config = config;
        self
    }

    /// Carries the expanded flags of a previous build over to nodes with the
    /// same id and kind, and reuses its root id.
    pub fn with_previous(mut self, previous: &'a NodeStore) -> Self {
        self.previous = Some(previous);
        self
    }

    pub fn build(self) -> NodeStore {
        let mut context = BuildContext::new(self.snapshot, &self.config);

        context.add_root(self.previous);
        context.add_workspaces();
        context.add_applications();
        context.add_dashboards();
        context.add_reports();
        context.add_integrations();

        let mut store = context.store;
        if let Some(previous) = self.previous {
            restore_expanded(&mut store, previous);
        }

        tracing::debug!(nodes = store.len(), "built node graph");
        store
    }
}

/// Mutable state of one build pass.
struct BuildContext<'a> {
    snapshot: &'a EntitySnapshot,
    config: &'a GraphConfig,
    groups: GroupSynthesizer,
    store: NodeStore,
    root_id: String,
    workspace_ids: AHashSet<&'a str>,
    application_ids: AHashSet<&'a str>,
    task_ids: AHashSet<&'a str>,
    /// Tasks referenced by workflow integration actions.
    workflow_task_ids: AHashSet<&'a str>,
}

impl<'a> BuildContext<'a> {
    fn new(snapshot: &'a EntitySnapshot, config: &'a GraphConfig) -> Self {
        Self {
            snapshot,
            config,
            groups: GroupSynthesizer::new(config.group_threshold),
            store: NodeStore::new(),
            root_id: config.root_id.clone(),
            workspace_ids: snapshot.workspaces.iter().map(|w| w.id.as_str()).collect(),
            application_ids: snapshot
                .applications
                .iter()
                .map(|a| a.id.as_str())
                .collect(),
            task_ids: snapshot.tasks.iter().map(|t| t.id.as_str()).collect(),
            workflow_task_ids: AHashSet::new(),
        }
    }

    fn add_root(&mut self, previous: Option<&NodeStore>) {
        if let Some(root) = previous.and_then(NodeStore::root) {
            self.root_id = root.id.clone();
        }

        let root = Node::new(
            self.root_id.clone(),
            self.config.root_label.clone(),
            NodePayload::Root,
        );
        self.store.insert(root);
    }

    fn add_workspaces(&mut self) {
        let snapshot = self.snapshot;
        for workspace in &snapshot.workspaces {
            let node = Node::new(
                workspace.id.clone(),
                workspace.name.clone(),
                NodePayload::Workspace(workspace.clone()),
            )
            .with_parents([self.root_id.as_str()])
            .viewable(true);
            self.store.insert(node);
        }
    }

    fn add_applications(&mut self) {
        let snapshot = self.snapshot;
        for application in &snapshot.applications {
            let mut parents: Vec<&str> = snapshot
                .workspaces
                .iter()
                .filter(|w| w.hosts(&application.id))
                .map(|w| w.id.as_str())
                .collect();

            for target in application.referenced_application_ids() {
                if self.application_ids.contains(target) {
                    parents.push(target);
                } else {
                    tracing::debug!(
                        application_id = %application.id,
                        target_id = target,
                        "dropping reference to an application that is not loaded"
                    );
                }
            }

            if parents.is_empty() {
                parents.push(self.root_id.as_str());
            }

            let payload = NodePayload::Application {
                application: application.clone(),
                flattened_layout_count: snapshot
                    .flattened_layouts
                    .get(&application.id)
                    .map_or(0, Vec::len),
                report_count: snapshot.reports_for(&application.id).len(),
            };

            let node = Node::new(application.id.clone(), application.name.clone(), payload)
                .with_parents(parents)
                .viewable(true);
            self.store.insert(node);

            self.add_workflow(application);
        }
    }

    /// Adds the workflow marker of an application, hanging under the
    /// application and every task its integration actions run.
    fn add_workflow(&mut self, application: &Application) {
        let snapshot = self.snapshot;
        let Some(workflow) = snapshot
            .workflows
            .iter()
            .find(|w| w.application_id == application.id && !w.stages.is_empty())
        else {
            return;
        };

        let mut parents = vec![application.id.as_str()];
        for action in flatten_actions(&workflow.stages, self.config.max_depth) {
            if !action.is_integration() {
                continue;
            }
            let Some(task_id) = action.task_id.as_deref() else {
                continue;
            };
            if self.task_ids.contains(task_id) {
                parents.push(task_id);
                self.workflow_task_ids.insert(task_id);
            } else {
                tracing::debug!(
                    workflow_id = %workflow.id,
                    task_id,
                    "dropping workflow action for a task that is not loaded"
                );
            }
        }

        let node = Node::new(
            workflow.id.clone(),
            "Workflow",
            NodePayload::Workflow {
                workflow_id: workflow.id.clone(),
                application_id: application.id.clone(),
            },
        )
        .with_dimension(Dimension::Micro)
        .with_parents(parents);
        self.store.insert(node);
    }
}

fn restore_expanded(store: &mut NodeStore, previous: &NodeStore) {
    let ids: Vec<String> = store.ids().map(str::to_string).collect();
    for id in &ids {
        let Some(before) = previous.get(id) else {
            continue;
        };
        if let Some(node) = store.get_mut(id) {
            if node.kind() == before.kind() {
                node.expanded = before.expanded;
            }
        }
    }

    // Report links follow from the restored flags.
    let open_report_groups: Vec<String> = store
        .of_kind(NodeKind::ReportGroup)
        .filter(|node| node.collapsible && node.expanded)
        .map(|node| node.id.clone())
        .collect();
    for group_id in &open_report_groups {
        sync_report_links(store, group_id);
    }
}
