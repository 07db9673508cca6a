use super::BuildContext;
use crate::entity::{OutputType, Task};
use crate::graph::{
    Connection, ConnectionKind, Dimension, IntegrationAttributes, Node, NodePayload,
};
use crate::group::integration_group_id;
use ahash::AHashSet;

/// Id of the common bucket for tasks that no loaded application owns.
pub const COMMON_NODE_ID: &str = "common";

impl<'a> BuildContext<'a> {
    pub(super) fn add_integrations(&mut self) {
        let snapshot = self.snapshot;

        let (owned, unowned): (Vec<&'a Task>, Vec<&'a Task>) =
            snapshot.tasks.iter().partition(|task| {
                task.owner()
                    .is_some_and(|owner| self.application_ids.contains(owner))
            });

        self.add_common_integrations(&unowned);

        // A task another task invokes, or a workflow runs, stays visible on
        // its own instead of disappearing into a group.
        let mut keep_ungrouped: AHashSet<&str> = snapshot
            .tasks
            .iter()
            .flat_map(|task| task.outputs.iter())
            .filter(|output| output.output_type == OutputType::ReferentialTask)
            .filter_map(|output| output.task_id.as_deref())
            .collect();
        keep_ungrouped.extend(self.workflow_task_ids.iter().copied());

        for application in &snapshot.applications {
            let tasks: Vec<&Task> = owned
                .iter()
                .copied()
                .filter(|task| task.owner() == Some(application.id.as_str()))
                .collect();
            if tasks.is_empty() {
                continue;
            }

            let groupable: AHashSet<&str> = tasks
                .iter()
                .filter(|task| is_groupable(task, &application.id, &keep_ungrouped))
                .map(|task| task.id.as_str())
                .collect();

            let group_id = if self.groups.needs_group(groupable.len()) {
                let group = self
                    .groups
                    .integration_group(&application.id, groupable.len());
                self.store.insert(group);
                Some(integration_group_id(&application.id))
            } else {
                None
            };

            for task in tasks {
                let (connections, actions) = self.output_connections(task);
                let parents: Vec<String> = match &group_id {
                    Some(group_id) if groupable.contains(task.id.as_str()) => {
                        vec![group_id.clone()]
                    }
                    _ => std::iter::once(application.id.clone())
                        .chain(connections.iter().map(|c| c.id.clone()))
                        .collect(),
                };
                self.insert_integration(task, parents, connections, actions);
            }
        }
    }

    fn add_common_integrations(&mut self, tasks: &[&Task]) {
        if tasks.is_empty() {
            return;
        }

        let common = Node::new(COMMON_NODE_ID, "Common", NodePayload::Common)
            .with_dimension(Dimension::Compact)
            .with_parents([self.root_id.as_str()])
            .collapsible(true);
        self.store.insert(common);

        for task in tasks {
            if let Some(owner) = task.owner() {
                tracing::debug!(
                    task_id = %task.id,
                    application_id = owner,
                    "task owner is not loaded, placing it under common"
                );
            }
            let (connections, actions) = self.output_connections(task);
            let parents: Vec<String> = std::iter::once(COMMON_NODE_ID.to_string())
                .chain(connections.iter().map(|c| c.id.clone()))
                .collect();
            self.insert_integration(task, parents, connections, actions);
        }
    }

    fn insert_integration(
        &mut self,
        task: &Task,
        parents: Vec<String>,
        connections: Vec<Connection>,
        actions: Vec<Node>,
    ) {
        let node = Node::new(
            task.id.clone(),
            task.name.clone(),
            NodePayload::Integration {
                task: task.clone(),
                attributes: IntegrationAttributes::from_task(task),
                connections,
            },
        )
        .with_dimension(Dimension::Compact)
        .with_parents(parents)
        .viewable(true);
        self.store.insert(node);

        for action in actions {
            self.store.insert(action);
        }
    }

    /// Resolves every output of a task to the node it writes to. Email and
    /// file outputs get a fresh action node each, returned alongside.
    fn output_connections(&self, task: &Task) -> (Vec<Connection>, Vec<Node>) {
        let mut connections = Vec::new();
        let mut actions = Vec::new();

        for (index, output) in task.outputs.iter().enumerate() {
            match &output.output_type {
                OutputType::InsertUpdateRecord => {
                    match output.application_id.as_deref() {
                        Some(target) if self.application_ids.contains(target) => {
                            connections.push(Connection {
                                id: target.to_string(),
                                kind: ConnectionKind::Application,
                            });
                        }
                        target => tracing::debug!(
                            task_id = %task.id,
                            target_id = ?target,
                            "dropping record output to an application that is not loaded"
                        ),
                    }
                }
                OutputType::SetFieldValue => match task.owner() {
                    Some(owner) if self.application_ids.contains(owner) => {
                        connections.push(Connection {
                            id: owner.to_string(),
                            kind: ConnectionKind::Application,
                        });
                    }
                    _ => tracing::debug!(
                        task_id = %task.id,
                        "dropping field output of a task without a loaded owner"
                    ),
                },
                OutputType::ReferentialTask => match output.task_id.as_deref() {
                    Some(target) if target == task.id => tracing::warn!(
                        task_id = %task.id,
                        "task invokes itself, dropping the self reference"
                    ),
                    Some(target) if self.task_ids.contains(target) => {
                        connections.push(Connection {
                            id: target.to_string(),
                            kind: ConnectionKind::Task,
                        });
                    }
                    target => tracing::debug!(
                        task_id = %task.id,
                        target_id = ?target,
                        "dropping invocation of a task that is not loaded"
                    ),
                },
                OutputType::Email => {
                    let action = action_node(
                        format!("{}-send-email-{}", task.id, index),
                        "Send Email",
                        NodePayload::SendEmail {
                            task_id: task.id.clone(),
                        },
                        &task.id,
                    );
                    connections.push(Connection {
                        id: action.id.clone(),
                        kind: ConnectionKind::Action,
                    });
                    actions.push(action);
                }
                OutputType::SaveToFile => {
                    let action = action_node(
                        format!("{}-save-to-file-{}", task.id, index),
                        "Save To File",
                        NodePayload::SaveToFile {
                            task_id: task.id.clone(),
                        },
                        &task.id,
                    );
                    connections.push(Connection {
                        id: action.id.clone(),
                        kind: ConnectionKind::Action,
                    });
                    actions.push(action);
                }
                OutputType::Unknown(raw) => tracing::debug!(
                    task_id = %task.id,
                    output_type = %raw,
                    "ignoring output of unknown type"
                ),
            }
        }

        (connections, actions)
    }
}

/// A task folds into its application's task group only when its single
/// output writes back into that same application and nothing else points
/// at it.
fn is_groupable(task: &Task, application_id: &str, keep_ungrouped: &AHashSet<&str>) -> bool {
    if task.outputs.len() != 1 || keep_ungrouped.contains(task.id.as_str()) {
        return false;
    }

    let output = &task.outputs[0];
    match output.output_type {
        OutputType::SetFieldValue => true,
        OutputType::InsertUpdateRecord => output.application_id.as_deref() == Some(application_id),
        _ => false,
    }
}

fn action_node(id: String, label: &str, payload: NodePayload, task_id: &str) -> Node {
    Node::new(id, label, payload)
        .with_dimension(Dimension::Micro)
        .with_parents([task_id])
        .expanded(false)
}
