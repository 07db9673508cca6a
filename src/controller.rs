use crate::assembler::{AssembledGraph, GraphAssembler};
use crate::config::{DEFAULT_MAX_DEPTH, GraphConfig};
use crate::error::ToggleError;
use crate::graph::{GroupParent, NodeKind, NodePayload, NodeStore};
use crate::group::report_group_id;

/// Applies expand/collapse actions to a node store and re-derives the
/// visible graph after each one.
///
/// The controller is the only writer of the store once it has been built.
pub struct CollapseController<'a> {
    store: &'a mut NodeStore,
    max_depth: usize,
}

impl<'a> CollapseController<'a> {
    pub fn new(store: &'a mut NodeStore) -> Self {
        Self {
            store,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Uses the nesting cap the store was built with.
    pub fn with_config(self, config: &GraphConfig) -> Self {
        self.with_max_depth(config.max_depth)
    }

    pub fn store(&self) -> &NodeStore {
        &*self.store
    }

    /// Re-derives the visible graph without changing anything.
    pub fn assemble(&self) -> AssembledGraph {
        GraphAssembler::new(&*self.store)
            .with_max_depth(self.max_depth)
            .assemble()
    }

    /// Flips a node between expanded and collapsed.
    pub fn toggle(&mut self, node_id: &str) -> Result<AssembledGraph, ToggleError> {
        let expanded = self
            .store
            .get(node_id)
            .map(|node| !node.expanded)
            .ok_or_else(|| ToggleError::NodeNotFound(node_id.to_string()))?;
        self.set_expanded(node_id, expanded)
    }

    pub fn expand(&mut self, node_id: &str) -> Result<AssembledGraph, ToggleError> {
        self.set_expanded(node_id, true)
    }

    pub fn collapse(&mut self, node_id: &str) -> Result<AssembledGraph, ToggleError> {
        self.set_expanded(node_id, false)
    }

    fn set_expanded(
        &mut self,
        node_id: &str,
        expanded: bool,
    ) -> Result<AssembledGraph, ToggleError> {
        let node = self
            .store
            .get_mut(node_id)
            .ok_or_else(|| ToggleError::NodeNotFound(node_id.to_string()))?;
        if !node.collapsible {
            return Err(ToggleError::NotCollapsible {
                node_id: node_id.to_string(),
                kind: node.kind(),
            });
        }

        node.expanded = expanded;
        if node.kind() == NodeKind::ReportGroup {
            sync_report_links(self.store, node_id);
        }

        tracing::debug!(node_id, expanded, "node toggled");
        Ok(self.assemble())
    }
}

/// Keeps the reports of a report group linked to their applications' report
/// groups while the group is open.
///
/// Opening the group links each of its report leaves to the report group of
/// every application the report belongs to. Closing it removes those links
/// again, unless another open report group lists the same report. Parents
/// placed by the builder are never removed.
pub(crate) fn sync_report_links(store: &mut NodeStore, group_id: &str) {
    let Some(group) = store.get(group_id) else {
        return;
    };
    let NodePayload::ReportGroup { reports, .. } = &group.payload else {
        return;
    };
    let opening = group.expanded;
    let reports = reports.clone();

    for report in &reports {
        let has_leaf = store
            .get(&report.id)
            .is_some_and(|node| node.kind() == NodeKind::Report);
        if !has_leaf {
            continue;
        }

        let targets: Vec<String> = report
            .application_ids
            .iter()
            .map(|application_id| {
                report_group_id(&GroupParent::Application(application_id.clone()))
            })
            .filter(|target| target != group_id && store.contains(target))
            .collect();

        for target in &targets {
            if opening {
                store.link_dynamic(&report.id, target);
            } else if !listed_by_other_open_group(store, &report.id, group_id) {
                store.unlink_dynamic(&report.id, target);
            }
        }
    }
}

fn listed_by_other_open_group(store: &NodeStore, report_id: &str, group_id: &str) -> bool {
    store.of_kind(NodeKind::ReportGroup).any(|node| {
        node.id != group_id
            && node.collapsible
            && node.expanded
            && matches!(
                &node.payload,
                NodePayload::ReportGroup { reports, .. }
                    if reports.iter().any(|report| report.id == report_id)
            )
    })
}
