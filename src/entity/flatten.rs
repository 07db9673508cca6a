use super::model::{LayoutItem, WorkflowAction, WorkflowStage};
use ahash::AHashSet;

/// Layout entry types that carry something worth surfacing on an application.
const SURFACED_LAYOUT_TYPES: [&str; 3] = ["htmlobject", "integration", "widget"];

fn is_surfaced(item: &LayoutItem) -> bool {
    item.layout_type.as_deref().is_some_and(|layout_type| {
        SURFACED_LAYOUT_TYPES
            .iter()
            .any(|surfaced| layout_type.eq_ignore_ascii_case(surfaced))
    })
}

/// Flattens one layout tree into the surfaced entries it contains, in
/// depth-first order and deduplicated by id.
///
/// Both `children` and `tabs` are descended. Entries nested deeper than
/// `max_depth` are not visited.
pub fn flatten_layout(root: &LayoutItem, max_depth: usize) -> Vec<LayoutItem> {
    let mut seen = AHashSet::new();
    let mut flattened = Vec::new();
    collect_layout(root, 0, max_depth, &mut seen, &mut flattened);
    flattened
}

/// Flattens every tree of an application's layout, deduplicated across trees.
pub fn flatten_layouts(layout: &[LayoutItem], max_depth: usize) -> Vec<LayoutItem> {
    let mut seen = AHashSet::new();
    let mut flattened = Vec::new();
    for root in layout {
        collect_layout(root, 0, max_depth, &mut seen, &mut flattened);
    }
    flattened
}

fn collect_layout(
    item: &LayoutItem,
    depth: usize,
    max_depth: usize,
    seen: &mut AHashSet<String>,
    out: &mut Vec<LayoutItem>,
) {
    if depth > max_depth {
        tracing::warn!(
            layout_id = %item.id,
            max_depth,
            "layout tree exceeds depth cap, truncating"
        );
        return;
    }

    if is_surfaced(item) && seen.insert(item.id.clone()) {
        // Nested entries are reported on their own.
        out.push(LayoutItem {
            children: Vec::new(),
            tabs: Vec::new(),
            ..item.clone()
        });
    }

    for child in item.children.iter().chain(item.tabs.iter()) {
        collect_layout(child, depth + 1, max_depth, seen, out);
    }
}

/// Collects every action of a workflow stage tree: a stage's own actions
/// first, then those of its nested stages. Actions are deduplicated by id.
pub fn flatten_actions(stages: &[WorkflowStage], max_depth: usize) -> Vec<&WorkflowAction> {
    let mut seen = AHashSet::new();
    let mut actions = Vec::new();
    collect_actions(stages, 0, max_depth, &mut seen, &mut actions);
    actions
}

fn collect_actions<'a>(
    stages: &'a [WorkflowStage],
    depth: usize,
    max_depth: usize,
    seen: &mut AHashSet<&'a str>,
    out: &mut Vec<&'a WorkflowAction>,
) {
    if depth > max_depth {
        tracing::warn!(max_depth, "workflow stage tree exceeds depth cap, truncating");
        return;
    }

    for stage in stages {
        for action in &stage.actions {
            if seen.insert(action.id.as_str()) {
                out.push(action);
            }
        }
        collect_actions(&stage.stages, depth + 1, max_depth, seen, out);
    }
}
