use super::node::{Node, NodeKind};
use ahash::{AHashMap, AHashSet};

/// The node map shared by every stage of the engine.
///
/// Single writer: the builder fills it at load time and the controller flips
/// flags and rewires report parents afterwards. Everything else borrows it
/// immutably. Iteration follows insertion order so output is deterministic.
#[derive(Debug, Clone, Default)]
pub struct NodeStore {
    nodes: AHashMap<String, Node>,
    order: Vec<String>,
    /// `(report id, parent id)` pairs added by expanding a report group.
    dynamic_links: AHashSet<(String, String)>,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node, replacing any node with the same id in place.
    pub fn insert(&mut self, node: Node) -> Option<Node> {
        let id = node.id.clone();
        let previous = self.nodes.insert(id.clone(), node);
        if previous.is_none() {
            self.order.push(id);
        }
        previous
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> + '_ {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.order.iter().map(String::as_str)
    }

    pub fn of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> + '_ {
        self.iter().filter(move |node| node.kind() == kind)
    }

    pub fn root(&self) -> Option<&Node> {
        self.of_kind(NodeKind::Root).next()
    }

    /// Adds `parent_id` to a report's parents and remembers that the link
    /// was not part of the built structure.
    pub(crate) fn link_dynamic(&mut self, report_id: &str, parent_id: &str) -> bool {
        let added = self
            .nodes
            .get_mut(report_id)
            .is_some_and(|node| node.add_parent(parent_id));
        if added {
            self.dynamic_links
                .insert((report_id.to_string(), parent_id.to_string()));
        }
        added
    }

    /// Removes a link previously added with `link_dynamic`. Built parents are
    /// never touched.
    pub(crate) fn unlink_dynamic(&mut self, report_id: &str, parent_id: &str) -> bool {
        let key = (report_id.to_string(), parent_id.to_string());
        if !self.dynamic_links.remove(&key) {
            return false;
        }
        if let Some(node) = self.nodes.get_mut(report_id) {
            node.parent_ids.retain(|id| id != parent_id);
        }
        true
    }

    pub fn is_dynamic_link(&self, report_id: &str, parent_id: &str) -> bool {
        self.dynamic_links
            .contains(&(report_id.to_string(), parent_id.to_string()))
    }
}
