use crate::config::DEFAULT_MAX_DEPTH;
use crate::graph::NodeStore;
use ahash::AHashMap;

/// Outcome of resolving one node.
#[derive(Debug, Clone, Copy)]
struct Resolution {
    visible: bool,
    /// A cycle or the depth cap cut the walk somewhere below this node, so
    /// a hidden verdict only holds for the current chain.
    cut: bool,
}

impl Resolution {
    const VISIBLE: Resolution = Resolution {
        visible: true,
        cut: false,
    };
    const HIDDEN: Resolution = Resolution {
        visible: false,
        cut: false,
    };
}

/// Decides whether a node is reachable through expanded ancestors.
///
/// A node is hidden when every parent is missing, collapsed, or itself
/// hidden. A node without parents is always visible. Verdicts are memoized
/// for the lifetime of the resolver, so create one per assembly pass.
pub struct VisibilityResolver<'a> {
    store: &'a NodeStore,
    max_depth: usize,
    cache: AHashMap<&'a str, bool>,
}

impl<'a> VisibilityResolver<'a> {
    pub fn new(store: &'a NodeStore) -> Self {
        Self {
            store,
            max_depth: DEFAULT_MAX_DEPTH,
            cache: AHashMap::new(),
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn is_hidden(&mut self, node_id: &str) -> bool {
        !self.is_visible(node_id)
    }

    pub fn is_visible(&mut self, node_id: &str) -> bool {
        let mut chain = Vec::new();
        self.resolve(node_id, &mut chain).visible
    }

    fn resolve(&mut self, node_id: &str, chain: &mut Vec<&'a str>) -> Resolution {
        if let Some(&visible) = self.cache.get(node_id) {
            return Resolution {
                visible,
                cut: false,
            };
        }

        let store = self.store;
        let Some(node) = store.get(node_id) else {
            return Resolution::HIDDEN;
        };

        if node.parent_ids.is_empty() {
            self.cache.insert(node.id.as_str(), true);
            return Resolution::VISIBLE;
        }

        // Self-parenting is a data error. The node fails open.
        if node.has_parent(&node.id) {
            tracing::error!(
                node_id = %node.id,
                parent_ids = ?node.parent_ids,
                "node lists itself as a parent"
            );
            self.cache.insert(node.id.as_str(), true);
            return Resolution::VISIBLE;
        }

        if chain.len() >= self.max_depth {
            tracing::warn!(
                node_id = %node.id,
                max_depth = self.max_depth,
                "parent chain exceeds depth cap"
            );
            return Resolution {
                visible: false,
                cut: true,
            };
        }

        chain.push(node.id.as_str());
        let mut visible = false;
        let mut cut = false;

        for parent_id in &node.parent_ids {
            let Some(parent) = store.get(parent_id) else {
                continue;
            };
            if !parent.expanded {
                continue;
            }
            if chain.contains(&parent.id.as_str()) {
                tracing::warn!(
                    node_id = %node.id,
                    parent_id = %parent.id,
                    "parent chain loops back on itself"
                );
                cut = true;
                continue;
            }

            let resolution = self.resolve(&parent.id, chain);
            if resolution.visible {
                visible = true;
                break;
            }
            cut |= resolution.cut;
        }

        chain.pop();

        if visible || !cut {
            self.cache.insert(node.id.as_str(), visible);
        }
        Resolution {
            visible,
            cut: cut && !visible,
        }
    }
}
