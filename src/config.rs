use crate::error::LoadError;
use serde::{Deserialize, Serialize};
use std::fs;

/// Nesting cap used when no configuration is given.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Tunables for graph construction and visibility resolution.
///
/// Every field has a default, so a configuration file only needs to name
/// what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GraphConfig {
    /// Id given to a freshly synthesized root node.
    pub root_id: String,
    pub root_label: String,
    /// Children of one kind are folded into a group node once their count
    /// exceeds this value. Report groups ignore it.
    pub group_threshold: usize,
    /// Nesting cap for layout/stage flattening and for the visibility walk.
    pub max_depth: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            root_id: "root".to_string(),
            root_label: "Root".to_string(),
            group_threshold: 1,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl GraphConfig {
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        serde_json::from_str(json).map_err(|e| LoadError::Parse(e.to_string()))
    }

    pub fn from_file(path: &str) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&content)
    }
}
