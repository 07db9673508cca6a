use super::flatten::flatten_layouts;
use super::model::*;
use crate::error::LoadError;
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fs;

/// A complete, read-only set of entities extracted from one bundle.
///
/// The graph builder only ever reads a snapshot; any fetching or extraction
/// has to finish before one is handed over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitySnapshot {
    #[serde(default)]
    pub workspaces: Vec<Workspace>,
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(default)]
    pub dashboards: Vec<Dashboard>,
    #[serde(default)]
    pub reports: Vec<Report>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub workflows: Vec<Workflow>,
    /// Surfaced layout entries per application id.
    #[serde(default)]
    pub flattened_layouts: AHashMap<String, Vec<LayoutItem>>,
}

/// A labelled entity count, as shown in a bundle overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityTotal {
    pub label: &'static str,
    pub count: usize,
}

/// A trait for custom bundle formats that can be converted into an `EntitySnapshot`.
///
/// Implement it on the structs your extraction step produces to hand them to
/// the graph builder without going through JSON.
///
/// # Example
///
/// ```rust,no_run
/// use profiler_graph::entity::{Application, EntitySnapshot, IntoSnapshot};
/// use profiler_graph::error::LoadError;
///
/// struct MyExport { apps: Vec<(String, String)> }
///
/// impl IntoSnapshot for MyExport {
///     fn into_snapshot(self) -> Result<EntitySnapshot, LoadError> {
///         let applications = self
///             .apps
///             .into_iter()
///             .map(|(id, name)| Application {
///                 id,
///                 name,
///                 acronym: String::new(),
///                 description: None,
///                 fields: vec![],
///                 layout: vec![],
///             })
///             .collect();
///         Ok(EntitySnapshot { applications, ..Default::default() })
///     }
/// }
/// ```
pub trait IntoSnapshot {
    fn into_snapshot(self) -> Result<EntitySnapshot, LoadError>;
}

impl IntoSnapshot for EntitySnapshot {
    fn into_snapshot(self) -> Result<EntitySnapshot, LoadError> {
        Ok(self)
    }
}

impl EntitySnapshot {
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        serde_json::from_str(json).map_err(|e| LoadError::Parse(e.to_string()))
    }

    /// Load a snapshot from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, LoadError> {
        let content = fs::read_to_string(path).map_err(|e| LoadError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&content)
    }

    /// Fills `flattened_layouts` for every application that has no entry yet.
    pub fn with_flattened_layouts(mut self, max_depth: usize) -> Self {
        for application in &self.applications {
            self.flattened_layouts
                .entry(application.id.clone())
                .or_insert_with(|| flatten_layouts(&application.layout, max_depth));
        }
        self
    }

    pub fn workspace(&self, id: &str) -> Option<&Workspace> {
        self.workspaces.iter().find(|w| w.id == id)
    }

    pub fn application(&self, id: &str) -> Option<&Application> {
        self.applications.iter().find(|a| a.id == id)
    }

    pub fn dashboard(&self, id: &str) -> Option<&Dashboard> {
        self.dashboards.iter().find(|d| d.id == id)
    }

    pub fn report(&self, id: &str) -> Option<&Report> {
        self.reports.iter().find(|r| r.id == id)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Finds a dashboard card by its id across all dashboards.
    pub fn dashboard_item(&self, id: &str) -> Option<&DashboardItem> {
        self.dashboards
            .iter()
            .flat_map(|d| d.items.iter())
            .find(|item| item.id == id)
    }

    pub fn reports_for(&self, application_id: &str) -> Vec<&Report> {
        self.reports
            .iter()
            .filter(|r| r.belongs_to(application_id))
            .collect()
    }

    /// Distinct keys of credential-type input mappings across all tasks.
    pub fn credential_keys(&self) -> Vec<&str> {
        self.tasks
            .iter()
            .flat_map(|task| task.input_mapping.iter())
            .filter(|mapping| {
                mapping
                    .mapping_type
                    .as_deref()
                    .is_some_and(|t| t.eq_ignore_ascii_case("credentials"))
            })
            .map(|mapping| mapping.key.as_str())
            .unique()
            .collect()
    }

    pub fn totals(&self) -> Vec<EntityTotal> {
        vec![
            EntityTotal {
                label: "Applications",
                count: self.applications.len(),
            },
            EntityTotal {
                label: "Dashboards",
                count: self.dashboards.len(),
            },
            EntityTotal {
                label: "Reports",
                count: self.reports.len(),
            },
            EntityTotal {
                label: "Integrations",
                count: self.tasks.len(),
            },
            EntityTotal {
                label: "Workspaces",
                count: self.workspaces.len(),
            },
            EntityTotal {
                label: "Key Stores",
                count: self.credential_keys().len(),
            },
        ]
    }

    /// Narrows the snapshot down to the entities surrounding one application:
    /// the workspaces hosting it, the application and the applications it
    /// references, dashboards whose statistics cards filter by it, its
    /// reports, tasks and workflows.
    pub fn scoped_to_application(&self, application_id: &str) -> EntitySnapshot {
        let mut application_ids: AHashSet<&str> = AHashSet::new();
        application_ids.insert(application_id);
        if let Some(application) = self.application(application_id) {
            application_ids.extend(application.referenced_application_ids());
        }

        let workspaces = self
            .workspaces
            .iter()
            .filter(|w| w.hosts(application_id))
            .cloned()
            .collect();

        let applications = self
            .applications
            .iter()
            .filter(|a| application_ids.contains(a.id.as_str()))
            .cloned()
            .collect();

        let dashboards = self
            .dashboards
            .iter()
            .filter(|d| {
                d.items.iter().any(|item| {
                    item.card_type() == CardType::UsageStatistic
                        && item.apps_filter.iter().any(|id| id == application_id)
                })
            })
            .cloned()
            .collect();

        let reports = self
            .reports
            .iter()
            .filter(|r| {
                r.application_id.as_deref() == Some(application_id) || r.belongs_to(application_id)
            })
            .cloned()
            .collect();

        let tasks = self
            .tasks
            .iter()
            .filter(|t| t.owner() == Some(application_id))
            .cloned()
            .collect();

        let workflows = self
            .workflows
            .iter()
            .filter(|w| w.application_id == application_id)
            .cloned()
            .collect();

        let flattened_layouts = self
            .flattened_layouts
            .iter()
            .filter(|(id, _)| application_ids.contains(id.as_str()))
            .map(|(id, entries)| (id.clone(), entries.clone()))
            .collect();

        EntitySnapshot {
            workspaces,
            applications,
            dashboards,
            reports,
            tasks,
            workflows,
            flattened_layouts,
        }
    }
}
