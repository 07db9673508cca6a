use crate::entity::{Application, Dashboard, DashboardItem, Report, Task, Workspace};
use serde::Serialize;

/// The closed set of node kinds the graph can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Root,
    Common,
    Workspace,
    Application,
    Dashboard,
    DashboardGroup,
    Report,
    ReportGroup,
    Integration,
    IntegrationGroup,
    Workflow,
    HtmlCard,
    HtmlCardGroup,
    UsageStatisticCard,
    UsageStatisticCardGroup,
    SendEmail,
    SaveToFile,
}

impl NodeKind {
    /// The tag used when composing synthetic ids, e.g. `<item>-htmlCard`.
    pub fn tag(self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Common => "common",
            NodeKind::Workspace => "workspace",
            NodeKind::Application => "application",
            NodeKind::Dashboard => "dashboard",
            NodeKind::DashboardGroup => "dashboardGroup",
            NodeKind::Report => "report",
            NodeKind::ReportGroup => "reportGroup",
            NodeKind::Integration => "integration",
            NodeKind::IntegrationGroup => "integrationGroup",
            NodeKind::Workflow => "workflow",
            NodeKind::HtmlCard => "htmlCard",
            NodeKind::HtmlCardGroup => "htmlCardGroup",
            NodeKind::UsageStatisticCard => "usageStatisticCard",
            NodeKind::UsageStatisticCardGroup => "usageStatisticCardGroup",
            NodeKind::SendEmail => "sendEmail",
            NodeKind::SaveToFile => "saveToFile",
        }
    }

    pub fn is_group(self) -> bool {
        matches!(
            self,
            NodeKind::DashboardGroup
                | NodeKind::ReportGroup
                | NodeKind::IntegrationGroup
                | NodeKind::HtmlCardGroup
                | NodeKind::UsageStatisticCardGroup
        )
    }
}

/// Size preset handed to the layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    /// Entity leaves.
    Node,
    /// Group and summary nodes.
    Compact,
    /// Action markers hanging off a task.
    Micro,
}

impl Dimension {
    pub fn width(self) -> u32 {
        match self {
            Dimension::Node => 150,
            Dimension::Compact => 100,
            Dimension::Micro => 25,
        }
    }

    pub fn height(self) -> u32 {
        match self {
            Dimension::Node => 80,
            Dimension::Compact | Dimension::Micro => 25,
        }
    }
}

/// How an integration reaches one of its output targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConnectionKind {
    Application,
    Task,
    Action,
}

/// One output of an integration, resolved to the node id it writes to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: String,
    pub kind: ConnectionKind,
}

/// The entity a report group summarizes reports for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "id", rename_all = "camelCase")]
pub enum GroupParent {
    Application(String),
    Dashboard(String),
}

impl GroupParent {
    pub fn id(&self) -> &str {
        match self {
            GroupParent::Application(id) | GroupParent::Dashboard(id) => id,
        }
    }
}

/// Flags derived from an integration's action type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntegrationAttributes {
    pub is_script_based: bool,
    pub is_packaged: bool,
    pub is_api: bool,
}

impl IntegrationAttributes {
    pub fn from_task(task: &Task) -> Self {
        let action_type = task.action_type().unwrap_or_default();
        Self {
            is_script_based: action_type.starts_with("python") || action_type == "powershell",
            is_packaged: action_type == "packaged",
            is_api: action_type == "api",
        }
    }
}

/// Kind-specific data carried by a node. The variant determines the node's kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(
    tag = "kind",
    content = "data",
    rename_all = "camelCase",
    rename_all_fields = "camelCase"
)]
pub enum NodePayload {
    Root,
    Common,
    Workspace(Workspace),
    Application {
        application: Application,
        flattened_layout_count: usize,
        report_count: usize,
    },
    Dashboard {
        dashboard: Dashboard,
        reports_count: usize,
        htmls_count: usize,
        usage_statistic_count: usize,
    },
    DashboardGroup {
        workspace_id: String,
        count: usize,
    },
    Report {
        card_name: String,
        report: Report,
    },
    ReportGroup {
        parent: GroupParent,
        reports: Vec<Report>,
        count: usize,
    },
    Integration {
        task: Task,
        attributes: IntegrationAttributes,
        connections: Vec<Connection>,
    },
    IntegrationGroup {
        application_id: String,
        count: usize,
    },
    Workflow {
        workflow_id: String,
        application_id: String,
    },
    HtmlCard(DashboardItem),
    HtmlCardGroup {
        dashboard_id: String,
        count: usize,
    },
    UsageStatisticCard(DashboardItem),
    UsageStatisticCardGroup {
        dashboard_id: String,
        count: usize,
    },
    SendEmail {
        task_id: String,
    },
    SaveToFile {
        task_id: String,
    },
}

impl NodePayload {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodePayload::Root => NodeKind::Root,
            NodePayload::Common => NodeKind::Common,
            NodePayload::Workspace(_) => NodeKind::Workspace,
            NodePayload::Application { .. } => NodeKind::Application,
            NodePayload::Dashboard { .. } => NodeKind::Dashboard,
            NodePayload::DashboardGroup { .. } => NodeKind::DashboardGroup,
            NodePayload::Report { .. } => NodeKind::Report,
            NodePayload::ReportGroup { .. } => NodeKind::ReportGroup,
            NodePayload::Integration { .. } => NodeKind::Integration,
            NodePayload::IntegrationGroup { .. } => NodeKind::IntegrationGroup,
            NodePayload::Workflow { .. } => NodeKind::Workflow,
            NodePayload::HtmlCard(_) => NodeKind::HtmlCard,
            NodePayload::HtmlCardGroup { .. } => NodeKind::HtmlCardGroup,
            NodePayload::UsageStatisticCard(_) => NodeKind::UsageStatisticCard,
            NodePayload::UsageStatisticCardGroup { .. } => NodeKind::UsageStatisticCardGroup,
            NodePayload::SendEmail { .. } => NodeKind::SendEmail,
            NodePayload::SaveToFile { .. } => NodeKind::SaveToFile,
        }
    }
}

/// A vertex of the entity graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub label: String,
    pub dimension: Dimension,
    pub payload: NodePayload,
    /// Ids this node hangs under. Edges are derived from this list only.
    pub parent_ids: Vec<String>,
    pub expanded: bool,
    pub collapsible: bool,
    pub viewable: bool,
}

impl Node {
    /// Creates an expanded, non-collapsible, non-viewable node without parents.
    pub fn new(id: impl Into<String>, label: impl Into<String>, payload: NodePayload) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            dimension: Dimension::Node,
            payload,
            parent_ids: Vec::new(),
            expanded: true,
            collapsible: false,
            viewable: false,
        }
    }

    pub fn with_dimension(mut self, dimension: Dimension) -> Self {
        self.dimension = dimension;
        self
    }

    pub fn with_parents<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for parent in parents {
            self.add_parent(parent);
        }
        self
    }

    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    pub fn collapsible(mut self, collapsible: bool) -> Self {
        self.collapsible = collapsible;
        self
    }

    pub fn viewable(mut self, viewable: bool) -> Self {
        self.viewable = viewable;
        self
    }

    pub fn kind(&self) -> NodeKind {
        self.payload.kind()
    }

    /// Appends a parent unless it is already listed. Returns whether it was added.
    ///
    /// A node's own id is refused; self-parenting is a data error.
    pub fn add_parent(&mut self, parent: impl Into<String>) -> bool {
        let parent = parent.into();
        if parent == self.id {
            tracing::error!(node_id = %self.id, "refusing to make a node its own parent");
            return false;
        }
        if self.parent_ids.contains(&parent) {
            return false;
        }
        self.parent_ids.push(parent);
        true
    }

    pub fn has_parent(&self, parent: &str) -> bool {
        self.parent_ids.iter().any(|id| id == parent)
    }

    /// Output connections recorded on integration nodes; empty for every other kind.
    pub fn connections(&self) -> &[Connection] {
        match &self.payload {
            NodePayload::Integration { connections, .. } => connections,
            _ => &[],
        }
    }
}
