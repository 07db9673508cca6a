//! Synthetic aggregation nodes.
//!
//! A parent with more children of one kind than the grouping threshold gets
//! a collapsed summary node in between. Report groups are the exception:
//! they are created for a single report too.

use crate::entity::Report;
use crate::graph::{Dimension, GroupParent, Node, NodeKind, NodePayload};

/// The two families of dashboard cards that are grouped under a dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardFamily {
    Html,
    UsageStatistic,
}

impl CardFamily {
    pub fn leaf_kind(self) -> NodeKind {
        match self {
            CardFamily::Html => NodeKind::HtmlCard,
            CardFamily::UsageStatistic => NodeKind::UsageStatisticCard,
        }
    }

    fn group_label(self, count: usize) -> String {
        match self {
            CardFamily::Html => format!("{} HTML", count),
            CardFamily::UsageStatistic => format!("{} STATISTICS", count),
        }
    }
}

pub fn dashboard_group_id(workspace_id: &str) -> String {
    format!("{}-dashboard-g", workspace_id)
}

pub fn card_group_id(dashboard_id: &str, family: CardFamily) -> String {
    format!("{}-dashboard-{}g", dashboard_id, family.leaf_kind().tag())
}

/// Id of the leaf node created for a dashboard card.
pub fn card_node_id(item_id: &str, family: CardFamily) -> String {
    format!("{}-{}", item_id, family.leaf_kind().tag())
}

pub fn report_group_id(parent: &GroupParent) -> String {
    match parent {
        GroupParent::Application(id) => format!("{}-application-rg", id),
        GroupParent::Dashboard(id) => format!("{}-dashboard-rg", id),
    }
}

pub fn integration_group_id(application_id: &str) -> String {
    format!("{}-task-g", application_id)
}

/// Creates group nodes and decides when a group is warranted.
#[derive(Debug, Clone, Copy)]
pub struct GroupSynthesizer {
    threshold: usize,
}

impl Default for GroupSynthesizer {
    fn default() -> Self {
        Self { threshold: 1 }
    }
}

impl GroupSynthesizer {
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    pub fn needs_group(&self, count: usize) -> bool {
        count > self.threshold
    }

    pub fn dashboard_group(&self, workspace_id: &str, count: usize) -> Node {
        Node::new(
            dashboard_group_id(workspace_id),
            format!("{} Dashboards", count),
            NodePayload::DashboardGroup {
                workspace_id: workspace_id.to_string(),
                count,
            },
        )
        .with_dimension(Dimension::Compact)
        .with_parents([workspace_id])
        .expanded(false)
        .collapsible(true)
    }

    pub fn card_group(&self, dashboard_id: &str, family: CardFamily, count: usize) -> Node {
        let payload = match family {
            CardFamily::Html => NodePayload::HtmlCardGroup {
                dashboard_id: dashboard_id.to_string(),
                count,
            },
            CardFamily::UsageStatistic => NodePayload::UsageStatisticCardGroup {
                dashboard_id: dashboard_id.to_string(),
                count,
            },
        };

        Node::new(
            card_group_id(dashboard_id, family),
            family.group_label(count),
            payload,
        )
        .with_dimension(Dimension::Compact)
        .with_parents([dashboard_id])
        .expanded(false)
        .collapsible(true)
    }

    /// Report groups under an application are always open and offer the
    /// application's detail view; groups under a dashboard start collapsed.
    /// `count` is the number of report references, `reports` the ones found.
    pub fn report_group(&self, parent: GroupParent, reports: Vec<Report>, count: usize) -> Node {
        let under_application = matches!(parent, GroupParent::Application(_));
        let parent_id = parent.id().to_string();

        Node::new(
            report_group_id(&parent),
            format!("{} Reports", count),
            NodePayload::ReportGroup {
                parent,
                reports,
                count,
            },
        )
        .with_dimension(Dimension::Compact)
        .with_parents([parent_id])
        .expanded(under_application)
        .collapsible(!under_application)
        .viewable(under_application)
    }

    pub fn integration_group(&self, application_id: &str, count: usize) -> Node {
        Node::new(
            integration_group_id(application_id),
            format!("{} Tasks", count),
            NodePayload::IntegrationGroup {
                application_id: application_id.to_string(),
                count,
            },
        )
        .with_dimension(Dimension::Compact)
        .with_parents([application_id])
        .expanded(false)
        .collapsible(true)
    }
}
