//! Maps a clicked node to the detail view that describes it.

use crate::entity::{Application, DashboardItem, EntitySnapshot, Report, Task, Workspace};
use crate::error::DetailError;
use crate::graph::{GroupParent, NodeKind, NodePayload, NodeStore};
use serde::Serialize;

/// The detail views a node can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DetailView {
    Application,
    Workspace,
    Report,
    Task,
    LayoutCard,
}

const DETAIL_VIEWS: &[(NodeKind, DetailView)] = &[
    (NodeKind::Application, DetailView::Application),
    (NodeKind::Workspace, DetailView::Workspace),
    (NodeKind::ReportGroup, DetailView::Application),
    (NodeKind::Report, DetailView::Report),
    (NodeKind::Integration, DetailView::Task),
    (NodeKind::HtmlCard, DetailView::LayoutCard),
    (NodeKind::UsageStatisticCard, DetailView::LayoutCard),
];

impl DetailView {
    pub fn for_kind(kind: NodeKind) -> Option<DetailView> {
        DETAIL_VIEWS
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, view)| *view)
    }
}

/// What the host should open for a node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailRequest {
    pub view: DetailView,
    /// Id of the entity the view is about, which is not always the node id.
    pub entity_id: String,
    pub node_id: String,
    pub kind: NodeKind,
    pub payload: NodePayload,
}

/// The entity behind a detail request, borrowed from the snapshot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DetailEntity<'s> {
    Application(&'s Application),
    Workspace(&'s Workspace),
    Report(&'s Report),
    Task(&'s Task),
    LayoutCard(&'s DashboardItem),
}

/// Resolves the detail view of a node.
///
/// Report groups open their application; a report group under a dashboard
/// has no application and therefore no view.
pub fn show_detail(store: &NodeStore, node_id: &str) -> Result<DetailRequest, DetailError> {
    let node = store
        .get(node_id)
        .ok_or_else(|| DetailError::NodeNotFound(node_id.to_string()))?;
    let kind = node.kind();
    let no_view = || DetailError::NoDetailView {
        node_id: node_id.to_string(),
        kind,
    };
    let view = DetailView::for_kind(kind).ok_or_else(no_view)?;

    let entity_id = match &node.payload {
        NodePayload::ReportGroup { parent, .. } => match parent {
            GroupParent::Application(application_id) => application_id.clone(),
            GroupParent::Dashboard(_) => return Err(no_view()),
        },
        NodePayload::Integration { task, .. } => task.id.clone(),
        NodePayload::Report { report, .. } => report.id.clone(),
        NodePayload::HtmlCard(item) | NodePayload::UsageStatisticCard(item) => item.id.clone(),
        _ => node.id.clone(),
    };

    tracing::debug!(node_id, ?view, entity_id = %entity_id, "detail requested");
    Ok(DetailRequest {
        view,
        entity_id,
        node_id: node.id.clone(),
        kind,
        payload: node.payload.clone(),
    })
}

impl DetailRequest {
    /// Looks the requested entity up in a snapshot.
    pub fn resolve<'s>(
        &self,
        snapshot: &'s EntitySnapshot,
    ) -> Result<DetailEntity<'s>, DetailError> {
        let id = self.entity_id.as_str();
        let entity = match self.view {
            DetailView::Application => snapshot.application(id).map(DetailEntity::Application),
            DetailView::Workspace => snapshot.workspace(id).map(DetailEntity::Workspace),
            DetailView::Report => snapshot.report(id).map(DetailEntity::Report),
            DetailView::Task => snapshot.task(id).map(DetailEntity::Task),
            DetailView::LayoutCard => snapshot.dashboard_item(id).map(DetailEntity::LayoutCard),
        };

        entity.ok_or_else(|| DetailError::EntityNotFound {
            view: self.view,
            entity_id: self.entity_id.clone(),
        })
    }
}
