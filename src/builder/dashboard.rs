use super::BuildContext;
use crate::entity::{CardType, Dashboard, DashboardItem, Report};
use crate::graph::{GroupParent, Node, NodeKind, NodePayload};
use crate::group::{CardFamily, card_node_id, dashboard_group_id, report_group_id};
use ahash::{AHashMap, AHashSet};
use itertools::Itertools;

impl BuildContext<'_> {
    pub(super) fn add_dashboards(&mut self) {
        let snapshot = self.snapshot;

        // Count dashboards per loaded workspace, keeping first-seen order.
        let mut workspace_order: Vec<&str> = Vec::new();
        let mut counts: AHashMap<&str, usize> = AHashMap::new();
        for workspace_id in snapshot
            .dashboards
            .iter()
            .flat_map(|d| d.workspaces.iter().map(String::as_str).unique())
        {
            if !self.workspace_ids.contains(workspace_id) {
                continue;
            }
            let count = counts.entry(workspace_id).or_insert(0);
            if *count == 0 {
                workspace_order.push(workspace_id);
            }
            *count += 1;
        }

        let mut grouped: AHashSet<&str> = AHashSet::new();
        for workspace_id in workspace_order {
            let count = counts.get(workspace_id).copied().unwrap_or(0);
            if self.groups.needs_group(count) {
                self.store
                    .insert(self.groups.dashboard_group(workspace_id, count));
                grouped.insert(workspace_id);
            }
        }

        for dashboard in &snapshot.dashboards {
            let mut parents: Vec<String> = Vec::new();
            for workspace_id in &dashboard.workspaces {
                if grouped.contains(workspace_id.as_str()) {
                    parents.push(dashboard_group_id(workspace_id));
                } else if self.workspace_ids.contains(workspace_id.as_str()) {
                    parents.push(workspace_id.clone());
                } else {
                    tracing::debug!(
                        dashboard_id = %dashboard.id,
                        workspace_id = %workspace_id,
                        "dropping dashboard placement in a workspace that is not loaded"
                    );
                }
            }
            if parents.is_empty() {
                parents.push(self.root_id.clone());
            }

            let node = Node::new(
                dashboard.id.clone(),
                dashboard.name.clone(),
                NodePayload::Dashboard {
                    dashboard: dashboard.clone(),
                    reports_count: dashboard.count_of(CardType::Report),
                    htmls_count: dashboard.count_of(CardType::Html),
                    usage_statistic_count: dashboard.count_of(CardType::UsageStatistic),
                },
            )
            .with_parents(parents)
            .expanded(false)
            .collapsible(!dashboard.items.is_empty());
            self.store.insert(node);

            self.add_cards(dashboard, CardFamily::Html);
            self.add_cards(dashboard, CardFamily::UsageStatistic);
        }
    }

    /// Adds one family of cards under a dashboard, behind a group node when
    /// there are enough of them.
    fn add_cards(&mut self, dashboard: &Dashboard, family: CardFamily) {
        let card_type = match family {
            CardFamily::Html => CardType::Html,
            CardFamily::UsageStatistic => CardType::UsageStatistic,
        };
        let items = dashboard.items_of(card_type);
        if items.is_empty() {
            return;
        }

        let parent_id = if self.groups.needs_group(items.len()) {
            let group = self.groups.card_group(&dashboard.id, family, items.len());
            let group_id = group.id.clone();
            self.store.insert(group);
            group_id
        } else {
            dashboard.id.clone()
        };

        for item in items {
            self.add_card(item, family, &parent_id);
        }
    }

    fn add_card(&mut self, item: &DashboardItem, family: CardFamily, parent_id: &str) {
        let filters_applications =
            family == CardFamily::UsageStatistic && !item.apps_filter.is_empty();
        let payload = match family {
            CardFamily::Html => NodePayload::HtmlCard(item.clone()),
            CardFamily::UsageStatistic => NodePayload::UsageStatisticCard(item.clone()),
        };

        let node = Node::new(card_node_id(&item.id, family), item.name.clone(), payload)
            .with_parents([parent_id])
            .collapsible(filters_applications)
            .viewable(true);
        let card_id = node.id.clone();
        self.store.insert(node);

        if !filters_applications {
            return;
        }

        // Filtered applications hang under the statistics card as well.
        for application_id in &item.apps_filter {
            match self.store.get_mut(application_id) {
                Some(application) if application.kind() == NodeKind::Application => {
                    application.add_parent(card_id.as_str());
                }
                _ => tracing::debug!(
                    card_id = %card_id,
                    application_id = %application_id,
                    "dropping statistics filter on an application that is not loaded"
                ),
            }
        }
    }

    pub(super) fn add_reports(&mut self) {
        let snapshot = self.snapshot;

        for application in &snapshot.applications {
            let reports: Vec<Report> = snapshot
                .reports_for(&application.id)
                .into_iter()
                .cloned()
                .collect();
            if reports.is_empty() {
                continue;
            }
            let count = reports.len();
            let group = self.groups.report_group(
                GroupParent::Application(application.id.clone()),
                reports,
                count,
            );
            self.store.insert(group);
        }

        for dashboard in &snapshot.dashboards {
            let cards = dashboard.items_of(CardType::Report);
            if cards.is_empty() {
                continue;
            }
            self.add_dashboard_reports(dashboard, &cards);
        }
    }

    /// Adds the report group of a dashboard and a leaf per referenced report.
    /// A report that already has a leaf gains the group as an extra parent.
    fn add_dashboard_reports(&mut self, dashboard: &Dashboard, cards: &[&DashboardItem]) {
        let snapshot = self.snapshot;
        let parent = GroupParent::Dashboard(dashboard.id.clone());
        let group_id = report_group_id(&parent);

        let resolved: Vec<(&DashboardItem, &Report)> = cards
            .iter()
            .filter_map(|card| {
                let report = card
                    .report_id
                    .as_deref()
                    .and_then(|report_id| snapshot.report(report_id));
                if report.is_none() {
                    tracing::debug!(
                        dashboard_id = %dashboard.id,
                        card_id = %card.id,
                        "dropping report card whose report is not loaded"
                    );
                }
                report.map(|report| (*card, report))
            })
            .collect();

        let reports: Vec<Report> = resolved
            .iter()
            .map(|(_, report)| *report)
            .unique_by(|report| report.id.as_str())
            .cloned()
            .collect();
        self.store
            .insert(self.groups.report_group(parent, reports, cards.len()));

        for (card, report) in resolved {
            match self.store.get_mut(&report.id) {
                Some(existing) if existing.kind() == NodeKind::Report => {
                    existing.add_parent(group_id.as_str());
                }
                Some(existing) => tracing::warn!(
                    report_id = %report.id,
                    kind = ?existing.kind(),
                    "report id collides with another node, skipping report leaf"
                ),
                None => {
                    let node = Node::new(
                        report.id.clone(),
                        format!("{} - {}", card.name, report.name),
                        NodePayload::Report {
                            card_name: card.name.clone(),
                            report: report.clone(),
                        },
                    )
                    .with_parents([group_id.as_str()])
                    .viewable(true);
                    self.store.insert(node);
                }
            }
        }
    }
}
