//! Common test utilities for building entity snapshots.
use profiler_graph::entity::*;
use profiler_graph::prelude::*;

#[allow(dead_code)]
pub fn workspace(id: &str, applications: &[&str]) -> Workspace {
    Workspace {
        id: id.to_string(),
        name: format!("Workspace {}", id),
        applications: applications.iter().map(|a| a.to_string()).collect(),
        dashboards: vec![],
        disabled: false,
    }
}

#[allow(dead_code)]
pub fn application(id: &str) -> Application {
    Application {
        id: id.to_string(),
        name: format!("Application {}", id),
        acronym: id.to_uppercase(),
        description: None,
        fields: vec![],
        layout: vec![],
    }
}

/// An application with one reference field per target.
#[allow(dead_code)]
pub fn application_referencing(id: &str, targets: &[&str]) -> Application {
    let fields = targets
        .iter()
        .enumerate()
        .map(|(i, target)| Field {
            id: format!("{}-field-{}", id, i),
            name: format!("Reference {}", i),
            field_type: "reference".to_string(),
            target_id: Some(target.to_string()),
        })
        .collect();
    Application {
        fields,
        ..application(id)
    }
}

#[allow(dead_code)]
pub fn dashboard(id: &str, workspaces: &[&str], items: Vec<DashboardItem>) -> Dashboard {
    Dashboard {
        id: id.to_string(),
        name: format!("Dashboard {}", id),
        workspaces: workspaces.iter().map(|w| w.to_string()).collect(),
        items,
        description: None,
    }
}

#[allow(dead_code)]
pub fn html_card(id: &str) -> DashboardItem {
    DashboardItem {
        id: id.to_string(),
        name: format!("Card {}", id),
        raw_card_type: "html".to_string(),
        report_id: None,
        apps_filter: vec![],
        src: Some("<p>hello</p>".to_string()),
    }
}

#[allow(dead_code)]
pub fn usage_card(id: &str, apps_filter: &[&str]) -> DashboardItem {
    DashboardItem {
        id: id.to_string(),
        name: format!("Stats {}", id),
        raw_card_type: "usageStatistic".to_string(),
        report_id: None,
        apps_filter: apps_filter.iter().map(|a| a.to_string()).collect(),
        src: None,
    }
}

#[allow(dead_code)]
pub fn report_card(id: &str, report_id: &str) -> DashboardItem {
    DashboardItem {
        id: id.to_string(),
        name: format!("Card {}", id),
        raw_card_type: "report".to_string(),
        report_id: Some(report_id.to_string()),
        apps_filter: vec![],
        src: None,
    }
}

#[allow(dead_code)]
pub fn report(id: &str, applications: &[&str]) -> Report {
    Report {
        id: id.to_string(),
        name: format!("Report {}", id),
        application_ids: applications.iter().map(|a| a.to_string()).collect(),
        application_id: applications.first().map(|a| a.to_string()),
    }
}

#[allow(dead_code)]
pub fn task(id: &str, owner: Option<&str>, outputs: Vec<TaskOutput>) -> Task {
    Task {
        id: id.to_string(),
        name: format!("Task {}", id),
        application_id: owner.map(str::to_string),
        action: Some(TaskAction {
            action_type: "python3".to_string(),
        }),
        input_mapping: vec![],
        outputs,
        disabled: false,
    }
}

#[allow(dead_code)]
pub fn set_field_value() -> TaskOutput {
    TaskOutput {
        output_type: OutputType::SetFieldValue,
        application_id: None,
        task_id: None,
    }
}

#[allow(dead_code)]
pub fn insert_record(application_id: &str) -> TaskOutput {
    TaskOutput {
        output_type: OutputType::InsertUpdateRecord,
        application_id: Some(application_id.to_string()),
        task_id: None,
    }
}

#[allow(dead_code)]
pub fn invoke_task(task_id: &str) -> TaskOutput {
    TaskOutput {
        output_type: OutputType::ReferentialTask,
        application_id: None,
        task_id: Some(task_id.to_string()),
    }
}

#[allow(dead_code)]
pub fn send_email() -> TaskOutput {
    TaskOutput {
        output_type: OutputType::Email,
        application_id: None,
        task_id: None,
    }
}

#[allow(dead_code)]
pub fn save_to_file() -> TaskOutput {
    TaskOutput {
        output_type: OutputType::SaveToFile,
        application_id: None,
        task_id: None,
    }
}

/// A workflow with one stage whose integration actions run the given tasks.
#[allow(dead_code)]
pub fn workflow(id: &str, application_id: &str, task_ids: &[&str]) -> Workflow {
    let actions = task_ids
        .iter()
        .enumerate()
        .map(|(i, task_id)| WorkflowAction {
            id: format!("{}-action-{}", id, i),
            name: format!("Run {}", task_id),
            action_type: Some("integration".to_string()),
            task_id: Some(task_id.to_string()),
        })
        .collect();
    Workflow {
        id: id.to_string(),
        application_id: application_id.to_string(),
        stages: vec![WorkflowStage {
            id: format!("{}-stage", id),
            name: "Start".to_string(),
            actions,
            stages: vec![],
        }],
    }
}

/// Builds a store with the default configuration.
#[allow(dead_code)]
pub fn build(snapshot: &EntitySnapshot) -> NodeStore {
    NodeGraphBuilder::new(snapshot).build()
}

#[allow(dead_code)]
pub fn parents<'s>(store: &'s NodeStore, id: &str) -> Vec<&'s str> {
    store
        .get(id)
        .map(|node| node.parent_ids.iter().map(String::as_str).collect())
        .unwrap_or_default()
}

/// Node ids of an assembled graph, sorted.
#[allow(dead_code)]
pub fn node_ids(graph: &AssembledGraph) -> Vec<String> {
    let mut ids: Vec<String> = graph.nodes.iter().map(|n| n.id.clone()).collect();
    ids.sort();
    ids
}

/// `(source, target)` pairs of an assembled graph, sorted.
#[allow(dead_code)]
pub fn edge_set(graph: &AssembledGraph) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = graph
        .edges
        .iter()
        .map(|e| (e.source.clone(), e.target.clone()))
        .collect();
    pairs.sort();
    pairs
}

/// A small but complete bundle touching every node kind.
#[allow(dead_code)]
pub fn sample_snapshot() -> EntitySnapshot {
    EntitySnapshot {
        workspaces: vec![workspace("ws-1", &["app-1", "app-2"])],
        applications: vec![application("app-1"), application_referencing("app-2", &["app-1"])],
        dashboards: vec![
            dashboard(
                "dash-1",
                &["ws-1"],
                vec![
                    html_card("html-1"),
                    html_card("html-2"),
                    usage_card("stats-1", &["app-1"]),
                    report_card("rc-1", "rep-1"),
                ],
            ),
            dashboard("dash-2", &["ws-1"], vec![report_card("rc-2", "rep-1")]),
        ],
        reports: vec![report("rep-1", &["app-1"]), report("rep-2", &["app-2"])],
        tasks: vec![
            task("task-1", Some("app-1"), vec![set_field_value()]),
            task("task-2", Some("app-1"), vec![insert_record("app-1")]),
            task("task-3", Some("app-2"), vec![insert_record("app-1"), send_email()]),
            task("task-4", None, vec![save_to_file()]),
        ],
        workflows: vec![workflow("wf-1", "app-2", &["task-3"])],
        flattened_layouts: Default::default(),
    }
}

/// The same kind of bundle as exported to disk.
#[allow(dead_code)]
pub const SAMPLE_SNAPSHOT_JSON: &str = r#"{
    "workspaces": [
        { "id": "ws-1", "name": "Operations", "applications": ["app-1", "app-2"] }
    ],
    "applications": [
        {
            "id": "app-1",
            "name": "Incidents",
            "acronym": "INC",
            "layout": [
                {
                    "id": "section-1",
                    "layoutType": "section",
                    "children": [
                        { "id": "widget-1", "name": "Chart", "layoutType": "Widget" },
                        { "id": "html-obj-1", "layoutType": "htmlobject" }
                    ],
                    "tabs": [
                        { "id": "int-btn-1", "layoutType": "integration" },
                        { "id": "widget-1", "name": "Chart", "layoutType": "widget" }
                    ]
                }
            ]
        },
        {
            "id": "app-2",
            "name": "Assets",
            "fields": [
                { "id": "f-1", "name": "Incident", "fieldType": "reference", "targetId": "app-1" },
                { "id": "f-2", "name": "Vendor", "fieldType": "reference", "targetId": "app-missing" }
            ]
        }
    ],
    "dashboards": [
        {
            "id": "dash-1",
            "name": "Overview",
            "workspaces": ["ws-1"],
            "items": [
                { "id": "rc-1", "name": "Open", "cardType": "Report", "reportId": "rep-1" },
                { "id": "html-1", "name": "Banner", "cardType": "html" },
                { "id": "stats-1", "name": "Usage", "cardType": "usageStatistic", "appsFilter": ["app-1"] }
            ]
        }
    ],
    "reports": [
        { "id": "rep-1", "name": "Open Incidents", "applicationIds": ["app-1"], "applicationId": "app-1" }
    ],
    "tasks": [
        {
            "id": "task-1",
            "name": "Enrich",
            "applicationId": "app-1",
            "action": { "type": "python3" },
            "inputMapping": [
                { "type": "credentials", "key": "vault-1" },
                { "type": "Credentials", "key": "vault-1" },
                { "type": "credentials", "key": "vault-2" },
                { "type": "string", "key": "not-a-key" }
            ],
            "outputs": [{ "type": "setFieldValue" }]
        },
        {
            "id": "task-2",
            "name": "Notify",
            "applicationId": "",
            "action": { "type": "api" },
            "outputs": [{ "type": "email" }, { "type": "webhook" }]
        }
    ],
    "workflows": [
        {
            "id": "wf-1",
            "applicationId": "app-1",
            "stages": [
                {
                    "id": "stage-1",
                    "actions": [{ "id": "a-1", "actionType": "Integration", "taskId": "task-1" }],
                    "stages": [
                        {
                            "id": "stage-2",
                            "actions": [
                                { "id": "a-1", "actionType": "Integration", "taskId": "task-1" },
                                { "id": "a-2", "actionType": "email" }
                            ]
                        }
                    ]
                }
            ]
        }
    ]
}"#;
