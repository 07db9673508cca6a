use serde::{Deserialize, Serialize};

/// A workspace groups applications and dashboards for a set of users.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub applications: Vec<String>,
    #[serde(default)]
    pub dashboards: Vec<String>,
    #[serde(default)]
    pub disabled: bool,
}

impl Workspace {
    pub fn hosts(&self, application_id: &str) -> bool {
        self.applications.iter().any(|id| id == application_id)
    }
}

/// An application record with its field definitions and layout tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub acronym: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub layout: Vec<LayoutItem>,
}

impl Application {
    /// Ids of the applications this one points at through reference fields,
    /// in field order, without self-references.
    pub fn referenced_application_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields
            .iter()
            .filter(|field| field.is_reference())
            .filter_map(|field| field.target_id.as_deref())
            .filter(move |target| *target != self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub field_type: String,
    #[serde(default)]
    pub target_id: Option<String>,
}

impl Field {
    pub fn is_reference(&self) -> bool {
        self.field_type.eq_ignore_ascii_case("reference")
    }
}

/// One entry of an application's layout tree. Sections nest further entries
/// under `children`, tab containers under `tabs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutItem {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub layout_type: Option<String>,
    #[serde(default)]
    pub children: Vec<LayoutItem>,
    #[serde(default)]
    pub tabs: Vec<LayoutItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub workspaces: Vec<String>,
    #[serde(default)]
    pub items: Vec<DashboardItem>,
    #[serde(default)]
    pub description: Option<String>,
}

impl Dashboard {
    pub fn items_of(&self, card_type: CardType) -> Vec<&DashboardItem> {
        self.items
            .iter()
            .filter(|item| item.card_type() == card_type)
            .collect()
    }

    pub fn count_of(&self, card_type: CardType) -> usize {
        self.items
            .iter()
            .filter(|item| item.card_type() == card_type)
            .count()
    }
}

/// The kind of card placed on a dashboard, matched case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardType {
    Report,
    Html,
    UsageStatistic,
    Other,
}

impl CardType {
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "report" => CardType::Report,
            "html" => CardType::Html,
            "usagestatistic" => CardType::UsageStatistic,
            _ => CardType::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardItem {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "cardType")]
    pub raw_card_type: String,
    #[serde(default)]
    pub report_id: Option<String>,
    #[serde(default)]
    pub apps_filter: Vec<String>,
    #[serde(default)]
    pub src: Option<String>,
}

impl DashboardItem {
    pub fn card_type(&self) -> CardType {
        CardType::parse(&self.raw_card_type)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub application_ids: Vec<String>,
    #[serde(default)]
    pub application_id: Option<String>,
}

impl Report {
    pub fn belongs_to(&self, application_id: &str) -> bool {
        self.application_ids.iter().any(|id| id == application_id)
    }
}

/// An automation task ("integration") with its typed outputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub application_id: Option<String>,
    #[serde(default)]
    pub action: Option<TaskAction>,
    #[serde(default)]
    pub input_mapping: Vec<InputMapping>,
    #[serde(default)]
    pub outputs: Vec<TaskOutput>,
    #[serde(default)]
    pub disabled: bool,
}

impl Task {
    /// The owning application id. An empty id counts as no owner.
    pub fn owner(&self) -> Option<&str> {
        self.application_id
            .as_deref()
            .filter(|application_id| !application_id.is_empty())
    }

    pub fn action_type(&self) -> Option<&str> {
        self.action.as_ref().map(|action| action.action_type.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskAction {
    #[serde(rename = "type", default)]
    pub action_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputMapping {
    #[serde(rename = "type", default)]
    pub mapping_type: Option<String>,
    #[serde(default)]
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskOutput {
    #[serde(rename = "type")]
    pub output_type: OutputType,
    #[serde(default)]
    pub application_id: Option<String>,
    #[serde(default)]
    pub task_id: Option<String>,
}

/// What a task output does once the task has run.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutputType {
    /// Writes back into the record that triggered the task.
    SetFieldValue,
    /// Inserts or updates a record of `TaskOutput::application_id`.
    InsertUpdateRecord,
    /// Invokes the task named by `TaskOutput::task_id`.
    ReferentialTask,
    Email,
    SaveToFile,
    Unknown(String),
}

impl From<String> for OutputType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "setFieldValue" => OutputType::SetFieldValue,
            "insertUpdateRecord" => OutputType::InsertUpdateRecord,
            "referentialTask" => OutputType::ReferentialTask,
            "email" => OutputType::Email,
            "saveToFile" => OutputType::SaveToFile,
            _ => OutputType::Unknown(raw),
        }
    }
}

impl From<OutputType> for String {
    fn from(output_type: OutputType) -> Self {
        match output_type {
            OutputType::SetFieldValue => "setFieldValue".to_string(),
            OutputType::InsertUpdateRecord => "insertUpdateRecord".to_string(),
            OutputType::ReferentialTask => "referentialTask".to_string(),
            OutputType::Email => "email".to_string(),
            OutputType::SaveToFile => "saveToFile".to_string(),
            OutputType::Unknown(raw) => raw,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: String,
    pub application_id: String,
    #[serde(default)]
    pub stages: Vec<WorkflowStage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowStage {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub actions: Vec<WorkflowAction>,
    #[serde(default)]
    pub stages: Vec<WorkflowStage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowAction {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub action_type: Option<String>,
    #[serde(default)]
    pub task_id: Option<String>,
}

impl WorkflowAction {
    pub fn is_integration(&self) -> bool {
        self.action_type
            .as_deref()
            .is_some_and(|action_type| action_type.eq_ignore_ascii_case("integration"))
    }
}
