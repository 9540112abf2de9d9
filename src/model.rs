use serde::{Deserialize, Serialize};

/// Reference to a resource type from an action row. `required` comes from
/// the trailing `*` on the displayed name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTypeRef {
    pub name: String,
    pub required: bool,
}

/// A resource type as listed against one action, with the condition keys and
/// dependent actions that apply to that pairing only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResourceType {
    pub name: String,
    pub required: bool,
    pub condition_keys: Vec<String>,
    pub dependent_actions: Vec<String>,
}

/// Alternative combination of resource types under which an action can run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub name: String,
    pub resource_types: Vec<ResourceTypeRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    pub name: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_permission_only: bool,
    pub description: String,
    pub access_level: String,
    pub resource_types: Vec<ActionResourceType>,
    pub condition_keys: Vec<String>,
    pub dependent_actions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scenarios: Option<Vec<Scenario>>,
}

/// Row of the resource types table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceType {
    pub key: String,
    pub arn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_keys: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionKey {
    pub key: String,
    pub description: String,
    #[serde(rename = "type")]
    pub value_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDefinition {
    pub name: String,
    pub prefix: String,
    pub actions: Vec<Action>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_types: Option<Vec<ResourceType>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition_keys: Option<Vec<ConditionKey>>,
}

/// Diagnostic produced by the structural verifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProblemRow {
    pub problem_description: String,
    pub html: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HtmlPageEntry {
    pub filename: String,
    pub service: String,
    pub sha256: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HtmlInventoryManifest {
    pub manifest_version: u32,
    pub generated_at: String,
    pub source_directory: String,
    pub page_count: usize,
    pub pages: Vec<HtmlPageEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParsedServiceEntry {
    pub service: String,
    pub prefix: String,
    pub source_file: String,
    pub source_sha256: String,
    pub output_file: String,
    pub action_count: usize,
    pub scenario_action_count: usize,
    pub resource_type_count: Option<usize>,
    pub condition_key_count: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParseRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub started_at: String,
    pub completed_at: String,
    pub html_directory: String,
    pub output_directory: String,
    pub service_count: usize,
    pub services: Vec<ParsedServiceEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PageFindings {
    pub service: String,
    pub source_file: String,
    pub problems: Vec<ProblemRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VerifyReport {
    pub manifest_version: u32,
    pub generated_at: String,
    pub html_directory: String,
    pub page_count: usize,
    pub failing_page_count: usize,
    pub pages: Vec<PageFindings>,
}
