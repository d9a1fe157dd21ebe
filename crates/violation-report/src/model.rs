use std::fmt;

use a11y_core_types::Impact;
use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value};

use crate::errors::ReportError;

/// Results object produced by the rule engine.
///
/// `violations` is optional only so that a results object without it can be
/// represented and rejected; every well-behaved engine fills it in.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResults {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub violations: Option<Vec<Violation>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passes: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub incomplete: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inapplicable: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_options: Option<ToolOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(flatten)]
    pub extra: JsonMap<String, Value>,
}

impl AuditResults {
    pub fn with_violations(violations: Vec<Violation>) -> Self {
        Self {
            violations: Some(violations),
            ..Self::default()
        }
    }

    pub fn from_json(value: Value) -> Result<Self, ReportError> {
        serde_json::from_value(value).map_err(|err| ReportError::Decode(err.to_string()))
    }

    pub fn violations(&self) -> Result<&[Violation], ReportError> {
        self.violations
            .as_deref()
            .ok_or(ReportError::MalformedResultsObject)
    }

    pub fn impact_levels(&self) -> &[Impact] {
        self.tool_options
            .as_ref()
            .map(|options| options.impact_levels.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolOptions {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub impact_levels: Vec<Impact>,
    #[serde(flatten)]
    pub extra: JsonMap<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<Impact>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub help: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_url: Option<String>,
    #[serde(default)]
    pub nodes: Vec<NodeResult>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeResult {
    pub html: String,
    #[serde(default)]
    pub target: Vec<TargetSelector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<Impact>,
    #[serde(default)]
    pub any: Vec<CheckResult>,
    #[serde(default)]
    pub all: Vec<CheckResult>,
    #[serde(default)]
    pub none: Vec<CheckResult>,
}

impl NodeResult {
    pub fn selector(&self) -> String {
        self.target
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// One entry of a node's `target`: a plain selector, or a path of selectors
/// crossing frame or shadow boundaries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TargetSelector {
    Selector(String),
    Path(Vec<String>),
}

impl fmt::Display for TargetSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetSelector::Selector(selector) => f.write_str(selector),
            TargetSelector::Path(path) => f.write_str(&path.join(",")),
        }
    }
}

impl From<&str> for TargetSelector {
    fn from(value: &str) -> Self {
        TargetSelector::Selector(value.to_string())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckResult {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<Impact>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub related_nodes: Vec<Value>,
}
