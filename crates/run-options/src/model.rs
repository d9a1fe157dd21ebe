use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value};

/// Per-call options handed to the rule engine's `run`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOptions {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub rules: BTreeMap<String, RuleToggle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iframes: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selectors: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element_ref: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_only: Option<RunOnly>,
    /// Runner settings this crate does not model (`resultTypes`, `reporter`, ...).
    #[serde(flatten)]
    pub extra: JsonMap<String, Value>,
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, id: impl Into<String>, enabled: bool) -> Self {
        self.rules.insert(id.into(), RuleToggle::new(enabled));
        self
    }

    pub fn with_run_only(mut self, run_only: RunOnly) -> Self {
        self.run_only = Some(run_only);
        self
    }

    pub fn rule_enabled(&self, id: &str) -> Option<bool> {
        self.rules.get(id).and_then(|toggle| toggle.enabled)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn from_json(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RuleToggle {
    /// Unset leaves the flag to whatever layer below decided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(flatten)]
    pub extra: JsonMap<String, Value>,
}

impl RuleToggle {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled: Some(enabled),
            extra: JsonMap::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunOnlyKind {
    Rule,
    Rules,
    Tag,
    Tags,
}

/// Restricts a run to a set of rules or tags. Bare lists and strings name tags.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RunOnly {
    Typed {
        #[serde(rename = "type")]
        kind: RunOnlyKind,
        values: Vec<String>,
    },
    List(Vec<String>),
    Single(String),
}

impl RunOnly {
    pub fn rules<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RunOnly::Typed {
            kind: RunOnlyKind::Rule,
            values: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RunOnly::Typed {
            kind: RunOnlyKind::Tag,
            values: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn selects(&self, rule_id: &str, rule_tags: &[String]) -> bool {
        let has_tag = |values: &[String]| values.iter().any(|tag| rule_tags.contains(tag));
        match self {
            RunOnly::Typed {
                kind: RunOnlyKind::Rule | RunOnlyKind::Rules,
                values,
            } => values.iter().any(|id| id == rule_id),
            RunOnly::Typed { values, .. } | RunOnly::List(values) => has_tag(values.as_slice()),
            RunOnly::Single(tag) => rule_tags.contains(tag),
        }
    }
}
