use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value};

use crate::merge::{deep_merge_map, merge};
use crate::model::RunOptions;

/// Engine-wide configuration, applied once when a harness is built.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalOptions {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<GlobalRule>,
    /// `branding`, `reporter`, `checks`, `locale` and anything else the engine accepts.
    #[serde(flatten)]
    pub extra: JsonMap<String, Value>,
}

impl GlobalOptions {
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty() && self.extra.is_empty()
    }

    pub fn with_rule(mut self, rule: GlobalRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Layers `other` on top: rules are appended (later entries win),
    /// settings deep-merge.
    pub fn layered(&self, other: &GlobalOptions) -> GlobalOptions {
        let mut layered = self.clone();
        layered.rules.extend(other.rules.iter().cloned());
        deep_merge_map(&mut layered.extra, &other.extra);
        layered
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GlobalRule {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub extra: JsonMap<String, Value>,
}

impl GlobalRule {
    pub fn toggle(id: impl Into<String>, enabled: bool) -> Self {
        Self {
            id: id.into(),
            enabled: Some(enabled),
            tags: Vec::new(),
            extra: JsonMap::new(),
        }
    }
}

/// Everything a harness is configured with: engine-wide `globalOptions`
/// plus the base runner options every check starts from.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HarnessConfig {
    #[serde(
        default,
        rename = "globalOptions",
        skip_serializing_if = "GlobalOptions::is_empty"
    )]
    pub global: GlobalOptions,
    #[serde(flatten)]
    pub runner: RunOptions,
}

impl HarnessConfig {
    pub fn new(runner: RunOptions) -> Self {
        Self {
            global: GlobalOptions::default(),
            runner,
        }
    }

    pub fn with_global(mut self, global: GlobalOptions) -> Self {
        self.global = global;
        self
    }

    pub fn layered(&self, other: &HarnessConfig) -> HarnessConfig {
        HarnessConfig {
            global: self.global.layered(&other.global),
            runner: merge(&self.runner, &other.runner),
        }
    }
}

/// The payload handed to the engine's `configure`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfiguration {
    pub rules: Vec<GlobalRule>,
    #[serde(flatten)]
    pub settings: JsonMap<String, Value>,
}

impl EngineConfiguration {
    /// Default rules go first so caller rules override them.
    pub fn build(global: &GlobalOptions, default_rules: Vec<GlobalRule>) -> Self {
        let mut rules = default_rules;
        rules.extend(global.rules.iter().cloned());
        Self {
            rules,
            settings: global.extra.clone(),
        }
    }

    /// Last entry for `id` wins.
    pub fn rule_enabled(&self, id: &str) -> Option<bool> {
        self.rules
            .iter()
            .rev()
            .filter(|rule| rule.id == id)
            .find_map(|rule| rule.enabled)
    }
}
