use serde::{Deserialize, Serialize};

use crate::global::GlobalRule;

/// Rule tags whose checks need real rendering (computed colours, layout),
/// which a headless document cannot provide.
pub const HEADLESS_UNSUPPORTED_TAGS: &[&str] = &["cat.color"];

/// A rule as listed by the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleDescriptor {
    pub rule_id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub help: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Global rule entries that switch off every rule in `rules`. Callers list
/// their own global rules after these so an explicit entry still wins.
pub fn headless_rule_defaults(rules: &[RuleDescriptor]) -> Vec<GlobalRule> {
    rules
        .iter()
        .map(|rule| GlobalRule::toggle(rule.rule_id.clone(), false))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_rule_is_disabled() {
        let rules = vec![RuleDescriptor {
            rule_id: "color-contrast".into(),
            description: String::new(),
            help: String::new(),
            tags: vec!["cat.color".into()],
        }];
        let defaults = headless_rule_defaults(&rules);
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].id, "color-contrast");
        assert_eq!(defaults[0].enabled, Some(false));
    }
}
