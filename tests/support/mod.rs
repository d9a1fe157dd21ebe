#![allow(dead_code)]

use std::sync::Arc;

use a11y_harness::dom::{MountedRoot, Ownership};
use a11y_harness::options::{EngineConfiguration, RuleDescriptor, RunOptions};
use a11y_harness::report::{AuditResults, NodeResult, Violation};
use a11y_harness::{EngineCallback, EngineError, RuleEngine};
use a11y_harness::core_types::Impact;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex::Regex;

static EMPTY_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"<a\b[^>]*>\s*</a>").unwrap());
static IMG_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<img\b[^>]*>").unwrap());
static COLOURED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<[a-z0-9]+\b[^>]*style="[^"]*color:[^>]*>"#).unwrap());

pub struct Rule {
    pub id: &'static str,
    pub description: &'static str,
    pub help: &'static str,
    pub tags: &'static [&'static str],
    pub impact: Impact,
    pattern: &'static Lazy<Regex>,
    summary: &'static str,
}

impl Rule {
    fn descriptor(&self) -> RuleDescriptor {
        RuleDescriptor {
            rule_id: self.id.into(),
            description: self.description.into(),
            help: self.help.into(),
            tags: self.tags.iter().map(|tag| tag.to_string()).collect(),
        }
    }

    fn matches(&self, html: &str) -> Vec<String> {
        self.pattern
            .find_iter(html)
            .map(|m| m.as_str().to_string())
            .filter(|snippet| self.id != "image-alt" || !snippet.contains("alt="))
            .collect()
    }
}

pub static RULES: &[Rule] = &[
    Rule {
        id: "link-name",
        description: "Ensures links have discernible text",
        help: "Links must have discernible text",
        tags: &["cat.name-role-value", "wcag2a", "wcag244"],
        impact: Impact::Serious,
        pattern: &EMPTY_LINK,
        summary: "Fix all of the following:\n  Element is in tab order and does not have accessible text",
    },
    Rule {
        id: "image-alt",
        description: "Ensures <img> elements have alternate text or a role of none or presentation",
        help: "Images must have alternate text",
        tags: &["cat.text-alternatives", "wcag2a", "wcag111"],
        impact: Impact::Critical,
        pattern: &IMG_TAG,
        summary: "Fix any of the following:\n  Element does not have an alt attribute",
    },
    Rule {
        id: "color-contrast",
        description: "Ensures the contrast between foreground and background colors meets WCAG 2 AA contrast ratio thresholds",
        help: "Elements must have sufficient color contrast",
        tags: &["cat.color", "wcag2aa", "wcag143"],
        impact: Impact::Serious,
        pattern: &COLOURED,
        summary: "Fix any of the following:\n  Element has insufficient color contrast",
    },
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delivery {
    /// Callback invoked inside `run`.
    Inline,
    /// Callback invoked from a spawned task after `run` returns.
    Task,
    /// Callback invoked from a plain OS thread.
    Thread,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Failure {
    Error(String),
    DropCallback,
    Panic,
    NoViolationsField,
}

#[derive(Clone, Debug)]
pub struct RecordedRun {
    pub root: MountedRoot,
    pub options: RunOptions,
}

/// Rule engine with three crude regex rules, enough to drive the harness.
pub struct ScriptedEngine {
    delivery: Delivery,
    failure: Option<Failure>,
    reject_configuration: bool,
    configuration: Mutex<Option<EngineConfiguration>>,
    runs: Mutex<Vec<RecordedRun>>,
}

impl ScriptedEngine {
    pub fn new() -> Arc<Self> {
        Self::build(Delivery::Inline, None)
    }

    pub fn with_delivery(delivery: Delivery) -> Arc<Self> {
        Self::build(delivery, None)
    }

    pub fn failing(failure: Failure) -> Arc<Self> {
        Self::build(Delivery::Inline, Some(failure))
    }

    pub fn rejecting_configuration() -> Arc<Self> {
        Arc::new(Self {
            reject_configuration: true,
            ..Self::plain(Delivery::Inline, None)
        })
    }

    fn build(delivery: Delivery, failure: Option<Failure>) -> Arc<Self> {
        Arc::new(Self::plain(delivery, failure))
    }

    fn plain(delivery: Delivery, failure: Option<Failure>) -> Self {
        Self {
            delivery,
            failure,
            reject_configuration: false,
            configuration: Mutex::new(None),
            runs: Mutex::new(Vec::new()),
        }
    }

    pub fn configuration(&self) -> Option<EngineConfiguration> {
        self.configuration.lock().clone()
    }

    pub fn runs(&self) -> Vec<RecordedRun> {
        self.runs.lock().clone()
    }

    pub fn last_run(&self) -> Option<RecordedRun> {
        self.runs.lock().last().cloned()
    }

    fn rule_active(&self, rule: &Rule, options: &RunOptions) -> bool {
        let tags: Vec<String> = rule.tags.iter().map(|tag| tag.to_string()).collect();
        let mut active = options
            .run_only
            .as_ref()
            .map_or(true, |run_only| run_only.selects(rule.id, &tags));
        if let Some(enabled) = self
            .configuration
            .lock()
            .as_ref()
            .and_then(|config| config.rule_enabled(rule.id))
        {
            active = enabled;
        }
        if let Some(enabled) = options.rule_enabled(rule.id) {
            active = enabled;
        }
        active
    }

    fn evaluate(&self, root: &MountedRoot, options: &RunOptions) -> AuditResults {
        let violations = RULES
            .iter()
            .filter(|rule| self.rule_active(rule, options))
            .filter_map(|rule| {
                let nodes: Vec<NodeResult> = rule
                    .matches(&root.outer_html)
                    .into_iter()
                    .map(|html| NodeResult {
                        target: vec![selector_for(&html).as_str().into()],
                        html,
                        failure_summary: Some(rule.summary.into()),
                        impact: Some(rule.impact),
                        ..NodeResult::default()
                    })
                    .collect();
                if nodes.is_empty() {
                    return None;
                }
                Some(Violation {
                    id: rule.id.into(),
                    impact: Some(rule.impact),
                    tags: rule.tags.iter().map(|tag| tag.to_string()).collect(),
                    description: rule.description.into(),
                    help: rule.help.into(),
                    help_url: Some(format!(
                        "https://dequeuniversity.com/rules/axe/4.10/{}?application=axeAPI",
                        rule.id
                    )),
                    nodes,
                })
            })
            .collect();
        AuditResults::with_violations(violations)
    }
}

fn selector_for(html: &str) -> String {
    let tag: String = html
        .trim_start_matches('<')
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    format!("body > {tag}")
}

impl RuleEngine for ScriptedEngine {
    fn configure(&self, config: &EngineConfiguration) -> Result<(), EngineError> {
        if self.reject_configuration {
            return Err(EngineError::new("unknown reporter \"v9\""));
        }
        *self.configuration.lock() = Some(config.clone());
        Ok(())
    }

    fn rules_tagged(&self, tags: &[&str]) -> Vec<RuleDescriptor> {
        RULES
            .iter()
            .filter(|rule| rule.tags.iter().any(|tag| tags.contains(tag)))
            .map(Rule::descriptor)
            .collect()
    }

    fn run(&self, root: MountedRoot, options: RunOptions, callback: EngineCallback) {
        self.runs.lock().push(RecordedRun {
            root: root.clone(),
            options: options.clone(),
        });

        let outcome = match &self.failure {
            None => Ok(self.evaluate(&root, &options)),
            Some(Failure::Error(message)) => Err(EngineError::new(message.clone())),
            Some(Failure::DropCallback) => return,
            Some(Failure::Panic) => panic!("engine crashed while evaluating {}", root.node_id),
            Some(Failure::NoViolationsField) => Ok(AuditResults::default()),
        };

        match self.delivery {
            Delivery::Inline => callback(outcome),
            Delivery::Task => {
                tokio::spawn(async move {
                    tokio::task::yield_now().await;
                    callback(outcome);
                });
            }
            Delivery::Thread => {
                std::thread::spawn(move || callback(outcome));
            }
        }
    }
}

pub fn is_owned(run: &RecordedRun) -> bool {
    run.root.ownership == Ownership::Owned
}
