use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::OptionsError;
use crate::global::HarnessConfig;
use crate::merge::merge;
use crate::model::{RuleToggle, RunOptions};

const ENV_JSON: &str = "A11Y_HARNESS_OPTIONS_JSON";
const ENV_RULE_PREFIX: &str = "A11Y_HARNESS__RULES__";

#[derive(Debug, Default)]
pub struct LoadOptions {
    pub paths: Vec<PathBuf>,
    pub include_env: bool,
}

impl LoadOptions {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            paths: vec![path.into()],
            include_env: true,
        }
    }
}

pub fn load_harness_config(path: Option<&Path>) -> Result<HarnessConfig, OptionsError> {
    let mut options = LoadOptions {
        include_env: true,
        ..LoadOptions::default()
    };
    if let Some(p) = path {
        options.paths.push(p.to_path_buf());
    }
    load_harness_config_with_options(&options)
}

/// Files are layered in order, then environment overlays apply to the
/// runner options. Missing files are skipped.
pub fn load_harness_config_with_options(
    options: &LoadOptions,
) -> Result<HarnessConfig, OptionsError> {
    let mut config = HarnessConfig::default();

    for path in &options.paths {
        if path.exists() {
            let layer = config_from_file(path)?;
            config = config.layered(&layer);
            debug!(path = %path.display(), "loaded harness options file");
        }
    }

    if options.include_env {
        let overlay = runner_from_env()?;
        config.runner = merge(&config.runner, &overlay);
    }

    Ok(config)
}

fn config_from_file(path: &Path) -> Result<HarnessConfig, OptionsError> {
    let content = fs::read_to_string(path).map_err(|err| OptionsError::Io {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    if content.trim().is_empty() {
        return Ok(HarnessConfig::default());
    }
    let yaml_value: serde_yaml::Value =
        serde_yaml::from_str(&content).map_err(|err| OptionsError::Invalid(format!("{}", err)))?;
    let json_value =
        serde_json::to_value(yaml_value).map_err(|err| OptionsError::Invalid(format!("{}", err)))?;
    serde_json::from_value(json_value).map_err(|err| OptionsError::Invalid(format!("{}", err)))
}

fn runner_from_env() -> Result<RunOptions, OptionsError> {
    let mut overlay = RunOptions::default();

    if let Ok(raw_json) = env::var(ENV_JSON) {
        if !raw_json.trim().is_empty() {
            let value: Value = serde_json::from_str(&raw_json)
                .map_err(|err| OptionsError::Invalid(format!("{ENV_JSON}: {err}")))?;
            if !value.is_object() {
                return Err(OptionsError::InvalidValue {
                    key: ENV_JSON.to_string(),
                    value: raw_json,
                });
            }
            let parsed = RunOptions::from_json(value)
                .map_err(|err| OptionsError::Invalid(format!("{ENV_JSON}: {err}")))?;
            overlay = merge(&overlay, &parsed);
        }
    }

    let mut toggles: Vec<(String, String)> = env::vars()
        .filter_map(|(key, raw)| {
            key.strip_prefix(ENV_RULE_PREFIX)
                .map(|rule| (rule.to_string(), raw))
        })
        .collect();
    toggles.sort();
    for (rule, raw) in toggles {
        let id = rule_id_from_env(&rule);
        if id.is_empty() {
            continue;
        }
        let enabled = parse_env_bool(&raw).ok_or_else(|| OptionsError::InvalidValue {
            key: format!("{ENV_RULE_PREFIX}{rule}"),
            value: raw.clone(),
        })?;
        overlay.rules.insert(id, RuleToggle::new(enabled));
    }

    Ok(overlay)
}

/// `COLOR_CONTRAST` names the `color-contrast` rule.
fn rule_id_from_env(segment: &str) -> String {
    segment
        .trim_matches('_')
        .to_ascii_lowercase()
        .replace('_', "-")
}

fn parse_env_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
