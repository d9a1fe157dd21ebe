use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    Yaml,
}

pub fn render<T: Serialize>(format: &OutputFormat, value: &T) -> Result<String> {
    match format {
        OutputFormat::Human => {
            serde_json::to_string_pretty(value).context("failed to serialize output")
        }
        OutputFormat::Json => serde_json::to_string(value).context("failed to serialize output"),
        OutputFormat::Yaml => serde_yaml::to_string(value).context("failed to serialize output"),
    }
}
