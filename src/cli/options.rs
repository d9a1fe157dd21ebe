use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;

use a11y_harness::options::{
    load_harness_config_with_options, merge, LoadOptions, RunOptions,
};

use super::output::{render, OutputFormat};

#[derive(Args, Clone, Debug)]
pub struct OptionsArgs {
    /// Harness config (YAML), repeatable; later files layer over earlier ones
    #[arg(short, long, value_name = "FILE")]
    pub config: Vec<PathBuf>,

    /// Per-call override as a JSON file
    #[arg(long = "override", value_name = "FILE")]
    pub override_path: Option<PathBuf>,

    /// Ignore A11Y_HARNESS_* environment overlays
    #[arg(long)]
    pub no_env: bool,
}

pub fn cmd_options(args: OptionsArgs, output: &OutputFormat) -> Result<ExitCode> {
    let load = LoadOptions {
        paths: args.config.clone(),
        include_env: !args.no_env,
    };
    let config = load_harness_config_with_options(&load)?;

    let effective = match &args.override_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            let overrides: RunOptions = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a valid options object", path.display()))?;
            merge(&config.runner, &overrides)
        }
        None => config.runner,
    };

    println!("{}", render(output, &effective)?);
    Ok(ExitCode::SUCCESS)
}
