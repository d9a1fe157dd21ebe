use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use a11y_harness::core_types::Impact;
use a11y_harness::report::{to_have_no_violations, AuditResults, ToolOptions};

use super::output::{render, OutputFormat};

#[derive(Args, Clone, Debug)]
pub struct ReportArgs {
    /// Results JSON written by the rule engine
    pub results: PathBuf,

    /// Only consider violations with these impacts (repeatable)
    #[arg(long = "impact", value_name = "LEVEL")]
    pub impact: Vec<Impact>,
}

#[derive(Serialize)]
struct ReportSummary {
    pass: bool,
    violations: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<String>,
}

pub fn cmd_report(args: ReportArgs, output: &OutputFormat) -> Result<ExitCode> {
    let raw = fs::read_to_string(&args.results)
        .with_context(|| format!("failed to read {}", args.results.display()))?;
    let value: Value = serde_json::from_str(&raw)
        .with_context(|| format!("{} is not valid JSON", args.results.display()))?;
    let mut results = AuditResults::from_json(value)?;

    if !args.impact.is_empty() {
        results
            .tool_options
            .get_or_insert_with(ToolOptions::default)
            .impact_levels = args.impact.clone();
    }

    let outcome = to_have_no_violations(&results)?;
    info!(
        pass = outcome.pass,
        violations = outcome.actual.len(),
        "results evaluated"
    );

    match output {
        OutputFormat::Human => match outcome.failure_message() {
            Some(message) => println!("{message}"),
            None => println!("No accessibility violations found"),
        },
        format => {
            let summary = ReportSummary {
                pass: outcome.pass,
                violations: outcome.actual.len(),
                report: outcome.message(),
            };
            println!("{}", render(format, &summary)?);
        }
    }

    Ok(if outcome.pass {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
