use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::{debug, error};

use a11y_harness::logging::init_tracing;

use super::commands::Commands;
use super::env::CliArgs;
use super::options::cmd_options;
use super::report::cmd_report;

pub fn run() -> Result<ExitCode> {
    let cli = CliArgs::parse();
    init_tracing(&cli.log_level, cli.debug)?;
    debug!("Starting a11y-harness v{}", env!("CARGO_PKG_VERSION"));

    let outcome = match cli.command {
        Commands::Report(args) => cmd_report(args, &cli.output),
        Commands::Options(args) => cmd_options(args, &cli.output),
    };

    if let Err(err) = &outcome {
        error!("Command failed: {}", err);
    }
    outcome
}
