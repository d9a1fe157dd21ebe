use clap::Subcommand;

use super::options::OptionsArgs;
use super::report::ReportArgs;

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Format a saved engine results file and fail if it has violations
    Report(ReportArgs),

    /// Print the effective runner options after config, env and override layering
    Options(OptionsArgs),
}
