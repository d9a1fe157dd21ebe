use std::process::ExitCode;

mod cli;

fn main() -> anyhow::Result<ExitCode> {
    cli::app::run()
}
