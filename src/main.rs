//! CLI entry point for heatmap extraction and comparison

use clap::Parser;
use heatoverlap::io::cli::{Cli, CommandRunner};
use std::process::ExitCode;

// Allow print so failures reach the user even with logging filtered out
#[allow(clippy::print_stderr)]
fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut runner = CommandRunner::new(cli);
    match runner.process() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("error: {error}");
            ExitCode::FAILURE
        }
    }
}
