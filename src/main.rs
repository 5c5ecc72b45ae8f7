use clap::Parser;
use std::process::ExitCode;
use tracegate::cli::Cli;
use tracegate::commands::check::{check_trace, CheckConfig};
use tracegate::core::Verdict;

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let config = CheckConfig {
        trace: cli.trace,
        format: cli.format,
        output: cli.output,
        threshold: cli.threshold,
        verbosity: cli.verbosity,
    };

    match check_trace(config) {
        Ok(Verdict::Pass) => ExitCode::SUCCESS,
        Ok(Verdict::Fail) => ExitCode::from(1),
        Err(err) => {
            // Diagnostics go to stdout so CI logs keep them next to the
            // summary line.
            println!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
