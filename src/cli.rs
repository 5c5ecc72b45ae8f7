use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::core::DEFAULT_FINAL_DIST_THRESHOLD;

#[derive(Parser, Debug)]
#[command(name = "tracegate")]
#[command(about = "Smoke-test gate for trajectory generation traces", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the gen_trace.csv produced by a generation run
    pub trace: PathBuf,

    /// Report format (a report is written when this or --output is given)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Report file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Final distance under which a run passes even without net improvement
    #[arg(long, default_value_t = DEFAULT_FINAL_DIST_THRESHOLD)]
    pub threshold: f64,

    /// Increase verbosity level (can be repeated: -v, -vv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
