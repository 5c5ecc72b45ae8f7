//! The check pipeline: load, extract, summarize, report, decide.

use crate::cli;
use crate::core::{distance_series, TraceSummary, Verdict};
use crate::errors::TraceGateError;
use crate::io::output::{self, CheckReport};
use crate::io::trace::read_trace;
use chrono::Utc;
use colored::Colorize;
use std::path::PathBuf;

pub struct CheckConfig {
    pub trace: PathBuf,
    pub format: Option<cli::OutputFormat>,
    pub output: Option<PathBuf>,
    pub threshold: f64,
    pub verbosity: u8,
}

/// Run the smoke check over one trace file.
///
/// The summary line always goes to stdout; the verdict line only at `-v`,
/// so default output stays a single machine-greppable line.
pub fn check_trace(config: CheckConfig) -> Result<Verdict, TraceGateError> {
    let trace = read_trace(&config.trace)?;
    let distances = distance_series(&trace)?;
    let summary =
        TraceSummary::from_series(&distances).ok_or_else(|| TraceGateError::EmptyTrace {
            path: config.trace.clone(),
        })?;
    let verdict = summary.verdict(config.threshold);

    println!("{}", summary.summary_line());
    print_verdict(&summary, verdict, &config);
    generate_report_if_requested(&config, &summary, distances.len(), verdict)?;

    Ok(verdict)
}

fn determine_output_format(config: &CheckConfig) -> Option<cli::OutputFormat> {
    config
        .format
        .or(config.output.as_ref().map(|_| cli::OutputFormat::Terminal))
}

fn generate_report_if_requested(
    config: &CheckConfig,
    summary: &TraceSummary,
    steps: usize,
    verdict: Verdict,
) -> Result<(), TraceGateError> {
    let Some(format) = determine_output_format(config) else {
        return Ok(());
    };

    let report = CheckReport {
        timestamp: Utc::now(),
        trace: config.trace.clone(),
        steps,
        summary: *summary,
        threshold: config.threshold,
        verdict,
    };

    let mut writer = output::create_writer(format.into(), config.output.as_deref())
        .map_err(TraceGateError::Report)?;
    writer
        .write_report(&report)
        .map_err(TraceGateError::Report)
}

fn print_verdict(summary: &TraceSummary, verdict: Verdict, config: &CheckConfig) {
    if config.verbosity == 0 {
        return;
    }

    match verdict {
        Verdict::Pass => {
            let reason = if summary.impr_abs > 0.0 {
                "net improvement"
            } else {
                "final distance under threshold"
            };
            println!("{} smoke check passed ({})", "[OK]".green(), reason);
        }
        Verdict::Fail => {
            println!(
                "{} smoke check failed: imprAbs={:.6} shows no progress and last={:.6} is not under {:.6}",
                "[FAIL]".red(),
                summary.impr_abs,
                summary.last,
                config.threshold
            );
        }
    }
}
