//! Report writers for the check result.

use crate::core::{TraceSummary, Verdict};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Terminal,
}

/// Everything a single check run produced, for machine consumption.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReport {
    pub timestamp: DateTime<Utc>,
    pub trace: PathBuf,
    pub steps: usize,
    #[serde(flatten)]
    pub summary: TraceSummary,
    pub threshold: f64,
    pub verdict: Verdict,
}

pub trait ReportWriter {
    fn write_report(&mut self, report: &CheckReport) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &CheckReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        self.writer.write_all(json.as_bytes())?;
        writeln!(self.writer)?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> ReportWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &CheckReport) -> anyhow::Result<()> {
        writeln!(self.writer, "trace: {}", report.trace.display())?;
        writeln!(self.writer, "{}", report.summary.summary_line())?;
        writeln!(
            self.writer,
            "steps={}  threshold={:.6}  verdict={}",
            report.steps, report.threshold, report.verdict
        )?;
        Ok(())
    }
}

/// Build a writer for the requested format, targeting `output` or stdout.
pub fn create_writer(
    format: OutputFormat,
    output: Option<&Path>,
) -> anyhow::Result<Box<dyn ReportWriter>> {
    let sink: Box<dyn Write> = match output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout()),
    };

    Ok(match format {
        OutputFormat::Json => Box::new(JsonWriter::new(sink)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(sink)),
    })
}
