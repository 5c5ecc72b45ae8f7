// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod core;
pub mod errors;
pub mod io;

// Re-export commonly used types
pub use crate::core::{
    distance_series, Trace, TraceSummary, Verdict, DEFAULT_FINAL_DIST_THRESHOLD, DIST_GOAL_COLUMN,
};

pub use crate::errors::TraceGateError;

pub use crate::io::output::{create_writer, CheckReport, OutputFormat, ReportWriter};

pub use crate::io::trace::read_trace;
