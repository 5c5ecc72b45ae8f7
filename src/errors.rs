//! Typed errors for trace gating.
//!
//! Each variant maps onto the exit status contract consumed by CI:
//! - 2: usage error or missing trace file
//! - 3: trace has a header but zero data rows
//! - 4: trace content is invalid (undecodable CSV, missing `dist_goal`
//!   column, or a non-finite distance value)
//!
//! A failed verdict is not an error; `main` maps it to exit status 1.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TraceGateError {
    /// Trace path does not name a regular file.
    #[error("trace file not found: {path}")]
    TraceNotFound { path: PathBuf },

    /// Underlying I/O failure while opening or reading the trace.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but its CSV content could not be decoded.
    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Header row present, zero data rows.
    #[error("empty trace: {path}")]
    EmptyTrace { path: PathBuf },

    /// The header row has no column with the expected name.
    #[error("trace has no '{column}' column")]
    MissingColumn { column: String },

    /// A distance cell was non-numeric, infinite, or NaN.
    ///
    /// Unparseable text is folded into the infinity sentinel before this
    /// check, so malformed text and a literal `inf` exit the same way; the
    /// raw cell text is carried so the message still shows which it was.
    #[error("invalid dist_goal at data row {row}: {value:?}")]
    InvalidValue { row: usize, value: String },

    /// The optional report could not be written.
    #[error("failed to write report: {0}")]
    Report(anyhow::Error),
}

impl TraceGateError {
    /// Exit status for this error, per the CI contract.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::TraceNotFound { .. } | Self::Io { .. } | Self::Report(_) => 2,
            Self::EmptyTrace { .. } => 3,
            Self::Csv { .. } | Self::MissingColumn { .. } | Self::InvalidValue { .. } => 4,
        }
    }

    /// True when the fix is correcting the trace content rather than the
    /// invocation.
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::Csv { .. } | Self::MissingColumn { .. } | Self::InvalidValue { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_match_contract() {
        let not_found = TraceGateError::TraceNotFound {
            path: PathBuf::from("missing.csv"),
        };
        assert_eq!(not_found.exit_code(), 2);

        let empty = TraceGateError::EmptyTrace {
            path: PathBuf::from("trace.csv"),
        };
        assert_eq!(empty.exit_code(), 3);

        let invalid = TraceGateError::InvalidValue {
            row: 3,
            value: "oops".to_string(),
        };
        assert_eq!(invalid.exit_code(), 4);

        let missing_column = TraceGateError::MissingColumn {
            column: "dist_goal".to_string(),
        };
        assert_eq!(missing_column.exit_code(), 4);
    }

    #[test]
    fn invalid_value_message_names_row_and_text() {
        let err = TraceGateError::InvalidValue {
            row: 7,
            value: "not-a-number".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("row 7"));
        assert!(message.contains("not-a-number"));
    }

    #[test]
    fn data_error_classification() {
        let invalid = TraceGateError::InvalidValue {
            row: 1,
            value: String::new(),
        };
        assert!(invalid.is_data_error());

        let not_found = TraceGateError::TraceNotFound {
            path: PathBuf::from("x.csv"),
        };
        assert!(!not_found.is_data_error());
    }
}
