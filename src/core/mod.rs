pub mod summary;

pub use summary::{
    distance_series, TraceSummary, Verdict, DEFAULT_FINAL_DIST_THRESHOLD, DIST_GOAL_COLUMN,
};

use csv::StringRecord;

/// A parsed trace: header names plus ordered per-step data rows.
///
/// Rows keep their raw string fields; numeric extraction happens in
/// [`summary::distance_series`] so the loader stays format-only.
#[derive(Debug, Clone)]
pub struct Trace {
    headers: StringRecord,
    rows: Vec<StringRecord>,
}

impl Trace {
    pub fn new(headers: StringRecord, rows: Vec<StringRecord>) -> Self {
        Self { headers, rows }
    }

    /// Position of a named column in the header row.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn rows(&self) -> &[StringRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
