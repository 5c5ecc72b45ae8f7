//! Trace file loading.

use std::fs::File;
use std::path::Path;

use crate::core::Trace;
use crate::errors::TraceGateError;

/// Read a CSV trace with a header row into an ordered [`Trace`].
///
/// The reader is flexible about row widths: short rows are kept and handled
/// downstream via the sentinel, matching how generators truncate a crashed
/// run mid-row. The file handle is scoped to this function.
pub fn read_trace(path: &Path) -> Result<Trace, TraceGateError> {
    if !path.is_file() {
        return Err(TraceGateError::TraceNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path).map_err(|source| TraceGateError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let headers = reader
        .headers()
        .map_err(|source| TraceGateError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| TraceGateError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(record);
    }

    if rows.is_empty() {
        return Err(TraceGateError::EmptyTrace {
            path: path.to_path_buf(),
        });
    }

    log::debug!(
        "loaded {} data rows, {} columns from {}",
        rows.len(),
        headers.len(),
        path.display()
    );

    Ok(Trace::new(headers, rows))
}
