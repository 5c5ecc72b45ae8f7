//! Distance-series extraction and smoke statistics.
//!
//! The trace records `dist_goal` per generation step. The gate cares about
//! three order statistics (first, minimum, final) and the improvement they
//! imply; everything here is pure so the arithmetic can be tested without
//! touching the filesystem.

use serde::Serialize;
use std::fmt;

use crate::core::Trace;
use crate::errors::TraceGateError;

/// Column holding the per-step distance from the current state to the goal.
pub const DIST_GOAL_COLUMN: &str = "dist_goal";

/// A run with no net improvement still passes when it ends closer to the
/// goal than this (2 cm in the generator's units).
pub const DEFAULT_FINAL_DIST_THRESHOLD: f64 = 0.02;

/// Floor for the relative-improvement denominator so a tiny positive start
/// cannot blow the ratio up.
const REL_DENOM_FLOOR: f64 = 1e-9;

/// Extract the ordered `dist_goal` series from a trace.
///
/// Cells that fail to parse (and rows too short to have the cell at all)
/// become the infinity sentinel rather than being dropped, preserving the
/// one-value-per-step invariant. The series is then rejected wholesale if
/// any value is non-finite, reporting the first offending row.
pub fn distance_series(trace: &Trace) -> Result<Vec<f64>, TraceGateError> {
    let col = trace
        .column_index(DIST_GOAL_COLUMN)
        .ok_or_else(|| TraceGateError::MissingColumn {
            column: DIST_GOAL_COLUMN.to_string(),
        })?;

    let mut values = Vec::with_capacity(trace.len());
    for (idx, row) in trace.rows().iter().enumerate() {
        let value = match row.get(col) {
            Some(text) => text.trim().parse().unwrap_or(f64::INFINITY),
            None => {
                log::warn!(
                    "data row {} is too short to hold {}",
                    idx + 1,
                    DIST_GOAL_COLUMN
                );
                f64::INFINITY
            }
        };
        values.push(value);
    }

    if let Some(idx) = values.iter().position(|v| !v.is_finite()) {
        let raw = trace.rows()[idx].get(col).unwrap_or("").to_string();
        return Err(TraceGateError::InvalidValue {
            row: idx + 1,
            value: raw,
        });
    }

    Ok(values)
}

/// Smoke statistics over a distance series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceSummary {
    /// Distance at the first recorded step.
    pub start: f64,
    /// Minimum distance reached anywhere in the run.
    pub min: f64,
    /// Distance at the final recorded step.
    pub last: f64,
    /// Net improvement, `start - last`. Negative means the run regressed.
    pub impr_abs: f64,
    /// Improvement relative to the starting distance; `0.0` when the run
    /// started at or past the goal.
    pub impr_rel: f64,
}

impl TraceSummary {
    /// Compute the summary over a non-empty series. Returns `None` for an
    /// empty slice; the loader rejects empty traces before this point.
    pub fn from_series(series: &[f64]) -> Option<Self> {
        let start = *series.first()?;
        let last = *series.last()?;
        let min = series.iter().copied().fold(f64::INFINITY, f64::min);
        let impr_abs = start - last;
        let impr_rel = if start > 0.0 {
            impr_abs / start.max(REL_DENOM_FLOOR)
        } else {
            0.0
        };

        Some(Self {
            start,
            min,
            last,
            impr_abs,
            impr_rel,
        })
    }

    /// The canonical one-line rendering, six decimal places throughout.
    pub fn summary_line(&self) -> String {
        format!(
            "start={:.6}  min={:.6}  last={:.6}  imprAbs={:.6}  imprRel={:.6}",
            self.start, self.min, self.last, self.impr_abs, self.impr_rel
        )
    }

    /// Pass when the run made net progress, or ended within
    /// `final_dist_threshold` of the goal despite not improving.
    pub fn verdict(&self, final_dist_threshold: f64) -> Verdict {
        if self.impr_abs > 0.0 || self.last < final_dist_threshold {
            Verdict::Pass
        } else {
            Verdict::Fail
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "pass"),
            Verdict::Fail => write!(f, "fail"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use csv::StringRecord;
    use pretty_assertions::assert_eq;

    fn trace_of(values: &[&str]) -> Trace {
        let headers = StringRecord::from(vec!["step", "dist_goal", "alpha"]);
        let rows = values
            .iter()
            .enumerate()
            .map(|(i, v)| StringRecord::from(vec![i.to_string(), v.to_string(), "0.5".to_string()]))
            .collect();
        Trace::new(headers, rows)
    }

    #[test]
    fn improving_series_summary() {
        let trace = trace_of(&["1.0", "0.5", "0.01"]);
        let series = distance_series(&trace).unwrap();
        let summary = TraceSummary::from_series(&series).unwrap();

        assert_eq!(summary.start, 1.0);
        assert_eq!(summary.min, 0.01);
        assert_eq!(summary.last, 0.01);
        assert_eq!(summary.impr_abs, 0.99);
        assert_eq!(summary.impr_rel, 0.99);
        assert_eq!(summary.verdict(DEFAULT_FINAL_DIST_THRESHOLD), Verdict::Pass);
    }

    #[test]
    fn regressed_series_fails() {
        let trace = trace_of(&["0.03", "0.05", "0.04"]);
        let series = distance_series(&trace).unwrap();
        let summary = TraceSummary::from_series(&series).unwrap();

        assert_eq!(summary.impr_abs, 0.03 - 0.04);
        assert_eq!(summary.verdict(DEFAULT_FINAL_DIST_THRESHOLD), Verdict::Fail);
    }

    #[test]
    fn single_step_already_at_goal_passes() {
        let trace = trace_of(&["0.01"]);
        let series = distance_series(&trace).unwrap();
        let summary = TraceSummary::from_series(&series).unwrap();

        assert_eq!(summary.start, summary.last);
        assert_eq!(summary.impr_abs, 0.0);
        assert_eq!(summary.verdict(DEFAULT_FINAL_DIST_THRESHOLD), Verdict::Pass);
    }

    #[test]
    fn unparseable_cell_is_rejected_with_row() {
        let trace = trace_of(&["1.0", "garbage", "0.5"]);
        let err = distance_series(&trace).unwrap_err();
        match err {
            TraceGateError::InvalidValue { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "garbage");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn literal_infinity_and_nan_are_rejected() {
        for bad in ["inf", "-inf", "nan", "NaN"] {
            let trace = trace_of(&["1.0", bad]);
            let err = distance_series(&trace).unwrap_err();
            assert_eq!(err.exit_code(), 4, "value {bad:?} should be invalid data");
        }
    }

    #[test]
    fn short_row_maps_to_sentinel_and_fails_validation() {
        let headers = StringRecord::from(vec!["step", "dist_goal"]);
        let rows = vec![
            StringRecord::from(vec!["0", "1.0"]),
            StringRecord::from(vec!["1"]),
        ];
        let trace = Trace::new(headers, rows);
        let err = distance_series(&trace).unwrap_err();
        match err {
            TraceGateError::InvalidValue { row, value } => {
                assert_eq!(row, 2);
                assert_eq!(value, "");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn missing_column_is_invalid_data() {
        let headers = StringRecord::from(vec!["step", "t_sec"]);
        let rows = vec![StringRecord::from(vec!["0", "0.0"])];
        let trace = Trace::new(headers, rows);
        let err = distance_series(&trace).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn zero_start_forces_zero_relative_improvement() {
        let summary = TraceSummary::from_series(&[0.0, 0.5, 0.3]).unwrap();
        assert_eq!(summary.impr_rel, 0.0);
        assert_eq!(summary.impr_abs, -0.3);
    }

    #[test]
    fn tiny_start_uses_denominator_floor() {
        let summary = TraceSummary::from_series(&[1e-12, 0.0]).unwrap();
        assert_eq!(summary.impr_rel, 1e-12 / REL_DENOM_FLOOR);
    }

    #[test]
    fn empty_series_has_no_summary() {
        assert_eq!(TraceSummary::from_series(&[]), None);
    }

    #[test]
    fn summary_line_format() {
        let summary = TraceSummary::from_series(&[1.0, 0.5, 0.01]).unwrap();
        assert_eq!(
            summary.summary_line(),
            "start=1.000000  min=0.010000  last=0.010000  imprAbs=0.990000  imprRel=0.990000"
        );
    }

    #[test]
    fn threshold_is_strict_less_than() {
        let summary = TraceSummary::from_series(&[0.02, 0.02]).unwrap();
        assert_eq!(summary.verdict(0.02), Verdict::Fail);
        assert_eq!(summary.verdict(0.021), Verdict::Pass);
    }
}
