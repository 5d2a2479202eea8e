//! Report error types.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur during report generation or export.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Invalid date range.
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidDateRange {
        /// Start date.
        start: NaiveDate,
        /// End date.
        end: NaiveDate,
    },

    /// Unknown report name.
    #[error("Unknown report: {0}")]
    UnknownReport(String),

    /// CSV writer failure.
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// Exported bytes were not valid UTF-8.
    #[error("CSV export produced invalid UTF-8")]
    Encoding,
}
