//! CSV export.
//!
//! Fields are quoted per RFC 4180, so names containing commas, quotes or
//! newlines survive a round trip through a spreadsheet.

use std::io::Write;

use csv::Writer;

use super::error::ReportError;
use super::types::ReportTable;

/// Writes `table` as CSV, header first.
pub fn write_csv<W: Write>(table: &ReportTable, out: W) -> Result<(), ReportError> {
    let mut wtr = Writer::from_writer(out);
    wtr.write_record(&table.columns)?;
    for row in &table.rows {
        wtr.write_record(row.iter().map(super::types::Cell::plain))?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Renders `table` as a CSV string.
pub fn to_csv(table: &ReportTable) -> Result<String, ReportError> {
    let mut buffer = Vec::new();
    write_csv(table, &mut buffer)?;
    String::from_utf8(buffer).map_err(|_| ReportError::Encoding)
}
