//! Text rendering for terminal output.

use std::io::{self, Write};

use properly_core::Diagnostics;
use properly_core::reports::{Cell, ReportTable};

const COLUMN_GAP: &str = "  ";

/// Writes `table` with aligned columns, showing at most `limit` rows.
pub fn write_table<W: Write>(out: &mut W, table: &ReportTable, limit: usize) -> io::Result<()> {
    let (rows, hidden) = table.preview(limit);
    let rendered: Vec<Vec<String>> = rows
        .iter()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect();

    let mut widths: Vec<usize> = table.columns.iter().map(|c| c.chars().count()).collect();
    for row in &rendered {
        for (width, text) in widths.iter_mut().zip(row) {
            *width = (*width).max(text.chars().count());
        }
    }

    writeln!(out, "{}", table.title)?;
    let header: Vec<String> = table
        .columns
        .iter()
        .zip(&widths)
        .map(|(name, width)| format!("{name:<width$}"))
        .collect();
    writeln!(out, "{}", header.join(COLUMN_GAP).trim_end())?;
    let rule: Vec<String> = widths.iter().map(|width| "-".repeat(*width)).collect();
    writeln!(out, "{}", rule.join(COLUMN_GAP))?;

    if rendered.is_empty() {
        writeln!(out, "No data available for the selected filters.")?;
    }
    for (cells, texts) in rows.iter().zip(&rendered) {
        let line: Vec<String> = cells
            .iter()
            .zip(texts)
            .zip(&widths)
            .map(|((cell, text), width)| {
                if is_numeric(cell) {
                    format!("{text:>width$}")
                } else {
                    format!("{text:<width$}")
                }
            })
            .collect();
        writeln!(out, "{}", line.join(COLUMN_GAP).trim_end())?;
    }

    if hidden > 0 {
        writeln!(out, "... {hidden} more rows")?;
    }
    Ok(())
}

fn is_numeric(cell: &Cell) -> bool {
    matches!(
        cell,
        Cell::Money(_) | Cell::Count(_) | Cell::Decimal(_) | Cell::Percent(_)
    )
}

/// One-line summary of skipped records, if any.
pub fn skipped_note(diagnostics: &Diagnostics) -> Option<String> {
    let mut parts: Vec<String> = diagnostics
        .skipped()
        .map(|(reason, count)| format!("{} ({count})", reason.description()))
        .collect();
    let duplicates = diagnostics.duplicate_periods().len();
    if duplicates > 0 {
        parts.push(format!("{duplicates} lease(s) with duplicate payments this period"));
    }
    if parts.is_empty() {
        return None;
    }

    let total = diagnostics.total_skipped();
    Some(format!("Note: {total} records skipped; {}", parts.join(", ")))
}

/// Writes the skipped-records note when there is one.
pub fn write_note<W: Write>(out: &mut W, diagnostics: &Diagnostics) -> io::Result<()> {
    if let Some(note) = skipped_note(diagnostics) {
        writeln!(out)?;
        writeln!(out, "{note}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use properly_core::SkipReason;
    use rust_decimal_macros::dec;

    fn render(table: &ReportTable, limit: usize) -> String {
        let mut out = Vec::new();
        write_table(&mut out, table, limit).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_table_aligns_and_truncates() {
        let table = ReportTable::new(
            "Vacancy Report",
            &["Unit", "Market Rent"],
            vec![
                vec![Cell::text("102"), Cell::Money(dec!(1500))],
                vec![Cell::text("202"), Cell::Money(dec!(1650))],
                vec![Cell::text("303"), Cell::Empty],
            ],
        );

        let text = render(&table, 2);

        assert_eq!(
            text,
            "Vacancy Report\n\
             Unit  Market Rent\n\
             ----  -----------\n\
             102     $1,500.00\n\
             202     $1,650.00\n\
             ... 1 more rows\n"
        );
    }

    #[test]
    fn test_empty_table_says_so() {
        let table = ReportTable::new("Rent Roll", &["Tenant"], Vec::new());

        assert!(render(&table, 10).contains("No data available"));
    }

    #[test]
    fn test_skipped_note() {
        let mut diagnostics = Diagnostics::new();
        assert_eq!(skipped_note(&diagnostics), None);

        diagnostics.record_skips(SkipReason::OrphanPayment, 2);
        let note = skipped_note(&diagnostics).unwrap();

        assert!(note.starts_with("Note: 2 records skipped"));
        assert!(note.contains("payment references an unknown lease (2)"));
    }
}
