//! Report types.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use properly_shared::types::money::{format_usd, round_money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::ReportError;
use crate::diagnostics::Diagnostics;

/// Shown for a cell with no value.
pub const EMPTY_CELL: &str = "—";

/// A typed table cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum Cell {
    /// Free text.
    Text(String),
    /// Currency amount.
    Money(Decimal),
    /// Whole count.
    Count(usize),
    /// Plain number, such as bathrooms.
    Decimal(Decimal),
    /// Percentage, 0-100.
    Percent(Decimal),
    /// Calendar date.
    Date(NaiveDate),
    /// No value.
    Empty,
}

impl Cell {
    /// Text cell.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Date cell, or empty.
    #[must_use]
    pub fn date_or_empty(date: Option<NaiveDate>) -> Self {
        date.map_or(Self::Empty, Self::Date)
    }

    /// Text cell, or empty.
    #[must_use]
    pub fn text_or_empty(value: Option<&str>) -> Self {
        value.map_or(Self::Empty, Self::text)
    }

    /// Machine-readable value used for CSV. Empty cells stay empty.
    #[must_use]
    pub fn plain(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Money(amount) => format!("{:.2}", round_money(*amount)),
            Self::Count(count) => count.to_string(),
            Self::Decimal(value) => value.normalize().to_string(),
            Self::Percent(value) => format!("{:.2}", value.round_dp(2)),
            Self::Date(date) => date.format("%Y-%m-%d").to_string(),
            Self::Empty => String::new(),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Money(amount) => f.write_str(&format_usd(*amount)),
            Self::Percent(value) => write!(f, "{:.2}%", value.round_dp(2)),
            Self::Empty => f.write_str(EMPTY_CELL),
            other => f.write_str(&other.plain()),
        }
    }
}

/// A titled table of typed cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTable {
    /// Report title.
    pub title: String,
    /// Column headers.
    pub columns: Vec<String>,
    /// Rows, each as long as `columns`.
    pub rows: Vec<Vec<Cell>>,
}

impl ReportTable {
    /// Creates a table with the given columns and rows.
    #[must_use]
    pub fn new(title: impl Into<String>, columns: &[&str], rows: Vec<Vec<Cell>>) -> Self {
        Self {
            title: title.into(),
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            rows,
        }
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// At most `limit` rows, plus how many were left out.
    #[must_use]
    pub fn preview(&self, limit: usize) -> (&[Vec<Cell>], usize) {
        let shown = self.rows.len().min(limit);
        (&self.rows[..shown], self.rows.len() - shown)
    }
}

/// A built report with the records it had to leave out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportOutput {
    /// The table.
    pub table: ReportTable,
    /// Records left out.
    pub diagnostics: Diagnostics,
}

/// Reports offered by the reports center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    /// Current-month rent roll.
    RentRoll,
    /// Profit and loss statement.
    ProfitAndLoss,
    /// Income, expenses and NOI totals.
    OwnerStatement,
    /// Tenant contact list.
    TenantDirectory,
    /// Lease end dates.
    LeaseExpiration,
    /// Vacant units.
    Vacancy,
    /// Requests not yet completed.
    OpenMaintenance,
    /// All requests by submission date.
    MaintenanceHistory,
    /// Per-property occupancy and revenue.
    PropertyPortfolio,
}

impl ReportKind {
    /// Every report, in catalogue order.
    pub const ALL: [Self; 9] = [
        Self::RentRoll,
        Self::ProfitAndLoss,
        Self::OwnerStatement,
        Self::TenantDirectory,
        Self::LeaseExpiration,
        Self::Vacancy,
        Self::OpenMaintenance,
        Self::MaintenanceHistory,
        Self::PropertyPortfolio,
    ];

    /// Command-line name.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::RentRoll => "rent-roll",
            Self::ProfitAndLoss => "profit-and-loss",
            Self::OwnerStatement => "owner-statement",
            Self::TenantDirectory => "tenant-directory",
            Self::LeaseExpiration => "lease-expiration",
            Self::Vacancy => "vacancy",
            Self::OpenMaintenance => "open-maintenance",
            Self::MaintenanceHistory => "maintenance-history",
            Self::PropertyPortfolio => "property-portfolio",
        }
    }

    /// Display title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::RentRoll => "Rent Roll",
            Self::ProfitAndLoss => "Profit & Loss Statement",
            Self::OwnerStatement => "Owner Statement",
            Self::TenantDirectory => "Tenant Directory",
            Self::LeaseExpiration => "Lease Expiration Report",
            Self::Vacancy => "Vacancy Report",
            Self::OpenMaintenance => "Open Maintenance Requests",
            Self::MaintenanceHistory => "Maintenance History",
            Self::PropertyPortfolio => "Property Portfolio",
        }
    }

    /// Column headers.
    #[must_use]
    pub const fn columns(self) -> &'static [&'static str] {
        match self {
            Self::RentRoll => &["Tenant", "Property", "Unit", "Rent", "Balance", "Due Date", "Status"],
            Self::ProfitAndLoss => &["Section", "Account", "Amount"],
            Self::OwnerStatement => &["Category", "Amount"],
            Self::TenantDirectory => &["Name", "Email", "Phone", "Property", "Unit", "Status"],
            Self::LeaseExpiration => &["Tenant", "Property", "Unit", "Lease End Date"],
            Self::Vacancy => &["Property", "Unit", "Market Rent", "Beds", "Baths"],
            Self::OpenMaintenance | Self::MaintenanceHistory => {
                &["Issue", "Property", "Unit", "Priority", "Status", "Submitted"]
            }
            Self::PropertyPortfolio => &[
                "Name",
                "Address",
                "Owner",
                "Total Units",
                "Occupied",
                "Vacant",
                "Revenue",
            ],
        }
    }

    /// Returns true if the date bounds of a filter apply to this report.
    #[must_use]
    pub const fn is_dated(self) -> bool {
        matches!(
            self,
            Self::RentRoll
                | Self::ProfitAndLoss
                | Self::OwnerStatement
                | Self::LeaseExpiration
                | Self::MaintenanceHistory
        )
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for ReportKind {
    type Err = ReportError;

    /// Accepts the slug or the title, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| {
                kind.slug().eq_ignore_ascii_case(wanted) || kind.title().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| ReportError::UnknownReport(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case(Cell::Money(dec!(1800)), "$1,800.00", "1800.00")]
    #[case(Cell::Count(0), "0", "0")]
    #[case(Cell::Decimal(dec!(1.50)), "1.5", "1.5")]
    #[case(Cell::Percent(dec!(83.333)), "83.33%", "83.33")]
    #[case(Cell::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()), "2024-03-01", "2024-03-01")]
    #[case(Cell::Empty, "—", "")]
    fn test_cell_rendering(#[case] cell: Cell, #[case] shown: &str, #[case] plain: &str) {
        assert_eq!(cell.to_string(), shown);
        assert_eq!(cell.plain(), plain);
    }

    #[test]
    fn test_kind_parses_slug_and_title() {
        assert_eq!("vacancy".parse::<ReportKind>().unwrap(), ReportKind::Vacancy);
        assert_eq!(
            "Profit & Loss Statement".parse::<ReportKind>().unwrap(),
            ReportKind::ProfitAndLoss
        );
        assert!(matches!(
            "budget".parse::<ReportKind>(),
            Err(ReportError::UnknownReport(_))
        ));
    }

    #[test]
    fn test_preview_reports_hidden_rows() {
        let rows = (0..5).map(|i| vec![Cell::Count(i)]).collect();
        let table = ReportTable::new("Counts", &["N"], rows);

        let (shown, hidden) = table.preview(3);
        assert_eq!(shown.len(), 3);
        assert_eq!(hidden, 2);
        assert_eq!(table.preview(10).1, 0);
    }
}
