//! Command-line arguments.

use std::path::PathBuf;

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use properly_core::reports::ReportKind;
use properly_core::rent_roll::{RentRollSortKey, RentStatus};

/// Rent roll and financial reports over a portfolio snapshot.
#[derive(Debug, Parser)]
#[command(name = "properly", version, about)]
pub struct Cli {
    /// Snapshot JSON file. Overrides `snapshot.path`.
    #[arg(long, global = true)]
    pub snapshot: Option<PathBuf>,

    /// Evaluation instant in RFC 3339. Defaults to the current time.
    #[arg(long, global = true)]
    pub now: Option<DateTime<Utc>>,

    /// Output format.
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Rows shown in table output. Overrides `report.preview_row_limit`.
    #[arg(long, global = true)]
    pub limit: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned text tables.
    Table,
    /// RFC 4180 CSV.
    Csv,
    /// Pretty-printed JSON.
    Json,
}

/// Rent roll sort column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortColumn {
    /// Tenant name.
    Tenant,
    /// Property name.
    Property,
    /// Unit name.
    Unit,
    /// Monthly rent.
    Rent,
    /// Outstanding balance.
    Balance,
    /// Due date.
    DueDate,
    /// Status.
    Status,
}

impl From<SortColumn> for RentRollSortKey {
    fn from(column: SortColumn) -> Self {
        match column {
            SortColumn::Tenant => Self::Tenant,
            SortColumn::Property => Self::Property,
            SortColumn::Unit => Self::Unit,
            SortColumn::Rent => Self::Rent,
            SortColumn::Balance => Self::Balance,
            SortColumn::DueDate => Self::DueDate,
            SortColumn::Status => Self::Status,
        }
    }
}

/// Subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Current-month rent roll with collection totals.
    RentRoll {
        /// Property name, or "All Properties".
        #[arg(long)]
        property: Option<String>,
        /// Only rows with this status (paid, overdue, upcoming).
        #[arg(long)]
        status: Option<RentStatus>,
        /// Case-insensitive text matched against tenant, property and unit.
        #[arg(long)]
        search: Option<String>,
        /// Sort column.
        #[arg(long, value_enum, default_value_t = SortColumn::DueDate)]
        sort: SortColumn,
        /// Sort descending.
        #[arg(long)]
        desc: bool,
        /// Leave out leases with several payments in the month.
        #[arg(long)]
        reject_duplicates: bool,
    },

    /// Build a reports-center report.
    Report {
        /// Report name, such as `rent-roll` or `vacancy`.
        kind: ReportKind,
        /// Earliest date, inclusive.
        #[arg(long)]
        from: Option<NaiveDate>,
        /// Latest date, inclusive.
        #[arg(long)]
        to: Option<NaiveDate>,
        /// Property name, or "All Properties".
        #[arg(long)]
        property: Option<String>,
        /// Owner name or id.
        #[arg(long)]
        owner: Option<String>,
    },

    /// List the available reports.
    Reports,

    /// Owner financial overview for one year.
    Overview {
        /// Owner name or id.
        owner: String,
        /// Calendar year. Defaults to the year of `--now`.
        #[arg(long)]
        year: Option<i32>,
    },

    /// Property manager dashboard.
    Dashboard,

    /// Capital projects and their budgets.
    Projects {
        /// Property name, or "All Properties".
        #[arg(long)]
        property: Option<String>,
    },
}
