//! Core business logic for Properly.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Every computation reads an immutable [`snapshot::PortfolioSnapshot`] and
//! returns plain values; nothing is cached or written back.
//!
//! # Modules
//!
//! - `rent_roll` - Current-month rent status and balances per active lease
//! - `property` - Occupancy and revenue roll-ups
//! - `financial` - Income, expense, NOI and P&L aggregation
//! - `reports` - Reports center tables and CSV export
//! - `dashboard` - Property manager dashboard
//! - `capital` - Capital project budgets
//! - `diagnostics` - Records skipped for broken references

pub mod capital;
pub mod dashboard;
pub mod diagnostics;
pub mod financial;
pub mod leasing;
pub mod maintenance;
pub mod property;
pub mod rent_roll;
pub mod reports;
pub mod snapshot;

pub use diagnostics::{Diagnostics, SkipReason};
pub use snapshot::PortfolioSnapshot;
