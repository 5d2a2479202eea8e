//! Reports center.
//!
//! Every report is a filter over one record set followed by a projection
//! into a [`ReportTable`]:
//! - Rent Roll
//! - Profit & Loss Statement
//! - Owner Statement
//! - Tenant Directory
//! - Lease Expiration Report
//! - Vacancy Report
//! - Open Maintenance Requests
//! - Maintenance History
//! - Property Portfolio
//!
//! Truncating tables for display is left to the caller.

pub mod error;
pub mod export;
pub mod filter;
pub mod query;
pub mod service;
pub mod types;


pub use error::ReportError;
pub use export::{to_csv, write_csv};
pub use filter::{ALL_PROPERTIES, PropertyScope, ReportFilter};
pub use query::ReportQuery;
pub use service::ReportService;
pub use types::*;
