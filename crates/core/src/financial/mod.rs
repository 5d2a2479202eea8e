//! Income and expense aggregation.
//!
//! Summaries, per-type breakdowns, monthly series, per-property NOI and the
//! profit and loss statement, all computed from ledger transactions.

pub mod service;
pub mod types;


pub use service::FinancialService;
pub use types::*;
