//! Current-month rent roll.
//!
//! One row per active lease stating whether this month's rent is paid,
//! overdue or upcoming, and how much is outstanding. Derivation is pure:
//! the same snapshot and instant always produce the same roll.

pub mod error;
pub mod query;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::RentRollError;
pub use query::{RentRollQuery, RentRollSortKey, SortDirection};
pub use service::RentRollService;
pub use types::*;
