//! Capital improvement projects and their spend against budget.

pub mod error;
pub mod types;

pub use error::CapitalProjectError;
pub use types::{CapitalProject, CapitalProjectStatus, ProjectExpense};
