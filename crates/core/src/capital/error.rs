//! Capital project error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised when recording project spend.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CapitalProjectError {
    /// Expense amounts must be positive.
    #[error("Expense amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
}
