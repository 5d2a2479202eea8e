//! Rent roll error types.

use properly_shared::types::{BillingPeriod, LeaseId};
use thiserror::Error;

/// Errors raised by strict rent roll evaluation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RentRollError {
    /// More than one payment of the lease is due in the period.
    #[error("Lease {lease_id} has {count} payments due in {period}")]
    DuplicatePeriodPayment {
        /// Lease.
        lease_id: LeaseId,
        /// Billing period.
        period: BillingPeriod,
        /// Payments found.
        count: usize,
    },

    /// Only active leases appear on the rent roll.
    #[error("Lease {0} is not active")]
    InactiveLease(LeaseId),
}
