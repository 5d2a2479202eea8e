//! Lease and payment records as supplied by the persistence layer.

use chrono::NaiveDate;
use properly_shared::types::{LeaseId, PaymentId, TenantId, UnitId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a lease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeaseStatus {
    /// Tenant currently occupies the unit under this lease.
    Active,
    /// Tenant has moved out.
    Ended,
    /// Signed but not yet started.
    Future,
}

/// A lease binding a tenant to a unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lease {
    /// Unique identifier.
    pub id: LeaseId,
    /// Leased unit.
    pub unit_id: UnitId,
    /// Tenant on the lease.
    pub tenant_id: TenantId,
    /// Rent charged per billing period.
    pub monthly_rent: Decimal,
    /// Lifecycle status.
    pub status: LeaseStatus,
    /// First day of the lease.
    pub start_date: NaiveDate,
    /// Last day of the lease, if fixed-term.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl Lease {
    /// Returns true if the lease is active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == LeaseStatus::Active
    }

    /// Key identifying this lease and tenant pair on the rent roll.
    #[must_use]
    pub fn rent_roll_key(&self) -> String {
        format!("{}-{}", self.id, self.tenant_id)
    }
}

/// Persisted payment status.
///
/// `Upcoming` and `Overdue` are never stored; they are derived on the rent
/// roll from the due date (see `RentStatus`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Submitted to the processor, outcome unknown.
    Processing,
    /// Funds received.
    Paid,
    /// Processor declined or reversed the payment.
    Failed,
}

/// How a payment was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Credit or debit card.
    Card,
    /// ACH or bank transfer.
    BankTransfer,
    /// Cash.
    Cash,
    /// Paper check.
    Check,
    /// Anything else.
    Other,
}

/// One billing period's charge for one lease.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    /// Unique identifier.
    pub id: PaymentId,
    /// Lease being charged.
    pub lease_id: LeaseId,
    /// Paying tenant.
    pub tenant_id: TenantId,
    /// Amount charged.
    pub amount: Decimal,
    /// Date the charge falls due.
    pub due_date: NaiveDate,
    /// Date funds were received.
    #[serde(default)]
    pub paid_date: Option<NaiveDate>,
    /// Persisted status.
    pub status: PaymentStatus,
    /// Payment method.
    pub payment_method: PaymentMethod,
}

impl Payment {
    /// Returns true if the payment has been received.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.status == PaymentStatus::Paid
    }
}
