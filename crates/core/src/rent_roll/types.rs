//! Rent roll types.

use chrono::{DateTime, NaiveDate, Utc};
use properly_shared::DuplicatePaymentPolicy;
use properly_shared::config::ReportConfig;
use properly_shared::types::{BillingPeriod, LeaseId, PaymentId, PropertyId, TenantId, UnitId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostics;
use crate::leasing::Payment;

/// Derived status of this month's rent.
///
/// Never stored; computed from the persisted payment status and due date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RentStatus {
    /// The period's payment succeeded.
    Paid,
    /// The period's payment is unpaid and its due date has passed.
    Overdue,
    /// Not yet due, or no payment recorded for the period.
    Upcoming,
}

impl RentStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 3] = [Self::Paid, Self::Overdue, Self::Upcoming];

    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Paid => "Paid",
            Self::Overdue => "Overdue",
            Self::Upcoming => "Upcoming",
        }
    }
}

impl std::fmt::Display for RentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for RentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown rent status: {s}"))
    }
}

/// Payment found for a lease in a billing period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodMatch<'a> {
    /// No payment due in the period.
    None,
    /// Exactly one payment.
    Single(&'a Payment),
    /// Several payments; `first` is the earliest in snapshot order.
    Duplicate {
        /// First payment in snapshot order.
        first: &'a Payment,
        /// Number of payments in the period.
        count: usize,
    },
}

impl<'a> PeriodMatch<'a> {
    /// The payment used for the rent roll under first-match semantics.
    #[must_use]
    pub fn first(self) -> Option<&'a Payment> {
        match self {
            Self::None => None,
            Self::Single(payment) | Self::Duplicate { first: payment, .. } => Some(payment),
        }
    }
}

/// Due date, status and balance of one lease for the period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentEvaluation {
    /// Due date of the period's payment, or the first of the month.
    pub due_date: NaiveDate,
    /// Derived status.
    pub status: RentStatus,
    /// Outstanding amount, the monthly rent when overdue.
    pub balance: Decimal,
    /// Payment the evaluation is based on.
    pub payment_id: Option<PaymentId>,
}

/// One rent roll row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentRollItem {
    /// "{lease id}-{tenant id}".
    pub id: String,
    /// Lease.
    pub lease_id: LeaseId,
    /// Tenant.
    pub tenant_id: TenantId,
    /// Property containing the unit.
    pub property_id: PropertyId,
    /// Leased unit.
    pub unit_id: UnitId,
    /// Tenant full name.
    pub tenant_name: String,
    /// Property name.
    pub property_name: String,
    /// Unit name.
    pub unit_name: String,
    /// Monthly rent on the lease.
    pub rent: Decimal,
    /// Due date for the period.
    pub due_date: NaiveDate,
    /// Derived status.
    pub status: RentStatus,
    /// Outstanding amount.
    pub balance: Decimal,
}

/// The rent roll for the month containing `as_of`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentRoll {
    /// Instant the roll was derived at.
    pub as_of: DateTime<Utc>,
    /// Billing period covered.
    pub period: BillingPeriod,
    /// Rows in lease order.
    pub items: Vec<RentRollItem>,
    /// Records left out.
    pub diagnostics: Diagnostics,
}

/// Totals over a set of rent roll rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentRollSummary {
    /// Sum of rent.
    pub total_rent: Decimal,
    /// Sum of rent on paid rows.
    pub total_collected: Decimal,
    /// Sum of balances on overdue rows.
    pub total_overdue: Decimal,
    /// Collected as a percentage of rent, 0 when no rent is due.
    pub collection_rate: Decimal,
}

/// Rent roll derivation options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RentRollOptions {
    /// Handling of several payments in one period.
    pub duplicate_policy: DuplicatePaymentPolicy,
}

impl From<&ReportConfig> for RentRollOptions {
    fn from(config: &ReportConfig) -> Self {
        Self {
            duplicate_policy: config.duplicate_payment_policy,
        }
    }
}
