//! Diagnostics for records left out of a computation.
//!
//! Malformed references never fail a computation. The offending record is
//! skipped and counted here so callers can surface "N records skipped".

use std::collections::BTreeMap;

use properly_shared::types::{BillingPeriod, LeaseId, PaymentId};
use serde::{Deserialize, Serialize};

/// Why a record was left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Payment references a lease that is not in the snapshot.
    OrphanPayment,
    /// Lease references a unit that is not in the snapshot.
    LeaseUnknownUnit,
    /// Lease references a tenant that is not in the snapshot.
    LeaseUnknownTenant,
    /// Transaction references a property that is not in the snapshot.
    TransactionUnknownProperty,
    /// Maintenance request references a property that is not in the snapshot.
    MaintenanceUnknownProperty,
    /// Lease has several payments in one billing period and duplicates are rejected.
    DuplicatePeriodPayment,
}

impl SkipReason {
    /// Human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::OrphanPayment => "payment references an unknown lease",
            Self::LeaseUnknownUnit => "lease references an unknown unit",
            Self::LeaseUnknownTenant => "lease references an unknown tenant",
            Self::TransactionUnknownProperty => "transaction references an unknown property",
            Self::MaintenanceUnknownProperty => "maintenance request references an unknown property",
            Self::DuplicatePeriodPayment => "lease has duplicate payments for the billing period",
        }
    }
}

/// Several payments of one lease fell in the same billing period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DuplicatePeriod {
    /// Lease with the duplicate payments.
    pub lease_id: LeaseId,
    /// Billing period matched.
    pub period: BillingPeriod,
    /// Number of payments found in the period.
    pub payment_count: usize,
    /// Payment used for the rent roll, if any.
    pub kept_payment_id: Option<PaymentId>,
}

/// Skipped-record counts and duplicate-period findings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostics {
    skipped: BTreeMap<SkipReason, usize>,
    duplicate_periods: Vec<DuplicatePeriod>,
}

impl Diagnostics {
    /// Creates empty diagnostics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one skipped record.
    pub fn record_skip(&mut self, reason: SkipReason) {
        self.record_skips(reason, 1);
    }

    /// Counts `count` skipped records.
    pub fn record_skips(&mut self, reason: SkipReason, count: usize) {
        if count > 0 {
            *self.skipped.entry(reason).or_insert(0) += count;
        }
    }

    /// Records a duplicate-period finding.
    pub fn record_duplicate(&mut self, duplicate: DuplicatePeriod) {
        self.duplicate_periods.push(duplicate);
    }

    /// Number of records skipped for `reason`.
    #[must_use]
    pub fn skip_count(&self, reason: SkipReason) -> usize {
        self.skipped.get(&reason).copied().unwrap_or(0)
    }

    /// Total number of skipped records.
    #[must_use]
    pub fn total_skipped(&self) -> usize {
        self.skipped.values().sum()
    }

    /// Skip counts by reason, in reason order.
    pub fn skipped(&self) -> impl Iterator<Item = (SkipReason, usize)> + '_ {
        self.skipped.iter().map(|(reason, count)| (*reason, *count))
    }

    /// Duplicate-period findings in discovery order.
    #[must_use]
    pub fn duplicate_periods(&self) -> &[DuplicatePeriod] {
        &self.duplicate_periods
    }

    /// Returns true if nothing was skipped and no duplicates were found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.duplicate_periods.is_empty()
    }

    /// Folds another set of diagnostics into this one.
    pub fn merge(&mut self, other: Self) {
        for (reason, count) in other.skipped {
            self.record_skips(reason, count);
        }
        self.duplicate_periods.extend(other.duplicate_periods);
    }
}
