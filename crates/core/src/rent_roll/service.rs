//! Rent roll derivation.

use chrono::{DateTime, Utc};
use properly_shared::DuplicatePaymentPolicy;
use properly_shared::types::money::{percent_of, sum_amounts};
use properly_shared::types::period::due_before;
use properly_shared::types::BillingPeriod;
use rayon::prelude::*;
use rust_decimal::Decimal;

use super::error::RentRollError;
use super::types::{
    PeriodMatch, RentEvaluation, RentRoll, RentRollItem, RentRollOptions, RentRollSummary,
    RentStatus,
};
use crate::diagnostics::{Diagnostics, DuplicatePeriod, SkipReason};
use crate::leasing::{Lease, Payment};
use crate::snapshot::{PortfolioSnapshot, SnapshotIndex};

/// Result of placing one lease on the roll.
enum LeaseOutcome {
    Listed(RentRollItem, Option<DuplicatePeriod>),
    Skipped(SkipReason, Option<DuplicatePeriod>),
}

/// Service for deriving the rent roll.
pub struct RentRollService;

impl RentRollService {
    /// Finds the payments of a lease due in `period`.
    ///
    /// `payments` must be in snapshot order; the first match wins.
    #[must_use]
    pub fn select_period_payment<'a>(
        payments: &[&'a Payment],
        period: BillingPeriod,
    ) -> PeriodMatch<'a> {
        let mut matching = payments
            .iter()
            .copied()
            .filter(|p| period.contains(p.due_date));
        let Some(first) = matching.next() else {
            return PeriodMatch::None;
        };
        let extra = matching.count();
        if extra == 0 {
            PeriodMatch::Single(first)
        } else {
            PeriodMatch::Duplicate {
                first,
                count: extra + 1,
            }
        }
    }

    /// Derives status and balance of a lease from the period's payment.
    ///
    /// Without a payment the rent is upcoming, due on the first of the month.
    #[must_use]
    pub fn evaluate(lease: &Lease, payment: Option<&Payment>, now: DateTime<Utc>) -> RentEvaluation {
        let Some(payment) = payment else {
            return RentEvaluation {
                due_date: BillingPeriod::containing_instant(now).first_day(),
                status: RentStatus::Upcoming,
                balance: Decimal::ZERO,
                payment_id: None,
            };
        };

        let status = if payment.is_paid() {
            RentStatus::Paid
        } else if due_before(payment.due_date, now) {
            RentStatus::Overdue
        } else {
            RentStatus::Upcoming
        };

        RentEvaluation {
            due_date: payment.due_date,
            status,
            balance: if status == RentStatus::Overdue {
                lease.monthly_rent
            } else {
                Decimal::ZERO
            },
            payment_id: Some(payment.id),
        }
    }

    /// Evaluates a lease for the month containing `now`.
    ///
    /// Duplicate payments in the month resolve to the first one.
    #[must_use]
    pub fn evaluate_lease(
        lease: &Lease,
        payments: &[&Payment],
        now: DateTime<Utc>,
    ) -> RentEvaluation {
        let period = BillingPeriod::containing_instant(now);
        Self::evaluate(lease, Self::select_period_payment(payments, period).first(), now)
    }

    /// Evaluates a lease, refusing inactive leases and duplicate payments.
    pub fn evaluate_lease_strict(
        lease: &Lease,
        payments: &[&Payment],
        now: DateTime<Utc>,
    ) -> Result<RentEvaluation, RentRollError> {
        if !lease.is_active() {
            return Err(RentRollError::InactiveLease(lease.id));
        }
        let period = BillingPeriod::containing_instant(now);
        match Self::select_period_payment(payments, period) {
            PeriodMatch::Duplicate { count, .. } => Err(RentRollError::DuplicatePeriodPayment {
                lease_id: lease.id,
                period,
                count,
            }),
            found => Ok(Self::evaluate(lease, found.first(), now)),
        }
    }

    /// Derives the rent roll of every active lease in the snapshot.
    ///
    /// Leases whose unit or tenant is missing are skipped and counted, as
    /// are payments referencing unknown leases. Rows keep lease order.
    #[must_use]
    pub fn derive(
        snapshot: &PortfolioSnapshot,
        now: DateTime<Utc>,
        options: RentRollOptions,
    ) -> RentRoll {
        Self::derive_with_index(&SnapshotIndex::new(snapshot), now, options)
    }

    /// [`Self::derive`] over an index the caller already built.
    #[must_use]
    pub fn derive_with_index(
        index: &SnapshotIndex<'_>,
        now: DateTime<Utc>,
        options: RentRollOptions,
    ) -> RentRoll {
        let period = BillingPeriod::containing_instant(now);

        let active: Vec<&Lease> = index.snapshot().leases.iter().filter(|l| l.is_active()).collect();
        let outcomes: Vec<LeaseOutcome> = active
            .par_iter()
            .map(|lease| Self::place_lease(index, lease, period, now, options))
            .collect();

        let mut diagnostics = Diagnostics::new();
        diagnostics.record_skips(SkipReason::OrphanPayment, index.orphan_payments().len());
        for orphan in index.orphan_payments() {
            tracing::debug!(
                payment_id = %orphan.id,
                lease_id = %orphan.lease_id,
                "skipping payment for unknown lease"
            );
        }

        let mut items = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            match outcome {
                LeaseOutcome::Listed(item, duplicate) => {
                    if let Some(duplicate) = duplicate {
                        diagnostics.record_duplicate(duplicate);
                    }
                    items.push(item);
                }
                LeaseOutcome::Skipped(reason, duplicate) => {
                    if let Some(duplicate) = duplicate {
                        diagnostics.record_duplicate(duplicate);
                    }
                    diagnostics.record_skip(reason);
                }
            }
        }

        if !diagnostics.is_clean() {
            tracing::warn!(
                period = %period,
                skipped = diagnostics.total_skipped(),
                duplicates = diagnostics.duplicate_periods().len(),
                "rent roll derived with diagnostics"
            );
        }

        RentRoll {
            as_of: now,
            period,
            items,
            diagnostics,
        }
    }

    fn place_lease(
        index: &SnapshotIndex<'_>,
        lease: &Lease,
        period: BillingPeriod,
        now: DateTime<Utc>,
        options: RentRollOptions,
    ) -> LeaseOutcome {
        let Some(location) = index.unit(lease.unit_id) else {
            tracing::debug!(lease_id = %lease.id, unit_id = %lease.unit_id, "skipping lease for unknown unit");
            return LeaseOutcome::Skipped(SkipReason::LeaseUnknownUnit, None);
        };
        let Some(tenant) = index.tenant(lease.tenant_id) else {
            tracing::debug!(lease_id = %lease.id, tenant_id = %lease.tenant_id, "skipping lease for unknown tenant");
            return LeaseOutcome::Skipped(SkipReason::LeaseUnknownTenant, None);
        };

        let found = Self::select_period_payment(index.payments_for(lease.id), period);
        let duplicate = match found {
            PeriodMatch::Duplicate { first, count } => {
                tracing::debug!(lease_id = %lease.id, period = %period, count, "duplicate period payments");
                let kept = match options.duplicate_policy {
                    DuplicatePaymentPolicy::FirstMatch => Some(first.id),
                    DuplicatePaymentPolicy::Reject => None,
                };
                Some(DuplicatePeriod {
                    lease_id: lease.id,
                    period,
                    payment_count: count,
                    kept_payment_id: kept,
                })
            }
            _ => None,
        };

        if options.duplicate_policy == DuplicatePaymentPolicy::Reject && duplicate.is_some() {
            return LeaseOutcome::Skipped(SkipReason::DuplicatePeriodPayment, duplicate);
        }

        let evaluation = Self::evaluate(lease, found.first(), now);
        let item = RentRollItem {
            id: lease.rent_roll_key(),
            lease_id: lease.id,
            tenant_id: lease.tenant_id,
            property_id: location.property.id,
            unit_id: location.unit.id,
            tenant_name: tenant.full_name(),
            property_name: location.property.name.clone(),
            unit_name: location.unit.name.clone(),
            rent: lease.monthly_rent,
            due_date: evaluation.due_date,
            status: evaluation.status,
            balance: evaluation.balance,
        };
        LeaseOutcome::Listed(item, duplicate)
    }

    /// Totals rent, collections and overdue balances.
    #[must_use]
    pub fn summarize<'a, I>(items: I) -> RentRollSummary
    where
        I: IntoIterator<Item = &'a RentRollItem>,
    {
        let items: Vec<&RentRollItem> = items.into_iter().collect();
        let total_rent = sum_amounts(items.iter().map(|i| i.rent));
        let total_collected = sum_amounts(
            items
                .iter()
                .filter(|i| i.status == RentStatus::Paid)
                .map(|i| i.rent),
        );
        let total_overdue = sum_amounts(
            items
                .iter()
                .filter(|i| i.status == RentStatus::Overdue)
                .map(|i| i.balance),
        );

        RentRollSummary {
            total_rent,
            total_collected,
            total_overdue,
            collection_rate: percent_of(total_collected, total_rent),
        }
    }
}
