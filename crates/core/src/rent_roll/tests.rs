//! Tests for rent roll derivation, summary and queries.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use properly_shared::DuplicatePaymentPolicy;
use properly_shared::types::{
    BuildingId, LeaseId, OwnerId, PaymentId, PropertyId, TenantId, UnitId,
};
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::error::RentRollError;
use super::query::{RentRollQuery, RentRollSortKey, SortDirection};
use super::service::RentRollService;
use super::types::{RentRollOptions, RentStatus};
use crate::diagnostics::SkipReason;
use crate::leasing::{Lease, LeaseStatus, Payment, PaymentMethod, PaymentStatus};
use crate::property::{Building, Property, Unit};
use crate::reports::PropertyScope;
use crate::snapshot::{PortfolioSnapshot, SnapshotIndex, Tenant, TenantStatus};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn mid_march() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
}

fn lease(rent: Decimal) -> Lease {
    Lease {
        id: LeaseId::new(),
        unit_id: UnitId::new(),
        tenant_id: TenantId::new(),
        monthly_rent: rent,
        status: LeaseStatus::Active,
        start_date: date(2023, 9, 1),
        end_date: Some(date(2024, 8, 31)),
    }
}

fn payment(lease: &Lease, due_date: NaiveDate, status: PaymentStatus) -> Payment {
    Payment {
        id: PaymentId::new(),
        lease_id: lease.id,
        tenant_id: lease.tenant_id,
        amount: lease.monthly_rent,
        due_date,
        paid_date: (status == PaymentStatus::Paid).then_some(due_date),
        status,
        payment_method: PaymentMethod::BankTransfer,
    }
}

/// Builds a snapshot with one property holding a unit per lease, plus a
/// tenant per lease, so every lease reference resolves.
struct Fixture {
    snapshot: PortfolioSnapshot,
}

impl Fixture {
    fn new(property_name: &str) -> Self {
        let property = Property {
            id: PropertyId::new(),
            name: property_name.to_string(),
            address: "100 Main St".to_string(),
            owner_id: OwnerId::new(),
            manager_id: None,
            buildings: vec![Building {
                id: BuildingId::new(),
                name: "Building A".to_string(),
                units: Vec::new(),
            }],
        };
        Self {
            snapshot: PortfolioSnapshot {
                properties: vec![property],
                ..PortfolioSnapshot::default()
            },
        }
    }

    fn with_lease(mut self, lease: &Lease, unit_name: &str, tenant_name: &str) -> Self {
        let (first, last) = tenant_name.split_once(' ').unwrap_or((tenant_name, ""));
        self.snapshot.properties[0].buildings[0].units.push(Unit {
            id: lease.unit_id,
            name: unit_name.to_string(),
            bedrooms: 2,
            bathrooms: dec!(1),
            square_feet: 900,
            monthly_rent: lease.monthly_rent,
            tenants: Vec::new(),
        });
        self.snapshot.tenants.push(Tenant {
            id: lease.tenant_id,
            first_name: first.to_string(),
            last_name: last.to_string(),
            email: String::new(),
            phone: String::new(),
            status: TenantStatus::Active,
        });
        self.snapshot.leases.push(lease.clone());
        self
    }

    fn with_payment(mut self, payment: Payment) -> Self {
        self.snapshot.payments.push(payment);
        self
    }
}

#[test]
fn test_no_payment_is_upcoming_on_first_of_month() {
    let lease = lease(dec!(1800));

    let evaluation = RentRollService::evaluate_lease(&lease, &[], mid_march());

    assert_eq!(evaluation.status, RentStatus::Upcoming);
    assert_eq!(evaluation.due_date, date(2024, 3, 1));
    assert_eq!(evaluation.balance, Decimal::ZERO);
    assert_eq!(evaluation.payment_id, None);
}

#[test]
fn test_failed_payment_past_due_is_overdue() {
    let lease = lease(dec!(1800));
    let failed = payment(&lease, date(2024, 3, 1), PaymentStatus::Failed);

    let evaluation = RentRollService::evaluate_lease(&lease, &[&failed], mid_march());

    assert_eq!(evaluation.status, RentStatus::Overdue);
    assert_eq!(evaluation.balance, dec!(1800));
    assert_eq!(evaluation.payment_id, Some(failed.id));
}

#[rstest]
#[case::paid_before_due(PaymentStatus::Paid, date(2024, 3, 20), RentStatus::Paid)]
#[case::paid_after_due(PaymentStatus::Paid, date(2024, 3, 1), RentStatus::Paid)]
#[case::processing_not_due(PaymentStatus::Processing, date(2024, 3, 20), RentStatus::Upcoming)]
#[case::processing_past_due(PaymentStatus::Processing, date(2024, 3, 10), RentStatus::Overdue)]
#[case::due_today(PaymentStatus::Processing, date(2024, 3, 15), RentStatus::Overdue)]
#[case::failed_not_due(PaymentStatus::Failed, date(2024, 3, 31), RentStatus::Upcoming)]
fn test_status_derivation(
    #[case] stored: PaymentStatus,
    #[case] due_date: NaiveDate,
    #[case] expected: RentStatus,
) {
    let lease = lease(dec!(1250));
    let recorded = payment(&lease, due_date, stored);

    let evaluation = RentRollService::evaluate_lease(&lease, &[&recorded], mid_march());

    assert_eq!(evaluation.status, expected);
    assert_eq!(evaluation.due_date, due_date);
    let expected_balance = if expected == RentStatus::Overdue {
        dec!(1250)
    } else {
        Decimal::ZERO
    };
    assert_eq!(evaluation.balance, expected_balance);
}

#[test]
fn test_payment_in_other_month_is_ignored() {
    let lease = lease(dec!(1800));
    let february = payment(&lease, date(2024, 2, 1), PaymentStatus::Failed);
    let last_march = payment(&lease, date(2023, 3, 1), PaymentStatus::Failed);

    let evaluation =
        RentRollService::evaluate_lease(&lease, &[&february, &last_march], mid_march());

    assert_eq!(evaluation.status, RentStatus::Upcoming);
    assert_eq!(evaluation.due_date, date(2024, 3, 1));
}

#[test]
fn test_duplicate_period_first_match_wins() {
    let lease = lease(dec!(1800));
    let paid = payment(&lease, date(2024, 3, 1), PaymentStatus::Paid);
    let failed = payment(&lease, date(2024, 3, 2), PaymentStatus::Failed);

    let evaluation = RentRollService::evaluate_lease(&lease, &[&paid, &failed], mid_march());

    assert_eq!(evaluation.status, RentStatus::Paid);
    assert_eq!(evaluation.payment_id, Some(paid.id));
}

#[test]
fn test_strict_evaluation_rejects_duplicates_and_inactive_leases() {
    let mut lease = lease(dec!(1800));
    let first = payment(&lease, date(2024, 3, 1), PaymentStatus::Paid);
    let second = payment(&lease, date(2024, 3, 2), PaymentStatus::Paid);

    let result = RentRollService::evaluate_lease_strict(&lease, &[&first, &second], mid_march());
    assert_eq!(
        result,
        Err(RentRollError::DuplicatePeriodPayment {
            lease_id: lease.id,
            period: properly_shared::types::BillingPeriod { year: 2024, month: 3 },
            count: 2,
        })
    );

    assert!(RentRollService::evaluate_lease_strict(&lease, &[&first], mid_march()).is_ok());

    lease.status = LeaseStatus::Ended;
    assert_eq!(
        RentRollService::evaluate_lease_strict(&lease, &[], mid_march()),
        Err(RentRollError::InactiveLease(lease.id))
    );
}

#[test]
fn test_derive_joins_names_and_keeps_lease_order() {
    let sam = lease(dec!(1800));
    let ana = lease(dec!(2100));
    let mut ended = lease(dec!(900));
    ended.status = LeaseStatus::Ended;

    let fixture = Fixture::new("Sunset Apartments")
        .with_lease(&sam, "2A", "Sam Lee")
        .with_lease(&ended, "2C", "Old Tenant")
        .with_lease(&ana, "1B", "Ana Ruiz")
        .with_payment(payment(&ana, date(2024, 3, 1), PaymentStatus::Failed));

    let roll = RentRollService::derive(&fixture.snapshot, mid_march(), RentRollOptions::default());

    assert_eq!(roll.items.len(), 2);
    assert_eq!(roll.items[0].tenant_name, "Sam Lee");
    assert_eq!(roll.items[0].property_name, "Sunset Apartments");
    assert_eq!(roll.items[0].unit_name, "2A");
    assert_eq!(roll.items[0].id, format!("{}-{}", sam.id, sam.tenant_id));
    assert_eq!(roll.items[1].status, RentStatus::Overdue);
    assert_eq!(roll.items[1].balance, dec!(2100));
    assert!(roll.diagnostics.is_clean());
}

#[test]
fn test_derive_with_shared_index_matches_derive() {
    let sam = lease(dec!(1800));
    let fixture = Fixture::new("Sunset Apartments")
        .with_lease(&sam, "2A", "Sam Lee")
        .with_payment(payment(&sam, date(2024, 3, 1), PaymentStatus::Paid));
    let index = SnapshotIndex::new(&fixture.snapshot);

    let shared = RentRollService::derive_with_index(&index, mid_march(), RentRollOptions::default());
    let owned = RentRollService::derive(&fixture.snapshot, mid_march(), RentRollOptions::default());

    assert_eq!(shared, owned);
    assert_eq!(shared.items[0].status, RentStatus::Paid);
}

#[test]
fn test_derive_skips_broken_references() {
    let good = lease(dec!(1500));
    let no_unit = lease(dec!(1600));
    let no_tenant = lease(dec!(1700));

    let mut fixture = Fixture::new("Oak Grove")
        .with_lease(&good, "1", "Kim Park")
        .with_lease(&no_tenant, "3", "Ghost Tenant");
    fixture.snapshot.tenants.retain(|t| t.id != no_tenant.tenant_id);
    fixture.snapshot.leases.push(no_unit.clone());
    let orphan_lease = lease(dec!(1));
    fixture.snapshot.payments.push(payment(&orphan_lease, date(2024, 3, 1), PaymentStatus::Paid));

    let roll = RentRollService::derive(&fixture.snapshot, mid_march(), RentRollOptions::default());

    assert_eq!(roll.items.len(), 1);
    assert_eq!(roll.diagnostics.skip_count(SkipReason::LeaseUnknownUnit), 1);
    assert_eq!(roll.diagnostics.skip_count(SkipReason::LeaseUnknownTenant), 1);
    assert_eq!(roll.diagnostics.skip_count(SkipReason::OrphanPayment), 1);
    assert_eq!(roll.diagnostics.total_skipped(), 3);
}

#[test]
fn test_duplicate_policies() {
    let lease = lease(dec!(1800));
    let paid = payment(&lease, date(2024, 3, 1), PaymentStatus::Paid);
    let retry = payment(&lease, date(2024, 3, 3), PaymentStatus::Failed);
    let fixture = Fixture::new("Maple Court")
        .with_lease(&lease, "4D", "Lee Chan")
        .with_payment(paid.clone())
        .with_payment(retry);

    let first_match = RentRollService::derive(&fixture.snapshot, mid_march(), RentRollOptions::default());
    assert_eq!(first_match.items.len(), 1);
    assert_eq!(first_match.items[0].status, RentStatus::Paid);
    let duplicates = first_match.diagnostics.duplicate_periods();
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].payment_count, 2);
    assert_eq!(duplicates[0].kept_payment_id, Some(paid.id));
    assert_eq!(first_match.diagnostics.total_skipped(), 0);

    let reject = RentRollService::derive(
        &fixture.snapshot,
        mid_march(),
        RentRollOptions {
            duplicate_policy: DuplicatePaymentPolicy::Reject,
        },
    );
    assert!(reject.items.is_empty());
    assert_eq!(reject.diagnostics.skip_count(SkipReason::DuplicatePeriodPayment), 1);
    assert_eq!(reject.diagnostics.duplicate_periods()[0].kept_payment_id, None);
}

#[test]
fn test_empty_snapshot_gives_empty_roll() {
    let roll = RentRollService::derive(&PortfolioSnapshot::default(), mid_march(), RentRollOptions::default());

    assert!(roll.items.is_empty());
    assert_eq!(roll.period.month, 3);
    assert_eq!(RentRollService::summarize(&roll.items).collection_rate, Decimal::ZERO);
}

#[test]
fn test_summary_totals() {
    let paid = lease(dec!(1000));
    let overdue = lease(dec!(1500));
    let upcoming = lease(dec!(2500));
    let fixture = Fixture::new("Pine Ridge")
        .with_lease(&paid, "1", "A Tenant")
        .with_lease(&overdue, "2", "B Tenant")
        .with_lease(&upcoming, "3", "C Tenant")
        .with_payment(payment(&paid, date(2024, 3, 1), PaymentStatus::Paid))
        .with_payment(payment(&overdue, date(2024, 3, 1), PaymentStatus::Processing));

    let roll = RentRollService::derive(&fixture.snapshot, mid_march(), RentRollOptions::default());
    let summary = RentRollService::summarize(&roll.items);

    assert_eq!(summary.total_rent, dec!(5000));
    assert_eq!(summary.total_collected, dec!(1000));
    assert_eq!(summary.total_overdue, dec!(1500));
    assert_eq!(summary.collection_rate, dec!(20));
}

#[test]
fn test_query_filters_search_and_sort() {
    let a = lease(dec!(1000));
    let b = lease(dec!(3000));
    let c = lease(dec!(2000));
    let mut fixture = Fixture::new("Sunset Apartments")
        .with_lease(&a, "101", "Maria Garcia")
        .with_lease(&b, "102", "John Smith")
        .with_lease(&c, "103", "Mary Jones")
        .with_payment(payment(&b, date(2024, 3, 1), PaymentStatus::Failed));
    let other = Fixture::new("Oak Grove").with_lease(&lease(dec!(500)), "9", "Zed Quinn");
    fixture.snapshot.properties.extend(other.snapshot.properties);
    fixture.snapshot.tenants.extend(other.snapshot.tenants);
    fixture.snapshot.leases.extend(other.snapshot.leases);

    let roll = RentRollService::derive(&fixture.snapshot, mid_march(), RentRollOptions::default());
    assert_eq!(roll.items.len(), 4);

    let sunset = RentRollQuery::new().property(PropertyScope::named("Sunset Apartments"));
    assert_eq!(sunset.apply(&roll.items).len(), 3);

    let overdue = RentRollQuery::new().status(RentStatus::Overdue);
    let rows = overdue.apply(&roll.items);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].tenant_name, "John Smith");

    let search = RentRollQuery::new().search("  MAR ");
    let names: Vec<&str> = search.apply(&roll.items).iter().map(|r| r.tenant_name.as_str()).collect();
    assert_eq!(names, vec!["Maria Garcia", "Mary Jones"]);

    let by_rent = RentRollQuery::new().sort_by(RentRollSortKey::Rent, SortDirection::Descending);
    let rents: Vec<Decimal> = by_rent.apply(&roll.items).iter().map(|r| r.rent).collect();
    assert_eq!(rents, vec![dec!(3000), dec!(2000), dec!(1000), dec!(500)]);

    let everything = RentRollQuery::new().property(PropertyScope::from("All Properties"));
    assert_eq!(everything.apply(&roll.items).len(), 4);
}

fn arb_status() -> impl Strategy<Value = PaymentStatus> {
    prop_oneof![
        Just(PaymentStatus::Processing),
        Just(PaymentStatus::Paid),
        Just(PaymentStatus::Failed),
    ]
}

proptest! {
    /// Deriving twice from the same inputs gives the same roll.
    #[test]
    fn test_derive_is_idempotent(
        payments in prop::collection::vec((0usize..5, 1u32..=28, 2u32..=4, arb_status()), 0..15),
        rents in prop::collection::vec(100i64..5000, 1..5),
        hour in 0u32..24,
    ) {
        let leases: Vec<Lease> = rents.iter().map(|r| lease(Decimal::from(*r))).collect();
        let mut fixture = Fixture::new("Harbor View");
        for (i, l) in leases.iter().enumerate() {
            fixture = fixture.with_lease(l, &format!("{i}"), &format!("Tenant {i}"));
        }
        for (lease_index, day, month, status) in payments {
            let l = &leases[lease_index % leases.len()];
            fixture = fixture.with_payment(payment(l, date(2024, month, day), status));
        }
        let now = Utc.with_ymd_and_hms(2024, 3, 15, hour, 0, 0).unwrap();

        let first = RentRollService::derive(&fixture.snapshot, now, RentRollOptions::default());
        let second = RentRollService::derive(&fixture.snapshot, now, RentRollOptions::default());

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.items.len(), leases.len());
        for item in &first.items {
            let expected = if item.status == RentStatus::Overdue { item.rent } else { Decimal::ZERO };
            prop_assert_eq!(item.balance, expected);
            prop_assert!(item.status != RentStatus::Overdue || item.due_date <= now.date_naive());
        }

        let summary = RentRollService::summarize(&first.items);
        prop_assert!(summary.total_collected <= summary.total_rent);
        prop_assert!(summary.total_overdue <= summary.total_rent);
    }
}
