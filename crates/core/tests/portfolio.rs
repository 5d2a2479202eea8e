//! End-to-end checks over the sample portfolio snapshot.

use chrono::{DateTime, TimeZone, Utc};
use properly_core::capital::CapitalProjectStatus;
use properly_core::dashboard::{DashboardOptions, DashboardService};
use properly_core::financial::FinancialService;
use properly_core::property::PropertyAggregator;
use properly_core::rent_roll::{RentRollOptions, RentRollService, RentStatus};
use properly_core::reports::{ReportFilter, ReportKind, ReportService, to_csv};
use properly_core::{PortfolioSnapshot, SkipReason};
use properly_shared::types::OwnerId;
use rust_decimal_macros::dec;

fn snapshot() -> PortfolioSnapshot {
    PortfolioSnapshot::from_json(include_str!("fixtures/portfolio.json"))
        .expect("fixture should parse")
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap()
}

#[test]
fn rent_roll_for_march() {
    let snapshot = snapshot();

    let roll = RentRollService::derive(&snapshot, now(), RentRollOptions::default());
    let statuses: Vec<RentStatus> = roll.items.iter().map(|i| i.status).collect();
    let summary = RentRollService::summarize(&roll.items);

    assert_eq!(
        statuses,
        vec![RentStatus::Paid, RentStatus::Overdue, RentStatus::Upcoming]
    );
    assert_eq!(summary.total_rent, dec!(5100));
    assert_eq!(summary.total_overdue, dec!(2100));
    assert_eq!(roll.diagnostics.total_skipped(), 2);
    assert_eq!(
        roll,
        RentRollService::derive(&snapshot, now(), RentRollOptions::default())
    );
}

#[test]
fn owner_financial_overview() {
    let owner: OwnerId = "00000000-0000-0000-0000-0000000000a1".parse().unwrap();

    let overview = FinancialService::overview(&snapshot(), owner, 2024);

    assert_eq!(overview.summary.total_revenue, dec!(3650));
    assert_eq!(overview.summary.total_expenses, dec!(550));
    assert_eq!(overview.summary.noi, dec!(3100));
    assert_eq!(overview.summary.profit_margin, dec!(84.93));
    assert_eq!(overview.monthly.months[1].income, dec!(1800));
    assert_eq!(overview.monthly.months[1].expenses, dec!(250));
    assert_eq!(overview.monthly.months[2].income, dec!(1850));
    let income: Vec<&str> = overview.income_breakdown.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(income, vec!["Rent", "Late Fee"]);
    assert_eq!(overview.properties.len(), 1);
    assert_eq!(overview.properties[0].noi, dec!(3100));
    assert_eq!(
        overview.diagnostics.skip_count(SkipReason::TransactionUnknownProperty),
        1
    );
}

#[test]
fn property_roll_ups_and_rent_split() {
    let snapshot = snapshot();

    let aggregates = PropertyAggregator::aggregate_all(&snapshot.properties);
    let portfolio = PropertyAggregator::combine(&aggregates);

    assert_eq!(aggregates[0].occupancy_percentage, dec!(50));
    assert_eq!(aggregates[0].revenue, dec!(3900));
    assert_eq!(aggregates[1].occupancy_percentage, dec!(100));
    assert_eq!(portfolio, PropertyAggregator::portfolio(&snapshot.properties));

    let shared_unit = &snapshot.properties[0].buildings[1].units[0];
    let split = shared_unit.rent_split();
    assert_eq!(split.assigned_rent, dec!(2050));
    assert_eq!(split.difference, dec!(50));
    assert!(!split.is_balanced);
}

#[test]
fn capital_project_cost_is_recomputed_on_load() {
    let snapshot = snapshot();
    let project = &snapshot.capital_projects[0];

    assert_eq!(project.status, CapitalProjectStatus::InProgress);
    assert_eq!(project.actual_cost(), dec!(6500));
    assert_eq!(project.remaining_budget(), dec!(3500));
    assert!(!project.is_over_budget());
}

#[test]
fn rent_roll_csv_export() {
    let output = ReportService::build(
        ReportKind::RentRoll,
        &snapshot(),
        &ReportFilter::default(),
        now(),
        RentRollOptions::default(),
    )
    .unwrap();

    let csv = to_csv(&output.table).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines[0], "Tenant,Property,Unit,Rent,Balance,Due Date,Status");
    assert_eq!(
        lines[2],
        "John Smith,Sunset Apartments,201,2100.00,2100.00,2024-03-05,Overdue"
    );
    assert_eq!(lines.len(), 4);
}

#[test]
fn dashboard_matches_rent_roll() {
    let snapshot = snapshot();

    let dashboard = DashboardService::manager(&snapshot, now(), DashboardOptions::default());
    let roll = RentRollService::derive(&snapshot, now(), RentRollOptions::default());

    assert_eq!(dashboard.rent_collection, RentRollService::summarize(&roll.items));
    assert_eq!(dashboard.occupancy.occupied_units, 3);
}
