//! Report generation service.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use super::error::ReportError;
use super::filter::ReportFilter;
use super::query::ReportQuery;
use super::types::{Cell, ReportKind, ReportOutput, ReportTable};
use crate::diagnostics::{Diagnostics, SkipReason};
use crate::financial::{FinancialService, Transaction, TransactionScope};
use crate::leasing::Lease;
use crate::maintenance::MaintenanceRequest;
use crate::property::{PropertyAggregate, PropertyAggregator, VacantUnit};
use crate::rent_roll::{RentRollItem, RentRollOptions, RentRollService};
use crate::snapshot::{PortfolioSnapshot, SnapshotIndex, Tenant};

/// Service for building reports-center tables.
pub struct ReportService;

impl ReportService {
    /// Builds `kind` from the snapshot under `filter`.
    ///
    /// `now` fixes the rent roll month.
    pub fn build(
        kind: ReportKind,
        snapshot: &PortfolioSnapshot,
        filter: &ReportFilter,
        now: DateTime<Utc>,
        options: RentRollOptions,
    ) -> Result<ReportOutput, ReportError> {
        filter.validate()?;
        let index = SnapshotIndex::new(snapshot);

        let (rows, diagnostics) = match kind {
            ReportKind::RentRoll => Self::rent_roll(&index, filter, now, options),
            ReportKind::ProfitAndLoss => Self::profit_and_loss(&index, filter),
            ReportKind::OwnerStatement => Self::owner_statement(&index, filter),
            ReportKind::TenantDirectory => (Self::tenant_directory(&index, filter), Diagnostics::new()),
            ReportKind::LeaseExpiration => (Self::lease_expiration(&index, filter), Diagnostics::new()),
            ReportKind::Vacancy => (Self::vacancy(&index, filter), Diagnostics::new()),
            ReportKind::OpenMaintenance => {
                Self::maintenance(&index, filter, false, MaintenanceRequest::is_open)
            }
            ReportKind::MaintenanceHistory => Self::maintenance(&index, filter, true, |_| true),
            ReportKind::PropertyPortfolio => (Self::property_portfolio(&index, filter), Diagnostics::new()),
        };

        tracing::debug!(
            report = kind.slug(),
            rows = rows.len(),
            skipped = diagnostics.total_skipped(),
            "report built"
        );

        Ok(ReportOutput {
            table: ReportTable::new(kind.title(), kind.columns(), rows),
            diagnostics,
        })
    }

    fn rent_roll(
        index: &SnapshotIndex<'_>,
        filter: &ReportFilter,
        now: DateTime<Utc>,
        options: RentRollOptions,
    ) -> (Vec<Vec<Cell>>, Diagnostics) {
        let roll = RentRollService::derive_with_index(index, now, options);

        let rows = ReportQuery::<RentRollItem>::new(filter)
            .dated(|item| Some(item.due_date))
            .property(|item| Some(item.property_name.as_str()))
            .owner(|item| index.property(item.property_id).map(|p| p.owner_id))
            .project(&roll.items, |item| {
                vec![
                    Cell::text(&item.tenant_name),
                    Cell::text(&item.property_name),
                    Cell::text(&item.unit_name),
                    Cell::Money(item.rent),
                    Cell::Money(item.balance),
                    Cell::Date(item.due_date),
                    Cell::text(item.status.label()),
                ]
            });

        (rows, roll.diagnostics)
    }

    fn transactions<'s>(
        index: &'s SnapshotIndex<'s>,
        filter: &'s ReportFilter,
    ) -> (Vec<&'s Transaction>, Diagnostics) {
        let (known, diagnostics) =
            FinancialService::scoped(index.snapshot(), &TransactionScope::all());
        let selected = ReportQuery::<Transaction>::new(filter)
            .dated(|t| Some(t.date))
            .property(|t| index.property(t.property_id).map(|p| p.name.as_str()))
            .owner(|t| Some(t.owner_id))
            .select(known);
        (selected, diagnostics)
    }

    fn owner_statement(
        index: &SnapshotIndex<'_>,
        filter: &ReportFilter,
    ) -> (Vec<Vec<Cell>>, Diagnostics) {
        let (transactions, diagnostics) = Self::transactions(index, filter);
        let summary = FinancialService::summarize(transactions);

        let rows = vec![
            vec![Cell::text("Total Income"), Cell::Money(summary.total_revenue)],
            vec![Cell::text("Total Expenses"), Cell::Money(summary.total_expenses)],
            vec![Cell::text("Net Operating Income"), Cell::Money(summary.noi)],
        ];
        (rows, diagnostics)
    }

    fn profit_and_loss(
        index: &SnapshotIndex<'_>,
        filter: &ReportFilter,
    ) -> (Vec<Vec<Cell>>, Diagnostics) {
        let (transactions, diagnostics) = Self::transactions(index, filter);
        let statement = FinancialService::profit_and_loss(transactions);

        let line = |section: &str, name: &str, amount: Decimal| {
            vec![Cell::text(section), Cell::text(name), Cell::Money(amount)]
        };

        let mut rows: Vec<Vec<Cell>> = statement
            .income_lines
            .iter()
            .map(|l| line("Income", &l.name, l.amount))
            .collect();
        rows.push(line("Income", "Total Income", statement.total_income));
        rows.extend(
            statement
                .expense_lines
                .iter()
                .map(|l| line("Expenses", &l.name, l.amount)),
        );
        rows.push(line("Expenses", "Total Expenses", statement.total_expenses));
        rows.push(vec![
            Cell::Empty,
            Cell::text("Net Operating Income"),
            Cell::Money(statement.noi),
        ]);
        (rows, diagnostics)
    }

    /// Property and unit of the lease a tenant is listed under: the active
    /// lease if any, else the most recent one.
    fn tenant_lease<'s>(index: &SnapshotIndex<'s>, tenant: &Tenant) -> Option<&'s Lease> {
        index.active_lease_for_tenant(tenant.id).or_else(|| {
            index
                .snapshot()
                .leases
                .iter()
                .filter(|l| l.tenant_id == tenant.id)
                .max_by_key(|l| l.start_date)
        })
    }

    fn tenant_directory(index: &SnapshotIndex<'_>, filter: &ReportFilter) -> Vec<Vec<Cell>> {
        let location = |tenant: &Tenant| {
            Self::tenant_lease(index, tenant).and_then(|lease| index.unit(lease.unit_id))
        };

        ReportQuery::<Tenant>::new(filter)
            .property(|t| location(t).map(|l| l.property.name.as_str()))
            .owner(|t| location(t).map(|l| l.property.owner_id))
            .project(&index.snapshot().tenants, |tenant| {
                let place = location(tenant);
                vec![
                    Cell::text(tenant.full_name()),
                    Cell::text_or_empty(Some(tenant.email.as_str()).filter(|s| !s.is_empty())),
                    Cell::text_or_empty(Some(tenant.phone.as_str()).filter(|s| !s.is_empty())),
                    Cell::text_or_empty(place.map(|l| l.property.name.as_str())),
                    Cell::text_or_empty(place.map(|l| l.unit.name.as_str())),
                    Cell::text(tenant.status.label()),
                ]
            })
    }

    fn lease_expiration(index: &SnapshotIndex<'_>, filter: &ReportFilter) -> Vec<Vec<Cell>> {
        ReportQuery::<Lease>::new(filter)
            .dated(|lease| lease.end_date)
            .property(|lease| index.unit(lease.unit_id).map(|l| l.property.name.as_str()))
            .owner(|lease| index.unit(lease.unit_id).map(|l| l.property.owner_id))
            .filter(Lease::is_active)
            .project(&index.snapshot().leases, |lease| {
                let place = index.unit(lease.unit_id);
                vec![
                    Cell::text_or_empty(
                        index
                            .tenant(lease.tenant_id)
                            .map(Tenant::full_name)
                            .as_deref(),
                    ),
                    Cell::text_or_empty(place.map(|l| l.property.name.as_str())),
                    Cell::text_or_empty(place.map(|l| l.unit.name.as_str())),
                    Cell::date_or_empty(lease.end_date),
                ]
            })
    }

    fn vacancy(index: &SnapshotIndex<'_>, filter: &ReportFilter) -> Vec<Vec<Cell>> {
        let vacancies = PropertyAggregator::vacancies(&index.snapshot().properties);

        ReportQuery::<VacantUnit>::new(filter)
            .property(|v| Some(v.property_name.as_str()))
            .owner(|v| index.property(v.property_id).map(|p| p.owner_id))
            .project(&vacancies, |v| {
                vec![
                    Cell::text(&v.property_name),
                    Cell::text(&v.unit_name),
                    Cell::Money(v.market_rent),
                    Cell::Count(v.bedrooms as usize),
                    Cell::Decimal(v.bathrooms),
                ]
            })
    }

    fn maintenance(
        index: &SnapshotIndex<'_>,
        filter: &ReportFilter,
        dated: bool,
        include: fn(&MaintenanceRequest) -> bool,
    ) -> (Vec<Vec<Cell>>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let known: Vec<&MaintenanceRequest> = index
            .snapshot()
            .maintenance_requests
            .iter()
            .filter(|request| {
                let found = index.property(request.property_id).is_some();
                if !found {
                    tracing::debug!(
                        request_id = %request.id,
                        property_id = %request.property_id,
                        "skipping maintenance request for unknown property"
                    );
                }
                found
            })
            .collect();
        diagnostics.record_skips(
            SkipReason::MaintenanceUnknownProperty,
            index.snapshot().maintenance_requests.len() - known.len(),
        );

        let mut query = ReportQuery::<MaintenanceRequest>::new(filter)
            .property(|r| index.property(r.property_id).map(|p| p.name.as_str()))
            .owner(|r| index.property(r.property_id).map(|p| p.owner_id))
            .filter(include);
        if dated {
            query = query.dated(|r| Some(r.submitted_date));
        }

        let rows = query.project(known, |request| {
            let unit = request
                .unit_id
                .and_then(|id| index.unit(id))
                .map(|l| l.unit.name.as_str());
            vec![
                Cell::text(&request.issue),
                Cell::text_or_empty(index.property(request.property_id).map(|p| p.name.as_str())),
                Cell::text_or_empty(unit),
                Cell::text(request.priority.label()),
                Cell::text(request.status.label()),
                Cell::Date(request.submitted_date),
            ]
        });
        (rows, diagnostics)
    }

    fn property_portfolio(index: &SnapshotIndex<'_>, filter: &ReportFilter) -> Vec<Vec<Cell>> {
        let aggregates = PropertyAggregator::aggregate_all(&index.snapshot().properties);

        ReportQuery::<PropertyAggregate>::new(filter)
            .property(|a| Some(a.property_name.as_str()))
            .owner(|a| Some(a.owner_id))
            .project(&aggregates, |a| {
                vec![
                    Cell::text(&a.property_name),
                    Cell::text(&a.address),
                    Cell::text_or_empty(index.owner(a.owner_id).map(|o| o.name.as_str())),
                    Cell::Count(a.total_units),
                    Cell::Count(a.occupied_units),
                    Cell::Count(a.vacant_units),
                    Cell::Money(a.revenue),
                ]
            })
    }
}
