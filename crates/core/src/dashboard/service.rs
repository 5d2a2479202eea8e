//! Dashboard service.

use chrono::{DateTime, Days, Utc};
use properly_shared::types::period::days_between;

use super::types::{DashboardOptions, ExpiringLease, ManagerDashboard, UrgentRequest};
use crate::diagnostics::SkipReason;
use crate::maintenance::{MaintenanceCounts, MaintenancePriority, MaintenanceRequest};
use crate::property::{Property, PropertyAggregator, VacantUnit};
use crate::rent_roll::{RentRollItem, RentRollService, RentStatus};
use crate::snapshot::{PortfolioSnapshot, SnapshotIndex};

/// Service for dashboard figures.
pub struct DashboardService;

impl DashboardService {
    /// Builds the manager dashboard at `now`.
    #[must_use]
    pub fn manager(
        snapshot: &PortfolioSnapshot,
        now: DateTime<Utc>,
        options: DashboardOptions,
    ) -> ManagerDashboard {
        let index = SnapshotIndex::new(snapshot);
        let roll = RentRollService::derive_with_index(&index, now, options.rent_roll);
        let mut diagnostics = roll.diagnostics;

        let (known, unknown): (Vec<&MaintenanceRequest>, Vec<&MaintenanceRequest>) = snapshot
            .maintenance_requests
            .iter()
            .partition(|r| index.property(r.property_id).is_some());
        diagnostics.record_skips(SkipReason::MaintenanceUnknownProperty, unknown.len());

        let dashboard = ManagerDashboard {
            as_of: now,
            period: roll.period,
            rent_collection: RentRollService::summarize(&roll.items),
            occupancy: PropertyAggregator::portfolio(&snapshot.properties),
            maintenance: MaintenanceCounts::from_requests(known.iter().copied()),
            vacant_units: Self::vacant_units(&snapshot.properties, options.list_limit),
            urgent_requests: Self::urgent_requests(&index, &known, options.list_limit),
            expiring_leases: Self::expiring_leases(&index, now, options.expiring_lease_window_days),
            due_tenants: Self::due_tenants(&roll.items, options.due_tenant_limit),
            diagnostics,
        };

        tracing::debug!(
            period = %dashboard.period,
            expiring = dashboard.expiring_leases.len(),
            due = dashboard.due_tenants.len(),
            vacant = dashboard.vacant_units.len(),
            urgent = dashboard.urgent_requests.len(),
            "manager dashboard built"
        );
        dashboard
    }

    /// Active leases ending after today and within `window_days`.
    ///
    /// Sorted by days left, ties by tenant name.
    #[must_use]
    pub fn expiring_leases(
        index: &SnapshotIndex<'_>,
        now: DateTime<Utc>,
        window_days: i64,
    ) -> Vec<ExpiringLease> {
        let today = now.date_naive();
        let Some(horizon) = u64::try_from(window_days)
            .ok()
            .and_then(|days| today.checked_add_days(Days::new(days)))
        else {
            return Vec::new();
        };

        let mut leases: Vec<ExpiringLease> = index
            .snapshot()
            .leases
            .iter()
            .filter(|lease| lease.is_active())
            .filter_map(|lease| {
                let end_date = lease.end_date.filter(|end| *end > today && *end <= horizon)?;
                let location = index.unit(lease.unit_id)?;
                let tenant = index.tenant(lease.tenant_id)?;
                Some(ExpiringLease {
                    lease_id: lease.id,
                    tenant_name: tenant.full_name(),
                    property_name: location.property.name.clone(),
                    unit_name: location.unit.name.clone(),
                    end_date,
                    days_left: days_between(today, end_date),
                })
            })
            .collect();

        leases.sort_by(|a, b| {
            a.days_left
                .cmp(&b.days_left)
                .then_with(|| a.tenant_name.cmp(&b.tenant_name))
        });
        leases
    }

    /// The first `limit` vacant units across the portfolio.
    #[must_use]
    pub fn vacant_units(properties: &[Property], limit: usize) -> Vec<VacantUnit> {
        let mut vacancies = PropertyAggregator::vacancies(properties);
        vacancies.truncate(limit);
        vacancies
    }

    /// High and Emergency requests, newest submission first.
    ///
    /// Completed requests stay listed; ties keep snapshot order.
    #[must_use]
    pub fn urgent_requests(
        index: &SnapshotIndex<'_>,
        requests: &[&MaintenanceRequest],
        limit: usize,
    ) -> Vec<UrgentRequest> {
        let mut urgent: Vec<&MaintenanceRequest> = requests
            .iter()
            .copied()
            .filter(|r| r.priority >= MaintenancePriority::High)
            .collect();
        urgent.sort_by(|a, b| b.submitted_date.cmp(&a.submitted_date));

        urgent
            .into_iter()
            .filter_map(|request| {
                let property = index.property(request.property_id)?;
                let unit_name = request
                    .unit_id
                    .and_then(|id| index.unit(id))
                    .map(|location| location.unit.name.clone());
                Some(UrgentRequest {
                    id: request.id,
                    issue: request.issue.clone(),
                    property_name: property.name.clone(),
                    unit_name,
                    priority: request.priority,
                    status: request.status,
                    submitted_date: request.submitted_date,
                })
            })
            .take(limit)
            .collect()
    }

    /// Unpaid rows, overdue before upcoming, then by due date.
    #[must_use]
    pub fn due_tenants(items: &[RentRollItem], limit: usize) -> Vec<RentRollItem> {
        let mut due: Vec<&RentRollItem> = items
            .iter()
            .filter(|item| item.status != RentStatus::Paid)
            .collect();
        due.sort_by_key(|item| (item.status != RentStatus::Overdue, item.due_date));
        due.into_iter().take(limit).cloned().collect()
    }
}
