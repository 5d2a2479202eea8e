//! Dashboard data types.

use chrono::{DateTime, NaiveDate, Utc};
use properly_shared::config::ReportConfig;
use properly_shared::types::{BillingPeriod, LeaseId, MaintenanceRequestId};
use serde::{Deserialize, Serialize};

use crate::diagnostics::Diagnostics;
use crate::maintenance::{MaintenanceCounts, MaintenancePriority, MaintenanceStatus};
use crate::property::{PortfolioMetrics, VacantUnit};
use crate::rent_roll::{RentRollItem, RentRollOptions, RentRollSummary};

/// Manager dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerDashboard {
    /// Instant the dashboard was computed at.
    pub as_of: DateTime<Utc>,
    /// Current billing period.
    pub period: BillingPeriod,
    /// This month's rent collection.
    pub rent_collection: RentRollSummary,
    /// Units, occupancy and listed revenue.
    pub occupancy: PortfolioMetrics,
    /// Open and urgent maintenance requests.
    pub maintenance: MaintenanceCounts,
    /// First vacant units in property, building and unit order.
    pub vacant_units: Vec<VacantUnit>,
    /// High and Emergency requests, newest first.
    pub urgent_requests: Vec<UrgentRequest>,
    /// Leases ending within the look-ahead window, soonest first.
    pub expiring_leases: Vec<ExpiringLease>,
    /// Unpaid rent roll rows, overdue first.
    pub due_tenants: Vec<RentRollItem>,
    /// Records left out.
    pub diagnostics: Diagnostics,
}

/// A lease ending soon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiringLease {
    /// Lease.
    pub lease_id: LeaseId,
    /// Tenant name.
    pub tenant_name: String,
    /// Property name.
    pub property_name: String,
    /// Unit name.
    pub unit_name: String,
    /// Last day of the lease.
    pub end_date: NaiveDate,
    /// Days from today until the end date.
    pub days_left: i64,
}

/// A High or Emergency maintenance request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrgentRequest {
    /// Request.
    pub id: MaintenanceRequestId,
    /// Short description of the issue.
    pub issue: String,
    /// Property name.
    pub property_name: String,
    /// Unit name, when the issue is unit-specific and the unit is known.
    pub unit_name: Option<String>,
    /// Emergency or High.
    pub priority: MaintenancePriority,
    /// Workflow status.
    pub status: MaintenanceStatus,
    /// Date the request was submitted.
    pub submitted_date: NaiveDate,
}

/// Dashboard tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardOptions {
    /// Look-ahead for expiring leases, in days.
    pub expiring_lease_window_days: i64,
    /// Number of due tenants listed.
    pub due_tenant_limit: usize,
    /// Number of vacant units and urgent requests listed.
    pub list_limit: usize,
    /// Rent roll derivation options.
    pub rent_roll: RentRollOptions,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self::from(&ReportConfig::default())
    }
}

impl From<&ReportConfig> for DashboardOptions {
    fn from(config: &ReportConfig) -> Self {
        Self {
            expiring_lease_window_days: config.expiring_lease_window_days,
            due_tenant_limit: config.due_tenant_limit,
            list_limit: config.dashboard_list_limit,
            rent_roll: RentRollOptions::from(config),
        }
    }
}
