//! Maintenance request types.

use chrono::NaiveDate;
use properly_shared::types::{MaintenanceRequestId, PropertyId, UnitId};
use serde::{Deserialize, Serialize};

/// Urgency of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MaintenancePriority {
    /// Cosmetic or deferrable.
    Low,
    /// Default priority.
    Medium,
    /// Needs attention soon.
    High,
    /// Safety or habitability issue.
    Emergency,
}

impl MaintenancePriority {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Emergency => "Emergency",
        }
    }
}

/// Workflow status of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MaintenanceStatus {
    /// Reported by the tenant.
    Submitted,
    /// Assigned and being worked on.
    #[serde(rename = "In Progress", alias = "InProgress")]
    InProgress,
    /// Resolved.
    Completed,
}

impl MaintenanceStatus {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Submitted => "Submitted",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }
}

/// A maintenance request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequest {
    /// Unique identifier.
    pub id: MaintenanceRequestId,
    /// Short description of the issue.
    pub issue: String,
    /// Property the request belongs to.
    pub property_id: PropertyId,
    /// Unit, when the issue is unit-specific.
    #[serde(default)]
    pub unit_id: Option<UnitId>,
    /// Urgency.
    pub priority: MaintenancePriority,
    /// Workflow status.
    pub status: MaintenanceStatus,
    /// Date the request was submitted.
    pub submitted_date: NaiveDate,
}

impl MaintenanceRequest {
    /// Returns true until the request is completed.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status != MaintenanceStatus::Completed
    }

    /// Open and High or Emergency priority.
    #[must_use]
    pub fn is_urgent(&self) -> bool {
        self.is_open() && self.priority >= MaintenancePriority::High
    }
}

/// Open and urgent request counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceCounts {
    /// Requests not yet completed.
    pub open: usize,
    /// Open requests with High or Emergency priority.
    pub urgent: usize,
}

impl MaintenanceCounts {
    /// Counts open and urgent requests.
    #[must_use]
    pub fn from_requests<'a, I>(requests: I) -> Self
    where
        I: IntoIterator<Item = &'a MaintenanceRequest>,
    {
        requests
            .into_iter()
            .fold(Self::default(), |mut counts, request| {
                if request.is_open() {
                    counts.open += 1;
                }
                if request.is_urgent() {
                    counts.urgent += 1;
                }
                counts
            })
    }
}
