//! Maintenance requests, as listed by the maintenance reports and dashboard.

pub mod types;

pub use types::{MaintenanceCounts, MaintenancePriority, MaintenanceRequest, MaintenanceStatus};
