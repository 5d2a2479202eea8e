//! Property manager dashboard.
//!
//! This module provides the figures shown on the manager's home screen:
//! - Rent collection for the current month
//! - Portfolio occupancy
//! - Open and urgent maintenance
//! - Leases expiring soon
//! - Tenants with rent due

pub mod service;
pub mod types;

pub use service::DashboardService;
pub use types::*;
