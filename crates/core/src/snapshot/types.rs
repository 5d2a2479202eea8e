//! Snapshot types.

use properly_shared::types::{OwnerId, TenantId};
use serde::{Deserialize, Serialize};

use crate::capital::CapitalProject;
use crate::financial::Transaction;
use crate::leasing::{Lease, Payment};
use crate::maintenance::MaintenanceRequest;
use crate::property::Property;

/// Residency status of a tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TenantStatus {
    /// Currently renting.
    Active,
    /// Moved out.
    Past,
    /// Lease signed, not yet moved in.
    Future,
    /// Invited, not yet signed.
    Pending,
}

impl TenantStatus {
    /// Display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Past => "Past",
            Self::Future => "Future",
            Self::Pending => "Pending",
        }
    }
}

/// A tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    /// Unique identifier.
    pub id: TenantId,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: String,
    /// Residency status.
    pub status: TenantStatus,
}

impl Tenant {
    /// "First Last".
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A property owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    /// Unique identifier.
    pub id: OwnerId,
    /// Display name.
    pub name: String,
}

/// Everything the core computes over, as one consistent read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshot {
    /// Owners.
    #[serde(default)]
    pub owners: Vec<Owner>,
    /// Properties with nested buildings and units.
    #[serde(default)]
    pub properties: Vec<Property>,
    /// Tenants.
    #[serde(default)]
    pub tenants: Vec<Tenant>,
    /// Leases, in insertion order.
    #[serde(default)]
    pub leases: Vec<Lease>,
    /// Rent payments, in insertion order.
    #[serde(default)]
    pub payments: Vec<Payment>,
    /// Ledger transactions.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    /// Maintenance requests.
    #[serde(default)]
    pub maintenance_requests: Vec<MaintenanceRequest>,
    /// Capital projects.
    #[serde(default)]
    pub capital_projects: Vec<CapitalProject>,
}

impl PortfolioSnapshot {
    /// Parses a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns the parser error if the document is not a valid snapshot.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Returns true if the snapshot holds no records at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
            && self.properties.is_empty()
            && self.tenants.is_empty()
            && self.leases.is_empty()
            && self.payments.is_empty()
            && self.transactions.is_empty()
            && self.maintenance_requests.is_empty()
            && self.capital_projects.is_empty()
    }
}
