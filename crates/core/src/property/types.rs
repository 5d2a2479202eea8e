//! Property hierarchy types.

use properly_shared::types::{BuildingId, ManagerId, OwnerId, PropertyId, TenantId, UnitId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Occupancy of a unit, derived from its tenant list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitStatus {
    /// No tenant assigned.
    Vacant,
    /// At least one tenant assigned.
    Occupied,
}

/// A tenant's share of a unit's rent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitTenant {
    /// Tenant.
    pub tenant_id: TenantId,
    /// Display name.
    pub name: String,
    /// Portion of the unit rent this tenant pays.
    pub rent_portion: Decimal,
}

/// Assigned rent portions compared against the unit's rent.
///
/// A mismatch is reported, never corrected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentSplit {
    /// Listed rent of the unit.
    pub monthly_rent: Decimal,
    /// Sum of the tenants' rent portions.
    pub assigned_rent: Decimal,
    /// `monthly_rent - assigned_rent`; negative when over-assigned.
    pub difference: Decimal,
    /// True when the portions add up to the listed rent.
    pub is_balanced: bool,
}

/// A rentable unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    /// Unique identifier.
    pub id: UnitId,
    /// Display name (e.g. "Apt 2B").
    pub name: String,
    /// Number of bedrooms.
    pub bedrooms: u32,
    /// Number of bathrooms (half baths allowed).
    pub bathrooms: Decimal,
    /// Floor area.
    pub square_feet: u32,
    /// Listed (market) rent.
    pub monthly_rent: Decimal,
    /// Tenants sharing the unit.
    #[serde(default)]
    pub tenants: Vec<UnitTenant>,
}

impl Unit {
    /// Occupied iff the tenant list is non-empty.
    #[must_use]
    pub fn status(&self) -> UnitStatus {
        if self.tenants.is_empty() {
            UnitStatus::Vacant
        } else {
            UnitStatus::Occupied
        }
    }

    /// Returns true if at least one tenant is assigned.
    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.status() == UnitStatus::Occupied
    }

    /// Compares the tenants' rent portions with the listed rent.
    #[must_use]
    pub fn rent_split(&self) -> RentSplit {
        let assigned_rent: Decimal = self.tenants.iter().map(|t| t.rent_portion).sum();
        let difference = self.monthly_rent - assigned_rent;
        RentSplit {
            monthly_rent: self.monthly_rent,
            assigned_rent,
            difference,
            is_balanced: difference.is_zero(),
        }
    }
}

/// A building within a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    /// Unique identifier.
    pub id: BuildingId,
    /// Display name.
    pub name: String,
    /// Units in the building.
    #[serde(default)]
    pub units: Vec<Unit>,
}

/// A property, the root of occupancy and revenue roll-ups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    /// Unique identifier.
    pub id: PropertyId,
    /// Display name, unique within a portfolio.
    pub name: String,
    /// Street address.
    pub address: String,
    /// Owning investor.
    pub owner_id: OwnerId,
    /// Managing agent.
    #[serde(default)]
    pub manager_id: Option<ManagerId>,
    /// Buildings on the property.
    #[serde(default)]
    pub buildings: Vec<Building>,
}

impl Property {
    /// Iterates every unit together with its building.
    pub fn units(&self) -> impl Iterator<Item = (&Building, &Unit)> + '_ {
        self.buildings
            .iter()
            .flat_map(|building| building.units.iter().map(move |unit| (building, unit)))
    }
}
