//! Lookup tables over a snapshot.

use std::collections::HashMap;

use properly_shared::types::{LeaseId, OwnerId, PropertyId, TenantId, UnitId};

use super::types::{Owner, PortfolioSnapshot, Tenant};
use crate::leasing::{Lease, Payment};
use crate::property::{Building, Property, Unit};

/// A unit and the building and property containing it.
#[derive(Debug, Clone, Copy)]
pub struct UnitLocation<'a> {
    /// Containing property.
    pub property: &'a Property,
    /// Containing building.
    pub building: &'a Building,
    /// The unit.
    pub unit: &'a Unit,
}

/// Borrowed lookup tables built once per computation.
#[derive(Debug)]
pub struct SnapshotIndex<'a> {
    snapshot: &'a PortfolioSnapshot,
    properties: HashMap<PropertyId, &'a Property>,
    units: HashMap<UnitId, UnitLocation<'a>>,
    tenants: HashMap<TenantId, &'a Tenant>,
    owners: HashMap<OwnerId, &'a Owner>,
    leases: HashMap<LeaseId, &'a Lease>,
    payments_by_lease: HashMap<LeaseId, Vec<&'a Payment>>,
    orphan_payments: Vec<&'a Payment>,
}

impl<'a> SnapshotIndex<'a> {
    /// Indexes a snapshot.
    ///
    /// Payments keep their snapshot order within each lease. Payments whose
    /// lease is unknown are set aside as orphans.
    #[must_use]
    pub fn new(snapshot: &'a PortfolioSnapshot) -> Self {
        let properties = snapshot.properties.iter().map(|p| (p.id, p)).collect();

        let units = snapshot
            .properties
            .iter()
            .flat_map(|property| {
                property.units().map(move |(building, unit)| {
                    (
                        unit.id,
                        UnitLocation {
                            property,
                            building,
                            unit,
                        },
                    )
                })
            })
            .collect();

        let tenants = snapshot.tenants.iter().map(|t| (t.id, t)).collect();
        let owners = snapshot.owners.iter().map(|o| (o.id, o)).collect();
        let leases: HashMap<LeaseId, &Lease> =
            snapshot.leases.iter().map(|l| (l.id, l)).collect();

        let mut payments_by_lease: HashMap<LeaseId, Vec<&Payment>> = HashMap::new();
        let mut orphan_payments = Vec::new();
        for payment in &snapshot.payments {
            if leases.contains_key(&payment.lease_id) {
                payments_by_lease
                    .entry(payment.lease_id)
                    .or_default()
                    .push(payment);
            } else {
                orphan_payments.push(payment);
            }
        }

        Self {
            snapshot,
            properties,
            units,
            tenants,
            owners,
            leases,
            payments_by_lease,
            orphan_payments,
        }
    }

    /// The indexed snapshot.
    #[must_use]
    pub fn snapshot(&self) -> &'a PortfolioSnapshot {
        self.snapshot
    }

    /// Looks up a property.
    #[must_use]
    pub fn property(&self, id: PropertyId) -> Option<&'a Property> {
        self.properties.get(&id).copied()
    }

    /// Looks up a property by its display name.
    #[must_use]
    pub fn property_by_name(&self, name: &str) -> Option<&'a Property> {
        self.snapshot.properties.iter().find(|p| p.name == name)
    }

    /// Looks up a unit with its building and property.
    #[must_use]
    pub fn unit(&self, id: UnitId) -> Option<UnitLocation<'a>> {
        self.units.get(&id).copied()
    }

    /// Looks up a tenant.
    #[must_use]
    pub fn tenant(&self, id: TenantId) -> Option<&'a Tenant> {
        self.tenants.get(&id).copied()
    }

    /// Looks up an owner.
    #[must_use]
    pub fn owner(&self, id: OwnerId) -> Option<&'a Owner> {
        self.owners.get(&id).copied()
    }

    /// Looks up a lease.
    #[must_use]
    pub fn lease(&self, id: LeaseId) -> Option<&'a Lease> {
        self.leases.get(&id).copied()
    }

    /// Payments of a lease in snapshot order.
    #[must_use]
    pub fn payments_for(&self, lease_id: LeaseId) -> &[&'a Payment] {
        self.payments_by_lease
            .get(&lease_id)
            .map_or(&[], Vec::as_slice)
    }

    /// Payments referencing a lease that is not in the snapshot.
    #[must_use]
    pub fn orphan_payments(&self) -> &[&'a Payment] {
        &self.orphan_payments
    }

    /// First active lease of a tenant, in snapshot order.
    #[must_use]
    pub fn active_lease_for_tenant(&self, tenant_id: TenantId) -> Option<&'a Lease> {
        self.snapshot
            .leases
            .iter()
            .find(|lease| lease.tenant_id == tenant_id && lease.is_active())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::leasing::{LeaseStatus, PaymentMethod, PaymentStatus};
    use chrono::NaiveDate;
    use properly_shared::types::{BuildingId, PaymentId};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn payment(lease_id: LeaseId, due: NaiveDate) -> Payment {
        Payment {
            id: PaymentId::new(),
            lease_id,
            tenant_id: TenantId::new(),
            amount: dec!(1200),
            due_date: due,
            paid_date: None,
            status: PaymentStatus::Processing,
            payment_method: PaymentMethod::Card,
        }
    }

    #[test]
    fn test_index_groups_payments_and_orphans() {
        let unit_id = UnitId::new();
        let lease = Lease {
            id: LeaseId::new(),
            unit_id,
            tenant_id: TenantId::new(),
            monthly_rent: dec!(1200),
            status: LeaseStatus::Active,
            start_date: date(2023, 6, 1),
            end_date: None,
        };
        let first = payment(lease.id, date(2024, 2, 1));
        let second = payment(lease.id, date(2024, 3, 1));
        let orphan = payment(LeaseId::new(), date(2024, 3, 1));

        let snapshot = PortfolioSnapshot {
            properties: vec![Property {
                id: PropertyId::new(),
                name: "Cedar Point".to_string(),
                address: "5 Cedar Rd".to_string(),
                owner_id: OwnerId::new(),
                manager_id: None,
                buildings: vec![Building {
                    id: BuildingId::new(),
                    name: "Main".to_string(),
                    units: vec![Unit {
                        id: unit_id,
                        name: "101".to_string(),
                        bedrooms: 1,
                        bathrooms: dec!(1),
                        square_feet: 700,
                        monthly_rent: dec!(1200),
                        tenants: Vec::new(),
                    }],
                }],
            }],
            leases: vec![lease.clone()],
            payments: vec![first.clone(), orphan.clone(), second.clone()],
            ..PortfolioSnapshot::default()
        };

        let index = SnapshotIndex::new(&snapshot);

        let payments: Vec<PaymentId> = index.payments_for(lease.id).iter().map(|p| p.id).collect();
        assert_eq!(payments, vec![first.id, second.id]);
        assert_eq!(index.orphan_payments().len(), 1);
        assert_eq!(index.orphan_payments()[0].id, orphan.id);

        let location = index.unit(unit_id).unwrap();
        assert_eq!(location.property.name, "Cedar Point");
        assert_eq!(location.building.name, "Main");
        assert!(index.property_by_name("Cedar Point").is_some());
        assert!(index.payments_for(LeaseId::new()).is_empty());
        assert_eq!(index.active_lease_for_tenant(lease.tenant_id), Some(&snapshot.leases[0]));
    }
}
