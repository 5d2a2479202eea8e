//! Occupancy and revenue roll-ups.
//!
//! Revenue counts the listed rent of occupied units only. Occupancy is
//! defined as 0% when there are no units.

use properly_shared::types::money::percent_of_counts;
use properly_shared::types::{BuildingId, OwnerId, PropertyId, UnitId};
use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::Property;

/// Property-level totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAggregate {
    /// Property.
    pub property_id: PropertyId,
    /// Property name.
    pub property_name: String,
    /// Street address.
    pub address: String,
    /// Owning investor.
    pub owner_id: OwnerId,
    /// Units across all buildings.
    pub total_units: usize,
    /// Units with at least one tenant.
    pub occupied_units: usize,
    /// `total_units - occupied_units`.
    pub vacant_units: usize,
    /// Listed rent of occupied units.
    pub revenue: Decimal,
    /// `occupied_units / total_units * 100`, 0 with no units.
    pub occupancy_percentage: Decimal,
}

/// Totals across a set of properties.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioMetrics {
    /// Properties included.
    pub property_count: usize,
    /// Units across all properties.
    pub total_units: usize,
    /// Occupied units.
    pub occupied_units: usize,
    /// Vacant units.
    pub vacant_units: usize,
    /// Listed rent of occupied units.
    pub revenue: Decimal,
    /// Portfolio occupancy, 0 with no units.
    pub occupancy_percentage: Decimal,
}

/// A unit with no tenant, with its location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacantUnit {
    /// Property.
    pub property_id: PropertyId,
    /// Property name.
    pub property_name: String,
    /// Building.
    pub building_id: BuildingId,
    /// Building name.
    pub building_name: String,
    /// Unit.
    pub unit_id: UnitId,
    /// Unit name.
    pub unit_name: String,
    /// Listed rent.
    pub market_rent: Decimal,
    /// Bedrooms.
    pub bedrooms: u32,
    /// Bathrooms.
    pub bathrooms: Decimal,
}

/// Rolls unit data up to property and portfolio level.
pub struct PropertyAggregator;

impl PropertyAggregator {
    /// Aggregates one property.
    #[must_use]
    pub fn aggregate(property: &Property) -> PropertyAggregate {
        let (total_units, occupied_units, revenue) = property.units().fold(
            (0usize, 0usize, Decimal::ZERO),
            |(total, occupied, revenue), (_, unit)| {
                if unit.is_occupied() {
                    (total + 1, occupied + 1, revenue + unit.monthly_rent)
                } else {
                    (total + 1, occupied, revenue)
                }
            },
        );

        PropertyAggregate {
            property_id: property.id,
            property_name: property.name.clone(),
            address: property.address.clone(),
            owner_id: property.owner_id,
            total_units,
            occupied_units,
            vacant_units: total_units - occupied_units,
            revenue,
            occupancy_percentage: percent_of_counts(occupied_units, total_units),
        }
    }

    /// Aggregates every property, preserving input order.
    #[must_use]
    pub fn aggregate_all(properties: &[Property]) -> Vec<PropertyAggregate> {
        properties.par_iter().map(Self::aggregate).collect()
    }

    /// Sums property aggregates into portfolio totals.
    #[must_use]
    pub fn portfolio(properties: &[Property]) -> PortfolioMetrics {
        Self::combine(&Self::aggregate_all(properties))
    }

    /// Sums already computed property aggregates.
    #[must_use]
    pub fn combine(aggregates: &[PropertyAggregate]) -> PortfolioMetrics {
        let mut metrics = aggregates
            .iter()
            .fold(PortfolioMetrics::default(), |mut acc, aggregate| {
                acc.property_count += 1;
                acc.total_units += aggregate.total_units;
                acc.occupied_units += aggregate.occupied_units;
                acc.vacant_units += aggregate.vacant_units;
                acc.revenue += aggregate.revenue;
                acc
            });
        metrics.occupancy_percentage =
            percent_of_counts(metrics.occupied_units, metrics.total_units);
        metrics
    }

    /// Lists vacant units across properties, in property/building/unit order.
    #[must_use]
    pub fn vacancies(properties: &[Property]) -> Vec<VacantUnit> {
        properties
            .iter()
            .flat_map(|property| {
                property
                    .units()
                    .filter(|(_, unit)| !unit.is_occupied())
                    .map(move |(building, unit)| VacantUnit {
                        property_id: property.id,
                        property_name: property.name.clone(),
                        building_id: building.id,
                        building_name: building.name.clone(),
                        unit_id: unit.id,
                        unit_name: unit.name.clone(),
                        market_rent: unit.monthly_rent,
                        bedrooms: unit.bedrooms,
                        bathrooms: unit.bathrooms,
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::types::{Building, Unit, UnitTenant};
    use proptest::prelude::*;
    use properly_shared::types::TenantId;
    use rust_decimal_macros::dec;

    fn unit(name: &str, rent: Decimal, occupied: bool) -> Unit {
        Unit {
            id: UnitId::new(),
            name: name.to_string(),
            bedrooms: 1,
            bathrooms: dec!(1),
            square_feet: 650,
            monthly_rent: rent,
            tenants: if occupied {
                vec![UnitTenant {
                    tenant_id: TenantId::new(),
                    name: "Jordan Lee".to_string(),
                    rent_portion: rent,
                }]
            } else {
                Vec::new()
            },
        }
    }

    fn property(buildings: Vec<Vec<Unit>>) -> Property {
        Property {
            id: PropertyId::new(),
            name: "Maple Gardens".to_string(),
            address: "12 Maple Ave".to_string(),
            owner_id: OwnerId::new(),
            manager_id: None,
            buildings: buildings
                .into_iter()
                .enumerate()
                .map(|(i, units)| Building {
                    id: BuildingId::new(),
                    name: format!("Building {i}"),
                    units,
                })
                .collect(),
        }
    }

    #[test]
    fn test_two_buildings_one_occupied() {
        let property = property(vec![
            vec![unit("A", dec!(1800), true)],
            vec![unit("B", dec!(1500), false)],
        ]);

        let aggregate = PropertyAggregator::aggregate(&property);

        assert_eq!(aggregate.total_units, 2);
        assert_eq!(aggregate.occupied_units, 1);
        assert_eq!(aggregate.vacant_units, 1);
        assert_eq!(aggregate.revenue, dec!(1800));
        assert_eq!(aggregate.occupancy_percentage, dec!(50));
    }

    #[test]
    fn test_empty_property_is_zeroed() {
        let empty = property(vec![]);
        let aggregate = PropertyAggregator::aggregate(&empty);
        assert_eq!(aggregate.total_units, 0);
        assert_eq!(aggregate.revenue, Decimal::ZERO);
        assert_eq!(aggregate.occupancy_percentage, Decimal::ZERO);

        let no_units = property(vec![vec![], vec![]]);
        assert_eq!(
            PropertyAggregator::aggregate(&no_units).occupancy_percentage,
            Decimal::ZERO
        );
    }

    #[test]
    fn test_portfolio_combines_properties() {
        let properties = vec![
            property(vec![vec![unit("A", dec!(1800), true), unit("B", dec!(1500), false)]]),
            property(vec![vec![unit("C", dec!(2000), true), unit("D", dec!(2100), true)]]),
        ];

        let metrics = PropertyAggregator::portfolio(&properties);
        assert_eq!(metrics.property_count, 2);
        assert_eq!(metrics.total_units, 4);
        assert_eq!(metrics.occupied_units, 3);
        assert_eq!(metrics.vacant_units, 1);
        assert_eq!(metrics.revenue, dec!(5900));
        assert_eq!(metrics.occupancy_percentage, dec!(75));

        assert_eq!(PropertyAggregator::portfolio(&[]), PortfolioMetrics::default());
    }

    #[test]
    fn test_vacancies_lists_only_vacant_units() {
        let properties = vec![property(vec![
            vec![unit("A", dec!(1800), true)],
            vec![unit("B", dec!(1500), false), unit("C", dec!(1550), false)],
        ])];

        let vacancies = PropertyAggregator::vacancies(&properties);
        let names: Vec<&str> = vacancies.iter().map(|v| v.unit_name.as_str()).collect();
        assert_eq!(names, vec!["B", "C"]);
        assert_eq!(vacancies[0].building_name, "Building 1");
        assert_eq!(vacancies[1].market_rent, dec!(1550));
    }

    proptest! {
        /// Occupied plus vacant always equals total, and only occupied
        /// units contribute revenue.
        #[test]
        fn test_aggregate_invariants(
            units in prop::collection::vec((1i64..500_000, any::<bool>()), 0..40),
        ) {
            let built: Vec<Unit> = units
                .iter()
                .enumerate()
                .map(|(i, (cents, occupied))| unit(&format!("U{i}"), Decimal::new(*cents, 2), *occupied))
                .collect();
            let expected_revenue: Decimal = built
                .iter()
                .filter(|u| u.is_occupied())
                .map(|u| u.monthly_rent)
                .sum();

            let aggregate = PropertyAggregator::aggregate(&property(vec![built]));

            prop_assert_eq!(aggregate.occupied_units + aggregate.vacant_units, aggregate.total_units);
            prop_assert_eq!(aggregate.revenue, expected_revenue);
            prop_assert!(aggregate.occupancy_percentage <= Decimal::ONE_HUNDRED);
        }
    }
}
