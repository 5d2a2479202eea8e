//! Properties, buildings and units, and their occupancy and revenue roll-ups.

pub mod aggregate;
pub mod types;

pub use aggregate::{PortfolioMetrics, PropertyAggregate, PropertyAggregator, VacantUnit};
pub use types::{Building, Property, RentSplit, Unit, UnitStatus, UnitTenant};
