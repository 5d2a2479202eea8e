//! Immutable portfolio snapshots.
//!
//! Every computation takes a snapshot explicitly instead of reading shared
//! mutable state. The snapshot is supplied fully loaded by the caller and is
//! never written back.

pub mod index;
pub mod types;

pub use index::{SnapshotIndex, UnitLocation};
pub use types::{Owner, PortfolioSnapshot, Tenant, TenantStatus};
