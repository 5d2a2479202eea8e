//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `TenantId` where a `LeaseId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(PropertyId, "Unique identifier for a property.");
typed_id!(BuildingId, "Unique identifier for a building within a property.");
typed_id!(UnitId, "Unique identifier for a rentable unit.");
typed_id!(OwnerId, "Unique identifier for a property owner.");
typed_id!(ManagerId, "Unique identifier for a property manager.");
typed_id!(TenantId, "Unique identifier for a tenant.");
typed_id!(LeaseId, "Unique identifier for a lease.");
typed_id!(PaymentId, "Unique identifier for a rent payment.");
typed_id!(TransactionId, "Unique identifier for a ledger transaction.");
typed_id!(
    MaintenanceRequestId,
    "Unique identifier for a maintenance request."
);
typed_id!(CapitalProjectId, "Unique identifier for a capital project.");
