//! Leases and rent payments.

pub mod types;

pub use types::{Lease, LeaseStatus, Payment, PaymentMethod, PaymentStatus};
