//! Shared types, errors, and configuration for Properly.
//!
//! This crate provides common types used across all other crates:
//! - Money helpers with decimal precision
//! - Billing periods (calendar months)
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, DuplicatePaymentPolicy};
pub use error::{AppError, AppResult};
