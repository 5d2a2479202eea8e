//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Snapshot source configuration.
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    /// Report and dashboard configuration.
    #[serde(default)]
    pub report: ReportConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Snapshot source configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotConfig {
    /// Path to the JSON snapshot file.
    #[serde(default = "default_snapshot_path")]
    pub path: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            path: default_snapshot_path(),
        }
    }
}

fn default_snapshot_path() -> String {
    "data/snapshot.json".to_string()
}

/// How a second payment in the same billing period for one lease is treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePaymentPolicy {
    /// The first payment in insertion order wins; the duplicate is reported.
    #[default]
    FirstMatch,
    /// The lease is left out of the rent roll and counted as skipped.
    Reject,
}

/// Report and dashboard configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Maximum number of rows shown in a table preview.
    #[serde(default = "default_preview_row_limit")]
    pub preview_row_limit: usize,
    /// Look-ahead window for expiring leases, in days.
    #[serde(default = "default_expiring_lease_window_days")]
    pub expiring_lease_window_days: i64,
    /// Number of due tenants listed on the dashboard.
    #[serde(default = "default_due_tenant_limit")]
    pub due_tenant_limit: usize,
    /// Number of vacant units and urgent requests listed on the dashboard.
    #[serde(default = "default_dashboard_list_limit")]
    pub dashboard_list_limit: usize,
    /// Duplicate period payment handling.
    #[serde(default)]
    pub duplicate_payment_policy: DuplicatePaymentPolicy,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            preview_row_limit: default_preview_row_limit(),
            expiring_lease_window_days: default_expiring_lease_window_days(),
            due_tenant_limit: default_due_tenant_limit(),
            dashboard_list_limit: default_dashboard_list_limit(),
            duplicate_payment_policy: DuplicatePaymentPolicy::default(),
        }
    }
}

fn default_preview_row_limit() -> usize {
    100
}

fn default_expiring_lease_window_days() -> i64 {
    90
}

fn default_due_tenant_limit() -> usize {
    5
}

fn default_dashboard_list_limit() -> usize {
    4
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON log lines instead of human-readable ones.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "properly=info,properly_core=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("PROPERLY")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
