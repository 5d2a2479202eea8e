//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or is inconsistent.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Snapshot could not be read or parsed.
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// Input failed boundary validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Requested entity does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Report could not be rendered or exported.
    #[error("Export error: {0}")]
    Export(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the process exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) | Self::NotFound(_) => 2,
            Self::Config(_) => 3,
            Self::Snapshot(_) => 4,
            Self::Export(_) | Self::Internal(_) => 1,
        }
    }

    /// Returns the machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG_ERROR",
            Self::Snapshot(_) => "SNAPSHOT_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Export(_) => "EXPORT_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(AppError::Validation(String::new()).exit_code(), 2);
        assert_eq!(AppError::NotFound(String::new()).exit_code(), 2);
        assert_eq!(AppError::Config(String::new()).exit_code(), 3);
        assert_eq!(AppError::Snapshot(String::new()).exit_code(), 4);
        assert_eq!(AppError::Export(String::new()).exit_code(), 1);
        assert_eq!(AppError::Internal(String::new()).exit_code(), 1);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::Config(String::new()).error_code(), "CONFIG_ERROR");
        assert_eq!(
            AppError::Snapshot(String::new()).error_code(),
            "SNAPSHOT_ERROR"
        );
        assert_eq!(
            AppError::Validation(String::new()).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(AppError::NotFound(String::new()).error_code(), "NOT_FOUND");
        assert_eq!(AppError::Export(String::new()).error_code(), "EXPORT_ERROR");
        assert_eq!(
            AppError::Internal(String::new()).error_code(),
            "INTERNAL_ERROR"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            AppError::Snapshot("missing file".into()).to_string(),
            "Snapshot error: missing file"
        );
        assert_eq!(
            AppError::Validation("bad range".into()).to_string(),
            "Validation error: bad range"
        );
    }
}
