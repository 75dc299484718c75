//! Error types for the watchdog driver.
//!
//! The register control path never fails; these errors cover the
//! surrounding surface: configuration, the nowayout policy and opening
//! the port device.

use thiserror::Error;

/// Errors that can occur around watchdog operations.
#[derive(Debug, Error)]
pub enum WatchdogError {
    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Configuration could not be parsed.
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Stop was requested on a running watchdog with nowayout set.
    #[error("Watchdog is running and nowayout is set; it cannot be stopped")]
    NoWayOut,

    /// The hardware has no support for the requested operation.
    #[error("Operation not supported: {0}")]
    Unsupported(&'static str),

    /// Port device I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WatchdogError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration(reason.into())
    }
}

/// A specialized `Result` type for watchdog operations.
pub type WatchdogResult<T> = std::result::Result<T, WatchdogError>;
