//! Error types for haliburton-wdtctl

use haliburton_watchdog::WatchdogError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Cannot open port device {path}: {source}")]
    PortDevice {
        path: String,
        #[source]
        source: WatchdogError,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[source] WatchdogError),

    #[error(transparent)]
    Watchdog(#[from] WatchdogError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::PortDevice { .. } => 2,
            Self::Watchdog(WatchdogError::NoWayOut) => 3,
            Self::InvalidConfiguration(_) | Self::JsonError(_) => 4,
            Self::Watchdog(WatchdogError::Unsupported(_)) => 5,
            Self::Watchdog(_) => 1,
        }
    }
}
