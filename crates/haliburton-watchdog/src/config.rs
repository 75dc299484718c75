//! Attach-time configuration for the watchdog.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{WatchdogError, WatchdogResult};

/// Identity reported through `WDIOC_GETSUPPORT`.
pub const DEFAULT_IDENTITY: &str = "e1030 Watchdog";

/// Longest identity that fits the 32-byte, NUL-terminated `identity` field.
pub const MAX_IDENTITY_LEN: usize = 31;

/// How `stop()` rewrites the reset-control register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopMode {
    /// `RST_CON = RST_CON & MASK_BIT`, as shipped on the board.
    ///
    /// This keeps bit 0 as it was, so a running watchdog stays armed.
    #[default]
    Literal,
    /// `RST_CON = RST_CON & !MASK_BIT`, clearing only the enable bit.
    ClearEnable,
}

/// Watchdog configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchdogConfig {
    /// Once started, refuse stop requests until reboot.
    pub nowayout: bool,
    /// Reset-control update performed by `stop()`.
    pub stop_mode: StopMode,
    /// Timeout code assumed at attach. Not written to hardware.
    pub initial_timeout_class: u8,
    /// Identity string reported to userspace.
    pub identity: String,
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            nowayout: cfg!(feature = "nowayout-default"),
            stop_mode: StopMode::default(),
            initial_timeout_class: 0,
            identity: DEFAULT_IDENTITY.to_owned(),
        }
    }
}

impl WatchdogConfig {
    /// Create a configuration builder.
    #[must_use]
    pub fn builder() -> WatchdogConfigBuilder {
        WatchdogConfigBuilder::default()
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> WatchdogResult<()> {
        if self.initial_timeout_class > 3 {
            return Err(WatchdogError::invalid_configuration(
                "initial_timeout_class must be between 0 and 3",
            ));
        }
        if self.identity.is_empty() {
            return Err(WatchdogError::invalid_configuration(
                "identity must not be empty",
            ));
        }
        if self.identity.len() > MAX_IDENTITY_LEN {
            return Err(WatchdogError::invalid_configuration(format!(
                "identity must be at most {MAX_IDENTITY_LEN} bytes"
            )));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration document.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or invalid.
    pub fn from_json(json: &str) -> WatchdogResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is invalid.
    pub fn from_file(path: impl AsRef<Path>) -> WatchdogResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }
}

/// Builder for `WatchdogConfig`.
#[derive(Debug, Default)]
pub struct WatchdogConfigBuilder {
    config: WatchdogConfig,
}

impl WatchdogConfigBuilder {
    /// Set the nowayout policy.
    #[must_use]
    pub fn nowayout(mut self, nowayout: bool) -> Self {
        self.config.nowayout = nowayout;
        self
    }

    /// Set the stop mode.
    #[must_use]
    pub fn stop_mode(mut self, mode: StopMode) -> Self {
        self.config.stop_mode = mode;
        self
    }

    /// Set the initial timeout code.
    #[must_use]
    pub fn initial_timeout_class(mut self, code: u8) -> Self {
        self.config.initial_timeout_class = code;
        self
    }

    /// Set the identity string.
    #[must_use]
    pub fn identity(mut self, identity: impl Into<String>) -> Self {
        self.config.identity = identity.into();
        self
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> WatchdogResult<WatchdogConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
