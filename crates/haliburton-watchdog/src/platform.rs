//! Seconds-based arm/disarm facade used by platform management daemons.
//!
//! Callers think in seconds; the hardware only knows four timeout classes.
//! `arm` picks the shortest class that covers the request and reports the
//! timeout actually in effect.

use core::time::Duration;

use crate::driver::WatchdogDevice;
use crate::error::{WatchdogError, WatchdogResult};
use crate::ops::WatchdogOps;
use crate::regs::TimeoutClass;

/// Platform-API view of a registered watchdog.
#[derive(Debug)]
pub struct PlatformWatchdog<O> {
    device: WatchdogDevice<O>,
}

impl<O: WatchdogOps> PlatformWatchdog<O> {
    /// Wrap a registered device.
    #[must_use]
    pub fn new(device: WatchdogDevice<O>) -> Self {
        Self { device }
    }

    /// Arm with at least `seconds` of timeout, or re-arm if running.
    ///
    /// Returns the effective timeout in whole seconds.
    ///
    /// # Errors
    ///
    /// Propagates device errors.
    pub fn arm(&self, seconds: u32) -> WatchdogResult<u32> {
        let class = TimeoutClass::for_duration(Duration::from_secs(u64::from(seconds)));
        self.device.set_timeout(u32::from(class.code()))?;
        if self.device.is_active() {
            self.device.keepalive()?;
        } else {
            self.device.start()?;
        }
        tracing::debug!(requested = seconds, effective = %class, "Watchdog armed");
        Ok(class.whole_seconds())
    }

    /// Disarm the watchdog.
    ///
    /// # Errors
    ///
    /// Returns [`WatchdogError::NoWayOut`] if nowayout forbids it.
    pub fn disarm(&self) -> WatchdogResult<()> {
        self.device.stop()
    }

    /// Whether the watchdog is armed.
    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.device.is_active()
    }

    /// Seconds until the watchdog fires.
    ///
    /// # Errors
    ///
    /// Always [`WatchdogError::Unsupported`]: the CPLD has no time-left
    /// register.
    pub fn get_remaining_time(&self) -> WatchdogResult<u32> {
        Err(WatchdogError::Unsupported("get_remaining_time"))
    }
}
