//! Attach/detach of the E1030 watchdog and the per-device nowayout guard.
//!
//! This is the slice of host integration the board needs: build the
//! controller from configuration, pair it with its identity and policy,
//! and track whether userspace has it running.

use embedded_hal::delay::DelayNs;
use parking_lot::Mutex;

use crate::config::WatchdogConfig;
use crate::controller::WatchdogController;
use crate::error::{WatchdogError, WatchdogResult};
use crate::ops::{WatchdogInfo, WatchdogOps};
use crate::port::PortIo;

/// Platform driver/device name.
pub const DRIVER_NAME: &str = "e1030.wdt";

/// A registered watchdog: operations plus host-side state.
///
/// The device lock is always taken before the controller lock.
#[derive(Debug)]
pub struct WatchdogDevice<O> {
    ops: O,
    nowayout: bool,
    active: Mutex<bool>,
}

impl<O: WatchdogOps> WatchdogDevice<O> {
    /// Wrap an operation table.
    #[must_use]
    pub fn new(ops: O, nowayout: bool) -> Self {
        Self {
            ops,
            nowayout,
            active: Mutex::new(false),
        }
    }

    /// Start the watchdog and mark it active.
    ///
    /// # Errors
    ///
    /// Propagates errors from the operation table.
    pub fn start(&self) -> WatchdogResult<()> {
        let mut active = self.active.lock();
        self.ops.start()?;
        *active = true;
        Ok(())
    }

    /// Stop the watchdog on userspace request.
    ///
    /// # Errors
    ///
    /// Returns [`WatchdogError::NoWayOut`] if the device is running and
    /// nowayout is set; otherwise propagates operation errors.
    pub fn stop(&self) -> WatchdogResult<()> {
        let mut active = self.active.lock();
        if *active && self.nowayout {
            tracing::warn!(identity = %self.ops.info().identity, "Refusing to stop: nowayout is set");
            return Err(WatchdogError::NoWayOut);
        }
        self.ops.stop()?;
        *active = false;
        Ok(())
    }

    /// Ping the watchdog if it is running. A stopped device ignores pings.
    ///
    /// # Errors
    ///
    /// Propagates errors from the operation table.
    pub fn keepalive(&self) -> WatchdogResult<()> {
        let active = self.active.lock();
        if *active {
            self.ops.ping()?;
        }
        Ok(())
    }

    /// Forward a timeout code to the operation table.
    ///
    /// # Errors
    ///
    /// Propagates errors from the operation table.
    pub fn set_timeout(&self, timeout: u32) -> WatchdogResult<()> {
        let _active = self.active.lock();
        self.ops.set_timeout(timeout)
    }

    /// Whether the device has been started and not stopped since.
    #[must_use]
    pub fn is_active(&self) -> bool {
        *self.active.lock()
    }

    /// Whether stop requests are refused once running.
    #[must_use]
    pub fn nowayout(&self) -> bool {
        self.nowayout
    }

    /// Identity and capabilities.
    #[must_use]
    pub fn info(&self) -> &WatchdogInfo {
        self.ops.info()
    }

    /// The underlying operation table.
    #[must_use]
    pub fn ops(&self) -> &O {
        &self.ops
    }

    fn mark_running(&self) {
        *self.active.lock() = true;
    }
}

/// Platform driver for the E1030 watchdog.
#[derive(Debug, Default, Clone, Copy)]
pub struct E1030Driver;

impl E1030Driver {
    /// Attach to the board and register the watchdog.
    ///
    /// If the reset-enable bit is already set (firmware left the watchdog
    /// armed) the device starts out active, so nowayout applies at once.
    /// The timeout class is read back from `TIME_SET`, so a class selected
    /// by an earlier attach is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid.
    pub fn probe<P, D>(
        &self,
        config: &WatchdogConfig,
        ports: P,
        delay: D,
    ) -> WatchdogResult<WatchdogDevice<WatchdogController<P, D>>>
    where
        P: PortIo + Send,
        D: DelayNs + Send,
    {
        config.validate()?;

        let controller = WatchdogController::new(config, ports, delay);
        let running = controller.is_enabled();
        let timeout = controller.sync_timeout_class();
        let device = WatchdogDevice::new(controller, config.nowayout);
        if running {
            device.mark_running();
        }

        tracing::info!(
            driver = DRIVER_NAME,
            identity = %config.identity,
            nowayout = config.nowayout,
            running,
            %timeout,
            "Watchdog registered"
        );
        Ok(device)
    }

    /// Detach. The hardware is left as it is.
    pub fn remove<O: WatchdogOps>(&self, device: WatchdogDevice<O>) {
        tracing::info!(
            driver = DRIVER_NAME,
            identity = %device.info().identity,
            active = device.is_active(),
            "Watchdog unregistered"
        );
        drop(device);
    }
}
