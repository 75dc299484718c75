//! The E1030 watchdog controller.
//!
//! All register traffic goes through a single [`parking_lot::Mutex`] that
//! also owns the port backend, so a register sequence can only run with
//! the lock held and never interleaves with another one.

use core::time::Duration;

use embedded_hal::delay::DelayNs;
use parking_lot::Mutex;

use crate::config::{StopMode, WatchdogConfig};
use crate::error::WatchdogResult;
use crate::ops::{WatchdogInfo, WatchdogOps};
use crate::port::PortIo;
use crate::regs::{
    GPIO, GPIO_DIR, MASK_BIT, RST_CON, RST_SOURCE, TICK_MASK, TICK_PULSE_MS, TIME_SET,
    TIMEOUT_CODE_MASK, TimeoutClass,
};

/// Lock-protected controller state.
struct Inner<P, D> {
    ports: P,
    delay: D,
    timeout_class: TimeoutClass,
}

impl<P: PortIo, D: DelayNs> Inner<P, D> {
    fn drive_tick(&mut self, high: bool, posted: bool) {
        let gpio = self.ports.inl(GPIO);
        let gpio = if high {
            gpio | TICK_MASK
        } else {
            gpio & !TICK_MASK
        };
        if posted {
            self.ports.outl_p(GPIO, gpio);
        } else {
            self.ports.outl(GPIO, gpio);
        }
    }

    /// Tick line low, hold, high.
    fn pulse_tick(&mut self) {
        self.drive_tick(false, true);
        self.delay.delay_ms(TICK_PULSE_MS);
        self.drive_tick(true, true);
    }
}

/// Watchdog controller for one E1030 device.
///
/// Created at attach with a port backend and a delay provider. The four
/// host entry points live on the [`WatchdogOps`] impl.
///
/// # Example
///
/// ```rust
/// use haliburton_watchdog::prelude::*;
///
/// let ports = SimulatedPorts::new();
/// let controller =
///     WatchdogController::new(&WatchdogConfig::default(), ports.clone(), NoopDelay);
///
/// controller.set_timeout(2).expect("set_timeout never fails");
/// controller.start().expect("start never fails");
///
/// assert_eq!(ports.peek_byte(haliburton_watchdog::regs::TIME_SET), 2);
/// assert!(controller.is_enabled());
/// ```
pub struct WatchdogController<P, D> {
    inner: Mutex<Inner<P, D>>,
    stop_mode: StopMode,
    info: WatchdogInfo,
}

impl<P, D> core::fmt::Debug for WatchdogController<P, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WatchdogController")
            .field("stop_mode", &self.stop_mode)
            .field("identity", &self.info.identity)
            .finish_non_exhaustive()
    }
}

impl<P: PortIo, D: DelayNs> WatchdogController<P, D> {
    /// Create a controller. Touches no hardware.
    ///
    /// An out-of-range `initial_timeout_class` falls back to the 200 ms
    /// class; `WatchdogConfig::validate` rejects it earlier.
    #[must_use]
    pub fn new(config: &WatchdogConfig, ports: P, delay: D) -> Self {
        let timeout_class =
            TimeoutClass::from_code(u32::from(config.initial_timeout_class)).unwrap_or_default();
        Self {
            inner: Mutex::new(Inner {
                ports,
                delay,
                timeout_class,
            }),
            stop_mode: config.stop_mode,
            info: WatchdogInfo::e1030(config.identity.clone()),
        }
    }

    /// Currently configured timeout class.
    #[must_use]
    pub fn timeout_class(&self) -> TimeoutClass {
        self.inner.lock().timeout_class
    }

    /// Currently configured timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout_class().duration()
    }

    /// Stop behaviour this controller was built with.
    #[must_use]
    pub fn stop_mode(&self) -> StopMode {
        self.stop_mode
    }

    /// Whether the reset-enable bit is set in `RST_CON`.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.inner.lock().ports.inb(RST_CON) & MASK_BIT != 0
    }

    /// Take the timeout class from `TIME_SET`, replacing the configured one.
    ///
    /// Only the low two bits of the register are significant.
    pub fn sync_timeout_class(&self) -> TimeoutClass {
        let mut inner = self.inner.lock();
        let code = inner.ports.inb(TIME_SET) & TIMEOUT_CODE_MASK;
        let class = TimeoutClass::from_code(u32::from(code)).unwrap_or_default();
        inner.timeout_class = class;
        class
    }

    /// Raw contents of the reset-source register.
    #[must_use]
    pub fn reset_source(&self) -> u8 {
        self.inner.lock().ports.inb(RST_SOURCE)
    }
}

impl<P, D> WatchdogOps for WatchdogController<P, D>
where
    P: PortIo + Send,
    D: DelayNs + Send,
{
    fn start(&self) -> WatchdogResult<()> {
        let mut inner = self.inner.lock();

        inner.drive_tick(true, false);

        let dir = inner.ports.inl(GPIO_DIR);
        inner.ports.outl(GPIO_DIR, dir & !TICK_MASK);

        let reset_ctrl = inner.ports.inb(RST_CON);

        inner.pulse_tick();

        inner.ports.outb(RST_CON, reset_ctrl | MASK_BIT);

        tracing::info!(
            timeout = %inner.timeout_class,
            rst_con = reset_ctrl | MASK_BIT,
            "Watchdog started"
        );
        Ok(())
    }

    fn stop(&self) -> WatchdogResult<()> {
        let mut inner = self.inner.lock();

        let prior = inner.ports.inb(RST_CON);
        let reset_ctrl = match self.stop_mode {
            StopMode::Literal => prior & MASK_BIT,
            StopMode::ClearEnable => prior & !MASK_BIT,
        };
        inner.ports.outb(RST_CON, reset_ctrl);

        tracing::info!(
            mode = ?self.stop_mode,
            prior,
            rst_con = reset_ctrl,
            "Watchdog stopped"
        );
        Ok(())
    }

    fn ping(&self) -> WatchdogResult<()> {
        let mut inner = self.inner.lock();
        inner.pulse_tick();
        tracing::trace!("Watchdog pinged");
        Ok(())
    }

    fn set_timeout(&self, timeout: u32) -> WatchdogResult<()> {
        let mut inner = self.inner.lock();

        match TimeoutClass::from_code(timeout) {
            Some(class) => {
                inner.ports.outb(TIME_SET, class.code());
                inner.timeout_class = class;
                tracing::debug!(timeout = %class, "Timeout class set");
            }
            None => {
                tracing::warn!(
                    requested = timeout,
                    current = %inner.timeout_class,
                    "Ignoring out-of-range timeout code"
                );
            }
        }
        Ok(())
    }

    fn info(&self) -> &WatchdogInfo {
        &self.info
    }
}
