//! Delay providers for the tick pulse.
//!
//! The controller takes any [`embedded_hal::delay::DelayNs`]. These two
//! cover hosted use.

use embedded_hal::delay::DelayNs;

/// Blocking delay on the calling thread via `std::thread::sleep`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdDelay;

impl DelayNs for StdDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }

    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
    }
}

/// Delay that returns immediately. For benches and simulated hardware.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDelay;

impl DelayNs for NoopDelay {
    fn delay_ns(&mut self, _ns: u32) {}
}
