//! # haliburton-watchdog
//!
//! Hardware watchdog driver for the Celestica Haliburton (E1030) board.
//!
//! The watchdog sits in the board CPLD behind four I/O-port registers and
//! is kept alive by pulsing GPIO 15 (the tick line). This crate provides:
//! - [`WatchdogController`]: start / stop / ping / set-timeout against the
//!   register set, serialized by one lock
//! - [`PortIo`]: the port-access capability, with [`SimulatedPorts`] for
//!   tests and [`DevPort`] for `/dev/port` on Linux
//! - [`E1030Driver`] / [`WatchdogDevice`]: attach, detach and nowayout
//! - [`PlatformWatchdog`]: seconds-based arm/disarm for platform daemons
//!
//! ## Register sequences
//!
//! ```text
//! start:  GPIO |= TICK          GPIO_DIR &= !TICK      snap = RST_CON
//!         GPIO &= !TICK  ~10ms  GPIO |= TICK           RST_CON = snap | 1
//! ping:   GPIO &= !TICK  ~10ms  GPIO |= TICK
//! stop:   RST_CON = RST_CON & 1
//! set_timeout(t):  t < 4 => TIME_SET = t
//! ```
//!
//! `stop` keeps only bit 0 of `RST_CON`, which leaves an armed watchdog
//! armed. That is what the board firmware expects; `StopMode::ClearEnable`
//! clears the enable bit instead.
//!
//! ## Example
//!
//! ```rust
//! use haliburton_watchdog::prelude::*;
//!
//! let ports = SimulatedPorts::new();
//! let device = E1030Driver
//!     .probe(&WatchdogConfig::default(), ports.clone(), NoopDelay)
//!     .expect("valid config");
//!
//! device.set_timeout(1).expect("set_timeout");
//! device.start().expect("start");
//! device.keepalive().expect("ping");
//!
//! assert!(device.is_active());
//! assert_eq!(device.ops().timeout_class(), TimeoutClass::Sec30);
//! ```

#![deny(
    unsafe_op_in_unsafe_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic_in_result_fn,
    clippy::panic,
    missing_docs,
    missing_debug_implementations
)]
#![warn(clippy::pedantic)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod controller;
pub mod delay;
pub mod dev_port;
pub mod driver;
pub mod error;
pub mod ops;
pub mod platform;
pub mod port;
pub mod prelude;
pub mod regs;
pub mod sim;

pub use config::{StopMode, WatchdogConfig, WatchdogConfigBuilder};
pub use controller::WatchdogController;
pub use delay::{NoopDelay, StdDelay};
pub use dev_port::DevPort;
pub use driver::{DRIVER_NAME, E1030Driver, WatchdogDevice};
pub use error::{WatchdogError, WatchdogResult};
pub use ops::{WatchdogInfo, WatchdogOps, WatchdogOptions};
pub use platform::PlatformWatchdog;
pub use port::PortIo;
pub use regs::TimeoutClass;
pub use sim::{AccessKind, AccessWidth, PortAccess, SimulatedPorts};
