//! Prelude for haliburton-watchdog.
//!
//! This module re-exports the most commonly used types for convenient importing.
//!
//! # Example
//!
//! ```rust
//! use haliburton_watchdog::prelude::*;
//!
//! let controller =
//!     WatchdogController::new(&WatchdogConfig::default(), SimulatedPorts::new(), NoopDelay);
//! controller.ping().expect("ping never fails");
//! ```

pub use crate::config::{StopMode, WatchdogConfig, WatchdogConfigBuilder};
pub use crate::controller::WatchdogController;
pub use crate::delay::{NoopDelay, StdDelay};
pub use crate::dev_port::DevPort;
pub use crate::driver::{E1030Driver, WatchdogDevice};
pub use crate::error::{WatchdogError, WatchdogResult};
pub use crate::ops::{WatchdogInfo, WatchdogOps, WatchdogOptions};
pub use crate::platform::PlatformWatchdog;
pub use crate::port::PortIo;
pub use crate::regs::TimeoutClass;
pub use crate::sim::{AccessKind, AccessWidth, PortAccess, SimulatedPorts};
