//! Operation table and identity exposed to the host watchdog framework.
//!
//! The host owns the character device, ioctl handling and timer
//! bookkeeping. It calls into the driver through [`WatchdogOps`] and reads
//! capabilities from [`WatchdogInfo`].

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::error::WatchdogResult;

bitflags! {
    /// Capability flags, bit-compatible with Linux `WDIOF_*`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WatchdogOptions: u32 {
        /// `WDIOF_SETTIMEOUT`: timeout can be changed.
        const SETTIMEOUT = 0x0080;
        /// `WDIOF_MAGICCLOSE`: close only stops after writing 'V'.
        const MAGICCLOSE = 0x0100;
        /// `WDIOF_KEEPALIVEPING`: keepalive ping is supported.
        const KEEPALIVEPING = 0x8000;
    }
}

impl Serialize for WatchdogOptions {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}

impl<'de> Deserialize<'de> for WatchdogOptions {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = u32::deserialize(deserializer)?;
        Ok(Self::from_bits_truncate(bits))
    }
}

/// What `WDIOC_GETSUPPORT` reports for this device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchdogInfo {
    /// Supported capabilities.
    pub options: WatchdogOptions,
    /// Firmware version. The CPLD exposes none.
    pub firmware_version: u32,
    /// Board identity.
    pub identity: String,
}

impl WatchdogInfo {
    /// Capabilities of the E1030 watchdog.
    pub const E1030_OPTIONS: WatchdogOptions = WatchdogOptions::KEEPALIVEPING
        .union(WatchdogOptions::MAGICCLOSE)
        .union(WatchdogOptions::SETTIMEOUT);

    /// Info block for an E1030 with the given identity.
    #[must_use]
    pub fn e1030(identity: impl Into<String>) -> Self {
        Self {
            options: Self::E1030_OPTIONS,
            firmware_version: 0,
            identity: identity.into(),
        }
    }
}

/// Driver entry points called by the host framework.
///
/// Every method returns the status the host expects. Implementations for
/// this board always succeed.
pub trait WatchdogOps: Send + Sync {
    /// Arm the watchdog.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn start(&self) -> WatchdogResult<()>;

    /// Disarm the watchdog.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn stop(&self) -> WatchdogResult<()>;

    /// Signal liveness to the hardware.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn ping(&self) -> WatchdogResult<()>;

    /// Request a new timeout code.
    ///
    /// # Errors
    ///
    /// Implementation-defined.
    fn set_timeout(&self, timeout: u32) -> WatchdogResult<()>;

    /// Identity and capability block.
    fn info(&self) -> &WatchdogInfo;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trait_bounds() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn WatchdogOps>();
    }

    #[test]
    fn test_e1030_options_match_linux_flags() {
        let info = WatchdogInfo::e1030("e1030 Watchdog");
        assert_eq!(info.options.bits(), 0x8180);
        assert_eq!(info.firmware_version, 0);
    }

    #[test]
    fn test_options_serialize_as_bits() -> Result<(), serde_json::Error> {
        let json = serde_json::to_string(&WatchdogInfo::E1030_OPTIONS)?;
        assert_eq!(json, "33152");
        let back: WatchdogOptions = serde_json::from_str(&json)?;
        assert_eq!(back, WatchdogInfo::E1030_OPTIONS);
        Ok(())
    }
}
