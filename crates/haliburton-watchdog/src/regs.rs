//! Register map and timeout classes of the E1030 watchdog.
//!
//! The watchdog lives in the board CPLD and is reached through x86 I/O
//! ports. The "tick" input is wired to a chipset GPIO, so keeping the
//! watchdog alive means toggling bit 15 of the GPIO data register.
//!
//! ```text
//! port    width  name        use
//! 0x0110  8      TIME_SET    timeout class (2-bit code)
//! 0x0111  8      RST_CON     bit 0 = reset enable
//! 0x0112  8      RST_SOURCE  last reset cause (read-only)
//! 0x0504  32     GPIO_DIR    GPIO direction, tick bit cleared = output
//! 0x0508  32     GPIO        GPIO data, tick bit = tick line level
//! ```

use core::time::Duration;

use serde::{Deserialize, Serialize};

/// Timeout-select register (byte).
pub const TIME_SET: u16 = 0x0110;
/// Significant bits of [`TIME_SET`].
pub const TIMEOUT_CODE_MASK: u8 = 0x03;
/// Reset-control register (byte). Bit 0 arms the reset.
pub const RST_CON: u16 = 0x0111;
/// Reset-source register (byte).
pub const RST_SOURCE: u16 = 0x0112;
/// GPIO direction register (word).
pub const GPIO_DIR: u16 = 0x0504;
/// GPIO data register (word).
pub const GPIO: u16 = 0x0508;

/// Enable bit in `RST_CON`.
pub const MASK_BIT: u8 = 0x01;
/// GPIO pin carrying the tick line.
pub const TICK_BIT: u32 = 15;
/// `TICK_BIT` as a mask.
pub const TICK_MASK: u32 = 1 << TICK_BIT;

/// How long the tick line is held low during a pulse.
pub const TICK_PULSE_MS: u32 = 10;

/// One of the four timeouts the hardware supports.
///
/// The discriminant is the 2-bit code written to [`TIME_SET`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum TimeoutClass {
    /// 200 milliseconds.
    #[default]
    Ms200 = 0,
    /// 30 seconds.
    Sec30 = 1,
    /// 60 seconds.
    Sec60 = 2,
    /// 180 seconds.
    Sec180 = 3,
}

impl TimeoutClass {
    /// All classes, shortest first.
    pub const ALL: [Self; 4] = [Self::Ms200, Self::Sec30, Self::Sec60, Self::Sec180];

    /// Decode a raw timeout code. Codes `>= 4` have no class.
    #[must_use]
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::Ms200),
            1 => Some(Self::Sec30),
            2 => Some(Self::Sec60),
            3 => Some(Self::Sec180),
            _ => None,
        }
    }

    /// The code written to `TIME_SET`.
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Hardware timeout for this class.
    #[must_use]
    pub fn duration(self) -> Duration {
        match self {
            Self::Ms200 => Duration::from_millis(200),
            Self::Sec30 => Duration::from_secs(30),
            Self::Sec60 => Duration::from_secs(60),
            Self::Sec180 => Duration::from_secs(180),
        }
    }

    /// Smallest class that is at least `requested` long.
    ///
    /// Requests above 180 s saturate to [`TimeoutClass::Sec180`].
    #[must_use]
    pub fn for_duration(requested: Duration) -> Self {
        Self::ALL
            .into_iter()
            .find(|class| class.duration() >= requested)
            .unwrap_or(Self::Sec180)
    }

    /// Timeout rounded up to whole seconds, as reported to userspace.
    #[must_use]
    pub fn whole_seconds(self) -> u32 {
        match self {
            Self::Ms200 => 1,
            Self::Sec30 => 30,
            Self::Sec60 => 60,
            Self::Sec180 => 180,
        }
    }
}

impl core::fmt::Display for TimeoutClass {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Ms200 => write!(f, "200ms"),
            Self::Sec30 => write!(f, "30s"),
            Self::Sec60 => write!(f, "60s"),
            Self::Sec180 => write!(f, "180s"),
        }
    }
}
