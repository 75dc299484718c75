//! Command implementations

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use clap::Subcommand;
use haliburton_watchdog::prelude::*;

use crate::error::CliError;
use crate::output::{self, StatusReport};

type Device = WatchdogDevice<WatchdogController<DevPort, StdDelay>>;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Arm the watchdog (pulse the tick line, set the reset enable bit)
    Start,

    /// Request the watchdog be stopped
    Stop,

    /// Pulse the tick line once
    Ping,

    /// Select a timeout class: 0=200ms 1=30s 2=60s 3=180s
    SetTimeout {
        /// Timeout code; codes above 3 are ignored by the hardware driver
        code: u32,
    },

    /// Arm with at least the given number of seconds of timeout
    Arm {
        /// Requested timeout in seconds
        seconds: u32,
    },

    /// Show reset enable, timeout and reset source
    Status,

    /// Ping periodically
    Keepalive {
        /// Interval between pings in milliseconds
        #[arg(short, long = "interval", value_name = "MS", default_value_t = 1000)]
        interval_ms: u64,

        /// Stop after this many pings (default: run until killed)
        #[arg(short = 'n', long)]
        count: Option<u64>,
    },
}

/// Open the port device and attach the driver.
pub fn attach(config_path: Option<&Path>, port_device: &Path) -> Result<Device, CliError> {
    let config = match config_path {
        Some(path) => WatchdogConfig::from_file(path).map_err(CliError::InvalidConfiguration)?,
        None => WatchdogConfig::default(),
    };

    let ports = DevPort::open(port_device).map_err(|source| CliError::PortDevice {
        path: port_device.display().to_string(),
        source,
    })?;

    Ok(E1030Driver.probe(&config, ports, StdDelay)?)
}

/// Execute a command against an attached device.
pub fn execute(device: Device, command: &Commands, json: bool) -> Result<()> {
    match command {
        Commands::Start => {
            device.start().map_err(CliError::from)?;
            output::print_action("started", None, json)?;
        }
        Commands::Stop => {
            device.stop().map_err(CliError::from)?;
            let detail = device
                .ops()
                .is_enabled()
                .then(|| "reset enable bit still set".to_owned());
            output::print_action("stopped", detail, json)?;
        }
        Commands::Ping => {
            device.ops().ping().map_err(CliError::from)?;
            output::print_action("pinged", None, json)?;
        }
        Commands::SetTimeout { code } => {
            device.set_timeout(*code).map_err(CliError::from)?;
            let detail = match TimeoutClass::from_code(*code) {
                Some(class) => format!("timeout {class}"),
                None => format!("code {code} out of range, ignored"),
            };
            output::print_action("set-timeout", Some(detail), json)?;
        }
        Commands::Arm { seconds } => {
            let platform = PlatformWatchdog::new(device);
            let effective = platform.arm(*seconds).map_err(CliError::from)?;
            output::print_action("armed", Some(format!("{effective}s")), json)?;
        }
        Commands::Status => {
            output::print_status(&status_report(&device), json)?;
        }
        Commands::Keepalive { interval_ms, count } => {
            keepalive(&device, Duration::from_millis(*interval_ms), *count)?;
        }
    }
    Ok(())
}

fn status_report(device: &Device) -> StatusReport {
    let ctl = device.ops();
    let class = ctl.timeout_class();
    StatusReport {
        identity: device.info().identity.clone(),
        options: device.info().options.bits(),
        enabled: ctl.is_enabled(),
        active: device.is_active(),
        nowayout: device.nowayout(),
        timeout: class.to_string(),
        timeout_ms: u64::try_from(class.duration().as_millis()).unwrap_or(u64::MAX),
        reset_source: ctl.reset_source(),
    }
}

fn keepalive(device: &Device, interval: Duration, count: Option<u64>) -> Result<(), CliError> {
    let mut sent: u64 = 0;
    loop {
        device.ops().ping()?;
        sent = sent.saturating_add(1);
        tracing::info!(sent, "Keepalive ping");
        if count.is_some_and(|limit| sent >= limit) {
            return Ok(());
        }
        std::thread::sleep(interval);
    }
}
