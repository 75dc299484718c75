//! haliburton-wdtctl - E1030 watchdog control
//!
//! Drives the Haliburton board watchdog directly through `/dev/port`.
//! Requires root (`CAP_SYS_RAWIO`) and must not be used while the kernel
//! watchdog driver is bound to the device.

#![deny(unused_must_use)]
#![deny(clippy::unwrap_used)]

mod commands;
mod error;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use haliburton_watchdog::dev_port::DEV_PORT_PATH;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::commands::Commands;
use crate::error::CliError;

#[derive(Parser, Debug)]
#[command(name = "haliburton-wdtctl")]
#[command(about = "Control the Haliburton E1030 hardware watchdog")]
#[command(version)]
struct Cli {
    /// JSON configuration file
    #[arg(short, long, global = true, env = "HALIBURTON_WDT_CONFIG")]
    config: Option<PathBuf>,

    /// Port device to drive
    #[arg(long, global = true, default_value = DEV_PORT_PATH)]
    port_device: PathBuf,

    /// Output in JSON format for machine parsing
    #[arg(long, global = true)]
    json: bool,

    /// Verbose logging
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("haliburton_wdtctl={log_level},haliburton_watchdog={log_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let result = commands::attach(cli.config.as_deref(), &cli.port_device)
        .map_err(anyhow::Error::from)
        .and_then(|device| commands::execute(device, &cli.command, cli.json));

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                output::print_error_json(&e);
            } else {
                output::print_error_human(&e);
            }
            let code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
            ExitCode::from(code)
        }
    }
}
