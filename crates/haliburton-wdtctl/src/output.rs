//! Output formatting for CLI responses

use anyhow::Error;
use colored::Colorize;
use serde::Serialize;
use serde_json::json;

use crate::error::CliError;

/// Snapshot of the watchdog as seen from this process.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub identity: String,
    pub options: u32,
    pub enabled: bool,
    pub active: bool,
    pub nowayout: bool,
    pub timeout: String,
    pub timeout_ms: u64,
    pub reset_source: u8,
}

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "exit_code": error.downcast_ref::<CliError>().map_or(1, CliError::exit_code),
        }
    });
    match serde_json::to_string_pretty(&error_json) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format error as JSON: {e}"),
    }
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

/// Print the outcome of a control command.
pub fn print_action(action: &str, detail: Option<String>, json: bool) -> Result<(), CliError> {
    if json {
        let output = json!({
            "success": true,
            "action": action,
            "detail": detail,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        match detail {
            Some(detail) => println!("{} {} ({detail})", "✓".green(), action),
            None => println!("{} {}", "✓".green(), action),
        }
    }
    Ok(())
}

/// Print a status report.
pub fn print_status(report: &StatusReport, json: bool) -> Result<(), CliError> {
    if json {
        let output = json!({
            "success": true,
            "status": report,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}", report.identity.bold());
    let enabled = if report.enabled {
        "armed".red().bold()
    } else {
        "disarmed".green()
    };
    println!("  Reset enable:  {enabled}");
    let active = if report.active {
        "running".red().bold()
    } else {
        "stopped".green()
    };
    println!("  Device:        {active}");
    println!("  Timeout:       {} ({} ms)", report.timeout, report.timeout_ms);
    println!("  Nowayout:      {}", report.nowayout);
    println!("  Reset source:  {:#04x}", report.reset_source);
    println!("  Options:       {:#06x}", report.options);
    Ok(())
}
