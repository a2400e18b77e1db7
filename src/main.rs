//! PM agent performance configuration tool.
//!
//! Applies a named performance preset ("low" or "high") to the installed PM
//! endpoint agent by writing two machine-wide settings into the host
//! configuration store, or displays the currently stored values. Exits 0 on
//! full success and 1 when any write failed.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pm_agent_config::applier::{ConfigApplier, SettingReading};
use pm_agent_config::settings::PerformanceMode;
use pm_agent_config::store::{self, SettingsStore};

/// PM Agent performance configuration tool
#[derive(Parser, Debug)]
#[command(name = "pm-agent-config")]
#[command(version, about = "Configures PM Agent performance settings")]
#[command(after_help = "\
Performance Modes:
  low   - Low performance mode  (CPU usage: 15%, Timeout: 200)
  high  - High performance mode (CPU usage: 30%, Timeout: 200)

Examples:
  pm-agent-config --mode high          # Configure for high performance
  pm-agent-config --mode low           # Configure for low performance
  pm-agent-config --status             # Show current settings")]
struct Args {
    /// Agent resource utilization limit (low=15%, high=30%)
    #[arg(long, value_enum)]
    mode: Option<PerformanceMode>,

    /// Display current agent settings
    #[arg(long)]
    status: bool,

    /// Enable verbose logging
    #[arg(short, long, env = "PM_AGENT_VERBOSE")]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "starting pm-agent-config");

    // --status wins when combined with --mode.
    if args.status {
        let applier = ConfigApplier::new(store::default_store());
        print_status(&applier.read_current());
        return Ok(());
    }

    if let Some(mode) = args.mode {
        let applier = ConfigApplier::new(store::default_store());
        if !apply_mode(&applier, mode) {
            std::process::exit(1);
        }
        return Ok(());
    }

    // No arguments: show usage.
    Args::command()
        .print_help()
        .context("failed to print usage")?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Apply `mode` and report the outcome on stdout. Returns true when every
/// setting was written.
fn apply_mode<S: SettingsStore>(applier: &ConfigApplier<S>, mode: PerformanceMode) -> bool {
    let profile = mode.profile();
    println!();
    println!("Configuring PM Agent for {mode} performance mode...");
    println!("Agent Resource Utilization Limit: {mode} performance");
    println!("CPU Usage Limit: {}%", profile.max_cpu_percent);
    println!("Patch Scan Timeout: {} seconds", profile.scan_timeout_secs);
    println!();

    let report = applier.apply(mode);
    if report.all_applied() {
        println!("✓ Configuration applied successfully!");
        println!();
        println!("NOTE: You may need to restart the DCAgent service for changes to take effect.");
        true
    } else {
        println!("✗ Configuration failed. Check the logs above.");
        false
    }
}

fn print_status(readings: &[SettingReading]) {
    tracing::info!("current PM Agent settings");
    for reading in readings {
        println!("{}: {}", reading.setting.label, reading.value);
    }
}
