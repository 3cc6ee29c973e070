//! bucketwatch: emails a summary whenever objects appear in or vanish from a bucket.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bucketwatch")]
#[command(version)]
#[command(about = "Monitor a Backblaze B2 bucket for file changes", long_about = None)]
#[command(after_help = "EXAMPLES:
    # Create config.json with default settings, then edit it
    bucketwatch --first-run

    # Monitor using ./config.json
    bucketwatch

    # Single check, e.g. from cron
    bucketwatch --config /etc/bucketwatch/config.json --once")]
struct Cli {
    /// Create a default config.json and exit
    #[arg(long)]
    first_run: bool,

    /// Path to configuration file
    #[arg(long, env = "BUCKETWATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Run one check cycle and exit
    #[arg(long, conflicts_with = "first_run")]
    once: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    if cli.first_run {
        let path = bucketwatch::cli::run_first_run(cli.config.as_deref())?;
        println!("Default configuration file created at {}", path.display());
        println!("Please edit this file with your settings before running again.");
        return Ok(());
    }

    let state = bucketwatch::cli::run_monitor(cli.config.as_deref(), cli.once);
    if cli.once && state.last_cycle_failed() {
        anyhow::bail!(
            "check cycle failed: {}",
            state
                .last_outcome
                .map_or_else(|| "stage error".to_string(), |o| o.to_string())
        );
    }

    Ok(())
}
