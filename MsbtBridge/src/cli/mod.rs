//! `MsbtBridge` CLI - command-line interface for MSBT export backfill and analysis

pub mod commands;
pub mod progress;

use clap::Parser;
use commands::Commands;
use tracing::Level;

#[derive(Parser)]
#[command(name = "msbtbridge", version)]
#[command(about = "MsbtBridge: backfill and compare MSBT localization exports", long_about = None)]
struct Cli {
    /// Log debug detail (source lookups, per-document summaries)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Run the `MsbtBridge` CLI
pub fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    cli.command.execute()?;

    Ok(())
}
