//! Reelpath CLI - Command-line interface
//!
//! Serves the JSON API or runs a single resolution from the terminal.

mod commands;

use std::path::PathBuf;

use clap::Parser;
use reelpath_core::ReelpathConfig;
use reelpath_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "reelpath")]
#[command(about = "Resolves catalog ids to playable HLS stream links")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: commands::Commands,

    /// Console log level
    #[arg(long, global = true, value_enum, default_value_t = CliLogLevel::Info)]
    log_level: CliLogLevel,

    /// Directory for the per-run debug log
    #[arg(long, global = true)]
    logs_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_level.as_tracing_level(), cli.logs_dir.as_deref())
        .map_err(|error| anyhow::anyhow!("Failed to initialize tracing: {error}"))?;

    let config = ReelpathConfig::from_env()?;
    commands::handle_command(cli.command, config).await
}
