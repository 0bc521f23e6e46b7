//! `hb-runtime` entry point.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hb_account_ordering::Migrator;
use hb_runtime::{Overrides, RuntimeConfig};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "hb-runtime", version, about = "Hearthbook account ordering service")]
struct Cli {
    #[command(flatten)]
    overrides: Overrides,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Serve the HTTP gateway (default)
    Serve,
    /// Apply pending data migrations, then exit
    Migrate {
        /// List applied migrations instead of running them
        #[arg(long)]
        status: bool,
    },
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "[runtime] Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    info!("[runtime] Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = RuntimeConfig::from_env().context("Invalid environment configuration")?;
    config.apply_overrides(&cli.overrides);

    hb_runtime::logging::init(&config.log_level, config.json_logs)
        .context("Failed to initialise logging")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => hb_runtime::serve(config, shutdown_signal()).await,
        Command::Migrate { status: true } => {
            let opened = hb_runtime::open(&config)?;
            let applied =
                Migrator::applied(&opened.store).context("Failed to read migration status")?;
            for record in applied {
                println!("{}\t{}", record.name, record.applied_at);
            }
            Ok(())
        }
        Command::Migrate { status: false } => {
            hb_runtime::migrate(&config)?;
            Ok(())
        }
    }
}
