//! pzmod CLI - Command-line interface for Project Zomboid mod tools

pub mod commands;
pub mod progress;

use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "pzmod", version)]
#[command(about = "pzmod: build and validate Project Zomboid b42 mods", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Run the pzmod CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    cli.command.execute()?;

    Ok(())
}
