use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use kubebump::commands;
use kubebump::{Cli, Commands};

fn main() -> Result<()> {
    // RUST_LOG wins; PLUGIN_LOG_LEVEL is the Drone-style fallback.
    // e.g. RUST_LOG=kubebump=debug
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            let level = std::env::var("PLUGIN_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
            EnvFilter::try_new(level)
        })
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => commands::run::run(args, cli.dry_run),
        Commands::Patch(args) => commands::patch::run(args, cli.dry_run),
    }
}
