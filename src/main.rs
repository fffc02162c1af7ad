//! skald CLI - Entry point
//!
//! Usage: skald <command> [options]

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skald::cli::{Cli, Commands};
use skald::config::ConfigStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // The credential store is resolved once here and passed by reference;
    // commands never re-read the config file mid-invocation.
    let store = ConfigStore::open_default()?;

    match cli.command {
        Commands::Auth => skald::cli::auth::run(&store),
        Commands::Chat(args) => skald::cli::chat::execute(args, &store).await,
        Commands::Memo(args) => skald::cli::memo::execute(args, &store).await,
        Commands::Docs(args) => skald::cli::docs::execute(args, &store).await,
    }
}
