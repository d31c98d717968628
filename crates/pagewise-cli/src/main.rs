//! pagewise CLI - drive keyed page loaders from the terminal
//!
//! This is the main entry point. It plays the part of the list UI: it owns
//! the window of loaded pages and asks a loader for more.

use anyhow::{Context, Result};
use clap::Parser;
use pagewise_core::{CancellationToken, Config};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

mod cli;
mod commands;
mod output;
mod pager;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    initialize_logging(&cli)?;

    let config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };

    let token = CancellationToken::new();
    spawn_interrupt_handler(token.clone());

    execute_command(cli, &config, token).await
}

fn initialize_logging(cli: &Cli) -> Result<()> {
    let level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Cancel in-flight loads on Ctrl-C instead of killing the process mid-write.
fn spawn_interrupt_handler(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupted, cancelling in-flight load");
            token.cancel();
        }
    });
}

async fn execute_command(cli: Cli, config: &Config, token: CancellationToken) -> Result<()> {
    match cli.command {
        Commands::Search {
            query,
            api_url,
            paging,
        } => {
            commands::search(config, &query, api_url.as_deref(), &paging, token).await?;
        },

        Commands::Articles { no_delay, paging } => {
            commands::articles(config, no_delay, &paging, token).await?;
        },
    }

    Ok(())
}
