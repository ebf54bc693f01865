//! Cadence CLI - Recurring transaction sequence finder
//!
//! Usage:
//!   cadence find --transactions tx.json              Find and print sequences
//!   cadence find -t tx.json --distances d.json       Reuse precomputed distances
//!   cadence distances -t tx.json --output d.json     Save pair distances
//!   cadence siblings -t tx.json --id <id>            Show a transaction's series

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Logs go to stderr so reports on stdout stay clean
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    let config = commands::load_config(cli.config.as_deref())?;
    let show_progress = !cli.quiet;

    match cli.command {
        Commands::Find {
            transactions,
            distances,
            json,
        } => commands::cmd_find(
            &config,
            &transactions,
            distances.as_deref(),
            json,
            show_progress,
        ),
        Commands::Distances {
            transactions,
            output,
        } => commands::cmd_distances(&config, &transactions, &output, show_progress),
        Commands::Siblings {
            transactions,
            id,
            distances,
        } => commands::cmd_siblings(
            &config,
            &transactions,
            distances.as_deref(),
            &id,
            show_progress,
        ),
    }
}
