//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Cadence - Find recurring charges in your transactions
#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Recurring transaction sequence finder", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Finder config file (TOML)
    ///
    /// Defaults to ~/.local/share/cadence/config/finder.toml when present,
    /// otherwise the built-in thresholds.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Hide progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find recurring sequences and print them
    Find {
        /// JSON file of transactions ({date, description, amount} records)
        #[arg(short, long)]
        transactions: PathBuf,

        /// Precomputed distances file (skips similarity scoring)
        #[arg(short, long)]
        distances: Option<PathBuf>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Score every transaction pair and save the distances for later runs
    Distances {
        /// JSON file of transactions
        #[arg(short, long)]
        transactions: PathBuf,

        /// Where to write the distances file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// List the other transactions in a transaction's sequence
    Siblings {
        /// JSON file of transactions
        #[arg(short, long)]
        transactions: PathBuf,

        /// Transaction ID (as printed by `find --json`)
        #[arg(long)]
        id: String,

        /// Precomputed distances file (skips similarity scoring)
        #[arg(short, long)]
        distances: Option<PathBuf>,
    },
}
