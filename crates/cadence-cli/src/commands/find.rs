//! Find command implementation

use std::path::Path;

use anyhow::{Context, Result};
use cadence_core::report::{build_reports, render_text};
use cadence_core::{DistanceSource, FinderConfig, FinderRun};

use super::build_finder;

pub fn cmd_find(
    config: &FinderConfig,
    transactions: &Path,
    distances: Option<&Path>,
    json: bool,
    show_progress: bool,
) -> Result<()> {
    let run = run_finder(config, transactions, distances, show_progress && !json)?;

    if json {
        let reports = build_reports(run.store());
        println!(
            "{}",
            serde_json::to_string_pretty(&reports).context("Failed to serialize report")?
        );
        return Ok(());
    }

    let summary = run.summary();
    println!();
    println!("🔁 Recurring Sequences");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Transactions: {}", summary.transactions);
    if summary.duplicates_merged > 0 {
        println!("   Duplicates merged: {}", summary.duplicates_merged);
    }
    let source = match run.distance_source() {
        DistanceSource::Computed => "computed",
        DistanceSource::Loaded => "loaded",
    };
    println!("   Pair distances: {} ({})", summary.pairs, source);
    println!("   Clusters: {}", summary.clusters);
    println!("   Sequences: {}", summary.sequences);
    println!();
    print!("{}", render_text(run.store()));

    Ok(())
}

/// Run the finder over a transactions file, with context on failure
pub fn run_finder(
    config: &FinderConfig,
    transactions: &Path,
    distances: Option<&Path>,
    show_progress: bool,
) -> Result<FinderRun> {
    build_finder(config, show_progress)
        .run(transactions, distances)
        .with_context(|| format!("Failed to find sequences in {}", transactions.display()))
}
