//! Distances command implementation

use std::path::Path;

use anyhow::{Context, Result};
use cadence_core::import::load_transactions;
use cadence_core::FinderConfig;

use super::build_finder;

pub fn cmd_distances(
    config: &FinderConfig,
    transactions: &Path,
    output: &Path,
    show_progress: bool,
) -> Result<()> {
    config.validate().context("Invalid finder config")?;

    let set = load_transactions(transactions)
        .with_context(|| format!("Failed to load {}", transactions.display()))?;

    let index = build_finder(config, show_progress).compute_distances(&set);
    index
        .save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "✅ Saved {} pair distances for {} transactions to {}",
        index.len(),
        set.len(),
        output.display()
    );
    println!(
        "   Reuse with: cadence find -t {} -d {}",
        transactions.display(),
        output.display()
    );

    Ok(())
}
