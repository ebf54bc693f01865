//! Siblings command implementation

use std::path::Path;

use anyhow::Result;
use cadence_core::FinderConfig;

use super::{run_finder, truncate};

pub fn cmd_siblings(
    config: &FinderConfig,
    transactions: &Path,
    distances: Option<&Path>,
    id: &str,
    show_progress: bool,
) -> Result<()> {
    let run = run_finder(config, transactions, distances, show_progress)?;

    let transaction = run
        .transaction(id)
        .ok_or_else(|| anyhow::anyhow!("Transaction not found: {}", id))?;

    println!();
    println!(
        "🔎 {} {} {}",
        transaction.date_string(),
        truncate(&transaction.description, 40),
        transaction.amount
    );

    let siblings = run.siblings(id);
    if siblings.is_empty() {
        println!("   Not part of any recurring sequence.");
        return Ok(());
    }

    if let Some(sequence) = run.store().sequence_for(id) {
        println!(
            "   {} other transactions, every ~{:.2} days",
            siblings.len(),
            sequence.frequency()
        );
    }
    println!("   ─────────────────────────────────────────────────────────────");
    for sibling in siblings {
        println!(
            "   {}  {:40} │ {:>10} │ {}",
            sibling.date_string(),
            truncate(&sibling.description, 40),
            sibling.amount.to_string(),
            sibling.id
        );
    }

    Ok(())
}
