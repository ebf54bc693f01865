//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::path::{Path, PathBuf};

use cadence_core::import::load_transactions;
use cadence_core::PairDistanceIndex;
use clap::Parser;
use tempfile::TempDir;

use crate::cli::{Cli, Commands};
use crate::commands::{self, truncate};

/// Write a monthly GYM series plus two one-off purchases, returning the path
fn write_transactions(dir: &TempDir) -> PathBuf {
    let mut records = Vec::new();
    for date in [
        "01/05/2024",
        "02/05/2024",
        "03/06/2024",
        "04/05/2024",
        "05/06/2024",
    ] {
        records.push(serde_json::json!({
            "date": date,
            "description": "GYM MEMBERSHIP",
            "amount": "-40.00",
        }));
    }
    records.push(serde_json::json!({
        "date": "02/14/2024",
        "description": "FLOWER SHOP",
        "amount": -62.5,
    }));
    records.push(serde_json::json!({
        "date": "03/20/2024",
        "description": "AIRLINE TICKET",
        "amount": "-310.20",
    }));

    let path = dir.path().join("transactions.json");
    std::fs::write(&path, serde_json::to_string(&records).unwrap()).unwrap();
    path
}

/// Id of the first record with `description`, in load order
fn id_of(path: &Path, description: &str) -> String {
    load_transactions(path)
        .unwrap()
        .iter()
        .find(|t| t.description == description)
        .map(|t| t.id.clone())
        .unwrap()
}

// ========== Config Tests ==========

#[test]
fn test_load_config_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("finder.toml");
    std::fs::write(&path, "").unwrap();

    let config = commands::load_config(Some(&path)).unwrap();
    assert_eq!(config, cadence_core::FinderConfig::default());
}

#[test]
fn test_load_config_override() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("finder.toml");
    std::fs::write(&path, "[segmentation]\nmin_sequence_len = 3\n").unwrap();

    let config = commands::load_config(Some(&path)).unwrap();
    assert_eq!(config.min_sequence_len, 3);
    assert_eq!(config.similarity_threshold, 0.85);
}

#[test]
fn test_load_config_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = commands::load_config(Some(&dir.path().join("nope.toml")));
    assert!(result.is_err());
}

// ========== Find Command Tests ==========

#[test]
fn test_cmd_find_text() {
    let dir = tempfile::tempdir().unwrap();
    let transactions = write_transactions(&dir);
    let config = cadence_core::FinderConfig::default();

    let result = commands::cmd_find(&config, &transactions, None, false, false);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_find_json() {
    let dir = tempfile::tempdir().unwrap();
    let transactions = write_transactions(&dir);
    let config = cadence_core::FinderConfig::default();

    let result = commands::cmd_find(&config, &transactions, None, true, false);
    assert!(result.is_ok());
}

#[test]
fn test_run_finder_finds_gym_series() {
    let dir = tempfile::tempdir().unwrap();
    let transactions = write_transactions(&dir);
    let config = cadence_core::FinderConfig::default();

    let run = commands::run_finder(&config, &transactions, None, false).unwrap();
    assert_eq!(run.store().len(), 1);
    let sequence = &run.store().sequences()[0];
    // Five rows give four accepted pairs; only the earlier row of each is kept
    assert_eq!(sequence.len(), 4);
    assert!(sequence
        .transactions()
        .iter()
        .all(|t| t.description == "GYM MEMBERSHIP"));
    assert!(sequence
        .transactions()
        .iter()
        .all(|t| t.date_string() != "05/06/2024"));
}

#[test]
fn test_cmd_find_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = cadence_core::FinderConfig::default();

    let result = commands::cmd_find(
        &config,
        &dir.path().join("missing.json"),
        None,
        false,
        false,
    );
    assert!(result.is_err());
}

#[test]
fn test_cmd_find_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let transactions = write_transactions(&dir);
    let config = cadence_core::FinderConfig {
        similarity_threshold: 1.5,
        ..Default::default()
    };

    let result = commands::cmd_find(&config, &transactions, None, false, false);
    assert!(result.is_err());
}

// ========== Distances Command Tests ==========

#[test]
fn test_cmd_distances_then_find() {
    let dir = tempfile::tempdir().unwrap();
    let transactions = write_transactions(&dir);
    let output = dir.path().join("distances.json");
    let config = cadence_core::FinderConfig::default();

    commands::cmd_distances(&config, &transactions, &output, false).unwrap();

    // 7 transactions -> 21 unordered pairs
    let index = PairDistanceIndex::load(&output).unwrap();
    assert_eq!(index.len(), 21);

    let fresh = commands::run_finder(&config, &transactions, None, false).unwrap();
    let reused = commands::run_finder(&config, &transactions, Some(&output), false).unwrap();
    assert_eq!(fresh.store().sequences(), reused.store().sequences());
}

#[test]
fn test_cmd_distances_bad_output_dir() {
    let dir = tempfile::tempdir().unwrap();
    let transactions = write_transactions(&dir);
    let output = dir.path().join("no_such_dir").join("distances.json");
    let config = cadence_core::FinderConfig::default();

    let result = commands::cmd_distances(&config, &transactions, &output, false);
    assert!(result.is_err());
}

// ========== Siblings Command Tests ==========

#[test]
fn test_cmd_siblings_member() {
    let dir = tempfile::tempdir().unwrap();
    let transactions = write_transactions(&dir);
    let config = cadence_core::FinderConfig::default();
    // First GYM row in load order (01/05), which opens the series
    let id = id_of(&transactions, "GYM MEMBERSHIP");

    let run = commands::run_finder(&config, &transactions, None, false).unwrap();
    let chosen = run.transaction(&id).unwrap();
    assert_eq!(chosen.date_string(), "01/05/2024");
    assert!(run.store().sequence_for(&id).is_some());
    assert_eq!(run.siblings(&id).len(), 3);

    let result = commands::cmd_siblings(&config, &transactions, None, &id, false);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_siblings_one_off() {
    let dir = tempfile::tempdir().unwrap();
    let transactions = write_transactions(&dir);
    let config = cadence_core::FinderConfig::default();
    let id = id_of(&transactions, "FLOWER SHOP");

    let result = commands::cmd_siblings(&config, &transactions, None, &id, false);
    assert!(result.is_ok());
}

#[test]
fn test_siblings_of_last_series_row_are_empty() {
    let dir = tempfile::tempdir().unwrap();
    let transactions = write_transactions(&dir);
    let config = cadence_core::FinderConfig::default();

    let run = commands::run_finder(&config, &transactions, None, false).unwrap();
    let last = run
        .transactions()
        .iter()
        .find(|t| t.date_string() == "05/06/2024")
        .unwrap();
    assert!(run.siblings(&last.id).is_empty());
}

#[test]
fn test_cmd_siblings_unknown_id() {
    let dir = tempfile::tempdir().unwrap();
    let transactions = write_transactions(&dir);
    let config = cadence_core::FinderConfig::default();

    let result = commands::cmd_siblings(&config, &transactions, None, "deadbeef", false);
    assert!(result.is_err());
}

// ========== Argument Parsing Tests ==========

#[test]
fn test_parse_find_args() {
    let cli = Cli::try_parse_from([
        "cadence",
        "find",
        "-t",
        "tx.json",
        "--distances",
        "d.json",
        "--json",
    ])
    .unwrap();

    match cli.command {
        Commands::Find {
            transactions,
            distances,
            json,
        } => {
            assert_eq!(transactions, PathBuf::from("tx.json"));
            assert_eq!(distances, Some(PathBuf::from("d.json")));
            assert!(json);
        }
        _ => panic!("expected find"),
    }
}

#[test]
fn test_parse_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "cadence",
        "distances",
        "-t",
        "tx.json",
        "-o",
        "d.json",
        "--quiet",
        "--verbose",
    ])
    .unwrap();

    assert!(cli.quiet);
    assert!(cli.verbose);
    assert!(cli.config.is_none());
}

#[test]
fn test_parse_siblings_requires_id() {
    let result = Cli::try_parse_from(["cadence", "siblings", "-t", "tx.json"]);
    assert!(result.is_err());
}

// ========== Helper Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("NETFLIX.COM", 20), "NETFLIX.COM");
    assert_eq!(truncate("AMAZON PRIME MEMBERSHIP FEE", 10), "AMAZON ...");
}

#[test]
fn test_phase_label() {
    assert_eq!(
        commands::phase_label("scoring_pairs"),
        "Scoring description pairs..."
    );
    assert_eq!(commands::phase_label("other"), "other");
}
