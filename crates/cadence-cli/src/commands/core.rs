//! Core shared utilities
//!
//! This module contains:
//! - `load_config` - Resolve the finder configuration
//! - `build_finder` - Create a finder, optionally printing progress

use std::path::Path;

use anyhow::{Context, Result};
use cadence_core::cluster::PHASE_CLUSTERING;
use cadence_core::distance::PHASE_SCORING;
use cadence_core::{FinderConfig, ProgressCallback, SequenceFinder};
use tracing::debug;

/// Load config from `path`, the data-dir override, or built-in defaults
pub fn load_config(path: Option<&Path>) -> Result<FinderConfig> {
    let config = match path {
        Some(p) => FinderConfig::load(Some(p))
            .with_context(|| format!("Failed to load config: {}", p.display()))?,
        None => FinderConfig::load(None).context("Failed to load config")?,
    };
    debug!("Finder config: {:?}", config);
    Ok(config)
}

/// Finder for `config`, printing percent-complete to stderr when `show_progress`
pub fn build_finder(config: &FinderConfig, show_progress: bool) -> SequenceFinder {
    let finder = SequenceFinder::with_config(config.clone());
    if show_progress {
        finder.with_progress(console_progress())
    } else {
        finder
    }
}

/// Progress callback that redraws a single status line per phase
pub fn console_progress() -> ProgressCallback {
    Box::new(|phase, current, total| {
        let label = phase_label(phase);
        let percent = if total == 0 {
            100
        } else {
            current * 100 / total
        };
        eprint!("\r   {} {}%", label, percent);
        if current >= total {
            eprintln!();
        }
    })
}

/// Human-readable name for a progress phase
pub fn phase_label(phase: &str) -> &str {
    match phase {
        PHASE_SCORING => "Scoring description pairs...",
        PHASE_CLUSTERING => "Clustering transactions...",
        other => other,
    }
}
