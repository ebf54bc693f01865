//! Finder configuration
//!
//! ## Configuration Resolution
//!
//! 1. An explicit path (`--config`), which must exist
//! 2. Override in data dir (~/.local/share/cadence/config/finder.toml)
//! 3. Embedded defaults (compiled into binary)

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::distance::DEFAULT_SCALING;
use crate::error::{Error, Result};

/// Embedded default config (compiled into binary)
const DEFAULT_CONFIG: &str = include_str!("../../../config/finder.toml");

/// Thresholds for clustering and segmentation
#[derive(Debug, Clone, PartialEq)]
pub struct FinderConfig {
    /// Minimum similarity to every member of a cluster
    pub similarity_threshold: f64,
    /// Winkler prefix scaling factor
    pub jaro_winkler_scaling: f64,
    /// Join every fitting cluster rather than only the first
    pub allow_overlapping_clusters: bool,
    /// Window half-width around the mean interval, in days
    pub max_deviation_days: f64,
    /// Floor of the window's lower bound, in days
    pub min_interval_days: f64,
    /// Minimum cluster size and minimum sequence length
    pub min_sequence_len: usize,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: 0.85,
            jaro_winkler_scaling: DEFAULT_SCALING,
            allow_overlapping_clusters: false,
            max_deviation_days: 3.0,
            min_interval_days: 4.0,
            min_sequence_len: 4,
        }
    }
}

impl FinderConfig {
    /// Resolve configuration: explicit path, then data-dir override, then defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            debug!("Reading finder config from {}", path.display());
            let content = fs::read_to_string(path)?;
            return parse_config(&content);
        }

        if let Some(default_path) = default_config_path() {
            if default_path.exists() {
                debug!("Reading finder config from {}", default_path.display());
                let content = fs::read_to_string(&default_path).map_err(|e| {
                    Error::InvalidData(format!("Failed to read config: {}", e))
                })?;
                return parse_config(&content);
            }
        }

        parse_config(DEFAULT_CONFIG)
    }

    /// Check that every value is usable
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.similarity_threshold) {
            return Err(Error::InvalidData(format!(
                "similarity_threshold must be within [0, 1], got {}",
                self.similarity_threshold
            )));
        }
        // Above 0.25 the boost can push a score past 1.0
        if !(0.0..=0.25).contains(&self.jaro_winkler_scaling) {
            return Err(Error::InvalidData(format!(
                "jaro_winkler_scaling must be within [0, 0.25], got {}",
                self.jaro_winkler_scaling
            )));
        }
        if self.max_deviation_days.is_nan() || self.max_deviation_days < 0.0 {
            return Err(Error::InvalidData(format!(
                "max_deviation_days must not be negative, got {}",
                self.max_deviation_days
            )));
        }
        if self.min_interval_days.is_nan() || self.min_interval_days < 0.0 {
            return Err(Error::InvalidData(format!(
                "min_interval_days must not be negative, got {}",
                self.min_interval_days
            )));
        }
        if self.min_sequence_len < 2 {
            return Err(Error::InvalidData(format!(
                "min_sequence_len must be at least 2, got {}",
                self.min_sequence_len
            )));
        }
        Ok(())
    }
}

/// Default config override path
pub fn default_config_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|d| d.join("cadence").join("config").join("finder.toml"))
}

/// Raw config structure for TOML parsing
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    clustering: Option<RawClustering>,
    segmentation: Option<RawSegmentation>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawClustering {
    similarity_threshold: Option<f64>,
    jaro_winkler_scaling: Option<f64>,
    allow_overlapping_clusters: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSegmentation {
    max_deviation_days: Option<f64>,
    min_interval_days: Option<f64>,
    min_sequence_len: Option<usize>,
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<FinderConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::InvalidData(format!("Invalid config TOML: {}", e)))?;

    let mut config = FinderConfig::default();

    if let Some(clustering) = raw.clustering {
        if let Some(threshold) = clustering.similarity_threshold {
            config.similarity_threshold = threshold;
        }
        if let Some(scaling) = clustering.jaro_winkler_scaling {
            config.jaro_winkler_scaling = scaling;
        }
        if let Some(overlap) = clustering.allow_overlapping_clusters {
            config.allow_overlapping_clusters = overlap;
        }
    }

    if let Some(segmentation) = raw.segmentation {
        if let Some(deviation) = segmentation.max_deviation_days {
            config.max_deviation_days = deviation;
        }
        if let Some(floor) = segmentation.min_interval_days {
            config.min_interval_days = floor;
        }
        if let Some(len) = segmentation.min_sequence_len {
            config.min_sequence_len = len;
        }
    }

    config.validate()?;
    Ok(config)
}
