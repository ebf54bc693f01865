//! Cadence Core Library
//!
//! Finds recurring transaction sequences (subscriptions, periodic bills) in a
//! static batch of transactions using only description text and dates:
//! - Transaction loading and content-hash deduplication
//! - Pairwise Jaro-Winkler description similarity, cached per pair
//! - Greedy complete-linkage clustering by description
//! - Temporal segmentation of clusters into periodic sequences
//! - Sequence store with sibling lookup
//! - Text and JSON reports

pub mod cluster;
pub mod config;
pub mod distance;
pub mod error;
pub mod finder;
pub mod import;
pub mod models;
pub mod report;
pub mod segment;
pub mod store;

/// Test helpers for building transactions
#[cfg(test)]
pub mod test_utils;

pub use cluster::{Cluster, ClusterBuilder};
pub use config::FinderConfig;
pub use distance::{DistanceSource, PairDistanceIndex, ProgressCallback};
pub use error::{Error, Result};
pub use finder::{FinderRun, RunSummary, SequenceFinder};
pub use models::{Sequence, Transaction, TransactionSet};
pub use report::{ReportEntry, SequenceReport};
pub use segment::SequenceSegmenter;
pub use store::SequenceStore;
