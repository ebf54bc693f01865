//! End-to-end sequence finding
//!
//! Runs load → distance → cluster → segment and hands back a [`FinderRun`]
//! that owns every stage's output. Nothing is kept between runs.

use std::path::Path;

use tracing::info;

use crate::cluster::{Cluster, ClusterBuilder};
use crate::config::FinderConfig;
use crate::distance::{DistanceSource, PairDistanceIndex, ProgressCallback};
use crate::error::Result;
use crate::import::load_transactions;
use crate::models::{Transaction, TransactionSet};
use crate::segment::SequenceSegmenter;
use crate::store::SequenceStore;

/// Counts describing one run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub transactions: usize,
    pub duplicates_merged: usize,
    pub pairs: usize,
    pub clusters: usize,
    pub sequences: usize,
}

/// Runs the detection pipeline with one configuration
pub struct SequenceFinder {
    config: FinderConfig,
    progress: Option<ProgressCallback>,
}

impl Default for SequenceFinder {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceFinder {
    pub fn new() -> Self {
        Self::with_config(FinderConfig::default())
    }

    pub fn with_config(config: FinderConfig) -> Self {
        Self {
            config,
            progress: None,
        }
    }

    /// Observe long-running phases as `(phase, current, total)`
    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Load transactions (and optionally precomputed distances) from disk and
    /// run every stage
    pub fn run(
        &self,
        transactions_path: &Path,
        distances_path: Option<&Path>,
    ) -> Result<FinderRun> {
        let transactions = load_transactions(transactions_path)?;
        let distances = distances_path.map(PairDistanceIndex::load).transpose()?;
        self.run_with(transactions, distances)
    }

    /// Run every stage over already-loaded data. Without `distances`, every
    /// pair is scored fresh.
    pub fn run_with(
        &self,
        transactions: TransactionSet,
        distances: Option<PairDistanceIndex>,
    ) -> Result<FinderRun> {
        self.config.validate()?;

        let distances = match distances {
            Some(index) => index,
            None => self.compute_distances(&transactions),
        };

        let clusters = ClusterBuilder::new(&distances)
            .with_threshold(self.config.similarity_threshold)
            .allow_overlap(self.config.allow_overlapping_clusters)
            .build_with_progress(transactions.ids(), self.progress.as_ref())?;

        let sequences = SequenceSegmenter::from_config(&self.config)
            .find_sequences(&clusters, &transactions)?;
        let store: SequenceStore = sequences.into_iter().collect();

        let summary = RunSummary {
            transactions: transactions.len(),
            duplicates_merged: transactions.duplicates_merged(),
            pairs: distances.len(),
            clusters: clusters.len(),
            sequences: store.len(),
        };
        info!(
            "Found {} sequences in {} clusters ({} transactions, {} pairs, distances {:?})",
            summary.sequences,
            summary.clusters,
            summary.transactions,
            summary.pairs,
            distances.source()
        );

        Ok(FinderRun {
            transactions,
            distances,
            clusters,
            store,
            summary,
        })
    }

    /// Score every pair of `transactions` with the configured scaling
    pub fn compute_distances(&self, transactions: &TransactionSet) -> PairDistanceIndex {
        PairDistanceIndex::compute_with_progress(
            transactions.as_slice(),
            self.config.jaro_winkler_scaling,
            self.progress.as_ref(),
        )
    }
}

/// Everything one run produced
#[derive(Debug, Clone)]
pub struct FinderRun {
    transactions: TransactionSet,
    distances: PairDistanceIndex,
    clusters: Vec<Cluster>,
    store: SequenceStore,
    summary: RunSummary,
}

impl FinderRun {
    /// Transactions in load order
    pub fn transactions(&self) -> &TransactionSet {
        &self.transactions
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        self.transactions.get(id)
    }

    pub fn distances(&self) -> &PairDistanceIndex {
        &self.distances
    }

    pub fn distance_source(&self) -> DistanceSource {
        self.distances.source()
    }

    pub fn clusters(&self) -> &[Cluster] {
        &self.clusters
    }

    pub fn store(&self) -> &SequenceStore {
        &self.store
    }

    /// Other members of the sequence containing the transaction with `id`.
    /// Empty for unknown ids and for transactions in no sequence.
    pub fn siblings(&self, id: &str) -> Vec<&Transaction> {
        match self.transactions.get(id) {
            Some(transaction) => self.store.siblings(transaction),
            None => Vec::new(),
        }
    }

    pub fn summary(&self) -> RunSummary {
        self.summary
    }
}
