//! Temporal segmentation of clusters into recurring sequences
//!
//! Each cluster is sorted by date and walked pair by pair. A pair whose gap
//! falls inside the acceptance window extends the tentative run; a gap
//! outside it ends the run. Runs that reach the minimum length become
//! [`Sequence`]s.
//!
//! The window is centered on the mean gap of the cluster (or, after a break,
//! of the rest of the cluster from the breaking transaction on):
//! `[max(mean - deviation, floor), mean + deviation]`, inclusive.
//!
//! Boundary rule: when the pair `(prev, curr)` is accepted, `prev` is what
//! gets appended. The transaction that triggers a break therefore never ends
//! up in the run being flushed; it seeds the next run. For the same reason
//! the last transaction of a cluster is never part of a sequence.

use tracing::debug;

use crate::cluster::Cluster;
use crate::config::FinderConfig;
use crate::error::{Error, Result};
use crate::models::{Sequence, Transaction, TransactionSet};

/// Default half-width of the acceptance window, in days
pub const TIMING_MAX_DEVIATION_DAYS: f64 = 3.0;

/// Default floor of the window's lower bound, in days
pub const TIMING_MIN_DAYS: f64 = 4.0;

/// Default minimum number of transactions in a cluster and in a sequence
pub const MIN_SEQUENCE_LEN: usize = 4;

/// Mean gap in days between consecutive transactions (already date-sorted).
/// `None` when there are fewer than two transactions.
pub fn mean_interval(sorted: &[&Transaction]) -> Option<f64> {
    if sorted.len() < 2 {
        return None;
    }
    let total: i64 = sorted.windows(2).map(|w| w[1].days_since(w[0])).sum();
    Some(total as f64 / (sorted.len() - 1) as f64)
}

/// Range of day-gaps accepted as "the same period"
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntervalWindow {
    /// Mean gap the window is built around
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl IntervalWindow {
    pub fn contains(&self, interval: i64) -> bool {
        let interval = interval as f64;
        self.min <= interval && interval <= self.max
    }
}

/// Splits clusters into periodic runs
#[derive(Debug, Clone)]
pub struct SequenceSegmenter {
    max_deviation_days: f64,
    min_interval_days: f64,
    min_sequence_len: usize,
}

impl Default for SequenceSegmenter {
    fn default() -> Self {
        Self {
            max_deviation_days: TIMING_MAX_DEVIATION_DAYS,
            min_interval_days: TIMING_MIN_DAYS,
            min_sequence_len: MIN_SEQUENCE_LEN,
        }
    }
}

impl SequenceSegmenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &FinderConfig) -> Self {
        Self {
            max_deviation_days: config.max_deviation_days,
            min_interval_days: config.min_interval_days,
            min_sequence_len: config.min_sequence_len,
        }
    }

    /// Acceptance window for a date-sorted slice
    pub fn window_for(&self, sorted: &[&Transaction]) -> Option<IntervalWindow> {
        let mean = mean_interval(sorted)?;
        Some(IntervalWindow {
            mean,
            min: (mean - self.max_deviation_days).max(self.min_interval_days),
            max: mean + self.max_deviation_days,
        })
    }

    /// Find the sequences in every cluster. Cluster members are resolved
    /// through `transactions`; an id it does not know is an error.
    pub fn find_sequences(
        &self,
        clusters: &[Cluster],
        transactions: &TransactionSet,
    ) -> Result<Vec<Sequence>> {
        let mut sequences = Vec::new();

        for cluster in clusters {
            if cluster.len() < self.min_sequence_len {
                continue;
            }

            let members = cluster
                .members()
                .iter()
                .map(|id| {
                    transactions.get(id).ok_or_else(|| {
                        Error::InvalidData(format!("Cluster references unknown transaction {}", id))
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            sequences.extend(self.segment_cluster(members));
        }

        Ok(sequences)
    }

    /// Split one cluster into its periodic runs
    pub fn segment_cluster(&self, mut members: Vec<&Transaction>) -> Vec<Sequence> {
        if members.len() < self.min_sequence_len {
            return Vec::new();
        }

        members.sort_by_key(|t| t.date);

        let Some(mut window) = self.window_for(&members) else {
            return Vec::new();
        };
        debug!(
            "Segmenting cluster of {} ({}): window [{:.2}, {:.2}] around {:.2} days",
            members.len(),
            members[0].description,
            window.min,
            window.max,
            window.mean
        );

        let mut sequences = Vec::new();
        let mut tentative: Vec<&Transaction> = Vec::new();

        for (idx, pair) in members.windows(2).enumerate() {
            let (prev, curr) = (pair[0], pair[1]);
            let interval = curr.days_since(prev);

            if window.contains(interval) {
                tentative.push(prev);
                continue;
            }

            // Broken by `curr`
            if tentative.len() >= self.min_sequence_len {
                sequences.push(self.finalize(&tentative, window.mean));
            } else if !tentative.is_empty() {
                debug!(
                    "Discarding run of {} at {} (gap {} days)",
                    tentative.len(),
                    curr.date_string(),
                    interval
                );
            }
            tentative.clear();

            // Re-center on the rest of the cluster, starting at `curr`
            if let Some(next) = self.window_for(&members[idx + 1..]) {
                window = next;
            }
        }

        if tentative.len() >= self.min_sequence_len {
            sequences.push(self.finalize(&tentative, window.mean));
        }

        sequences
    }

    fn finalize(&self, run: &[&Transaction], frequency: f64) -> Sequence {
        debug!(
            "Sequence of {} from {} every ~{:.2} days",
            run.len(),
            run[0].date_string(),
            frequency
        );
        Sequence::new(run.iter().map(|t| (*t).clone()).collect(), frequency)
    }
}
