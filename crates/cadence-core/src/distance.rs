//! Pairwise description similarity
//!
//! Scores every unordered pair of transactions with Jaro-Winkler similarity
//! and caches the result under a canonical pair key. The index can also be
//! loaded from (and saved to) a JSON file so a large batch only has to be
//! scored once.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::error::Result;
use crate::models::Transaction;

/// Joins the two ids of a pair key
pub const PAIR_KEY_SEPARATOR: char = '|';

/// Default Winkler prefix scaling factor
pub const DEFAULT_SCALING: f64 = 0.13;

/// Longest common prefix the Winkler boost rewards
const MAX_PREFIX: usize = 4;

/// Progress phase reported while scoring pairs
pub const PHASE_SCORING: &str = "scoring_pairs";

/// Progress callback for long-running phases
/// Parameters: (phase_name, current, total)
pub type ProgressCallback = Box<dyn Fn(&str, u64, u64) + Send + Sync>;

/// Canonical key for an unordered pair: both ids sorted, joined by `|`
pub fn pair_key(a: &str, b: &str) -> String {
    if a <= b {
        format!("{}{}{}", a, PAIR_KEY_SEPARATOR, b)
    } else {
        format!("{}{}{}", b, PAIR_KEY_SEPARATOR, a)
    }
}

/// Split a pair key back into its two ids
pub fn split_pair_key(key: &str) -> Option<(&str, &str)> {
    key.split_once(PAIR_KEY_SEPARATOR)
}

/// Jaro-Winkler similarity of two descriptions, in [0, 1].
///
/// The Jaro part is the standard definition (match window
/// `max(len) / 2 - 1`, symmetric matching) and ignores case. The Winkler boost uses the common prefix of
/// the strings as given (at most 4 characters) times `scaling`. The result is
/// rounded to two decimal places.
pub fn jaro_winkler(a: &str, b: &str, scaling: f64) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let jaro = strsim::jaro(&a.to_lowercase(), &b.to_lowercase());
    let prefix = a
        .chars()
        .zip(b.chars())
        .take_while(|(x, y)| x == y)
        .take(MAX_PREFIX)
        .count();

    let score = jaro + scaling * prefix as f64 * (1.0 - jaro);
    ((score * 100.0).round() / 100.0).clamp(0.0, 1.0)
}

/// Where the scores in an index came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistanceSource {
    #[default]
    Computed,
    /// Loaded verbatim from a precomputed file; coverage is not checked
    Loaded,
}

/// Symmetric similarity score per unordered transaction pair
#[derive(Debug, Clone, Default)]
pub struct PairDistanceIndex {
    scores: HashMap<String, f64>,
    source: DistanceSource,
}

impl PairDistanceIndex {
    /// Score every unique pair of `transactions`.
    pub fn compute(transactions: &[Transaction], scaling: f64) -> Self {
        Self::compute_with_progress(transactions, scaling, None)
    }

    /// Score every unique pair, reporting `(PHASE_SCORING, done, total)`
    /// each time another percent completes.
    pub fn compute_with_progress(
        transactions: &[Transaction],
        scaling: f64,
        progress: Option<&ProgressCallback>,
    ) -> Self {
        let n = transactions.len() as u64;
        let total = n * n.saturating_sub(1) / 2;
        let mut scores = HashMap::with_capacity(total as usize);
        let mut done = 0u64;
        let mut last_percent = None;

        if let Some(cb) = progress {
            cb(PHASE_SCORING, 0, total);
        }

        for (i, t1) in transactions.iter().enumerate() {
            for t2 in &transactions[i + 1..] {
                if t1.id == t2.id {
                    continue;
                }
                scores
                    .entry(pair_key(&t1.id, &t2.id))
                    .or_insert_with(|| jaro_winkler(&t1.description, &t2.description, scaling));
                done += 1;

                if let Some(cb) = progress {
                    let percent = done * 100 / total.max(1);
                    if last_percent != Some(percent) {
                        last_percent = Some(percent);
                        cb(PHASE_SCORING, done, total);
                    }
                }
            }
        }

        info!(
            "Scored {} unique pairs for {} transactions",
            scores.len(),
            transactions.len()
        );

        Self {
            scores,
            source: DistanceSource::Computed,
        }
    }

    /// Wrap an externally supplied mapping of pair key to score
    pub fn from_scores(scores: HashMap<String, f64>) -> Self {
        Self {
            scores,
            source: DistanceSource::Loaded,
        }
    }

    /// Load a precomputed index from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let index = Self::from_reader(BufReader::new(file))?;
        info!(
            "Loaded {} pair distances from {}",
            index.len(),
            path.display()
        );
        Ok(index)
    }

    /// Read a `{"id1|id2": score}` JSON object
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let scores: HashMap<String, f64> = serde_json::from_reader(reader)?;
        Ok(Self::from_scores(scores))
    }

    /// Save the index as JSON in the format [`PairDistanceIndex::load`] reads
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.to_writer(&mut writer)?;
        writer.flush()?;
        debug!("Saved {} pair distances to {}", self.len(), path.display());
        Ok(())
    }

    /// Write the index as JSON, keys sorted
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        let sorted: BTreeMap<&str, f64> = self
            .scores
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect();
        serde_json::to_writer_pretty(writer, &sorted)?;
        Ok(())
    }

    /// Similarity of two transactions. `None` only when a loaded index does
    /// not cover the pair.
    pub fn distance(&self, t1: &Transaction, t2: &Transaction) -> Option<f64> {
        self.distance_by_id(&t1.id, &t2.id)
    }

    /// Similarity of two transactions given their ids
    pub fn distance_by_id(&self, a: &str, b: &str) -> Option<f64> {
        if a == b {
            return Some(1.0);
        }
        self.scores.get(&pair_key(a, b)).copied()
    }

    pub fn has_cached(&self, pair_key: &str) -> bool {
        self.scores.contains_key(pair_key)
    }

    pub fn source(&self) -> DistanceSource {
        self.source
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scores.iter().map(|(k, v)| (k.as_str(), *v))
    }
}
