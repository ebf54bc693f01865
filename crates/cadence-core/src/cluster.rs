//! Greedy complete-linkage clustering of transactions by description
//!
//! A transaction joins a cluster only when it is similar enough to every
//! member already in it, so A~B and B~C never drags A and C together on
//! their own. The pass is order-sensitive: transactions are visited in load
//! order and clusters are scanned in creation order.

use tracing::{debug, info};

use crate::distance::{pair_key, PairDistanceIndex, ProgressCallback};
use crate::error::{Error, Result};

/// Default minimum similarity to every member of a cluster
pub const SIMILAR_THRESHOLD: f64 = 0.85;

/// Progress phase reported while assigning transactions to clusters
pub const PHASE_CLUSTERING: &str = "clustering";

/// Transaction ids grouped by description similarity, in insertion order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cluster {
    members: Vec<String>,
}

impl Cluster {
    fn singleton(id: &str) -> Self {
        Self {
            members: vec![id.to_string()],
        }
    }

    pub fn members(&self) -> &[String] {
        &self.members
    }

    pub fn contains(&self, id: &str) -> bool {
        self.members.iter().any(|m| m == id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Builds similarity clusters from a distance index
pub struct ClusterBuilder<'a> {
    index: &'a PairDistanceIndex,
    threshold: f64,
    allow_overlap: bool,
}

impl<'a> ClusterBuilder<'a> {
    pub fn new(index: &'a PairDistanceIndex) -> Self {
        Self {
            index,
            threshold: SIMILAR_THRESHOLD,
            allow_overlap: false,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// When enabled, a transaction joins every existing cluster it fits
    /// instead of stopping at the first, so clusters may share members.
    pub fn allow_overlap(mut self, allow: bool) -> Self {
        self.allow_overlap = allow;
        self
    }

    /// Partition `transaction_ids` into clusters. Ids are visited in the
    /// order given; that order decides the result.
    pub fn build<I, S>(&self, transaction_ids: I) -> Result<Vec<Cluster>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.build_with_progress(transaction_ids, None)
    }

    /// Like [`ClusterBuilder::build`], reporting `(PHASE_CLUSTERING, done, total)`
    /// after each transaction
    pub fn build_with_progress<I, S>(
        &self,
        transaction_ids: I,
        progress: Option<&ProgressCallback>,
    ) -> Result<Vec<Cluster>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let ids: Vec<S> = transaction_ids.into_iter().collect();
        let total = ids.len() as u64;
        let mut clusters: Vec<Cluster> = Vec::new();

        for (done, id) in ids.iter().enumerate() {
            let id = id.as_ref();
            if clusters.iter().any(|c| c.contains(id)) {
                continue;
            }

            let mut placed = false;
            for cluster in clusters.iter_mut() {
                if self.accepts(cluster, id)? {
                    cluster.members.push(id.to_string());
                    placed = true;
                    if !self.allow_overlap {
                        break;
                    }
                }
            }

            if !placed {
                clusters.push(Cluster::singleton(id));
            }

            if let Some(cb) = progress {
                cb(PHASE_CLUSTERING, done as u64 + 1, total);
            }
        }

        info!(
            "Built {} clusters from {} transactions",
            clusters.len(),
            ids.len()
        );
        debug!(
            "{} clusters have more than one member",
            clusters.iter().filter(|c| c.len() > 1).count()
        );

        Ok(clusters)
    }

    /// True when `id` is similar enough to every current member
    fn accepts(&self, cluster: &Cluster, id: &str) -> Result<bool> {
        for member in &cluster.members {
            let similarity = self
                .index
                .distance_by_id(id, member)
                .ok_or_else(|| Error::MissingDistance(pair_key(id, member)))?;
            if similarity < self.threshold {
                return Ok(false);
            }
        }
        Ok(true)
    }
}
