//! Discovered sequences, with a reverse index from transaction to sequence

use std::collections::HashMap;

use tracing::warn;

use crate::models::{Sequence, Transaction};

/// Holds every discovered sequence and answers "what else is in this
/// transaction's series" queries.
#[derive(Debug, Clone, Default)]
pub struct SequenceStore {
    sequences: Vec<Sequence>,
    /// Transaction id -> position in `sequences`
    owners: HashMap<String, usize>,
}

impl SequenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `transactions` as one sequence with the given frequency.
    /// Returns the sequence's position.
    pub fn store(&mut self, transactions: Vec<Transaction>, frequency: f64) -> usize {
        self.insert(Sequence::new(transactions, frequency))
    }

    /// Add an already-built sequence. Returns its position.
    ///
    /// A transaction keeps the first sequence it was stored in; later claims
    /// on it (only possible with overlapping clusters) are logged and ignored.
    pub fn insert(&mut self, sequence: Sequence) -> usize {
        let position = self.sequences.len();
        for transaction in sequence.transactions() {
            if let Some(&owner) = self.owners.get(&transaction.id) {
                warn!(
                    "Transaction {} ({} {}) already belongs to sequence #{}",
                    transaction.id,
                    transaction.date_string(),
                    transaction.description,
                    owner + 1
                );
                continue;
            }
            self.owners.insert(transaction.id.clone(), position);
        }
        self.sequences.push(sequence);
        position
    }

    /// The other members of `transaction`'s sequence, in date order.
    /// Empty when the transaction belongs to no sequence.
    pub fn siblings(&self, transaction: &Transaction) -> Vec<&Transaction> {
        self.sequence_for(&transaction.id)
            .map(|sequence| sequence.others(transaction))
            .unwrap_or_default()
    }

    /// The sequence owning the transaction with this id
    pub fn sequence_for(&self, id: &str) -> Option<&Sequence> {
        self.owners.get(id).map(|&position| &self.sequences[position])
    }

    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sequence> {
        self.sequences.iter()
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}

impl FromIterator<Sequence> for SequenceStore {
    fn from_iter<I: IntoIterator<Item = Sequence>>(iter: I) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

impl Extend<Sequence> for SequenceStore {
    fn extend<I: IntoIterator<Item = Sequence>>(&mut self, iter: I) {
        for sequence in iter {
            self.insert(sequence);
        }
    }
}

impl<'a> IntoIterator for &'a SequenceStore {
    type Item = &'a Sequence;
    type IntoIter = std::slice::Iter<'a, Sequence>;

    fn into_iter(self) -> Self::IntoIter {
        self.sequences.iter()
    }
}
