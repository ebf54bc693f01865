//! Data models for Cadence

use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

/// Textual date format used by input files and reports
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// A single dated, described, amounted event.
///
/// The `id` is derived from the other three fields, so two records with the
/// same date, description and amount are the same transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transaction {
    /// Content hash (see [`transaction_id`])
    pub id: String,
    pub date: NaiveDate,
    pub description: String,
    /// Negative = expense, positive = income
    pub amount: Decimal,
}

impl Transaction {
    pub fn new(date: NaiveDate, description: impl Into<String>, amount: Decimal) -> Self {
        let description = description.into();
        let id = transaction_id(&date, &description, &amount);
        Self {
            id,
            date,
            description,
            amount,
        }
    }

    /// Whole days from `earlier` to this transaction (negative if this one is older)
    pub fn days_since(&self, earlier: &Transaction) -> i64 {
        (self.date - earlier.date).num_days()
    }

    /// Date formatted the way input files spell it
    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Generate the stable identifier for a transaction.
///
/// Hashes the normalized date string, the description and the normalized
/// amount (trailing zeros stripped, so `10.5` and `10.50` agree).
pub fn transaction_id(date: &NaiveDate, description: &str, amount: &Decimal) -> String {
    let mut hasher = Sha256::new();
    hasher.update(date.format(DATE_FORMAT).to_string().as_bytes());
    hasher.update([0x1f]);
    hasher.update(description.as_bytes());
    hasher.update([0x1f]);
    hasher.update(amount.normalize().to_string().as_bytes());
    hex::encode(hasher.finalize())
}

/// Transactions in load order, deduplicated by id.
///
/// Load order is the order clustering visits transactions in, so it is kept
/// explicitly rather than relying on map iteration order.
#[derive(Debug, Clone, Default)]
pub struct TransactionSet {
    transactions: Vec<Transaction>,
    positions: HashMap<String, usize>,
    duplicates_merged: usize,
}

impl TransactionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a transaction. Returns false (and keeps the first copy) if a
    /// transaction with the same id was already added.
    pub fn insert(&mut self, transaction: Transaction) -> bool {
        if self.positions.contains_key(&transaction.id) {
            self.duplicates_merged += 1;
            return false;
        }
        self.positions
            .insert(transaction.id.clone(), self.transactions.len());
        self.transactions.push(transaction);
        true
    }

    pub fn get(&self, id: &str) -> Option<&Transaction> {
        self.positions.get(id).map(|&idx| &self.transactions[idx])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.transactions.iter()
    }

    pub fn as_slice(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Ids in load order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.transactions.iter().map(|t| t.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Number of inserts that collapsed into an existing transaction
    pub fn duplicates_merged(&self) -> usize {
        self.duplicates_merged
    }
}

impl FromIterator<Transaction> for TransactionSet {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        let mut set = Self::new();
        for transaction in iter {
            set.insert(transaction);
        }
        set
    }
}

impl<'a> IntoIterator for &'a TransactionSet {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.transactions.iter()
    }
}

/// A recurring series of transactions, ordered by date
#[derive(Debug, Clone, PartialEq)]
pub struct Sequence {
    transactions: Vec<Transaction>,
    frequency: f64,
}

impl Sequence {
    /// Create a sequence. Transactions are put in date order; ties keep
    /// their given order.
    pub fn new(mut transactions: Vec<Transaction>, frequency: f64) -> Self {
        transactions.sort_by_key(|t| t.date);
        Self {
            transactions,
            frequency,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Mean day-interval of the window this sequence was carved from
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.transactions.iter().any(|t| t.id == id)
    }

    pub fn first_seen(&self) -> Option<NaiveDate> {
        self.transactions.first().map(|t| t.date)
    }

    pub fn last_seen(&self) -> Option<NaiveDate> {
        self.transactions.last().map(|t| t.date)
    }

    /// All members except `transaction`, or nothing if it is not a member
    pub fn others(&self, transaction: &Transaction) -> Vec<&Transaction> {
        if !self.contains(&transaction.id) {
            return Vec::new();
        }
        self.transactions
            .iter()
            .filter(|t| t.id != transaction.id)
            .collect()
    }

    /// Day gaps between consecutive members (`len() - 1` values)
    pub fn intervals(&self) -> Vec<i64> {
        self.transactions
            .windows(2)
            .map(|w| w[1].days_since(&w[0]))
            .collect()
    }
}
