//! JSON transaction file loading
//!
//! Input is an ordered array of `{date, description, amount}` records. The
//! array order is kept: it is the order clustering visits transactions in.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::models::{Transaction, TransactionSet, DATE_FORMAT};

/// One input record as it appears in the file
#[derive(Debug, Deserialize)]
struct RawRecord {
    date: String,
    description: String,
    amount: RawAmount,
}

/// Amounts are normally JSON numbers; numeric strings are accepted too
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawAmount {
    Number(serde_json::Number),
    Text(String),
}

impl RawAmount {
    fn as_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.trim().to_string(),
        }
    }
}

/// Load transactions from a JSON file
pub fn load_transactions(path: &Path) -> Result<TransactionSet> {
    let file = File::open(path)?;
    let set = parse_transactions(BufReader::new(file))?;
    info!(
        "Loaded {} transactions from {} ({} duplicates merged)",
        set.len(),
        path.display(),
        set.duplicates_merged()
    );
    Ok(set)
}

/// Parse transactions from JSON.
///
/// Any malformed record aborts the whole parse; there are no partial results.
pub fn parse_transactions<R: Read>(reader: R) -> Result<TransactionSet> {
    let records: Vec<RawRecord> = serde_json::from_reader(reader)?;
    let mut set = TransactionSet::new();

    for (index, record) in records.into_iter().enumerate() {
        let date = parse_date(&record.date).ok_or_else(|| Error::InvalidDate {
            index,
            value: record.date.clone(),
        })?;

        let amount_text = record.amount.as_text();
        let amount = parse_amount(&amount_text).ok_or(Error::InvalidAmount {
            index,
            value: amount_text,
        })?;

        let transaction = Transaction::new(date, record.description, amount);
        if !set.insert(transaction) {
            debug!("Record {} duplicates an earlier record, merged", index);
        }
    }

    Ok(set)
}

/// Parse a `MM/DD/YYYY` date
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Parse an amount exactly, accepting plain and scientific notation
pub fn parse_amount(s: &str) -> Option<Decimal> {
    Decimal::from_str(s)
        .or_else(|_| Decimal::from_scientific(s))
        .ok()
}
