//! Test helpers for building transactions

use std::str::FromStr;

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{Transaction, DATE_FORMAT};

/// Build a transaction from the same textual fields an input file carries
pub fn tx(date: &str, description: &str, amount: &str) -> Transaction {
    Transaction::new(
        NaiveDate::parse_from_str(date, DATE_FORMAT).unwrap(),
        description,
        Decimal::from_str(amount).unwrap(),
    )
}

/// Build a series starting at `start`, each next one `gaps[i]` days after the last.
/// Produces `gaps.len() + 1` transactions.
pub fn spaced(description: &str, start: &str, gaps: &[i64], amount: &str) -> Vec<Transaction> {
    let mut date = NaiveDate::parse_from_str(start, DATE_FORMAT).unwrap();
    let amount = Decimal::from_str(amount).unwrap();
    let mut out = vec![Transaction::new(date, description, amount)];
    for gap in gaps {
        date += Duration::days(*gap);
        out.push(Transaction::new(date, description, amount));
    }
    out
}
