//! Sequence reports
//!
//! Turns a [`SequenceStore`] into a plain-text listing (one block per
//! sequence) or into serializable structs for JSON output.

use serde::Serialize;

use crate::models::DATE_FORMAT;
use crate::store::SequenceStore;

/// One sequence, ready to print or serialize
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SequenceReport {
    /// 1-based position in discovery order
    pub number: usize,
    /// Mean day-interval of the sequence's window
    pub frequency_days: f64,
    pub first_seen: String,
    pub last_seen: String,
    pub entries: Vec<ReportEntry>,
}

/// One transaction row of a sequence report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub id: String,
    /// `MM/DD/YYYY`
    pub date: String,
    pub description: String,
    /// Exact decimal text, never a float
    pub amount: String,
    /// Days since the previous row; `None` for the first row
    pub interval_days: Option<i64>,
}

/// Build one report per stored sequence, in discovery order
pub fn build_reports(store: &SequenceStore) -> Vec<SequenceReport> {
    store
        .iter()
        .enumerate()
        .map(|(i, sequence)| {
            let transactions = sequence.transactions();
            let entries = transactions
                .iter()
                .enumerate()
                .map(|(j, t)| ReportEntry {
                    id: t.id.clone(),
                    date: t.date_string(),
                    description: t.description.clone(),
                    amount: t.amount.to_string(),
                    interval_days: j.checked_sub(1).map(|prev| t.days_since(&transactions[prev])),
                })
                .collect();

            SequenceReport {
                number: i + 1,
                frequency_days: sequence.frequency(),
                first_seen: sequence
                    .first_seen()
                    .map(|d| d.format(DATE_FORMAT).to_string())
                    .unwrap_or_default(),
                last_seen: sequence
                    .last_seen()
                    .map(|d| d.format(DATE_FORMAT).to_string())
                    .unwrap_or_default(),
                entries,
            }
        })
        .collect()
}

/// Render every sequence as a text block:
///
/// ```text
/// SEQUENCE #1
/// Frequency: ~30.25 days
/// 01/15/2024    NETFLIX.COM    15.49    -
/// 02/15/2024    NETFLIX.COM    15.49    31 days
/// ```
pub fn render_text(store: &SequenceStore) -> String {
    let reports = build_reports(store);
    if reports.is_empty() {
        return "No recurring sequences found.\n".to_string();
    }

    let description_width = reports
        .iter()
        .flat_map(|r| r.entries.iter())
        .map(|e| e.description.chars().count())
        .max()
        .unwrap_or(0);
    let amount_width = reports
        .iter()
        .flat_map(|r| r.entries.iter())
        .map(|e| e.amount.len())
        .max()
        .unwrap_or(0);

    let mut out = String::from("SEQUENCES\n");

    for report in &reports {
        out.push('\n');
        out.push_str(&format!("SEQUENCE #{}\n", report.number));
        out.push_str(&format!("Frequency: ~{:.2} days\n", report.frequency_days));
        for entry in &report.entries {
            let interval = entry
                .interval_days
                .map(|d| format!("{} days", d))
                .unwrap_or_else(|| "-".to_string());
            out.push_str(&format!(
                "{}    {:<dw$}    {:>aw$}    {}\n",
                entry.date,
                entry.description,
                entry.amount,
                interval,
                dw = description_width,
                aw = amount_width
            ));
        }
    }

    out
}
