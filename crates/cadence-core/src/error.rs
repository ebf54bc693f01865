//! Error types for Cadence

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid date {value:?} in record {index} (expected MM/DD/YYYY)")]
    InvalidDate { index: usize, value: String },

    #[error("Invalid amount {value:?} in record {index}")]
    InvalidAmount { index: usize, value: String },

    /// A pair key the clustering needed is not covered by the distance index.
    /// Only happens with an externally supplied distances file.
    #[error("Distance index has no entry for pair {0}")]
    MissingDistance(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;
