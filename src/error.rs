// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Run-level failures. Any of these aborts the run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("input {path}: {reason}")]
    Input { path: PathBuf, reason: String },

    #[error("corpus {path}: {reason}")]
    Corpus { path: PathBuf, reason: String },
}

/// Why a single crawler record was skipped.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record has no title")]
    MissingTitle,

    #[error("record has no url")]
    MissingUrl,

    #[error("unknown language {0:?}")]
    UnknownLanguage(String),

    #[error("scrape_date {0:?} is not YYYYMMDD")]
    BadScrapeDate(String),

    #[error("processing panicked: {0}")]
    Panicked(String),
}

/// A skipped record, located in the input.
#[derive(Debug, Error)]
#[error("record #{index} ({url}): {source}")]
pub struct ProcessError {
    pub index: usize,
    pub url: String,
    #[source]
    pub source: RecordError,
}
