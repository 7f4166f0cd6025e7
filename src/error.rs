// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Every failure the scraper and the dataset adapters can report.
///
/// Per-card failures (`Network`, `Http`, `Validation`) are swallowed by the
/// acquirer after retrying. `EmptySource` is only ever logged. `Io` is the
/// one that ends a run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Connection refused, DNS failure, timeout elapsed, body cut short.
    #[error("network error fetching {url}: {reason}")]
    Network { url: String, reason: String },

    /// Remote answered, but not with a 2xx.
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    /// Bytes on disk do not decode as an image.
    #[error("invalid image {}: {reason}", .path.display())]
    Validation { path: PathBuf, reason: String },

    /// A table row points at an image that is not on disk.
    #[error("image not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// The card source had nothing for this race.
    #[error("no cards found for race {0}")]
    EmptySource(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("bad JSON from card source: {0}")]
    Json(#[from] serde_json::Error),

    /// A manifest/table file row could not be read back.
    #[error("{}:{line}: {reason}", .path.display())]
    Manifest {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("category {0:?} has no index in the category map")]
    UnknownCategory(String),

    #[error("index {index} out of range for dataset of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

impl From<figment::Error> for ScrapeError {
    fn from(e: figment::Error) -> Self {
        ScrapeError::Config(e.to_string())
    }
}

pub type Result<T, E = ScrapeError> = std::result::Result<T, E>;
