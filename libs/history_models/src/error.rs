use std::path::PathBuf;

use thiserror::Error;

pub type HistoryStoreResult<T> = Result<T, HistoryStoreError>;

#[derive(Error, Debug)]
pub enum HistoryStoreError {
    #[error("Failed to read history file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write history file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("History file {} is not a valid JSON array: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),
}
