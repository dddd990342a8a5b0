use std::path::PathBuf;
use thiserror::Error;

/// The main error type for hubsets operations.
#[derive(Debug, Error)]
pub enum HubsetsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid dataset reference '{input}': {message}")]
    ResolveError { input: String, message: String },

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Hub API request for '{target}' failed: {message}")]
    HubApiError { target: String, message: String },

    #[error("Dataset viewer request for '{dataset_id}' failed: {message}")]
    ViewerError { dataset_id: String, message: String },

    #[error("Failed to download '{path}' from '{dataset_id}': {message}")]
    DownloadError {
        dataset_id: String,
        path: String,
        message: String,
    },

    #[error("Structured load of '{dataset_id}' failed: {message}")]
    LoadError { dataset_id: String, message: String },

    #[error("Failed to write download record to {path}: {source}")]
    RecordWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
