use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a whole invocation. Per-file read errors are not here;
/// they travel inside `ReadOutcome` and never stop the batch.
#[derive(Debug, Error)]
pub enum CombineError {
    #[error("No workspace folder at {path:?}")]
    NoWorkspace {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid glob pattern '{pattern}'")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to write {path:?}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Bad settings file {path:?}: {message}")]
    Config { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, CombineError>;
