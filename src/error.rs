//! Application-level errors.
//!
//! Board operations never fail this way; they decline with
//! [`crate::board::Declined`] instead. `AppError` covers the I/O around
//! them: the terminal, intent scripts and JSON output.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Terminal(#[source] io::Error),

    #[error("failed to read intent script {}: {source}", path.display())]
    ReadScript {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse intent script {}: {source}", path.display())]
    ParseScript {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}
