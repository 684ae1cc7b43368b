//! Error taxonomy.
//!
//! Hierarchical `thiserror` enums composing via `?` and `From`. The split
//! mirrors the recovery strategy: store failures are non-fatal during a
//! poll refresh (the last good collection stays on screen and the failure
//! is logged), while terminal failures are fatal. The query pipeline
//! itself is total and has no error type at all.

use crate::model::RowId;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// Everything that can escape `run()` converts into this via `From`.
#[derive(Debug, Error)]
pub enum AppError {
    /// The submission store could not be read or written.
    ///
    /// Fatal only at startup (no data to show); during a poll refresh the
    /// caller logs it and keeps the previous collection instead.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration file exists but could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Terminal or rendering failure from the crossterm/ratatui layer.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Failures from the submission store boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The data file does not exist at the given path.
    #[error("Data file not found: {path}")]
    NotFound {
        /// The path that was attempted.
        path: PathBuf,
    },

    /// The data file exists but is not a JSON array of submission rows.
    #[error("Malformed data file {path}: {reason}")]
    Malformed {
        /// The file that failed to parse.
        path: PathBuf,
        /// Parser detail, verbatim.
        reason: String,
    },

    /// An update or delete named a row that is not in the store.
    #[error("No submission at row {id}")]
    UnknownRow {
        /// The row id that was requested.
        id: RowId,
    },

    /// The store rejected an edit (name and email are required).
    #[error("Edit rejected: {reason}")]
    RejectedEdit {
        /// Which requirement was violated.
        reason: &'static str,
    },

    /// Underlying I/O failure reading or writing the data file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
