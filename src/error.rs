//! Fatal error taxonomy.
//!
//! Only unrecoverable setup failures live here. Per-file parse problems
//! and per-key resolution problems are handled where they occur: the file
//! is skipped with a warning, or the usage degrades to the unknown tier.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("target path not found: {0}")]
    RootNotFound(PathBuf),

    #[error("report not found at {0} (run `basecheck scan` first)")]
    ReportMissing(PathBuf),

    #[error("malformed report {path}: {source}")]
    ReportMalformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("malformed allowlist {path}: {source}")]
    AllowlistMalformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid baseline dataset {path}: {reason}")]
    Dataset { path: String, reason: String },

    #[error("invalid value for {var}: {value:?} (expected a non-negative integer)")]
    BadCeiling { var: String, value: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to serialize report: {0}")]
    Serialize(serde_json::Error),
}
