//! Error types for redeem-core.
//!
//! Only failures that prevent reading the document as a list of entries are
//! errors. Per-entry extraction defects are reported through
//! [`ExtractionReport`](crate::extract::ExtractionReport) instead.

use std::path::PathBuf;
use thiserror::Error;

/// The input could not be interpreted as a sequence of log entries.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("not a .json file: {0}")]
    NotJson(PathBuf),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unreadable input: {0}")]
    Unreadable(#[from] serde_json::Error),
}

/// A configuration value was present but unusable.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    #[error("invalid timezone {0:?} (expected \"local\", \"utc\" or \"+HH:MM\")")]
    Timezone(String),

    #[error("coalesce.tolerance_ms must not be negative (got {0})")]
    Tolerance(i64),

    #[error("{0} must not be empty")]
    Empty(&'static str),

    #[error("invalid payload pattern: {0}")]
    Pattern(#[from] regex::Error),
}
