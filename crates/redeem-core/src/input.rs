//! Input loader — reads the exported log document into [`RawLogEntry`] values.
//!
//! The outer document must be a JSON array of objects with a `timestamp`
//! string and an optional `message`. Any other shape is an
//! [`InputError::Unreadable`].

use crate::{error::InputError, types::RawLogEntry};
use std::path::Path;

/// Parse a whole document held in memory.
pub fn parse_document(text: &str) -> Result<Vec<RawLogEntry>, InputError> {
    let entries: Vec<RawLogEntry> = serde_json::from_str(text)?;
    tracing::debug!(entries = entries.len(), "parsed log document");
    Ok(entries)
}

/// Read and parse a `.json` export from disk.
pub fn read_document(path: &Path) -> Result<Vec<RawLogEntry>, InputError> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return Err(InputError::NotJson(path.to_path_buf()));
    }

    let text = std::fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(text.trim_start_matches('\u{feff}'))
}
