//! Timestamp labels and archived-file discovery.

use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::Result;

/// Format of snapshot column labels and archive-file suffixes,
/// e.g. `2023-11-06T083944Z`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H%M%SZ";

// Rendered length of TIMESTAMP_FORMAT
const TIMESTAMP_LEN: usize = 18;

/// Renders a timestamp as a snapshot column label.
pub fn timestamp_label(timestamp: DateTime<Utc>) -> String {
    timestamp.format(TIMESTAMP_FORMAT).to_string()
}

/// Lists the files in `dir` whose names end in a timestamp label, paired
/// with the parsed timestamp. Files without a parseable suffix are skipped.
pub fn files_with_timestamp(dir: &Path) -> Result<Vec<(PathBuf, DateTime<Utc>)>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if let Some(timestamp) = parse_timestamp_suffix(&name) {
            files.push((entry.path(), timestamp));
        } else {
            log::debug!("Skipping '{name}': no timestamp suffix");
        }
    }
    Ok(files)
}

fn parse_timestamp_suffix(name: &str) -> Option<DateTime<Utc>> {
    if !name.ends_with('Z') || name.len() < TIMESTAMP_LEN {
        return None;
    }
    let suffix = &name[name.len() - TIMESTAMP_LEN..];
    NaiveDateTime::parse_from_str(suffix, TIMESTAMP_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}
