//! File export — writes the current output text as a timestamped artifact.

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Name for an exported artifact: `logs-<timestamp>.txt`, where the
/// timestamp is UTC with `:` unusable on most filesystems replaced by `-`
/// and the sub-second/timezone suffix removed.
pub fn export_filename(now: DateTime<Utc>) -> String {
    format!("logs-{}.txt", now.format("%Y-%m-%dT%H-%M-%S"))
}

/// Write `text` UTF-8 encoded into `dir`, named by [`export_filename`].
///
/// Returns the full path of the written file.
pub fn write_export(dir: &Path, text: &str, now: DateTime<Utc>) -> anyhow::Result<PathBuf> {
    let path = dir.join(export_filename(now));
    std::fs::write(&path, text)?;
    tracing::debug!(path = %path.display(), bytes = text.len(), "export written");
    Ok(path)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
