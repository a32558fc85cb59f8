//! JSON snapshot export.
//!
//! Snapshot files are fully rewritten: any prior file at the target path is
//! deleted, then the new content is written in a single call. The design
//! assumes a single writer; there is no file locking.

use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing a snapshot file.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Filesystem operation failed
    #[error("snapshot I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Data could not be serialized
    #[error("snapshot serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Write `data` as pretty-printed UTF-8 JSON at `path`, purging any prior
/// version first. Parent directories are created as needed.
///
/// # Errors
///
/// Returns `SnapshotError` when the path is unwritable or serialization
/// fails. Callers contain the error at the write step; it never aborts a
/// broader operation sequence.
pub fn write_snapshot<T: Serialize>(path: &Path, data: &T) -> Result<(), SnapshotError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    purge_prior(path)?;
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)?;
    Ok(())
}

/// Remove a prior snapshot at `path` if one exists.
fn purge_prior(path: &Path) -> Result<(), std::io::Error> {
    if path.is_file() {
        fs::remove_file(path)?;
    }
    Ok(())
}
