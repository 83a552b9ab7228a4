//! Differential output writer: a file is only touched when its content would change.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::Result;

/// Write `content` to `path` unless the file already holds exactly that content.
///
/// A file that cannot be read (missing, unreadable, not UTF-8) counts as different and
/// is overwritten; the read failure is deliberately not surfaced. Writing deletes the
/// old file first, then creates it anew. Returns whether a write happened.
///
/// # Errors
/// Returns [`crate::Error::FileError`] when deleting or writing the file fails.
pub fn write_if_changed(path: &Path, content: &str) -> Result<bool> {
    if !different_from_disk(path, content) {
        debug!("** Skipped writing [same as on file system]: {}", path.display());
        return Ok(false);
    }

    info!("** Writing {}", path.display());
    if path.exists() {
        fs::remove_file(path)?;
    }
    fs::write(path, content)?;
    Ok(true)
}

fn different_from_disk(path: &Path, content: &str) -> bool {
    match fs::read_to_string(path) {
        Ok(on_disk) => on_disk != content,
        Err(_) => true,
    }
}
