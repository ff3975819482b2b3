//! Directory creation and removal.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::Path;

/// Ensures a directory exists, creating it and all parent directories if necessary.
///
/// # Errors
///
/// Fails if the path exists but is not a directory, or creation fails.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    } else if !path.is_dir() {
        return Err(anyhow::anyhow!("Path exists but is not a directory: {}", path.display()));
    }

    Ok(())
}

/// Removes a file, symlink, or directory tree.
///
/// Symlinks are removed themselves, never followed. A path that no longer exists
/// is not an error.
pub fn remove_entry(path: &Path) -> io::Result<()> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(error) => return Err(error),
    };

    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        match fs::remove_file(path) {
            // Directory symlinks on Windows are removed as directories
            Err(_) if metadata.file_type().is_symlink() => fs::remove_dir(path),
            other => other,
        }
    };

    match result {
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}
