//! Atomic file write operations using temp-and-rename strategy.
//!
//! An interrupted write leaves either the old or the new contents on disk, never
//! a truncated file.

use crate::utils::fs::dirs::ensure_dir;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Atomically writes bytes to a file using a write-then-rename strategy.
///
/// 1. Writes `content` to a sibling temporary file (`.tmp` extension)
/// 2. Syncs the temporary file to disk
/// 3. Renames the temporary file over `path`
///
/// The temporary file is removed if any step fails.
///
/// # Examples
///
/// ```rust,no_run
/// use app_updater::utils::fs::atomic_write;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// atomic_write(Path::new("Updater/config.ini"), b"[Version]\ncurrent_version = 1.1.0\n")?;
/// # Ok(())
/// # }
/// ```
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }

    let temp_path = path.with_extension("tmp");

    let result = (|| -> Result<()> {
        let mut file = fs::File::create(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        file.write_all(content)
            .with_context(|| format!("Failed to write to temp file: {}", temp_path.display()))?;

        file.sync_all().with_context(|| "Failed to sync file to disk")?;
        drop(file);

        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to rename temp file to: {}", path.display()))
    })();

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_replaces_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        fs::write(&path, "old").unwrap();

        atomic_write(&path, b"new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert!(!dir.path().join("config.tmp").exists());
    }

    #[test]
    fn test_atomic_write_creates_parent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/dir/config.ini");

        atomic_write(&path, b"[Version]\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "[Version]\n");
    }

    #[test]
    fn test_atomic_write_into_directory_fails() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("occupied");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("child"), "x").unwrap();

        assert!(atomic_write(&target, b"data").is_err());
        assert!(!dir.path().join("occupied.tmp").exists());
    }
}
