//! Moving files and directory trees between locations.
//!
//! The temporary workspace usually lives on a different filesystem than the
//! install root (e.g. `/tmp` on tmpfs, or `%TEMP%` on `C:` while the application
//! is on `D:`), where a plain rename fails. [`move_entry`] falls back to copying
//! the tree and removing the source in that case.

use super::dirs::remove_entry;
use std::fs;
use std::io;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Moves `src` to `dst`, which must not exist yet.
///
/// Tries a rename first. If that fails, the entry is copied recursively and the
/// source is removed afterwards.
pub fn move_entry(src: &Path, dst: &Path) -> io::Result<()> {
    match fs::rename(src, dst) {
        Ok(()) => Ok(()),
        Err(rename_error) => {
            debug!(
                "Rename {} -> {} failed ({rename_error}), copying instead",
                src.display(),
                dst.display()
            );
            copy_entry(src, dst)?;
            remove_entry(src)
        }
    }
}

/// Copies a file or a directory tree.
///
/// Symlinks inside the tree are recreated on Unix and skipped elsewhere.
pub fn copy_entry(src: &Path, dst: &Path) -> io::Result<()> {
    let metadata = fs::symlink_metadata(src)?;
    if !metadata.is_dir() {
        return copy_single(src, dst, &metadata);
    }

    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry.map_err(io::Error::other)?;
        let relative = entry.path().strip_prefix(src).map_err(io::Error::other)?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            copy_single(entry.path(), &target, &entry.metadata().map_err(io::Error::other)?)?;
        }
    }
    Ok(())
}

fn copy_single(src: &Path, dst: &Path, metadata: &fs::Metadata) -> io::Result<()> {
    if metadata.file_type().is_symlink() {
        #[cfg(unix)]
        {
            let link_target = fs::read_link(src)?;
            return std::os::unix::fs::symlink(link_target, dst);
        }
        #[cfg(not(unix))]
        {
            debug!("Skipping symlink {}", src.display());
            return Ok(());
        }
    }
    fs::copy(src, dst).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_move_file() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.txt");
        let dst = dir.path().join("b.txt");
        fs::write(&src, "content").unwrap();

        move_entry(&src, &dst).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read_to_string(&dst).unwrap(), "content");
    }

    #[test]
    fn test_move_directory_tree() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("data");
        fs::create_dir_all(src.join("levels/1")).unwrap();
        fs::write(src.join("levels/1/map.bin"), "map").unwrap();
        let dst = dir.path().join("moved");

        move_entry(&src, &dst).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read_to_string(dst.join("levels/1/map.bin")).unwrap(), "map");
    }

    #[test]
    fn test_copy_entry_tree() {
        let src_dir = TempDir::new().unwrap();
        let dst_dir = TempDir::new().unwrap();
        let src = src_dir.path().join("tree");
        fs::create_dir_all(src.join("sub")).unwrap();
        fs::write(src.join("root.txt"), "r").unwrap();
        fs::write(src.join("sub/leaf.txt"), "l").unwrap();
        let dst = dst_dir.path().join("tree");

        copy_entry(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(dst.join("root.txt")).unwrap(), "r");
        assert_eq!(fs::read_to_string(dst.join("sub/leaf.txt")).unwrap(), "l");
        assert!(src.exists());
    }

    #[test]
    fn test_move_missing_source_fails() {
        let dir = TempDir::new().unwrap();
        let result = move_entry(&dir.path().join("missing"), &dir.path().join("dst"));
        assert!(result.is_err());
    }
}
