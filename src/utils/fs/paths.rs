//! Lexical path helpers.
//!
//! The updater deletes everything in the install root except one directory, so
//! the root must never depend on how a relative path happens to be joined later.
//! Paths are made absolute once, when they are resolved.

use std::path::{Component, Path, PathBuf};

/// Removes `.` components and resolves `..` against the preceding component.
///
/// Purely lexical: symlinks are not followed and the path does not need to exist.
/// Leading `..` components of a relative path are kept, and `..` at the root of an
/// absolute path is dropped.
///
/// # Examples
///
/// ```rust
/// use app_updater::utils::fs::normalize_path;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(normalize_path(Path::new("/opt/./game/../app")), PathBuf::from("/opt/app"));
/// assert_eq!(normalize_path(Path::new("../dev/./game")), PathBuf::from("../dev/game"));
/// ```
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(normalized.components().next_back(), Some(Component::Normal(_)));
                if can_pop {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push(Component::ParentDir);
                }
            }
            other => normalized.push(other),
        }
    }

    normalized
}

/// Makes `path` absolute against the current directory, then normalizes it.
///
/// When the current directory cannot be determined the path is only normalized.
#[must_use]
pub fn absolute_path(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    normalize_path(&absolute)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path(Path::new("a/./b/../c")), PathBuf::from("a/c"));
        assert_eq!(normalize_path(Path::new("../../x")), PathBuf::from("../../x"));
        assert_eq!(normalize_path(Path::new("a/..")), PathBuf::new());
    }

    #[cfg(unix)]
    #[test]
    fn test_normalize_absolute_path_stops_at_root() {
        assert_eq!(normalize_path(Path::new("/../etc")), PathBuf::from("/etc"));
        assert_eq!(normalize_path(Path::new("/opt/game/Updater/..")), PathBuf::from("/opt/game"));
    }

    #[test]
    fn test_absolute_path_uses_current_dir() {
        let cwd = std::env::current_dir().unwrap();

        assert_eq!(absolute_path(Path::new("Updater")), cwd.join("Updater"));
        assert_eq!(absolute_path(Path::new(".")), cwd);
        assert_eq!(absolute_path(Path::new("./Updater/..")), cwd);
        assert!(absolute_path(Path::new("game/bin")).is_absolute());
    }
}
