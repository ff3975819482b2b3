//! Resolution of the filesystem locations the updater works on.
//!
//! The updater ships inside its own directory in the application's install root:
//!
//! ```text
//! <install root>/
//! ├── Game.exe
//! ├── data/
//! └── Updater/
//!     ├── updater.exe
//!     └── config.ini
//! ```
//!
//! [`ResolvedPaths`] captures that layout once, at startup, and is passed into the
//! workflow. Every location is stored as an absolute path: relative inputs are
//! resolved against the working directory at construction time. Nothing below the
//! entry point looks at the current executable or the working directory, so tests
//! can point the workflow at a temporary tree.

use crate::constants::{CONFIG_FILE_NAME, DEFAULT_EXECUTABLE, DEFAULT_UPDATER_DIR_NAME};
use crate::core::UpdaterError;
use crate::utils::fs::absolute_path;
use std::path::{Path, PathBuf};

/// Locations used by one update attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// Local configuration file (`[Version]`, `[Remote Config]`)
    pub config_file: PathBuf,
    /// Directory whose direct children are replaced by the package contents
    pub install_root: PathBuf,
    /// Name of the direct child of `install_root` that is never deleted
    pub updater_dir_name: String,
    /// Executable started after a successful update, relative to `install_root`
    pub executable: PathBuf,
}

impl ResolvedPaths {
    /// Derive the layout from the updater's own directory.
    ///
    /// The config file lives inside `updater_dir`, the install root is its parent,
    /// and the protected directory name is its final component. A relative
    /// `updater_dir` is taken relative to the working directory, so `Updater`
    /// yields the working directory as install root.
    pub fn from_updater_dir(updater_dir: impl AsRef<Path>) -> Self {
        let updater_dir = absolute_path(updater_dir.as_ref());
        let install_root = updater_dir.parent().map_or_else(|| updater_dir.clone(), Path::to_path_buf);
        let updater_dir_name = updater_dir
            .file_name()
            .map_or_else(|| DEFAULT_UPDATER_DIR_NAME.to_string(), |name| name.to_string_lossy().into_owned());

        Self {
            config_file: updater_dir.join(CONFIG_FILE_NAME),
            install_root,
            updater_dir_name,
            executable: PathBuf::from(DEFAULT_EXECUTABLE),
        }
    }

    /// Derive the layout from the location of the running executable.
    ///
    /// This is the packaged mode: `<install root>/Updater/updater(.exe)`.
    pub fn from_current_exe() -> Result<Self, UpdaterError> {
        let exe = std::env::current_exe()?;
        let exe = exe.canonicalize().unwrap_or(exe);
        let updater_dir = exe.parent().ok_or_else(|| UpdaterError::Other {
            message: format!("Cannot determine the directory of {}", exe.display()),
        })?;
        Ok(Self::from_updater_dir(updater_dir))
    }

    /// Use a different configuration file.
    #[must_use]
    pub fn with_config_file(mut self, path: impl AsRef<Path>) -> Self {
        self.config_file = absolute_path(path.as_ref());
        self
    }

    /// Use a different install root.
    #[must_use]
    pub fn with_install_root(mut self, path: impl AsRef<Path>) -> Self {
        self.install_root = absolute_path(path.as_ref());
        self
    }

    /// Protect a different directory name during installation.
    #[must_use]
    pub fn with_updater_dir_name(mut self, name: impl Into<String>) -> Self {
        self.updater_dir_name = name.into();
        self
    }

    /// Relaunch a different executable after updating.
    #[must_use]
    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = executable.into();
        self
    }

    /// Absolute path of the executable to relaunch.
    pub fn executable_path(&self) -> PathBuf {
        self.install_root.join(&self.executable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_from_updater_dir() {
        let paths = ResolvedPaths::from_updater_dir("/opt/game/Updater");
        assert_eq!(paths.config_file, PathBuf::from("/opt/game/Updater/config.ini"));
        assert_eq!(paths.install_root, PathBuf::from("/opt/game"));
        assert_eq!(paths.updater_dir_name, "Updater");
        assert_eq!(paths.executable_path(), PathBuf::from("/opt/game").join(DEFAULT_EXECUTABLE));
    }

    #[test]
    fn test_relative_updater_dir_resolves_against_current_dir() {
        let cwd = std::env::current_dir().unwrap();

        let paths = ResolvedPaths::from_updater_dir("Updater");
        assert_eq!(paths.install_root, cwd);
        assert_eq!(paths.updater_dir_name, "Updater");
        assert_eq!(paths.config_file, cwd.join("Updater").join(CONFIG_FILE_NAME));
        assert!(paths.executable_path().is_absolute());
    }

    #[test]
    fn test_current_dir_as_updater_dir() {
        let cwd = std::env::current_dir().unwrap();

        let paths = ResolvedPaths::from_updater_dir(".");
        assert_eq!(paths.install_root, cwd.parent().unwrap());
        assert_eq!(paths.updater_dir_name, cwd.file_name().unwrap().to_string_lossy());
    }

    #[test]
    fn test_relative_overrides_are_absolutized() {
        let cwd = std::env::current_dir().unwrap();

        let paths = ResolvedPaths::from_updater_dir("Updater")
            .with_install_root("./dev/game")
            .with_config_file("dev/../cfg/config.ini");

        assert_eq!(paths.install_root, cwd.join("dev").join("game"));
        assert_eq!(paths.config_file, cwd.join("cfg").join("config.ini"));
        assert_eq!(paths.executable_path(), cwd.join("dev").join("game").join(DEFAULT_EXECUTABLE));
    }

    #[cfg(unix)]
    #[test]
    fn test_overrides() {
        let paths = ResolvedPaths::from_updater_dir("/opt/game/Updater")
            .with_config_file("/etc/updater.ini")
            .with_install_root("/srv/app")
            .with_updater_dir_name("tools")
            .with_executable("bin/app");

        assert_eq!(paths.config_file, PathBuf::from("/etc/updater.ini"));
        assert_eq!(paths.updater_dir_name, "tools");
        assert_eq!(paths.executable_path(), PathBuf::from("/srv/app/bin/app"));
    }
}
