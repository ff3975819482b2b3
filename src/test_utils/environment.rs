//! A throwaway installation for workflow tests.

use crate::config::ResolvedPaths;
use crate::constants::{CONFIG_FILE_NAME, DEFAULT_UPDATER_DIR_NAME};
use crate::test_utils::fixtures::config_ini;
use crate::upgrade::UpgradeConfig;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Temporary install root with an `Updater/config.ini` and a private
/// directory for update workspaces.
///
/// ```text
/// <temp>/
/// ├── install/
/// │   └── Updater/
/// │       └── config.ini
/// └── workspaces/
/// ```
pub struct TestInstall {
    temp_dir: TempDir,
    install_root: PathBuf,
    workspaces: PathBuf,
}

impl TestInstall {
    /// Create an installation at `version` whose manifest lives at `manifest_url`.
    pub fn new(version: &str, manifest_url: &str) -> Result<Self> {
        let install = Self::empty()?;
        install.write_config(&config_ini(version, manifest_url))?;
        Ok(install)
    }

    /// Create an installation with an empty updater directory and no config file.
    pub fn empty() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let install_root = temp_dir.path().join("install");
        let workspaces = temp_dir.path().join("workspaces");
        std::fs::create_dir_all(install_root.join(DEFAULT_UPDATER_DIR_NAME))?;
        std::fs::create_dir_all(&workspaces)?;

        Ok(Self {
            temp_dir,
            install_root,
            workspaces,
        })
    }

    /// Root of the temporary tree.
    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// The install root.
    pub fn install_root(&self) -> &Path {
        &self.install_root
    }

    /// The updater directory inside the install root.
    pub fn updater_dir(&self) -> PathBuf {
        self.install_root.join(DEFAULT_UPDATER_DIR_NAME)
    }

    /// Path of the local config file.
    pub fn config_path(&self) -> PathBuf {
        self.updater_dir().join(CONFIG_FILE_NAME)
    }

    /// Directory that receives the workflow's temporary workspaces.
    pub fn workspaces(&self) -> &Path {
        &self.workspaces
    }

    /// Replace the local config file.
    pub fn write_config(&self, content: &str) -> Result<()> {
        std::fs::write(self.config_path(), content)
            .with_context(|| format!("Failed to write {}", self.config_path().display()))
    }

    /// Read the local config file.
    pub fn read_config(&self) -> Result<String> {
        Ok(std::fs::read_to_string(self.config_path())?)
    }

    /// Write a file relative to the install root, creating parent directories.
    pub fn write_file(&self, relative: &str, content: &str) -> Result<()> {
        let path = self.install_root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Read a file relative to the install root.
    pub fn read_file(&self, relative: &str) -> Result<String> {
        Ok(std::fs::read_to_string(self.install_root.join(relative))?)
    }

    /// Returns `true` if `relative` exists in the install root.
    pub fn exists(&self, relative: &str) -> bool {
        self.install_root.join(relative).exists()
    }

    /// Sorted names of the direct children of the install root.
    pub fn root_entries(&self) -> Result<Vec<String>> {
        let mut names = std::fs::read_dir(&self.install_root)?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect::<std::io::Result<Vec<_>>>()?;
        names.sort();
        Ok(names)
    }

    /// Number of workspaces left behind.
    pub fn leftover_workspaces(&self) -> Result<usize> {
        Ok(std::fs::read_dir(&self.workspaces)?.count())
    }

    /// Paths for the workflow, derived from the updater directory.
    pub fn paths(&self) -> ResolvedPaths {
        ResolvedPaths::from_updater_dir(self.updater_dir())
    }

    /// Settings suited to tests: no progress, no relaunch, private workspaces.
    pub fn upgrade_config(&self) -> UpgradeConfig {
        UpgradeConfig::new()
            .with_progress(false)
            .with_relaunch(false)
            .with_workspace_parent(&self.workspaces)
    }
}
