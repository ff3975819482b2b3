//! Replacement of the install root with the contents of an extracted package.
//!
//! Installation is two passes over direct children only:
//!
//! 1. Every entry of the install root except the updater directory is removed
//! 2. Every top-level entry of the extracted package is moved into the root
//!
//! The replacement is not transactional. If a removal or move fails, the install
//! root is left as it is at that point and the error names the offending path.

use crate::core::UpdaterError;
use crate::utils::fs::{move_entry, remove_entry};
use std::ffi::OsStr;
use std::path::Path;
use tracing::{debug, info};

/// Summary of an installation, for logging.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// Entries deleted from the install root
    pub removed: usize,
    /// Entries moved in from the package
    pub installed: usize,
}

/// Replace the contents of `install_root` with those of `extracted`.
///
/// The direct child named `updater_dir_name` is never removed. It is only
/// replaced when the package itself contains an entry with the same name.
///
/// # Errors
///
/// [`UpdaterError::InstallIoError`] naming the path whose removal or move failed.
pub fn replace_install_root(
    install_root: &Path,
    extracted: &Path,
    updater_dir_name: &str,
) -> Result<InstallReport, UpdaterError> {
    let mut report = InstallReport::default();
    let protected = OsStr::new(updater_dir_name);

    for entry in read_dir(install_root)? {
        let entry = entry.map_err(|error| UpdaterError::install_io("read", install_root, error))?;
        if entry.file_name() == protected {
            debug!("Keeping {}", entry.path().display());
            continue;
        }

        let path = entry.path();
        debug!("Removing {}", path.display());
        remove_entry(&path).map_err(|error| UpdaterError::install_io("remove", &path, error))?;
        report.removed += 1;
    }

    for entry in read_dir(extracted)? {
        let entry = entry.map_err(|error| UpdaterError::install_io("read", extracted, error))?;
        let target = install_root.join(entry.file_name());

        if entry.file_name() == protected {
            // Only reachable when the package ships its own updater directory
            info!("Package replaces {}", target.display());
            remove_entry(&target)
                .map_err(|error| UpdaterError::install_io("remove", &target, error))?;
        }

        debug!("Installing {}", target.display());
        move_entry(&entry.path(), &target)
            .map_err(|error| UpdaterError::install_io("move", &target, error))?;
        report.installed += 1;
    }

    info!(
        "Replaced {} entries in {} with {} from the package",
        report.removed,
        install_root.display(),
        report.installed
    );
    Ok(report)
}

fn read_dir(path: &Path) -> Result<std::fs::ReadDir, UpdaterError> {
    std::fs::read_dir(path).map_err(|error| UpdaterError::install_io("read", path, error))
}
