//! Semantic version comparison between the installed and the published version.
//!
//! Versions are compared by SemVer precedence:
//!
//! - `1.10.0` is newer than `1.9.0` (numeric, not lexical)
//! - `2.0.0-beta.1` is older than `2.0.0`
//! - build metadata is ignored, so `1.0.0+build.5` equals `1.0.0`
//!
//! Before parsing, surrounding whitespace and a leading `v` are removed and short
//! versions are padded (`1.4` becomes `1.4.0`). Anything else that is not a
//! semantic version is an error, never a silent "no update".

use crate::core::UpdaterError;
use semver::Version;
use std::cmp::Ordering;
use tracing::debug;

/// Parse a version string as written in a config file or manifest.
///
/// # Examples
///
/// ```rust
/// use app_updater::upgrade::version_check::parse_version;
///
/// assert_eq!(parse_version("v1.4").unwrap().to_string(), "1.4.0");
/// assert!(parse_version("latest").is_err());
/// ```
pub fn parse_version(input: &str) -> Result<Version, UpdaterError> {
    let trimmed = input.trim();
    let unprefixed = trimmed.strip_prefix(['v', 'V']).unwrap_or(trimmed);

    Version::parse(&pad_components(unprefixed)).map_err(|error| UpdaterError::VersionParseError {
        version: input.to_string(),
        reason: error.to_string(),
    })
}

/// Pad `1` and `1.4` to three numeric components, keeping any suffix.
fn pad_components(version: &str) -> String {
    let core_end = version.find(['-', '+']).unwrap_or(version.len());
    let (core, suffix) = version.split_at(core_end);

    let parts: Vec<&str> = core.split('.').collect();
    let numeric = parts.iter().all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()));
    if !numeric || parts.len() >= 3 {
        return version.to_string();
    }

    let mut padded = core.to_string();
    for _ in parts.len()..3 {
        padded.push_str(".0");
    }
    padded.push_str(suffix);
    padded
}

/// Result of comparing the installed version with the published one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionComparison {
    /// Installed version
    pub local: Version,
    /// Published version
    pub remote: Version,
}

impl VersionComparison {
    /// Parse and compare both versions.
    ///
    /// # Errors
    ///
    /// [`UpdaterError::VersionParseError`] naming whichever string is malformed.
    pub fn new(local: &str, remote: &str) -> Result<Self, UpdaterError> {
        let comparison = Self {
            local: parse_version(local)?,
            remote: parse_version(remote)?,
        };
        debug!(
            "Installed {} vs published {}: {:?}",
            comparison.local,
            comparison.remote,
            comparison.remote.cmp_precedence(&comparison.local)
        );
        Ok(comparison)
    }

    /// Returns `true` iff the published version has higher precedence.
    pub fn update_available(&self) -> bool {
        self.remote.cmp_precedence(&self.local) == Ordering::Greater
    }

    /// One-line summary for the console.
    pub fn format_version_info(&self) -> String {
        if self.update_available() {
            format!("Update available: {} -> {}", self.local, self.remote)
        } else {
            format!("Already up to date (installed {}, latest {})", self.local, self.remote)
        }
    }
}
