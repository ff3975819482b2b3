//! Local configuration of the updater.
//!
//! The updater keeps its state in a small INI file next to its executable:
//!
//! ```ini
//! [Version]
//! current_version = 1.4.2
//!
//! [Remote Config]
//! url = https://downloads.example.com/game/manifest.ini
//! ```
//!
//! - `[Version] current_version` is the version currently installed. It is only
//!   rewritten after a package has been installed successfully.
//! - `[Remote Config] url` points at the remote manifest and is never written.
//!
//! Any other sections and keys are ignored by the updater and survive a version
//! write with their values and order intact. Comments and blank lines are not
//! carried over when the file is rewritten.
//!
//! Values are read raw: quotes, backslashes and `%`/`$` sequences are kept as
//! written, so URLs with query strings need no escaping.
//!
//! # Modules
//!
//! - `paths` - [`ResolvedPaths`], the locations one update attempt works on

pub mod paths;

pub use paths::ResolvedPaths;

use crate::constants::{REMOTE_CONFIG_SECTION, URL_KEY, VERSION_KEY, VERSION_SECTION};
use crate::core::UpdaterError;
use crate::utils::fs::atomic_write;
use ini::{EscapePolicy, Ini, ParseOption, WriteOption};
use std::path::Path;
use tracing::debug;

/// Values the workflow reads from the local configuration file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalConfig {
    /// Installed version, as written in the file
    pub current_version: String,
    /// URL of the remote manifest
    pub manifest_url: String,
}

impl LocalConfig {
    /// Read the local configuration file.
    ///
    /// # Errors
    ///
    /// - [`UpdaterError::ConfigNotFound`] if `path` does not exist
    /// - [`UpdaterError::ConfigMalformed`] if the file is not valid INI, or
    ///   `[Version] current_version` / `[Remote Config] url` is absent or empty
    pub fn load(path: &Path) -> Result<Self, UpdaterError> {
        if !path.is_file() {
            return Err(UpdaterError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let origin = format!("config file {}", path.display());
        let doc = parse_document(&origin, &content)?;

        let config = Self {
            current_version: require(&doc, &origin, VERSION_SECTION, VERSION_KEY)?,
            manifest_url: require(&doc, &origin, REMOTE_CONFIG_SECTION, URL_KEY)?,
        };
        debug!(
            "Loaded {}: version {}, manifest {}",
            path.display(),
            config.current_version,
            config.manifest_url
        );
        Ok(config)
    }
}

/// Rewrite `[Version] current_version` in the configuration file.
///
/// Everything else in the file is preserved. The file is replaced atomically, so
/// an interrupted write leaves the previous contents in place.
pub fn persist_version(path: &Path, version: &str) -> Result<(), UpdaterError> {
    let content = std::fs::read_to_string(path).map_err(|error| {
        if error.kind() == std::io::ErrorKind::NotFound {
            UpdaterError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            UpdaterError::Io(error)
        }
    })?;
    let mut doc = parse_document(&format!("config file {}", path.display()), &content)?;

    doc.with_section(Some(VERSION_SECTION)).set(VERSION_KEY, version);

    let mut rendered = Vec::new();
    doc.write_to_opt(
        &mut rendered,
        WriteOption {
            escape_policy: EscapePolicy::Nothing,
            kv_separator: " = ",
            ..WriteOption::default()
        },
    )?;

    atomic_write(path, &rendered).map_err(|error| UpdaterError::Other {
        message: format!("{error:#}"),
    })?;
    debug!("Recorded version {version} in {}", path.display());
    Ok(())
}

/// Parse an INI document without unquoting or unescaping values, attributing
/// syntax errors to `origin`.
pub(crate) fn parse_document(origin: &str, content: &str) -> Result<Ini, UpdaterError> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let options = ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    };
    Ini::load_from_str_opt(content, options)
        .map_err(|error| UpdaterError::malformed(origin, error.to_string()))
}

/// Fetch a required, non-empty value.
pub(crate) fn require(doc: &Ini, origin: &str, section: &str, key: &str) -> Result<String, UpdaterError> {
    let Some(properties) = doc.section(Some(section)) else {
        return Err(UpdaterError::malformed(origin, format!("missing section [{section}]")));
    };
    match properties.get(key).map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        Some(_) => Err(UpdaterError::malformed(origin, format!("[{section}] {key} is empty"))),
        None => Err(UpdaterError::malformed(origin, format!("missing key '{key}' in [{section}]"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("config.ini");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_valid_config() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "[Version]\ncurrent_version = 1.0.0\n\n[Remote Config]\nurl = http://host/m.ini?a=%s\n",
        );

        let config = LocalConfig::load(&path).unwrap();
        assert_eq!(config.current_version, "1.0.0");
        assert_eq!(config.manifest_url, "http://host/m.ini?a=%s");
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = LocalConfig::load(&dir.path().join("config.ini")).unwrap_err();
        assert!(matches!(err, UpdaterError::ConfigNotFound { .. }));
    }

    #[test]
    fn test_load_missing_remote_config_section() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[Version]\ncurrent_version = 1.0.0\n");

        let err = LocalConfig::load(&path).unwrap_err();
        assert!(matches!(err, UpdaterError::ConfigMalformed { .. }));
        assert!(err.to_string().contains("[Remote Config]"));
    }

    #[test]
    fn test_load_empty_version() {
        let dir = TempDir::new().unwrap();
        let path =
            write_config(&dir, "[Version]\ncurrent_version =\n[Remote Config]\nurl = http://x\n");

        let err = LocalConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_load_invalid_syntax() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "current_version = 1.0.0\n");
        assert!(matches!(LocalConfig::load(&path), Err(UpdaterError::ConfigMalformed { .. })));
    }

    #[test]
    fn test_load_keeps_quotes_and_backslashes() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            "[Version]\ncurrent_version = \"1.0.0\"\n[Remote Config]\nurl = file:\\\\share\\m.ini\n",
        );

        let config = LocalConfig::load(&path).unwrap();
        assert_eq!(config.current_version, "\"1.0.0\"");
        assert_eq!(config.manifest_url, "file:\\\\share\\m.ini");
    }

    #[test]
    fn test_persist_version_preserves_other_content() {
        let dir = TempDir::new().unwrap();
        let original = "# managed by the publisher\n[Version]\ncurrent_version = 1.0.0\nchannel = stable\n\n[Remote Config]\nurl = http://host/manifest.ini?sig=%2F\n\n[Extra]\nkey = value\n";
        let path = write_config(&dir, original);

        persist_version(&path, "1.1.0").unwrap();

        let updated = std::fs::read_to_string(&path).unwrap();
        let doc = parse_document("updated", &updated).unwrap();
        assert_eq!(require(&doc, "updated", "Version", "current_version").unwrap(), "1.1.0");
        assert_eq!(require(&doc, "updated", "Version", "channel").unwrap(), "stable");
        assert_eq!(
            require(&doc, "updated", "Remote Config", "url").unwrap(),
            "http://host/manifest.ini?sig=%2F"
        );
        assert_eq!(require(&doc, "updated", "Extra", "key").unwrap(), "value");

        let sections: Vec<_> = doc.sections().flatten().collect();
        assert_eq!(sections, ["Version", "Remote Config", "Extra"]);
        assert!(!dir.path().join("config.tmp").exists());
    }

    #[test]
    fn test_persist_version_adds_missing_key() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "[Remote Config]\nurl = http://host/m.ini\n");

        persist_version(&path, "2.0.0").unwrap();

        let config = LocalConfig::load(&path).unwrap();
        assert_eq!(config.current_version, "2.0.0");
        assert_eq!(config.manifest_url, "http://host/m.ini");
    }

    #[test]
    fn test_persist_version_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = persist_version(&dir.path().join("config.ini"), "1.0.0").unwrap_err();
        assert!(matches!(err, UpdaterError::ConfigNotFound { .. }));
    }
}
