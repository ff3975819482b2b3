//! Global constants used throughout the updater.
//!
//! File names, section/key names of the INI documents, and network timeouts
//! live here so the workflow modules and the tests agree on them.

use std::time::Duration;

/// Name of the local configuration file inside the updater directory.
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Name of the updater's own directory inside the install root.
///
/// Used when the directory name cannot be derived from the running executable.
pub const DEFAULT_UPDATER_DIR_NAME: &str = "Updater";

/// Main application executable relaunched after an update.
#[cfg(windows)]
pub const DEFAULT_EXECUTABLE: &str = "Game.exe";

/// Main application executable relaunched after an update.
#[cfg(not(windows))]
pub const DEFAULT_EXECUTABLE: &str = "Game";

/// Section holding the version in both the local config and the manifest.
pub const VERSION_SECTION: &str = "Version";

/// Key holding the version in both the local config and the manifest.
pub const VERSION_KEY: &str = "current_version";

/// Local config section holding the manifest location.
pub const REMOTE_CONFIG_SECTION: &str = "Remote Config";

/// Manifest section holding the package location.
pub const DOWNLOAD_SECTION: &str = "Download";

/// Key holding a URL in the `Remote Config` and `Download` sections.
pub const URL_KEY: &str = "url";

/// File name for the downloaded package when the URL does not provide one.
pub const FALLBACK_PACKAGE_NAME: &str = "new_version.zip";

/// Subdirectory of the temporary workspace that receives the extracted package.
pub const EXTRACT_DIR_NAME: &str = "extracted";

/// Prefix of the temporary workspace directory.
pub const WORKSPACE_PREFIX: &str = "app-updater-";

/// Environment variable that hides progress bars when set.
pub const NO_PROGRESS_ENV: &str = "APP_UPDATER_NO_PROGRESS";

/// Overall timeout for a single HTTP request, including the body transfer (10 minutes).
///
/// Packages can be large; the timeout only guards against a transfer that
/// stalls forever.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(600);

/// Timeout for establishing a TCP/TLS connection (30 seconds).
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
