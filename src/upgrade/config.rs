//! Behaviour settings for one update attempt.

use crate::constants::{DEFAULT_CONNECT_TIMEOUT, DEFAULT_REQUEST_TIMEOUT};
use std::path::PathBuf;
use std::time::Duration;

/// Settings for the update workflow that are not part of the config file.
///
/// Filesystem locations live in [`ResolvedPaths`](crate::config::ResolvedPaths);
/// this struct only carries timeouts and behaviour toggles.
///
/// # Examples
///
/// ```rust
/// use app_updater::upgrade::UpgradeConfig;
/// use std::time::Duration;
///
/// let config = UpgradeConfig::new()
///     .with_request_timeout(Duration::from_secs(60))
///     .with_relaunch(false);
/// assert!(!config.relaunch);
/// ```
#[derive(Debug, Clone)]
pub struct UpgradeConfig {
    /// Overall timeout for each HTTP request, body included
    pub request_timeout: Duration,

    /// Timeout for establishing a connection
    pub connect_timeout: Duration,

    /// Start the main application after a successful update
    pub relaunch: bool,

    /// Draw a progress bar while downloading
    pub show_progress: bool,

    /// Only compare versions; never download or install
    pub check_only: bool,

    /// Directory in which the temporary workspace is created
    ///
    /// `None` uses the system temporary directory.
    pub workspace_parent: Option<PathBuf>,
}

impl Default for UpgradeConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            relaunch: true,
            show_progress: true,
            check_only: false,
            workspace_parent: None,
        }
    }
}

impl UpgradeConfig {
    /// Create a configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the overall request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Set the connect timeout.
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Enable or disable relaunching the application.
    #[must_use]
    pub const fn with_relaunch(mut self, relaunch: bool) -> Self {
        self.relaunch = relaunch;
        self
    }

    /// Enable or disable the download progress bar.
    #[must_use]
    pub const fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Stop after the version comparison.
    #[must_use]
    pub const fn with_check_only(mut self, check_only: bool) -> Self {
        self.check_only = check_only;
        self
    }

    /// Create temporary workspaces inside `dir`.
    #[must_use]
    pub fn with_workspace_parent(mut self, dir: impl Into<PathBuf>) -> Self {
        self.workspace_parent = Some(dir.into());
        self
    }
}
