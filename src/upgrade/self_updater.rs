//! The update workflow from version check to relaunch.

use crate::config::{LocalConfig, ResolvedPaths, persist_version};
use crate::core::UpdaterError;
use crate::upgrade::download::{DownloadProgress, Downloader, Workspace};
use crate::upgrade::manifest::RemoteManifest;
use crate::upgrade::version_check::VersionComparison;
use crate::upgrade::{UpgradeConfig, archive, http, install, relaunch};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Milestones reported while the workflow runs.
///
/// The workflow itself never prints; the caller decides how to present these.
#[derive(Debug)]
pub enum UpdateEvent<'a> {
    /// The local configuration was read and the manifest is being fetched
    CheckingForUpdate {
        /// Manifest URL from the local configuration
        manifest_url: &'a str,
    },
    /// Both versions are known
    Compared(&'a VersionComparison),
    /// The package download is starting
    Downloading {
        /// Package URL from the manifest
        url: &'a str,
    },
    /// Bytes received so far
    Progress(DownloadProgress),
    /// The package was downloaded and is being extracted and installed
    Installing,
    /// The new version was recorded in the local configuration
    Installed {
        /// The recorded version
        version: &'a str,
    },
}

/// What happened to the main application after an update.
#[derive(Debug)]
pub enum RelaunchStatus {
    /// The application was started with this process id
    Started(u32),
    /// Relaunching was disabled
    Skipped,
    /// The application could not be started; the update itself succeeded
    Failed(UpdaterError),
}

/// Result of a completed update attempt.
#[derive(Debug)]
pub enum UpdateOutcome {
    /// The installed version is the same as or newer than the published one
    UpToDate {
        /// Installed version, as written in the config file
        installed: String,
        /// Published version, as written in the manifest
        latest: String,
    },
    /// A newer version exists but check-only mode stopped before downloading
    UpdateAvailable {
        /// Installed version
        installed: String,
        /// Published version
        latest: String,
    },
    /// The package was installed and the new version recorded
    Updated {
        /// Version that was replaced
        from: String,
        /// Version now installed
        to: String,
        /// Relaunch result
        relaunch: RelaunchStatus,
    },
}

/// Runs the update workflow for one installation.
///
/// Every step is awaited in order; nothing runs concurrently and nothing is
/// retried.
///
/// 1. Read `[Version]` and `[Remote Config]` from the local configuration
/// 2. Fetch the remote manifest
/// 3. Compare versions and stop if the installation is current
/// 4. Download the package into a temporary workspace
/// 5. Extract it and replace the install root, keeping the updater directory
/// 6. Remove the workspace, then record the new version
/// 7. Start the main application
///
/// # Examples
///
/// ```rust,no_run
/// use app_updater::config::ResolvedPaths;
/// use app_updater::upgrade::{SelfUpdater, UpdateOutcome, UpgradeConfig};
///
/// # async fn example() -> Result<(), app_updater::core::UpdaterError> {
/// let paths = ResolvedPaths::from_updater_dir("/opt/game/Updater");
/// let updater = SelfUpdater::new(paths).with_config(UpgradeConfig::new().with_relaunch(false));
///
/// match updater.run(|_| {}).await? {
///     UpdateOutcome::Updated { to, .. } => println!("Updated to {to}"),
///     _ => println!("Nothing to do"),
/// }
/// # Ok(())
/// # }
/// ```
pub struct SelfUpdater {
    paths: ResolvedPaths,
    config: UpgradeConfig,
}

impl SelfUpdater {
    /// Create an updater for the installation described by `paths`.
    pub fn new(paths: ResolvedPaths) -> Self {
        Self {
            paths,
            config: UpgradeConfig::default(),
        }
    }

    /// Replace the behaviour settings.
    #[must_use]
    pub fn with_config(mut self, config: UpgradeConfig) -> Self {
        self.config = config;
        self
    }

    /// Locations this updater works on.
    pub fn paths(&self) -> &ResolvedPaths {
        &self.paths
    }

    /// Run the workflow, reporting milestones to `on_event`.
    ///
    /// # Errors
    ///
    /// Any fatal [`UpdaterError`] from steps 1 to 6. A failed relaunch is not an
    /// error; it is reported as [`RelaunchStatus::Failed`].
    pub async fn run(
        &self,
        mut on_event: impl FnMut(UpdateEvent<'_>),
    ) -> Result<UpdateOutcome, UpdaterError> {
        let local = LocalConfig::load(&self.paths.config_file)?;
        on_event(UpdateEvent::CheckingForUpdate {
            manifest_url: &local.manifest_url,
        });

        let client = http::build_client(&self.config)?;
        let manifest = RemoteManifest::fetch(&client, &local.manifest_url).await?;

        let comparison = VersionComparison::new(&local.current_version, &manifest.version)?;
        on_event(UpdateEvent::Compared(&comparison));

        if !comparison.update_available() {
            info!("Already on latest version {}", local.current_version);
            return Ok(UpdateOutcome::UpToDate {
                installed: local.current_version,
                latest: manifest.version,
            });
        }

        if self.config.check_only {
            info!("Update available: {} -> {}", local.current_version, manifest.version);
            return Ok(UpdateOutcome::UpdateAvailable {
                installed: local.current_version,
                latest: manifest.version,
            });
        }

        info!("Updating {} -> {}", local.current_version, manifest.version);
        let workspace = Workspace::create(self.config.workspace_parent.as_deref())?;
        let installed = self
            .download_and_install(&Downloader::new(client), &manifest, &workspace, &mut on_event)
            .await;
        workspace.close();
        installed?;

        persist_version(&self.paths.config_file, &manifest.version)?;
        on_event(UpdateEvent::Installed {
            version: &manifest.version,
        });

        let relaunch = self.relaunch();
        Ok(UpdateOutcome::Updated {
            from: local.current_version,
            to: manifest.version,
            relaunch,
        })
    }

    async fn download_and_install(
        &self,
        downloader: &Downloader,
        manifest: &RemoteManifest,
        workspace: &Workspace,
        on_event: &mut impl FnMut(UpdateEvent<'_>),
    ) -> Result<(), UpdaterError> {
        on_event(UpdateEvent::Downloading {
            url: &manifest.download_url,
        });
        let package = downloader
            .download(&manifest.download_url, workspace, |progress| {
                on_event(UpdateEvent::Progress(progress));
            })
            .await?;

        on_event(UpdateEvent::Installing);
        let extract_dir = workspace.extract_dir();
        archive::extract(&package, &extract_dir)?;
        install::replace_install_root(
            &self.paths.install_root,
            &extract_dir,
            &self.paths.updater_dir_name,
        )?;
        Ok(())
    }

    fn relaunch(&self) -> RelaunchStatus {
        if !self.config.relaunch {
            debug!("Relaunch disabled");
            return RelaunchStatus::Skipped;
        }

        let executable: PathBuf = self.paths.executable_path();
        match relaunch::relaunch(&executable, &self.paths.install_root) {
            Ok(pid) => RelaunchStatus::Started(pid),
            Err(error) => {
                warn!("{error}");
                RelaunchStatus::Failed(error)
            }
        }
    }
}
