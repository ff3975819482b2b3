//! Command-line interface for the updater.
//!
//! The updater is normally started without arguments by double-clicking it in
//! its directory next to the application. Every path it uses is derived from
//! the location of its own executable; flags (or `APP_UPDATER_*` environment
//! variables) override those defaults for development and automation.
//!
//! # Examples
//!
//! ```bash
//! # Packaged use: update the installation this updater belongs to
//! updater
//!
//! # Only report whether an update exists
//! updater --check --no-pause
//!
//! # Update a development tree; the install root is the parent of the config's
//! # directory, resolved against the working directory
//! updater --config ./dev/game/Updater/config.ini
//! ```
//!
//! # Logging
//!
//! Status messages go to stdout. Diagnostic logs go to stderr and are off
//! below `warn` unless `--verbose` is given; `RUST_LOG` overrides both.

mod update;


pub use update::Completion;

use crate::config::ResolvedPaths;
use crate::upgrade::UpgradeConfig;
use crate::utils::fs::absolute_path;
use anyhow::Result;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Resolved settings for one run, built from [`Cli`].
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Filter directive for the log subscriber
    pub log_level: String,
    /// Locations to update
    pub paths: ResolvedPaths,
    /// Workflow settings
    pub upgrade: UpgradeConfig,
}

/// Self-updater for a locally installed application.
#[derive(Parser, Debug)]
#[command(
    name = "updater",
    about = "Update the installed application to the latest published version",
    version,
    long_about = "Reads the installed version from config.ini, compares it with the version \
                  published in the remote manifest, and when a newer version exists downloads \
                  the package, replaces the installation (keeping the updater's own directory), \
                  records the new version and restarts the application."
)]
pub struct Cli {
    /// Local configuration file [default: <updater dir>/config.ini]
    #[arg(long, value_name = "FILE", env = "APP_UPDATER_CONFIG")]
    config: Option<PathBuf>,

    /// Directory whose contents are replaced [default: parent of the updater dir]
    #[arg(long, value_name = "DIR", env = "APP_UPDATER_INSTALL_ROOT")]
    install_root: Option<PathBuf>,

    /// Name of the directory inside the install root that is never replaced
    /// [default: name of the updater dir]
    #[arg(long, value_name = "NAME", env = "APP_UPDATER_DIR_NAME")]
    updater_dir: Option<String>,

    /// Executable started after updating, relative to the install root
    #[arg(long, value_name = "NAME", env = "APP_UPDATER_EXECUTABLE")]
    executable: Option<PathBuf>,

    /// Timeout in seconds for each HTTP request
    #[arg(long, value_name = "SECS", env = "APP_UPDATER_TIMEOUT")]
    timeout: Option<u64>,

    /// Only report whether an update is available
    #[arg(long)]
    check: bool,

    /// Do not start the application after updating
    #[arg(long, env = "APP_UPDATER_NO_RELAUNCH")]
    no_relaunch: bool,

    /// Exit without waiting for Enter
    #[arg(long, env = "APP_UPDATER_NO_PAUSE")]
    no_pause: bool,

    /// Hide the download progress bar
    #[arg(long)]
    no_progress: bool,

    /// Enable debug logging on stderr
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    /// Run the updater with the given configuration.
    pub async fn execute(self) -> Result<Completion> {
        let paths = self.resolve_paths()?;
        let config = self.build_config(paths);
        init_logging(&config.log_level);
        update::run(config).await
    }

    /// Locations derived from the running executable, with overrides applied.
    pub fn resolve_paths(&self) -> Result<ResolvedPaths> {
        let mut paths = match &self.config {
            // An explicit config file makes its directory the updater dir
            Some(config) => {
                let config = absolute_path(config);
                let dir = config.parent().unwrap_or(config.as_path());
                ResolvedPaths::from_updater_dir(dir).with_config_file(&config)
            }
            None => ResolvedPaths::from_current_exe()?,
        };

        if let Some(root) = &self.install_root {
            paths = paths.with_install_root(root);
        }
        if let Some(name) = &self.updater_dir {
            paths = paths.with_updater_dir_name(name);
        }
        if let Some(executable) = &self.executable {
            paths = paths.with_executable(executable);
        }
        Ok(paths)
    }

    /// Build the run configuration from the parsed flags.
    #[must_use]
    pub fn build_config(&self, paths: ResolvedPaths) -> CliConfig {
        let log_level = if self.verbose {
            "app_updater=debug,warn"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        };

        let mut upgrade = UpgradeConfig::new()
            .with_relaunch(!self.no_relaunch)
            .with_progress(!self.no_progress)
            .with_check_only(self.check);
        if let Some(secs) = self.timeout {
            upgrade = upgrade.with_request_timeout(Duration::from_secs(secs));
        }

        CliConfig {
            log_level: log_level.to_string(),
            paths,
            upgrade,
        }
    }

    /// Returns `true` if the process should wait for Enter before exiting.
    pub fn should_pause(&self) -> bool {
        !self.no_pause && std::io::stdin().is_terminal()
    }
}

/// Install the stderr log subscriber. `RUST_LOG` takes precedence over `level`.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Block until the user presses Enter.
pub fn wait_for_enter() {
    println!();
    println!("Press Enter to exit...");
    let mut line = String::new();
    let _ = std::io::stdin().read_line(&mut line);
}
