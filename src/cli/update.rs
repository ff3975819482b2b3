//! Console presentation of the update workflow.

use crate::cli::CliConfig;
use crate::core::user_friendly_error;
use crate::upgrade::{RelaunchStatus, SelfUpdater, UpdateEvent, UpdateOutcome};
use crate::utils::progress::ProgressBar;
use anyhow::Result;
use colored::Colorize;

/// How the run ended, when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The application was started; the updater should exit right away
    Relaunched,
    /// Nothing left to do; the updater may wait for Enter before exiting
    Finished,
}

pub(super) async fn run(config: CliConfig) -> Result<Completion> {
    let show_progress = config.upgrade.show_progress;
    let updater = SelfUpdater::new(config.paths).with_config(config.upgrade);
    let mut progress: Option<ProgressBar> = None;

    let outcome = updater
        .run(|event| match event {
            UpdateEvent::CheckingForUpdate { .. } => {
                println!("{}", "Checking for updates...".cyan());
            }
            UpdateEvent::Compared(comparison) => {
                let info = comparison.format_version_info();
                if comparison.update_available() {
                    println!("{}", info.yellow());
                } else {
                    println!("{}", info.green());
                }
            }
            UpdateEvent::Downloading { url } => {
                println!("{} {url}", "Downloading".cyan());
            }
            UpdateEvent::Progress(update) => {
                let bar = progress.get_or_insert_with(|| {
                    let bar = ProgressBar::for_download(update.total_bytes, show_progress);
                    bar.set_message("Downloading");
                    bar
                });
                bar.set_position(update.bytes_downloaded);
            }
            UpdateEvent::Installing => {
                if let Some(bar) = progress.take() {
                    bar.finish_with_message("Downloaded");
                }
                println!("{}", "Installing update...".cyan());
            }
            UpdateEvent::Installed { version } => {
                println!("{}", format!("Updated to version {version}").green().bold());
            }
        })
        .await;

    // A failed download leaves the bar on screen otherwise
    if let Some(bar) = progress.take() {
        bar.finish_and_clear();
    }

    match outcome? {
        UpdateOutcome::UpToDate { .. } => Ok(Completion::Finished),
        UpdateOutcome::UpdateAvailable { .. } => {
            println!("Run the updater without --check to install it");
            Ok(Completion::Finished)
        }
        UpdateOutcome::Updated { relaunch, .. } => match relaunch {
            RelaunchStatus::Started(_) => {
                println!("Starting {}...", updater.paths().executable.display());
                Ok(Completion::Relaunched)
            }
            RelaunchStatus::Skipped => Ok(Completion::Finished),
            RelaunchStatus::Failed(error) => {
                user_friendly_error(anyhow::Error::from(error)).display();
                Ok(Completion::Finished)
            }
        },
    }
}
