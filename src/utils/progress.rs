//! Progress indicators for the package download
//!
//! Wraps `indicatif` so the rest of the updater never touches its styling:
//!
//! - [`ProgressBar::for_download`] with a known size shows a byte bar with a
//!   percentage
//! - without a size it falls back to a spinner that counts bytes
//!
//! # Environment Variables
//!
//! - `APP_UPDATER_NO_PROGRESS`: Set to any value to hide all progress indicators
//!
//! # Examples
//!
//! ```rust
//! use app_updater::utils::progress::ProgressBar;
//!
//! let progress = ProgressBar::for_download(Some(1024), true);
//! progress.set_message("Downloading update");
//! progress.set_position(512);
//! progress.finish_with_message("Download complete");
//! ```

use crate::constants::NO_PROGRESS_ENV;
use indicatif::{ProgressBar as IndicatifBar, ProgressStyle as IndicatifStyle};
use std::time::Duration;

/// Checks if progress bars should be disabled.
///
/// Progress bars are disabled when `APP_UPDATER_NO_PROGRESS` is set to any value.
pub fn is_progress_disabled() -> bool {
    std::env::var_os(NO_PROGRESS_ENV).is_some()
}

/// A progress indicator with the updater's styling.
///
/// Hidden bars accept every call and draw nothing, so callers never branch on
/// whether progress is shown.
#[derive(Clone)]
pub struct ProgressBar {
    inner: IndicatifBar,
}

impl ProgressBar {
    /// Creates the indicator for a download of `total_bytes`.
    ///
    /// `None` means the server did not announce a size and yields a spinner.
    /// When `enabled` is false or progress is disabled through the environment,
    /// a hidden indicator is returned.
    pub fn for_download(total_bytes: Option<u64>, enabled: bool) -> Self {
        if !enabled || is_progress_disabled() {
            return Self::hidden();
        }

        let bar = match total_bytes {
            Some(total) => {
                let bar = IndicatifBar::new(total);
                bar.set_style(download_style());
                bar
            }
            None => {
                let bar = IndicatifBar::new_spinner();
                bar.set_style(spinner_style());
                bar.enable_steady_tick(Duration::from_millis(100));
                bar
            }
        };
        Self { inner: bar }
    }

    /// Creates an indicator that never draws.
    pub fn hidden() -> Self {
        Self {
            inner: IndicatifBar::hidden(),
        }
    }

    /// Sets the message displayed alongside the indicator.
    pub fn set_message(&self, msg: impl Into<String>) {
        self.inner.set_message(msg.into());
    }

    /// Sets the number of bytes transferred so far.
    pub fn set_position(&self, pos: u64) {
        self.inner.set_position(pos);
    }

    /// Finishes the indicator and leaves `msg` on screen.
    pub fn finish_with_message(&self, msg: impl Into<String>) {
        self.inner.finish_with_message(msg.into());
    }

    /// Finishes the indicator and removes it from the terminal.
    pub fn finish_and_clear(&self) {
        self.inner.finish_and_clear();
    }

    /// Returns `true` if the indicator draws nothing.
    pub fn is_hidden(&self) -> bool {
        self.inner.is_hidden()
    }
}

fn download_style() -> IndicatifStyle {
    IndicatifStyle::default_bar()
        .template("{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} {percent}% ({eta})")
        .unwrap_or_else(|_| IndicatifStyle::default_bar())
        .progress_chars("━╸━")
}

fn spinner_style() -> IndicatifStyle {
    IndicatifStyle::default_spinner()
        .template("{spinner:.cyan} {msg} {bytes}")
        .unwrap_or_else(|_| IndicatifStyle::default_spinner())
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
}
