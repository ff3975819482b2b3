//! Test utilities for the updater
//!
//! Helpers for unit and integration tests:
//! - [`TestInstall`] lays out a throwaway installation with an updater
//!   directory and a local config file
//! - [`fixtures`] builds zip and tar.gz packages in memory
//!
//! # Example
//!
//! ```rust,no_run
//! use app_updater::test_utils::{TestInstall, fixtures};
//!
//! # fn example() -> anyhow::Result<()> {
//! let install = TestInstall::new("1.0.0", "http://127.0.0.1:9/manifest.ini")?;
//! install.write_file("a.txt", "old")?;
//! let package = fixtures::zip_package(&[("a.txt", "new")])?;
//! # Ok(())
//! # }
//! ```

pub mod environment;
pub mod fixtures;

pub use environment::TestInstall;

use std::sync::OnceLock;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static LOGGING: OnceLock<()> = OnceLock::new();

/// Send the updater's logs to the test output.
///
/// `RUST_LOG` wins when set; otherwise `level` applies to this crate only. With
/// neither, nothing is installed. Later calls are ignored.
///
/// ```bash
/// RUST_LOG=app_updater=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    LOGGING.get_or_init(|| {
        let filter = match (EnvFilter::try_from_default_env(), level) {
            (Ok(filter), _) => filter,
            (Err(_), Some(level)) => EnvFilter::new(format!("app_updater={level}")),
            (Err(_), None) => return,
        };

        let _ = tracing_subscriber::fmt().with_env_filter(filter).with_test_writer().try_init();
    });
}
