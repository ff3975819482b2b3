//! Cross-platform utilities and helpers
//!
//! # Modules
//!
//! - [`fs`] - Atomic writes, entry removal, cross-filesystem moves, and path
//!   normalization
//! - [`progress`] - Download progress bars and spinners
//!
//! # Example
//!
//! Replacing one entry of an install root with its extracted counterpart:
//!
//! ```rust,no_run
//! use app_updater::utils::{move_entry, remove_entry};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let target = Path::new("/opt/game/data");
//! remove_entry(target)?;
//! move_entry(Path::new("/tmp/app-updater-x/extracted/data"), target)?;
//! # Ok(())
//! # }
//! ```

pub mod fs;
pub mod progress;

pub use fs::{absolute_path, atomic_write, ensure_dir, move_entry, remove_entry};
pub use progress::ProgressBar;
