//! File system utilities
//!
//! # Modules
//!
//! - `atomic` - Temp-and-rename writes for the configuration file
//! - `dirs` - Directory creation and removal of arbitrary entries
//! - `moves` - Rename with a copy fallback across filesystems
//! - `paths` - Absolute, normalized paths for the install layout

pub mod atomic;
pub mod dirs;
pub mod moves;
pub mod paths;

pub use atomic::atomic_write;
pub use dirs::{ensure_dir, remove_entry};
pub use moves::{copy_entry, move_entry};
pub use paths::{absolute_path, normalize_path};
