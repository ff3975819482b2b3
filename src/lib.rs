//! app-updater - self-updater for a locally installed application
//!
//! The updater lives in its own directory inside the application's install root.
//! When run, it compares the installed version recorded in its `config.ini` with
//! the version published in a remote manifest and, if the published version is
//! newer, replaces the installation with the published package and restarts the
//! application.
//!
//! # Architecture Overview
//!
//! One linear workflow, run once per invocation:
//!
//! 1. **Local state** - `[Version] current_version` and `[Remote Config] url`
//! 2. **Manifest** - `[Version] current_version` and `[Download] url` over HTTP
//! 3. **Version comparison** - SemVer precedence; stops when up to date
//! 4. **Download** - streamed into a temporary workspace with progress
//! 5. **Install** - extract, then replace every entry of the install root
//!    except the updater directory
//! 6. **State** - record the new version, preserving the rest of `config.ini`
//! 7. **Relaunch** - start the application detached (best effort)
//!
//! # Core Modules
//!
//! - [`cli`] - Argument parsing, logging setup, and console output
//! - [`config`] - `config.ini` reading/writing and path resolution
//! - [`core`] - Error types and user-facing error formatting
//! - [`upgrade`] - The update workflow and its steps
//! - [`utils`] - Filesystem helpers and progress bars
//!
//! # Files
//!
//! ```ini
//! ; <install root>/Updater/config.ini
//! [Version]
//! current_version = 1.0.0
//!
//! [Remote Config]
//! url = https://downloads.example.com/game/manifest.ini
//! ```
//!
//! ```ini
//! ; manifest.ini served by the publisher
//! [Version]
//! current_version = 1.1.0
//!
//! [Download]
//! url = https://downloads.example.com/game/game-1.1.0.zip
//! ```
//!
//! # Command-Line Usage
//!
//! ```bash
//! # Update the installation this updater belongs to
//! updater
//!
//! # Report only
//! updater --check
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod upgrade;
pub mod utils;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
