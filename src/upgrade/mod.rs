//! The update workflow.
//!
//! Compares the installed version with the one published in a remote manifest
//! and, when the published version is newer, replaces the installation with the
//! published package.
//!
//! # Update Process Flow
//!
//! ```text
//! 1. Local state
//!    └── Read [Version] current_version and [Remote Config] url
//!
//! 2. Manifest
//!    └── GET the manifest: [Version] current_version, [Download] url
//!
//! 3. Version comparison (SemVer precedence)
//!    └── Stop here when the installation is current
//!
//! 4. Download
//!    └── Stream the package into a temporary workspace
//!
//! 5. Install
//!    ├── Extract into <workspace>/extracted
//!    ├── Remove every entry of the install root except the updater directory
//!    └── Move the extracted entries into the install root
//!
//! 6. State
//!    ├── Remove the workspace (also when step 4 or 5 failed)
//!    └── Record the new version in the local configuration
//!
//! 7. Relaunch
//!    └── Start the main application detached (best effort)
//! ```
//!
//! # Limitations
//!
//! - The manifest and the package are trusted as served; there is no checksum
//!   or signature verification.
//! - Installation is not transactional and keeps no backup. A failure after the
//!   first removal leaves a partially updated install root.
//!
//! # Module Structure
//!
//! - [`self_updater`]: [`SelfUpdater`], the workflow itself
//! - [`manifest`]: fetching and parsing the remote manifest
//! - [`version_check`]: lenient SemVer parsing and comparison
//! - [`download`]: streaming download and the temporary workspace
//! - [`archive`]: zip/tar/tar.gz detection and extraction
//! - [`install`]: replacement of the install root
//! - [`relaunch`]: detached start of the main application
//! - [`config`]: timeouts and behaviour toggles

pub mod archive;
pub mod config;
pub mod download;
pub mod http;
pub mod install;
pub mod manifest;
pub mod relaunch;
pub mod self_updater;
pub mod version_check;


pub use config::UpgradeConfig;
pub use download::{DownloadProgress, Downloader, Workspace};
pub use manifest::RemoteManifest;
pub use self_updater::{RelaunchStatus, SelfUpdater, UpdateEvent, UpdateOutcome};
pub use version_check::VersionComparison;
