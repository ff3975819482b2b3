//! Error handling for the updater
//!
//! The error system follows two rules:
//! 1. **Strongly-typed errors** so each workflow step fails with a precise variant
//! 2. **User-friendly messages** with actionable suggestions when shown at the top level
//!
//! # Architecture
//!
//! - [`UpdaterError`] - Every failure the update workflow can produce
//! - [`ErrorContext`] - Wrapper that adds a suggestion and details for terminal display
//!
//! # Fatal vs. Reported Errors
//!
//! Every variant raised by the first six workflow steps (config read, manifest fetch,
//! version comparison, download, install, config write) aborts the attempt.
//! [`UpdaterError::RelaunchFailed`] is the exception: the install has already
//! completed, so the workflow reports it and still finishes as "updated".
//!
//! # Examples
//!
//! ```rust,no_run
//! use app_updater::core::{UpdaterError, user_friendly_error};
//! use std::path::PathBuf;
//!
//! let error = UpdaterError::ConfigNotFound {
//!     path: PathBuf::from("Updater/config.ini"),
//! };
//!
//! let context = user_friendly_error(anyhow::Error::from(error));
//! context.display(); // Colored error with a suggestion
//! ```

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for update operations
///
/// Each variant maps to one failure mode of the update workflow and carries the
/// path, URL, or status code needed to explain it to the user.
///
/// ## Configuration
/// - [`ConfigNotFound`] - Local configuration file missing
/// - [`ConfigMalformed`] - Required section/key absent, empty, or unparseable
///
/// ## Network
/// - [`RemoteUnreachable`] - DNS, connection, timeout, or broken transfer
/// - [`RemoteFetchFailed`] - Server answered with a non-200 status
///
/// ## Versions
/// - [`VersionParseError`] - A version string is not a semantic version
///
/// ## Installation
/// - [`ExtractFailed`] - Package is corrupt or in an unsupported format
/// - [`InstallIoError`] - A delete or move in the install root failed
/// - [`RelaunchFailed`] - Main application could not be started (non-fatal)
///
/// [`ConfigNotFound`]: UpdaterError::ConfigNotFound
/// [`ConfigMalformed`]: UpdaterError::ConfigMalformed
/// [`RemoteUnreachable`]: UpdaterError::RemoteUnreachable
/// [`RemoteFetchFailed`]: UpdaterError::RemoteFetchFailed
/// [`VersionParseError`]: UpdaterError::VersionParseError
/// [`ExtractFailed`]: UpdaterError::ExtractFailed
/// [`InstallIoError`]: UpdaterError::InstallIoError
/// [`RelaunchFailed`]: UpdaterError::RelaunchFailed
#[derive(Error, Debug)]
pub enum UpdaterError {
    /// Local configuration file does not exist at the resolved path
    #[error("Local config file not found: {}", path.display())]
    ConfigNotFound {
        /// Path where the configuration file was expected
        path: PathBuf,
    },

    /// A configuration document is missing a required section or key
    ///
    /// Raised for both the local configuration file and the remote manifest,
    /// which share the same INI-style format.
    #[error("Invalid {origin}: {reason}")]
    ConfigMalformed {
        /// Which document was being read (e.g., "config file Updater/config.ini")
        origin: String,
        /// What is wrong with it
        reason: String,
    },

    /// Network-level failure before or during a transfer
    #[error("Cannot reach {url}: {reason}")]
    RemoteUnreachable {
        /// The URL that could not be reached
        url: String,
        /// Underlying network failure
        reason: String,
    },

    /// The server answered with a status other than 200
    #[error("Failed to fetch {url}: HTTP {status}")]
    RemoteFetchFailed {
        /// The requested URL
        url: String,
        /// HTTP status code returned by the server
        status: u16,
    },

    /// A version string could not be parsed as a semantic version
    #[error("Invalid version '{version}': {reason}")]
    VersionParseError {
        /// The version string as it appeared in the document
        version: String,
        /// Parser message
        reason: String,
    },

    /// The downloaded package could not be extracted
    #[error("Failed to extract package {}: {reason}", path.display())]
    ExtractFailed {
        /// Path of the downloaded archive
        path: PathBuf,
        /// Why extraction failed
        reason: String,
    },

    /// A filesystem operation in the install root failed
    ///
    /// The install root may be partially updated when this is returned after
    /// the delete phase has started; no rollback is attempted.
    #[error("Failed to {operation} {}: {source}", path.display())]
    InstallIoError {
        /// The operation that failed (e.g., "remove", "move")
        operation: String,
        /// The offending path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The main application could not be started after an update
    #[error("Failed to relaunch {}: {reason}", path.display())]
    RelaunchFailed {
        /// Executable that was launched
        path: PathBuf,
        /// Launch failure reason
        reason: String,
    },

    /// I/O failure outside the install root (workspace, config write)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Any other failure, message preformatted
    #[error("{message}")]
    Other {
        /// Human readable message
        message: String,
    },
}

impl UpdaterError {
    pub(crate) fn malformed(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigMalformed {
            origin: origin.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn install_io(
        operation: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::InstallIoError {
            operation: operation.into(),
            path: path.into(),
            source,
        }
    }
}

/// Error with a suggestion and details for terminal display
///
/// The updater runs as a console program that users double-click, so errors are
/// printed to stdout together with a short hint on how to recover.
///
/// ```rust,no_run
/// use app_updater::core::{ErrorContext, UpdaterError};
///
/// let context = ErrorContext::new(UpdaterError::RemoteFetchFailed {
///     url: "https://example.com/manifest.ini".to_string(),
///     status: 404,
/// })
/// .with_suggestion("Check the url in the [Remote Config] section");
///
/// println!("{context}");
/// ```
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: UpdaterError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context without suggestion or details
    #[must_use]
    pub const fn new(error: UpdaterError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details, and suggestion with terminal colors
    ///
    /// - Error message: red and bold
    /// - Details: yellow
    /// - Suggestion: green
    pub fn display(&self) {
        println!("{}: {}", "Error".red().bold(), self.error);

        if let Some(details) = &self.details {
            println!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            println!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`] with actionable suggestions
///
/// Recognises [`UpdaterError`] and [`std::io::Error`]; anything else is wrapped
/// in [`UpdaterError::Other`] with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    let error = match error.downcast::<UpdaterError>() {
        Ok(updater_error) => return create_error_context(updater_error),
        Err(other) => other,
    };

    let error = match error.downcast::<std::io::Error>() {
        Ok(io_error) => {
            let suggestion = match io_error.kind() {
                std::io::ErrorKind::PermissionDenied => {
                    "Run the updater with permission to write to the installation directory"
                }
                std::io::ErrorKind::NotFound => {
                    "Check that the file or directory exists and the path is correct"
                }
                _ => "Check free disk space and file permissions, then run the updater again",
            };
            return ErrorContext::new(UpdaterError::Io(io_error)).with_suggestion(suggestion);
        }
        Err(other) => other,
    };

    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(UpdaterError::Other {
        message,
    })
}

fn create_error_context(error: UpdaterError) -> ErrorContext {
    match &error {
        UpdaterError::ConfigNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Place config.ini next to the updater executable or pass --config <FILE>")
            .with_details("The config file needs a [Version] section with current_version and a [Remote Config] section with url"),

        UpdaterError::ConfigMalformed { .. } => ErrorContext::new(error)
            .with_suggestion("Add the missing section or key. Expected [Version] current_version plus [Remote Config] url (local) or [Download] url (manifest)"),

        UpdaterError::RemoteUnreachable { .. } => ErrorContext::new(error)
            .with_suggestion("Check your internet connection and that the server is online, then run the updater again")
            .with_details("Nothing was changed on disk"),

        UpdaterError::RemoteFetchFailed { status, .. } => {
            let suggestion = match status {
                404 => "The file does not exist on the server. Check the url in the [Remote Config] section or ask the publisher",
                401 | 403 => "The server refused access to the file. Ask the publisher to make it public",
                500..=599 => "The server is having problems. Try again later",
                _ => "Check the url in the [Remote Config] section",
            };
            ErrorContext::new(error).with_suggestion(suggestion)
        }

        UpdaterError::VersionParseError { .. } => ErrorContext::new(error)
            .with_suggestion("Versions must look like major.minor.patch, e.g. 1.4.2 or 2.0.0-beta.1"),

        UpdaterError::ExtractFailed { .. } => ErrorContext::new(error)
            .with_suggestion("The package may be corrupt. Run the updater again or ask the publisher to re-upload it")
            .with_details("Supported package formats are zip, tar and tar.gz. The installation was not modified"),

        UpdaterError::InstallIoError { .. } => ErrorContext::new(error)
            .with_suggestion("Close the application and any program using its files, check write permissions, then run the updater again")
            .with_details("The installation may be partially updated. Reinstall if the application no longer starts"),

        UpdaterError::RelaunchFailed { .. } => ErrorContext::new(error)
            .with_suggestion("The update was installed. Start the application manually"),

        UpdaterError::Io(_) | UpdaterError::Other { .. } => ErrorContext::new(error),
    }
}
