//! Starting the main application once the update is installed.
//!
//! The child is fully detached: it gets its own process group (a new console
//! process group on Windows), no inherited stdio, and the install root as its
//! working directory, so it keeps running after the updater exits.

use crate::core::UpdaterError;
use crate::utils::fs::absolute_path;
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::info;

#[cfg(windows)]
const DETACHED_PROCESS: u32 = 0x0000_0008;
#[cfg(windows)]
const CREATE_NEW_PROCESS_GROUP: u32 = 0x0000_0200;

/// Launch `executable` detached, with `working_dir` as its working directory.
///
/// Returns the child's process id. The child is not waited for. Relative paths
/// are resolved against the updater's working directory before spawning.
///
/// # Errors
///
/// [`UpdaterError::RelaunchFailed`] if the executable is missing or cannot be
/// started. Callers report this error without failing the update.
pub fn relaunch(executable: &Path, working_dir: &Path) -> Result<u32, UpdaterError> {
    let executable = absolute_path(executable);
    let failed = |reason: String| UpdaterError::RelaunchFailed {
        path: executable.clone(),
        reason,
    };

    if !executable.is_file() {
        return Err(failed("executable not found".to_string()));
    }

    let mut command = Command::new(&executable);
    command
        .current_dir(absolute_path(working_dir))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());
    detach(&mut command);

    let child = command.spawn().map_err(|error| failed(error.to_string()))?;
    info!("Started {} (pid {})", executable.display(), child.id());
    Ok(child.id())
}

#[cfg(unix)]
fn detach(command: &mut Command) {
    use std::os::unix::process::CommandExt;
    command.process_group(0);
}

#[cfg(windows)]
fn detach(command: &mut Command) {
    use std::os::windows::process::CommandExt;
    command.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
}

#[cfg(not(any(unix, windows)))]
fn detach(_command: &mut Command) {}
