//! Updater entry point
//!
//! Parses arguments, runs the update workflow on a single-threaded runtime,
//! prints any error with a suggestion, and waits for Enter unless the
//! application was relaunched.

use app_updater::cli::{self, Completion};
use app_updater::core::user_friendly_error;
use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let pause = cli.should_pause();

    let result = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(anyhow::Error::from)
        .and_then(|runtime| runtime.block_on(cli.execute()));

    let code = match result {
        // The application is running; leave without waiting
        Ok(Completion::Relaunched) => return ExitCode::SUCCESS,
        Ok(Completion::Finished) => ExitCode::SUCCESS,
        Err(e) => {
            user_friendly_error(e).display();
            ExitCode::FAILURE
        }
    };

    if pause {
        cli::wait_for_enter();
    }
    code
}
