//! Core types shared by every part of the updater.
//!
//! Currently this is the error layer: [`UpdaterError`] for typed failures and
//! [`ErrorContext`] / [`user_friendly_error`] for presenting them in the console.

pub mod error;

pub use error::{ErrorContext, UpdaterError, user_friendly_error};
